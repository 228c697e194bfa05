//! Plain-text rendering of items, pages and readmes

use std::{
    fmt,
    io::{self, Write},
};

use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use itertools::Itertools;

use crate::domain::{DataSource, Item, ItemPage, Readme};

/// Width of the star column in [`ItemPage::draw`], in characters
pub const STAR_LABEL_WIDTH: usize = 10;

const STAR: &str = "⭐️";

fn field(f: &mut fmt::Formatter, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "\t{label:<11}: {value}")
}

fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_default()
}

impl Item {
    fn fmt_official(&self, f: &mut fmt::Formatter) -> fmt::Result {
        field(f, "Name", self.repository_name())?;
        field(f, "URL", self.repository_url())?;
        field(f, "Star", format_args!("{STAR} {}", self.stargazers_count))?;
        field(f, "Clone URL", self.clone_url())?;
        field(f, "Description", &self.description)?;
        field(f, "Watchers", self.watchers)?;
        field(f, "Topics", format_args!("[{}]", self.topics.iter().join(" ")))?;
        field(f, "Language", &self.language)?;
        field(f, "CreatedAt", timestamp(self.created_at))?;
        field(f, "UpdatedAt", timestamp(self.updated_at))
    }

    fn fmt_trending(&self, f: &mut fmt::Formatter) -> fmt::Result {
        field(f, "Name", self.repository_name())?;
        field(f, "URL", self.repository_url())?;
        field(f, "Star", format_args!("{STAR} {}", self.star_count()))?;
        field(f, "Clone URL", self.clone_url())?;
        field(f, "Description", self.description())?;
        field(f, "Language", self.language())
    }

    /// Star label used by the batch listing, padded or cut to [`STAR_LABEL_WIDTH`]
    pub fn star_label(&self) -> String {
        let label = format!(" {STAR} {}", self.star_count());
        format!("{label:<width$.width$}", width = STAR_LABEL_WIDTH)
    }
}

/// Detail block. Official items get the full layout, trending items the
/// compact one.
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        match self.data_source {
            DataSource::OfficialApi => self.fmt_official(f),
            DataSource::TrendingApi => self.fmt_trending(f),
        }
    }
}

impl ItemPage {
    /// Writes one line per item: the star label followed by the repository
    /// name in green (palette color 2, `ESC[38;5;2m`, reset with `ESC[39m`).
    /// No color is written when `NO_COLOR` is set.
    pub fn draw<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for item in self {
            writeln!(
                writer,
                "{}{}",
                item.star_label(),
                item.repository_name().as_str().dark_green()
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Readme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        field(f, "Name", &self.name)?;
        field(f, "Path", &self.path)?;
        field(f, "URL", &self.html_url)?;
        field(f, "Download", &self.download_url)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn official() -> Item {
        Item {
            full_name: "rust-lang/rust".into(),
            html_url: "https://github.com/rust-lang/rust".into(),
            description: "Empowering everyone".into(),
            stargazers_count: 90000,
            watchers: 1500,
            topics: vec!["compiler".into(), "language".into()],
            language: "Rust".into(),
            created_at: Some(Utc.with_ymd_and_hms(2010, 6, 16, 20, 39, 3).unwrap()),
            data_source: DataSource::OfficialApi,
            ..Default::default()
        }
    }

    fn trending(name: &str, stars: &str) -> Item {
        Item {
            url: format!("https://github.com/{name}").into(),
            stars: stars.into(),
            desc: "fast".into(),
            lang: "Go".into(),
            data_source: DataSource::TrendingApi,
            ..Default::default()
        }
    }

    #[test]
    fn official_layout_shows_raw_fields() {
        let text = official().to_string();
        let expected = "\n\
            \tName       : rust-lang/rust\n\
            \tURL        : https://github.com/rust-lang/rust\n\
            \tStar       : ⭐️ 90000\n\
            \tClone URL  : https://github.com/rust-lang/rust.git\n\
            \tDescription: Empowering everyone\n\
            \tWatchers   : 1500\n\
            \tTopics     : [compiler language]\n\
            \tLanguage   : Rust\n\
            \tCreatedAt  : 2010-06-16T20:39:03Z\n\
            \tUpdatedAt  : \n";
        assert_eq!(text, expected);
    }

    #[test]
    fn official_layout_ignores_fallback_fields() {
        let item = Item {
            description: "".into(),
            desc: "fallback".into(),
            ..official()
        };
        assert!(item.to_string().contains("\tDescription: \n"));
    }

    #[test]
    fn trending_layout_uses_resolved_fields() {
        let text = trending("a/b", "1,200").to_string();
        let expected = "\n\
            \tName       : a/b\n\
            \tURL        : https://github.com/a/b\n\
            \tStar       : ⭐️ 1200\n\
            \tClone URL  : https://github.com/a/b.git\n\
            \tDescription: fast\n\
            \tLanguage   : Go\n";
        assert_eq!(text, expected);
        assert!(!text.contains("Watchers"));
    }

    #[test]
    fn star_label_is_padded_and_truncated() {
        assert_eq!(trending("a/b", "5").star_label(), " ⭐️ 5     ");
        assert_eq!(trending("a/b", "1,200").star_label(), " ⭐️ 1200  ");
        assert_eq!(trending("a/b", "1,234,567").star_label(), " ⭐️ 123456");
        assert_eq!(
            trending("a/b", "1,234,567")
                .star_label()
                .chars()
                .count(),
            STAR_LABEL_WIDTH
        );
    }

    /// crossterm drops colors when `NO_COLOR` is set
    fn green(name: &str) -> String {
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            name.to_string()
        } else {
            format!("\x1b[38;5;2m{name}\x1b[39m")
        }
    }

    #[test]
    fn draw_writes_one_colored_line_per_item() {
        let page: ItemPage = vec![trending("a/b", "5"), trending("c/d", "1,200")]
            .into_iter()
            .collect();

        let mut out = Vec::new();
        page.draw(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        let expected = format!(
            " \u{2b50}\u{fe0f} 5     {}\n \u{2b50}\u{fe0f} 1200  {}\n",
            green("a/b"),
            green("c/d")
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn draw_of_empty_page_writes_nothing() {
        let mut out = Vec::new();
        ItemPage::default().draw(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn readme_block_lists_metadata() {
        let readme = Readme {
            name: "README.md".into(),
            path: "README.md".into(),
            html_url: "https://github.com/a/b/blob/main/README.md".into(),
            download_url: "https://raw.githubusercontent.com/a/b/main/README.md".into(),
            content: "SGVsbG8=".into(),
        };
        let text = readme.to_string();
        assert!(text.contains("\tName       : README.md\n"));
        assert!(text.contains("\tDownload   : https://raw.githubusercontent.com/a/b/main/README.md\n"));
        assert!(!text.contains("SGVsbG8="));
    }
}
