use std::fmt;

use chrono::{DateTime, Utc};
use compact_str::{CompactString, ToCompactString};
use serde::Deserialize;

/// Upstream that produced an [`Item`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// GitHub REST search API
    OfficialApi,
    /// Trending repositories service
    #[default]
    TrendingApi,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::OfficialApi => "OfficialAPI",
            DataSource::TrendingApi => "TrendingAPI",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A repository normalized from either upstream.
///
/// Both schemas land in the same struct: the official API fills `full_name`,
/// `html_url`, `description`, `language` and `stargazers_count`, while the
/// trending service fills `name`, `url`, `desc`, `lang` and `stars`. The
/// accessors below pick whichever member of each pair is populated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Item {
    pub id: u64,
    pub name: CompactString,
    pub full_name: CompactString,
    pub url: CompactString,
    pub html_url: CompactString,
    pub clone_url: CompactString,
    pub description: CompactString,
    pub desc: CompactString,
    pub stargazers_count: u64,
    /// Star count as formatted by the trending service, e.g. `"1,234"`
    pub stars: CompactString,
    pub watchers: u64,
    pub topics: Vec<CompactString>,
    pub language: CompactString,
    pub lang: CompactString,
    pub default_branch: CompactString,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub data_source: DataSource,
}

impl Item {
    /// `owner/repo`, taken from `full_name` or else from the percent-decoded
    /// path of `url`.
    ///
    /// Returns an empty string when neither is usable.
    pub fn repository_name(&self) -> CompactString {
        if !self.full_name.is_empty() {
            return self.full_name.clone();
        }

        match url::Url::parse(&self.url) {
            Ok(url) => {
                let path = url.path();
                let path = path.strip_prefix('/').unwrap_or(path);
                match urlencoding::decode(path) {
                    Ok(decoded) => decoded.as_ref().into(),
                    Err(_) => path.into(),
                }
            },
            Err(_) => CompactString::default(),
        }
    }

    /// Parses `stars` (thousands separators allowed), falling back to
    /// `stargazers_count` when that yields zero.
    ///
    /// A literal `"0"` in `stars` is treated the same as a missing value, so a
    /// trending item with zero stars reports `stargazers_count` instead.
    pub fn star_count(&self) -> u64 {
        let stars = self.stars.replace(',', "").parse::<u64>().unwrap_or(0);
        if stars == 0 {
            self.stargazers_count
        } else {
            stars
        }
    }

    pub fn repository_url(&self) -> &str {
        if self.html_url.is_empty() {
            self.url.as_str()
        } else {
            self.html_url.as_str()
        }
    }

    pub fn description(&self) -> &str {
        if self.description.is_empty() {
            self.desc.as_str()
        } else {
            self.description.as_str()
        }
    }

    pub fn language(&self) -> &str {
        if self.language.is_empty() {
            self.lang.as_str()
        } else {
            self.language.as_str()
        }
    }

    /// Repository URL with a `.git` suffix
    pub fn clone_url(&self) -> CompactString {
        let url = self.repository_url();
        if url.ends_with(".git") {
            url.into()
        } else {
            let mut url = url.to_compact_string();
            url.push_str(".git");
            url
        }
    }
}

/// Readme metadata. `content` is kept exactly as delivered (usually base64).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Readme {
    pub name: CompactString,
    pub path: CompactString,
    pub html_url: CompactString,
    pub download_url: CompactString,
    pub content: String,
}

/// One page of items, in upstream order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemPage {
    pub items: Vec<Item>,
}

impl ItemPage {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl IntoIterator for ItemPage {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ItemPage {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Item> for ItemPage {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

/// `{ "items": [...] }` envelope shared by both upstreams
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse<T> {
    #[serde(default)]
    pub items: Option<Vec<T>>,
}

impl<T> ItemsResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

/// Repository as returned by the GitHub search API.
///
/// Every field is optional: a missing key and an explicit `null` both end up
/// as the empty / zero value on [`Item`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OfficialItemDto {
    pub id: Option<u64>,
    pub full_name: Option<CompactString>,
    pub html_url: Option<CompactString>,
    pub clone_url: Option<CompactString>,
    pub description: Option<CompactString>,
    pub stargazers_count: Option<u64>,
    pub watchers: Option<u64>,
    pub topics: Option<Vec<CompactString>>,
    pub language: Option<CompactString>,
    pub default_branch: Option<CompactString>,
    /// Kept as text so an unexpected format does not fail the whole page
    pub created_at: Option<CompactString>,
    pub updated_at: Option<CompactString>,
}

/// Repository as returned by the trending service
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrendingItemDto {
    pub name: Option<CompactString>,
    pub repo_link: Option<CompactString>,
    pub desc: Option<CompactString>,
    pub stars: Option<CompactString>,
    pub lang: Option<CompactString>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReadmeDto {
    pub name: Option<CompactString>,
    pub path: Option<CompactString>,
    pub html_url: Option<CompactString>,
    pub download_url: Option<CompactString>,
    pub content: Option<String>,
}

/// RFC 3339 timestamp, or `None` for anything else
fn parse_timestamp(value: Option<CompactString>) -> Option<DateTime<Utc>> {
    let value = value?;
    DateTime::parse_from_rfc3339(&value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

impl From<OfficialItemDto> for Item {
    fn from(dto: OfficialItemDto) -> Self {
        Self {
            id: dto.id.unwrap_or_default(),
            full_name: dto.full_name.unwrap_or_default(),
            html_url: dto.html_url.unwrap_or_default(),
            clone_url: dto.clone_url.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
            stargazers_count: dto.stargazers_count.unwrap_or_default(),
            watchers: dto.watchers.unwrap_or_default(),
            topics: dto.topics.unwrap_or_default(),
            language: dto.language.unwrap_or_default(),
            default_branch: dto.default_branch.unwrap_or_default(),
            created_at: parse_timestamp(dto.created_at),
            updated_at: parse_timestamp(dto.updated_at),
            data_source: DataSource::OfficialApi,
            ..Default::default()
        }
    }
}

impl From<TrendingItemDto> for Item {
    fn from(dto: TrendingItemDto) -> Self {
        Self {
            name: dto.name.unwrap_or_default(),
            url: dto.repo_link.unwrap_or_default(),
            desc: dto.desc.unwrap_or_default(),
            stars: dto.stars.unwrap_or_default(),
            lang: dto.lang.unwrap_or_default(),
            data_source: DataSource::TrendingApi,
            ..Default::default()
        }
    }
}

impl From<ReadmeDto> for Readme {
    fn from(dto: ReadmeDto) -> Self {
        Self {
            name: dto.name.unwrap_or_default(),
            path: dto.path.unwrap_or_default(),
            html_url: dto.html_url.unwrap_or_default(),
            download_url: dto.download_url.unwrap_or_default(),
            content: dto.content.unwrap_or_default(),
        }
    }
}
