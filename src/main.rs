use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use repolens::{
    app_init::{AppComponents, initialize_app},
    config::default_config_path,
    domain::{Item, ItemPage},
};

#[derive(Debug, Parser)]
#[command(name = "repolens", version, about)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dump every response body into ./repolens-responses
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search repositories through the GitHub API
    Search {
        /// Search query, GitHub qualifiers allowed
        query: String,
        /// Print the detail block of every result
        #[arg(long)]
        detail: bool,
    },
    /// List trending repositories
    Trending {
        #[arg(long, default_value = "")]
        lang: String,
        /// daily, weekly or monthly
        #[arg(long, default_value = "")]
        since: String,
        #[arg(long)]
        detail: bool,
    },
    /// Show readme metadata for `owner/repo`
    Readme { repository: String },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let AppComponents { api, _log_guard } = initialize_app(&config_path, cli.debug)?;

    match cli.command {
        Command::Search { query, detail } => {
            let page = api.search_repository(&query).await?;
            print_page(&page, detail)?;
        },
        Command::Trending { lang, since, detail } => {
            let page = api.get_trending_repository(&lang, &since).await?;
            print_page(&page, detail)?;
        },
        Command::Readme { repository } => {
            let item = Item { full_name: repository.into(), ..Default::default() };
            let readme = api.get_readme(&item).await?;
            print!("{readme}");
        },
    }

    Ok(())
}

fn print_page(page: &ItemPage, detail: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    page.draw(&mut stdout)?;

    if detail {
        for item in page {
            write!(stdout, "{item}")?;
        }
    }

    stdout.flush()
}
