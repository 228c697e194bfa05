//! HTTP client for the GitHub search API and the trending service

use chrono::Local;
use compact_str::{CompactString, format_compact};
use reqwest::{Client, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{
    config::ClientConfig,
    error::{ClientError, Result},
};
use crate::domain::{
    Item, ItemPage, ItemsResponse, OfficialItemDto, Readme, ReadmeDto, TrendingItemDto,
};

/// HTTP client for both repository sources
#[derive(Debug, Clone)]
pub struct RepositoryApi {
    client: Client,
    config: ClientConfig,
    trending_url: Url,
}

impl RepositoryApi {
    /// Builds a client with a transport configured from `config`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ClientError::Http)?;

        Self::with_http_client(config, client)
    }

    /// Builds a client around an existing transport
    pub fn with_http_client(config: ClientConfig, client: Client) -> Result<Self> {
        config.validate()?;

        let trending_url = Url::parse(&config.trending_url)
            .map_err(|e| ClientError::invalid_url(config.trending_url.clone(), e))?;

        Ok(Self { client, config, trending_url })
    }

    /// Search repositories on the official API.
    ///
    /// `query` is appended to the URL as-is, so GitHub qualifier syntax such as
    /// `language:rust+stars:>100` reaches the API untouched.
    #[instrument(skip(self))]
    pub async fn search_repository(&self, query: &str) -> Result<ItemPage> {
        let url = format_compact!(
            "{}/search/repositories?q={}",
            self.config.official_root(),
            query
        );

        let response: ItemsResponse<OfficialItemDto> = self.get_json(&url).await?;
        let page: ItemPage = response.into_items().into_iter().map(Item::from).collect();

        debug!(item_count = page.len(), "Fetched search results");
        Ok(page)
    }

    /// Fetch readme metadata for `item`
    #[instrument(skip(self, item), fields(repository = %item.repository_name()))]
    pub async fn get_readme(&self, item: &Item) -> Result<Readme> {
        let url = self.readme_url(item);
        let readme: ReadmeDto = self.get_json(&url).await?;
        Ok(readme.into())
    }

    /// Fetch trending repositories. Empty `language` or `since` are left out
    /// of the query.
    #[instrument(skip(self))]
    pub async fn get_trending_repository(&self, language: &str, since: &str) -> Result<ItemPage> {
        let url = self.trending_url(language, since);

        let response: ItemsResponse<TrendingItemDto> = self.get_json(url.as_str()).await?;
        let page: ItemPage = response.into_items().into_iter().map(Item::from).collect();

        debug!(item_count = page.len(), "Fetched trending repositories");
        Ok(page)
    }

    fn readme_url(&self, item: &Item) -> CompactString {
        format_compact!(
            "{}/repos/{}/readme",
            self.config.official_root(),
            item.repository_name()
        )
    }

    /// Trending root with `lang` / `since` set. A non-empty filter replaces
    /// any value already present on the configured root.
    fn trending_url(&self, language: &str, since: &str) -> Url {
        let filters = [("lang", language), ("since", since)];
        let mut url = self.trending_url.clone();

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .into_owned()
            .filter(|(key, _)| {
                !filters
                    .iter()
                    .any(|(name, value)| key == name && !value.is_empty())
            })
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .extend_pairs(filters.iter().filter(|(_, value)| !value.is_empty()));
        // query_pairs_mut leaves a dangling `?` when nothing was appended
        if url.query() == Some("") {
            url.set_query(None);
        }
        url
    }

    /// Perform GET request and deserialize JSON response
    async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.request(url).send().await?;
        self.handle_response(response).await
    }

    fn request(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(header::ACCEPT, self.config.accept.as_str())
    }

    /// Read the body and deserialize it. The status code is only logged; an
    /// error page usually ends up as a decode failure.
    async fn handle_response<T>(&self, response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url_path = response.url().path().to_string();
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::response_body(url_path.as_str(), e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), path = %url_path, "Unexpected response status");
        }

        if self.config.debug.log_responses {
            self.log_response_to_file(&url_path, &body);
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!(path = %url_path, error = %e, body = %body, "JSON parse error");
            ClientError::json_parse(url_path, "Failed to parse response", e)
        })
    }

    /// Log HTTP response to file for debugging
    fn log_response_to_file(&self, path: &str, body: &str) {
        let Some(log_dir) = &self.config.debug.log_directory else {
            return;
        };

        if !log_dir.exists()
            && let Err(e) = std::fs::create_dir_all(log_dir)
        {
            warn!("Failed to create log directory: {}", e);
            return;
        }

        let filename = format!(
            "{}_{}.json",
            Local::now().format("%Y-%m-%d_%H-%M-%S"),
            path.replace('/', "_")
        );
        let log_path = log_dir.join(filename);

        if let Err(e) = std::fs::write(&log_path, body) {
            warn!("Failed to write response log to {:?}: {}", log_path, e);
        } else {
            debug!("Response logged to {:?}", log_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::config::DEFAULT_TRENDING_URL;

    fn api(official: &str, trending: &str) -> RepositoryApi {
        RepositoryApi::new(ClientConfig::new(official, trending)).unwrap()
    }

    #[test]
    fn readme_url_uses_full_name() {
        let api = api("https://api.github.com/", DEFAULT_TRENDING_URL);
        let item = Item {
            full_name: "rust-lang/cargo".into(),
            ..Default::default()
        };
        assert_eq!(
            api.readme_url(&item),
            "https://api.github.com/repos/rust-lang/cargo/readme"
        );
    }

    #[test]
    fn trending_url_skips_empty_parameters() {
        let api = api("https://api.github.com", "https://trending.example.com/repo");

        assert_eq!(
            api.trending_url("", "").as_str(),
            "https://trending.example.com/repo"
        );
        assert_eq!(
            api.trending_url("go", "").as_str(),
            "https://trending.example.com/repo?lang=go"
        );
        assert_eq!(
            api.trending_url("", "weekly").as_str(),
            "https://trending.example.com/repo?since=weekly"
        );
        assert_eq!(
            api.trending_url("c++", "daily").as_str(),
            "https://trending.example.com/repo?lang=c%2B%2B&since=daily"
        );
    }

    #[test]
    fn trending_url_keeps_existing_query() {
        let api = api("https://api.github.com", "https://trending.example.com/repo?x=1");
        assert_eq!(
            api.trending_url("rust", "").as_str(),
            "https://trending.example.com/repo?x=1&lang=rust"
        );
    }

    #[test]
    fn trending_url_replaces_configured_filters() {
        let api = api(
            "https://api.github.com",
            "https://trending.example.com/repo?lang=c&x=1&since=monthly",
        );

        assert_eq!(
            api.trending_url("rust", "daily").as_str(),
            "https://trending.example.com/repo?x=1&lang=rust&since=daily"
        );
        assert_eq!(
            api.trending_url("", "daily").as_str(),
            "https://trending.example.com/repo?lang=c&x=1&since=daily"
        );
        assert_eq!(
            api.trending_url("", "").as_str(),
            "https://trending.example.com/repo?lang=c&x=1&since=monthly"
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = RepositoryApi::new(ClientConfig::new("", DEFAULT_TRENDING_URL)).unwrap_err();
        assert!(matches!(err, ClientError::ConfigValidation { .. }));
    }
}
