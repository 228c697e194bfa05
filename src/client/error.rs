//! Error types for the repository client

use compact_str::CompactString;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: CompactString,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read response body from {path}: {source}")]
    ResponseBody {
        path: CompactString,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message} ({path}): {source}")]
    JsonParse {
        path: CompactString,
        message: CompactString,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration for {field}: {message}")]
    ConfigValidation {
        field: CompactString,
        message: CompactString,
    },
}

impl ClientError {
    pub fn invalid_url(url: impl Into<CompactString>, source: url::ParseError) -> Self {
        Self::InvalidUrl { url: url.into(), source }
    }

    pub fn response_body(path: impl Into<CompactString>, source: reqwest::Error) -> Self {
        Self::ResponseBody { path: path.into(), source }
    }

    pub fn json_parse(
        path: impl Into<CompactString>,
        message: impl Into<CompactString>,
        source: serde_json::Error,
    ) -> Self {
        Self::JsonParse {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    pub fn config_validation(
        field: impl Into<CompactString>,
        message: impl Into<CompactString>,
    ) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when the failure happened while decoding the response JSON
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::JsonParse { .. })
    }
}
