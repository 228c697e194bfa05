//! Repository client modules
//!
//! The HTTP layer, its configuration and its error type live in separate
//! modules; callers normally only need the re-exports below.

pub mod api;
pub mod config;
pub mod error;

pub use api::RepositoryApi;
pub use config::{ClientConfig, DebugConfig};
pub use error::{ClientError, Result};
