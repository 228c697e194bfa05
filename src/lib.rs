//! Search GitHub repositories and trending projects, normalize both sources
//! into one [`Item`](domain::Item) model and render them as text.

pub mod app_init;
pub mod client;
pub mod config;
pub mod domain;
pub mod logging;
pub mod render;
pub mod result;

pub use client::{ClientConfig, ClientError, RepositoryApi};
pub use domain::{DataSource, Item, ItemPage, Readme};
