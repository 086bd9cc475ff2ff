//! Client core of a course catalog and lesson player: normalizes what the
//! course backend returns, drives the paginated catalog and walks a course
//! lesson by lesson.

use std::sync::Arc;

use crate::api::HttpCourseApi;
use crate::error::AppResult;

pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod api;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod model;
pub mod player;
pub mod utils;

#[cfg(test)]
mod test_support;

static APPLICATION_NAME: &str = "trilha";

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}

/// HTTP client for the configured backend.
#[tracing::instrument]
pub async fn build_client() -> AppResult<Arc<HttpCourseApi>> {
    let use_local = cfg!(debug_assertions);
    let config = Config::get_or_init(use_local).await;
    let api = HttpCourseApi::from_config(config)?;
    tracing::debug!("using backend at {}", api.endpoint());
    Ok(Arc::new(api))
}
