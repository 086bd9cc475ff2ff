use thiserror::Error;
use tracing::error;
use tracing_error::SpanTrace;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
    #[error("api error: {0}")]
    ApiError(#[from] crate::api::ApiError),
    #[error("catalog error: {0}")]
    CatalogError(#[from] crate::catalog::CatalogError),
    #[error("player error: {0}")]
    PlayerError(#[from] crate::player::PlayerError),
}

impl AppError {
    /// Message fit for the end user; details go to the log.
    pub fn client_display(&self) -> String {
        match self {
            Self::IoError(_) | Self::ConfigError(_) => self.to_string(),
            Self::ApiError(e) => e.client_display(),
            Self::CatalogError(e) => e.client_display(),
            Self::PlayerError(e) => e.client_display(),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

pub async fn run_with_error_handler<F, T>(run: F) -> T
where
    F: AsyncFn() -> AppResult<T>,
    T: Send + Sync,
{
    match run().await {
        Ok(value) => value,
        Err(e) => {
            default_error_handler(e);
            std::process::exit(1);
        }
    }
}

fn default_error_handler(error: AppError) {
    let span = SpanTrace::capture();
    error!("{}\n{}", error, span);
    eprintln!("{}", error.client_display());
}

pub fn log_error<E: std::error::Error + std::fmt::Display>(error: &E) {
    let span = SpanTrace::capture();
    error!("{}\n{}", error, span);
}
