use std::sync::Arc;

use thiserror::Error;

use crate::api::ApiError;

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("PageOutOfRange: page {requested} requested, {total_pages} available")]
    PageOutOfRange { requested: u32, total_pages: u32 },
    #[error("ApiError - {0}")]
    ApiError(Arc<ApiError>),
}

impl CatalogError {
    pub fn client_display(&self) -> String {
        match self {
            Self::PageOutOfRange { .. } => String::from("Resource error, page not available."),
            Self::ApiError(e) => e.client_display(),
        }
    }
}
