use thiserror::Error;

use crate::model::ResourceType;

pub type ModelResult<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("ValidationError: {resource_type:?} payload has no slug")]
    MissingSlug { resource_type: ResourceType },
    #[error("ValidationError: {resource_type:?} slug `{slug}` is not url-safe")]
    InvalidSlug {
        resource_type: ResourceType,
        slug: String,
    },
}

impl ModelError {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Self::MissingSlug { resource_type } => *resource_type,
            Self::InvalidSlug { resource_type, .. } => *resource_type,
        }
    }
}
