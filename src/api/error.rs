use reqwest::StatusCode;
use thiserror::Error;

use crate::model::{ModelError, ResourceType};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("ClientBuildError: {0}")]
    ClientBuild(reqwest::Error),

    #[error("TransportError: {resource_type:?}. Error: {error}")]
    Transport {
        resource_type: ResourceType,
        error: reqwest::Error,
    },

    #[error("StatusError: {resource_type:?} answered {status}")]
    Status {
        resource_type: ResourceType,
        status: StatusCode,
    },

    #[error("DecodeError: {resource_type:?}. Error: {error}")]
    Decode {
        resource_type: ResourceType,
        error: serde_json::Error,
    },

    #[error("ValidationError - {0}")]
    Validation(#[from] ModelError),
}

impl ApiError {
    pub fn transport(resource_type: ResourceType, error: reqwest::Error) -> Self {
        Self::Transport {
            resource_type,
            error,
        }
    }

    pub fn status(resource_type: ResourceType, status: StatusCode) -> Self {
        Self::Status {
            resource_type,
            status,
        }
    }

    pub fn decode(resource_type: ResourceType, error: serde_json::Error) -> Self {
        Self::Decode {
            resource_type,
            error,
        }
    }

    pub fn resource_type(&self) -> Option<ResourceType> {
        match self {
            Self::ClientBuild(_) => None,
            Self::Transport { resource_type, .. }
            | Self::Status { resource_type, .. }
            | Self::Decode { resource_type, .. } => Some(*resource_type),
            Self::Validation(e) => Some(e.resource_type()),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ClientBuild(_) => String::from("Client error, unable to initialize http client."),
            Self::Transport { .. } => String::from("Network error, backend unreachable."),
            Self::Status { status, .. } if *status == StatusCode::NOT_FOUND => {
                String::from("Resource error, resource not found.")
            }
            Self::Status { .. } => String::from("Resource error, unable to fetch resource."),
            Self::Decode { .. } | Self::Validation(_) => {
                String::from("Resource error, malformed response.")
            }
        }
    }
}
