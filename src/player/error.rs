use thiserror::Error;

use crate::api::ApiError;

pub type PlayerResult<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("UnknownModule: `{module_slug}` is not part of course `{course_slug}`")]
    UnknownModule {
        course_slug: String,
        module_slug: String,
    },
    #[error("UnknownLesson: `{lesson_slug}` is not part of module `{module_slug}`")]
    UnknownLesson {
        module_slug: String,
        lesson_slug: String,
    },
    #[error("ApiError - {0}")]
    ApiError(#[from] ApiError),
}

impl PlayerError {
    pub fn client_display(&self) -> String {
        match self {
            Self::UnknownModule { .. } | Self::UnknownLesson { .. } => {
                String::from("Player error, lesson not found.")
            }
            Self::ApiError(e) => e.client_display(),
        }
    }
}
