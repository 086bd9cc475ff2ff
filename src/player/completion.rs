use tracing::{info, warn};

use crate::api::CourseApi;
use crate::model::entity::LessonKey;

pub const COMPLETED_MESSAGE: &str = "Aula concluída com sucesso!";
pub const COMPLETION_FAILED_MESSAGE: &str = "Erro ao completar a aula";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Toast-style, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

/// Fires the completion request once. Completion state is not kept anywhere.
pub async fn complete_lesson<A: CourseApi + ?Sized>(api: &A, key: &LessonKey) -> Notice {
    match api.complete_lesson(key).await {
        Ok(()) => {
            info!("lesson {} marked complete", key);
            Notice::success(COMPLETED_MESSAGE)
        }
        Err(e) => {
            warn!("completing lesson {} failed: {}", key, e);
            Notice::error(COMPLETION_FAILED_MESSAGE)
        }
    }
}
