use serde::Serialize;

use crate::model::{ResourceType, ResourceTyped};
use crate::utils::youtube_embed_url;

pub const TEXT_PROVIDER: &str = "TEXT";
pub const YOUTUBE_PROVIDER: &str = "YOUTUBE";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) duration_minutes: u32,
    pub(crate) content: LessonContent,
    pub(crate) files: Vec<LessonFile>,
}

/// How the lesson body is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LessonContent {
    Video { provider: String, video_id: String },
    Text { markdown: String },
    Unsupported { provider: String },
}

impl LessonContent {
    pub fn from_parts(provider: &str, video_id: Option<String>, content: Option<String>) -> Self {
        match (provider, video_id, content) {
            (TEXT_PROVIDER, _, Some(markdown)) => Self::Text { markdown },
            (p, Some(video_id), _) if p != TEXT_PROVIDER => Self::Video {
                provider: p.to_string(),
                video_id,
            },
            (p, _, _) => Self::Unsupported {
                provider: p.to_string(),
            },
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            Self::Video { provider, .. } | Self::Unsupported { provider } => provider,
            Self::Text { .. } => TEXT_PROVIDER,
        }
    }

    /// Embeddable player URL. Only YouTube videos have one.
    pub fn embed_url(&self) -> Option<String> {
        match self {
            Self::Video { provider, video_id } if provider.eq_ignore_ascii_case(YOUTUBE_PROVIDER) => {
                Some(youtube_embed_url(video_id))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonFile {
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) mime_type: Option<String>,
    pub(crate) size_bytes: Option<u64>,
}

impl LessonFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size_bytes
    }
}

impl ResourceTyped for Lesson {
    fn get_resource_type() -> ResourceType {
        ResourceType::Lesson
    }
}

impl Lesson {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn content(&self) -> &LessonContent {
        &self.content
    }

    pub fn provider(&self) -> &str {
        self.content.provider()
    }

    pub fn files(&self) -> &[LessonFile] {
        &self.files
    }
}

/// Identifies a lesson for the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LessonKey {
    pub course_slug: String,
    pub module_slug: String,
    pub lesson_slug: String,
}

impl LessonKey {
    pub fn new(
        course_slug: impl Into<String>,
        module_slug: impl Into<String>,
        lesson_slug: impl Into<String>,
    ) -> Self {
        Self {
            course_slug: course_slug.into(),
            module_slug: module_slug.into(),
            lesson_slug: lesson_slug.into(),
        }
    }
}

impl std::fmt::Display for LessonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.course_slug, self.module_slug, self.lesson_slug)
    }
}
