use serde::Deserialize;

use crate::model::entity::{Lesson, LessonContent, LessonFile, TEXT_PROVIDER};
use crate::model::{ModelError, ResourceTyped, require_slug};

use super::{lenient_u32, lenient_u64};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLessonFile {
    pub name: Option<String>,
    pub url: Option<String>,
    pub mime_type: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub size_bytes: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLesson {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub duration_minutes: Option<u32>,
    pub provider: Option<String>,
    pub video_id: Option<String>,
    pub content: Option<String>,
    pub files: Option<Vec<RawLessonFile>>,
}

impl From<RawLessonFile> for LessonFile {
    fn from(raw: RawLessonFile) -> Self {
        let url = raw.url.unwrap_or_default();
        Self {
            name: raw.name.unwrap_or_else(|| url.clone()),
            url,
            mime_type: raw.mime_type,
            size_bytes: raw.size_bytes,
        }
    }
}

impl TryFrom<RawLesson> for Lesson {
    type Error = ModelError;

    fn try_from(raw: RawLesson) -> Result<Self, Self::Error> {
        let slug = require_slug(raw.slug, Self::get_resource_type())?;
        let provider = raw.provider.unwrap_or_else(|| String::from(TEXT_PROVIDER));

        Ok(Self {
            title: raw.title.unwrap_or_else(|| slug.clone()),
            slug,
            description: raw.description.unwrap_or_default(),
            duration_minutes: raw.duration_minutes.unwrap_or(0),
            content: LessonContent::from_parts(&provider, raw.video_id, raw.content),
            files: raw
                .files
                .unwrap_or_default()
                .into_iter()
                .map(LessonFile::from)
                .collect(),
        })
    }
}
