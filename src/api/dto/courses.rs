use serde::Deserialize;

use crate::model::entity::{
    Course, CourseDetails, DEFAULT_INSTRUCTOR_NAME, Instructor, Introduction, Module,
};
use crate::model::{ModelError, ResourceTyped, require_slug};

use super::lenient_u32;
use super::modules::{RawModule, order_modules};

const DEFAULT_STATUS: &str = "PUBLISHED";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInstructor {
    pub name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawIntroduction {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub duration_minutes: Option<u32>,
    pub provider: Option<String>,
    pub video_id: Option<String>,
}

/// Course payload as sent by either backend generation (`name`/`title`,
/// `thumbnail`/`thumbnailUrl`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCourse {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub thumbnail_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub instructors: Option<Vec<RawInstructor>>,
    pub is_free: Option<bool>,
    #[serde(deserialize_with = "lenient_u32")]
    pub duration_minutes: Option<u32>,
    pub status: Option<String>,
    pub introduction: Option<RawIntroduction>,
    pub modules: Option<Vec<RawModule>>,
}

impl From<RawInstructor> for Instructor {
    fn from(raw: RawInstructor) -> Self {
        Self {
            name: raw
                .name
                .or(raw.username)
                .unwrap_or_else(|| String::from(DEFAULT_INSTRUCTOR_NAME)),
            avatar_url: raw.avatar_url.unwrap_or_default(),
            bio: raw.bio.unwrap_or_default(),
        }
    }
}

impl From<RawIntroduction> for Introduction {
    fn from(raw: RawIntroduction) -> Self {
        Self {
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            duration_minutes: raw.duration_minutes.unwrap_or(0),
            provider: raw.provider.unwrap_or_default(),
            video_id: raw.video_id.filter(|id| !id.is_empty()),
        }
    }
}

impl TryFrom<RawCourse> for Course {
    type Error = ModelError;

    fn try_from(raw: RawCourse) -> Result<Self, Self::Error> {
        let slug = require_slug(raw.slug, Self::get_resource_type())?;

        Ok(Self {
            title: raw.name.or(raw.title).unwrap_or_else(|| slug.clone()),
            slug,
            description: raw.description.unwrap_or_default(),
            thumbnail_url: raw.thumbnail_url.or(raw.thumbnail).unwrap_or_default(),
            instructors: raw
                .instructors
                .unwrap_or_default()
                .into_iter()
                .map(Instructor::from)
                .collect(),
            tags: raw.tags.unwrap_or_default(),
            is_free: raw.is_free.unwrap_or(false),
            duration_minutes: raw.duration_minutes.unwrap_or(0),
            status: raw.status.unwrap_or_else(|| String::from(DEFAULT_STATUS)),
        })
    }
}

impl TryFrom<RawCourse> for CourseDetails {
    type Error = ModelError;

    fn try_from(mut raw: RawCourse) -> Result<Self, Self::Error> {
        let introduction = raw.introduction.take().map(Introduction::from);
        let mut modules = raw
            .modules
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(Module::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        order_modules(&mut modules);

        Ok(Self {
            course: Course::try_from(raw)?,
            introduction,
            modules,
        })
    }
}
