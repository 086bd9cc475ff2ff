use serde::Deserialize;

use crate::model::entity::{Lesson, Module, ModuleDetails};
use crate::model::{ModelError, ResourceTyped, require_slug};

use super::{RawLesson, lenient_u32};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawModule {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub duration_minutes: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub lessons_count: Option<u32>,
    pub lessons: Option<Vec<RawLesson>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawModuleDetails {
    pub course_slug: Option<String>,
    pub module: Option<RawModule>,
}

impl TryFrom<RawModule> for Module {
    type Error = ModelError;

    fn try_from(raw: RawModule) -> Result<Self, Self::Error> {
        let slug = require_slug(raw.slug, Self::get_resource_type())?;
        let lessons = raw
            .lessons
            .map(|lessons| {
                lessons
                    .into_iter()
                    .map(Lesson::try_from)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let lessons_duration = lessons
            .iter()
            .flatten()
            .fold(0u32, |total, l| total.saturating_add(l.duration_minutes()));
        let lessons_len = lessons.as_ref().map_or(0, |l| l.len() as u32);

        Ok(Self {
            title: raw.title.unwrap_or_else(|| slug.clone()),
            slug,
            description: raw.description.unwrap_or_default(),
            position: raw.position,
            duration_minutes: raw.duration_minutes.unwrap_or(lessons_duration),
            lessons_count: raw.lessons_count.unwrap_or(lessons_len),
            lessons,
        })
    }
}

impl TryFrom<RawModuleDetails> for ModuleDetails {
    type Error = ModelError;

    fn try_from(raw: RawModuleDetails) -> Result<Self, Self::Error> {
        let mut module = Module::try_from(raw.module.unwrap_or_default())?;
        // a fetched module always carries its full (possibly empty) lesson list
        if module.lessons.is_none() {
            module.lessons = Some(Vec::new());
        }

        Ok(Self {
            course_slug: raw.course_slug.unwrap_or_default(),
            module,
        })
    }
}

/// Display order: modules with an explicit position first, by position;
/// modules without one keep their array order after them.
pub(crate) fn order_modules(modules: &mut [Module]) {
    modules.sort_by_key(|m| (m.position.is_none(), m.position));
}
