use serde::Serialize;

use crate::model::entity::Lesson;
use crate::model::{ResourceType, ResourceTyped};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) position: Option<i32>,
    pub(crate) duration_minutes: u32,
    pub(crate) lessons_count: u32,
    pub(crate) lessons: Option<Vec<Lesson>>,
}

impl ResourceTyped for Module {
    fn get_resource_type() -> ResourceType {
        ResourceType::Module
    }
}

impl Module {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn position(&self) -> Option<i32> {
        self.position
    }

    /// Explicit backend value, or the sum of the lessons computed at normalization.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn lessons_count(&self) -> u32 {
        self.lessons_count
    }

    /// `None` for summaries that came without a lesson list.
    pub fn lessons(&self) -> Option<&[Lesson]> {
        self.lessons.as_deref()
    }

    pub fn lesson(&self, slug: &str) -> Option<&Lesson> {
        self.lessons()?.iter().find(|l| l.slug() == slug)
    }

    pub fn lesson_index(&self, slug: &str) -> Option<usize> {
        self.lessons()?.iter().position(|l| l.slug() == slug)
    }
}

/// Body of `GET /courses/{slug}/modules/{moduleSlug}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDetails {
    pub(crate) course_slug: String,
    pub(crate) module: Module,
}

impl ModuleDetails {
    pub fn course_slug(&self) -> &str {
        &self.course_slug
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn into_module(self) -> Module {
        self.module
    }

    pub fn lessons(&self) -> &[Lesson] {
        self.module.lessons().unwrap_or_default()
    }
}
