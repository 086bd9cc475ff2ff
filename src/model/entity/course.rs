use serde::Serialize;

use crate::model::entity::{Instructor, Module};
use crate::model::{ResourceType, ResourceTyped};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) thumbnail_url: String,
    pub(crate) instructors: Vec<Instructor>,
    pub(crate) tags: Vec<String>,
    pub(crate) is_free: bool,
    pub(crate) duration_minutes: u32,
    pub(crate) status: String,
}

impl ResourceTyped for Course {
    fn get_resource_type() -> ResourceType {
        ResourceType::Course
    }
}

impl Course {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Raw thumbnail reference; may be `/`-relative, see [`crate::utils::AssetResolver`].
    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_free(&self) -> bool {
        self.is_free
    }

    /// Always the backend value, never summed from modules.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Introduction {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) duration_minutes: u32,
    pub(crate) provider: String,
    pub(crate) video_id: Option<String>,
}

impl Introduction {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    /// The detail page only shows the introduction block when both are set.
    pub fn has_summary(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    #[serde(flatten)]
    pub(crate) course: Course,
    pub(crate) introduction: Option<Introduction>,
    pub(crate) modules: Vec<Module>,
}

/// Where the "start course" action of the detail page lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEntry {
    Lesson {
        course_slug: String,
        module_slug: String,
        lesson_slug: String,
    },
    Start {
        course_slug: String,
    },
}

impl PlayerEntry {
    pub fn path(&self) -> String {
        match self {
            Self::Lesson {
                course_slug,
                module_slug,
                lesson_slug,
            } => format!("/courses/{course_slug}/{module_slug}/{lesson_slug}"),
            Self::Start { course_slug } => format!("/courses/{course_slug}/learn"),
        }
    }
}

impl CourseDetails {
    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn slug(&self) -> &str {
        self.course.slug()
    }

    pub fn introduction(&self) -> Option<&Introduction> {
        self.introduction.as_ref()
    }

    /// Module summaries in display order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module_index(&self, slug: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.slug() == slug)
    }

    pub fn player_entry(&self) -> PlayerEntry {
        let first_lesson = self.modules.first().and_then(|module| {
            module
                .lessons()
                .and_then(|lessons| lessons.first())
                .map(|lesson| (module.slug(), lesson.slug()))
        });

        match first_lesson {
            Some((module_slug, lesson_slug)) => PlayerEntry::Lesson {
                course_slug: self.slug().to_string(),
                module_slug: module_slug.to_string(),
                lesson_slug: lesson_slug.to_string(),
            },
            None => PlayerEntry::Start {
                course_slug: self.slug().to_string(),
            },
        }
    }
}
