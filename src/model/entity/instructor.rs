use serde::Serialize;

use crate::model::{ResourceType, ResourceTyped};

/// Shown when the backend gives neither a name nor a username.
pub const DEFAULT_INSTRUCTOR_NAME: &str = "Instrutor(a)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub(crate) name: String,
    pub(crate) avatar_url: String,
    pub(crate) bio: String,
}

impl ResourceTyped for Instructor {
    fn get_resource_type() -> ResourceType {
        ResourceType::Instructor
    }
}

impl Instructor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }
}
