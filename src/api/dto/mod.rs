//! Wire shapes of the backend and their normalization into [`crate::model`].
//!
//! Every field except `slug` is optional on the wire. Absent values are
//! defaulted here so nothing downstream has to deal with them.

pub mod catalog;
pub mod courses;
pub mod lessons;
pub mod modules;

pub use catalog::{CatalogResponse, LegacyCatalog, PagedCatalog};
pub use courses::{RawCourse, RawInstructor, RawIntroduction};
pub use lessons::{RawLesson, RawLessonFile};
pub use modules::{RawModule, RawModuleDetails};

use serde::{Deserialize, Deserializer};

/// Accepts any JSON number (or null) for a minutes/bytes counter; negatives clamp to 0.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(value.and_then(|n| {
        n.as_u64()
            .map(|v| v.min(u32::MAX as u64) as u32)
            .or_else(|| n.as_f64().map(|f| f.max(0.0).round().min(u32::MAX as f64) as u32))
    }))
}

pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(value.and_then(|n| {
        n.as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0).round() as u64))
    }))
}
