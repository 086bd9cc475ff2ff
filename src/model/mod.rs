//! Canonical, immutable view of the course catalog.
//!
//! Everything in here is produced by the normalizer in [`crate::api::dto`]
//! and never mutated afterwards.

pub mod entity;

mod error;
pub use error::{ModelError, ModelResult};

mod page;
pub use page::{Page, ResourceType, ResourceTyped};

/// Accepts a slug only when present, non-blank and made of url-safe characters.
pub fn require_slug(slug: Option<String>, resource_type: ResourceType) -> ModelResult<String> {
    let slug = match slug {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Err(ModelError::MissingSlug { resource_type }),
    };

    let url_safe = slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'));
    if !url_safe {
        return Err(ModelError::InvalidSlug {
            resource_type,
            slug,
        });
    }

    Ok(slug)
}
