use serde::Deserialize;

use crate::model::entity::Course;
use crate::model::Page;

use super::RawCourse;

/// `GET /courses` body. The two backend generations are told apart by their
/// list field (`content` vs `courses`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CatalogResponse {
    Paged(PagedCatalog),
    Legacy(LegacyCatalog),
}

/// Spring-style page with a 0-indexed `page`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedCatalog {
    pub content: Vec<RawCourse>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub last: Option<bool>,
}

/// Older shape with a 1-indexed `page`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCatalog {
    pub courses: Vec<RawCourse>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_courses: u64,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

/// Entries without a valid slug are dropped so one bad row doesn't blank the catalog.
fn normalize_courses(raw: Vec<RawCourse>) -> Vec<Course> {
    raw.into_iter()
        .filter_map(|raw| match Course::try_from(raw) {
            Ok(course) => Some(course),
            Err(e) => {
                tracing::warn!("skipping catalog entry: {}", e);
                None
            }
        })
        .collect()
}

impl From<CatalogResponse> for Page<Course> {
    fn from(response: CatalogResponse) -> Self {
        match response {
            CatalogResponse::Paged(paged) => {
                let page = paged.page.saturating_add(1);
                let last = paged.last.unwrap_or(page >= paged.total_pages);
                Page::new(
                    normalize_courses(paged.content),
                    page,
                    paged.size,
                    paged.total_elements,
                    paged.total_pages,
                )
                .with_last(last)
            }
            CatalogResponse::Legacy(legacy) => Page::new(
                normalize_courses(legacy.courses),
                legacy.page.max(1),
                legacy.limit,
                legacy.total_courses,
                legacy.total_pages,
            ),
        }
    }
}
