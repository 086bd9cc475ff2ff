use async_trait::async_trait;

use crate::api::{ApiResult, CatalogQuery};
use crate::model::Page;
use crate::model::entity::{Course, CourseDetails, LessonKey, ModuleDetails};

/// Everything the catalog and the player need from the backend.
#[async_trait]
pub trait CourseApi: Send + Sync {
    async fn fetch_catalog(&self, query: &CatalogQuery) -> ApiResult<Page<Course>>;

    async fn fetch_course(&self, slug: &str) -> ApiResult<CourseDetails>;

    async fn fetch_module(&self, course_slug: &str, module_slug: &str) -> ApiResult<ModuleDetails>;

    async fn complete_lesson(&self, key: &LessonKey) -> ApiResult<()>;
}
