use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::api::dto::{CatalogResponse, RawCourse, RawModuleDetails};
use crate::api::{ApiError, ApiResult, CatalogQuery, CourseApi};
use crate::config::{CatalogSchema, Config};
use crate::model::entity::{Course, CourseDetails, LessonKey, Module, ModuleDetails};
use crate::model::{Page, ResourceType, ResourceTyped};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`CourseApi`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpCourseApi {
    client: Client,
    endpoint: String,
    schema: CatalogSchema,
}

impl HttpCourseApi {
    /// `endpoint` is the REST root, e.g. `http://host/api/v1`.
    pub fn new(endpoint: impl Into<String>, schema: CatalogSchema) -> ApiResult<Self> {
        Self::with_timeout(endpoint, schema, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        schema: CatalogSchema,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            schema,
        })
    }

    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::with_timeout(
            config.api().endpoint(),
            config.catalog().schema(),
            Duration::from_secs(config.api().timeout_secs()),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn schema(&self) -> CatalogSchema {
        self.schema
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource_type: ResourceType,
        url: &str,
        params: &[(&'static str, String)],
    ) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::transport(resource_type, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(resource_type, status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(resource_type, e))?;

        serde_json::from_slice(&body).map_err(|e| ApiError::decode(resource_type, e))
    }
}

#[async_trait]
impl CourseApi for HttpCourseApi {
    #[tracing::instrument(skip(self), fields(page = query.page, size = query.size))]
    async fn fetch_catalog(&self, query: &CatalogQuery) -> ApiResult<Page<Course>> {
        let params = query.params(self.schema);
        let response: CatalogResponse = self
            .get_json(ResourceType::Catalog, &self.url("courses"), &params)
            .await?;

        let page = Page::from(response);
        tracing::debug!(
            "catalog page {}/{} with {} courses",
            page.page,
            page.total_pages,
            page.items.len()
        );
        Ok(page)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_course(&self, slug: &str) -> ApiResult<CourseDetails> {
        let raw: RawCourse = self
            .get_json(Course::get_resource_type(), &self.url(&format!("courses/{slug}")), &[])
            .await?;

        Ok(CourseDetails::try_from(raw)?)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_module(&self, course_slug: &str, module_slug: &str) -> ApiResult<ModuleDetails> {
        let url = self.url(&format!("courses/{course_slug}/modules/{module_slug}"));
        let raw: RawModuleDetails = self
            .get_json(Module::get_resource_type(), &url, &[])
            .await?;

        let mut details = ModuleDetails::try_from(raw)?;
        if details.course_slug.is_empty() {
            details.course_slug = course_slug.to_string();
        }
        Ok(details)
    }

    #[tracing::instrument(skip(self), fields(lesson = %key))]
    async fn complete_lesson(&self, key: &LessonKey) -> ApiResult<()> {
        let url = self.url(&format!(
            "courses/{}/modules/{}/lessons/{}/complete",
            key.course_slug, key.module_slug, key.lesson_slug
        ));

        let response = self
            .client
            .patch(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| ApiError::transport(ResourceType::LessonCompletion, e))?;

        // 204 No Content is the usual answer, any 2xx counts
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::status(ResourceType::LessonCompletion, status))
        }
    }
}
