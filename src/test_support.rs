use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

use crate::api::dto::{RawCourse, RawModule};
use crate::api::{ApiError, ApiResult, CatalogQuery, CourseApi};
use crate::model::entity::{Course, CourseDetails, LessonKey, Module, ModuleDetails};
use crate::model::{Page, ResourceType};

/// In-memory backend. Calls are recorded as `catalog:{page}:{name}`,
/// `course:{slug}`, `module:{slug}` and `complete:{lesson}`; any of those keys
/// can be gated (blocks until [`FakeApi::release`]) or made to fail.
#[derive(Default)]
pub(crate) struct FakeApi {
    catalog: Vec<String>,
    course: Option<CourseDetails>,
    modules: HashMap<String, Module>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub(crate) fn with_catalog<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            catalog: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Course `slug` whose modules are `(module slug, [(lesson slug, minutes)])`.
    pub(crate) fn with_course(slug: &str, modules: &[(&str, &[(&str, u32)])]) -> Self {
        let full: Vec<Value> = modules
            .iter()
            .map(|(module, lessons)| {
                json!({
                    "slug": module,
                    "title": module.to_uppercase(),
                    "lessons": lessons
                        .iter()
                        .map(|(lesson, minutes)| json!({ "slug": lesson, "durationMinutes": minutes }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();

        // the course endpoint only returns summaries
        let summaries: Vec<Value> = modules
            .iter()
            .map(|(module, lessons)| json!({ "slug": module, "lessonsCount": lessons.len() }))
            .collect();

        let raw: RawCourse = serde_json::from_value(json!({ "slug": slug, "modules": summaries }))
            .expect("valid course json");
        let course = CourseDetails::try_from(raw).expect("valid course");

        let modules = full
            .into_iter()
            .map(|value| {
                let raw: RawModule = serde_json::from_value(value).expect("valid module json");
                let module = Module::try_from(raw).expect("valid module");
                (module.slug().to_string(), module)
            })
            .collect();

        Self {
            course: Some(course),
            modules,
            ..Default::default()
        }
    }

    pub(crate) fn gate(&self, key: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), Arc::new(Semaphore::new(0)));
    }

    pub(crate) fn release(&self, key: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(key) {
            gate.add_permits(1);
        }
    }

    pub(crate) fn fail(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    pub(crate) fn recover(&self, key: &str) {
        self.failing.lock().unwrap().remove(key);
    }

    pub(crate) fn calls(&self, key: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == key).count()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn enter(&self, key: String, resource_type: ResourceType) -> ApiResult<()> {
        self.calls.lock().unwrap().push(key.clone());

        let gate = self.gates.lock().unwrap().get(&key).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        if self.failing.lock().unwrap().contains(&key) {
            return Err(ApiError::status(resource_type, StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(())
    }
}

#[async_trait]
impl CourseApi for FakeApi {
    async fn fetch_catalog(&self, query: &CatalogQuery) -> ApiResult<Page<Course>> {
        self.enter(format!("catalog:{}:{}", query.page, query.name), ResourceType::Catalog)
            .await?;

        let needle = query.name.trim().to_lowercase();
        let matching: Vec<&String> = self
            .catalog
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect();

        let size = query.size.max(1) as usize;
        let total_pages = matching.len().div_ceil(size) as u32;
        let items = matching
            .iter()
            .skip((query.page as usize - 1) * size)
            .take(size)
            .map(|name| {
                let raw: RawCourse = serde_json::from_value(json!({ "slug": name })).unwrap();
                Course::try_from(raw).unwrap()
            })
            .collect();

        Ok(Page::new(items, query.page, query.size, matching.len() as u64, total_pages))
    }

    async fn fetch_course(&self, slug: &str) -> ApiResult<CourseDetails> {
        self.enter(format!("course:{slug}"), ResourceType::Course).await?;
        self.course
            .clone()
            .filter(|c| c.slug() == slug)
            .ok_or_else(|| ApiError::status(ResourceType::Course, StatusCode::NOT_FOUND))
    }

    async fn fetch_module(&self, course_slug: &str, module_slug: &str) -> ApiResult<ModuleDetails> {
        self.enter(format!("module:{module_slug}"), ResourceType::Module).await?;
        let module = self
            .modules
            .get(module_slug)
            .cloned()
            .ok_or_else(|| ApiError::status(ResourceType::Module, StatusCode::NOT_FOUND))?;

        Ok(ModuleDetails {
            course_slug: course_slug.to_string(),
            module,
        })
    }

    async fn complete_lesson(&self, key: &LessonKey) -> ApiResult<()> {
        self.enter(format!("complete:{}", key.lesson_slug), ResourceType::LessonCompletion)
            .await
    }
}
