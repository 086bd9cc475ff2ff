use std::sync::Arc;

use crate::api::{ApiResult, CourseApi};
use crate::cache::QueryCache;
use crate::model::entity::{CourseDetails, Module};
use crate::player::{PlayerError, PlayerResult};

/// Course details plus the lesson lists of the modules fetched so far in
/// this session. A module's lessons are fetched at most once until
/// [`CourseTree::reset`].
pub struct CourseTree<A: ?Sized> {
    api: Arc<A>,
    details: CourseDetails,
    modules: QueryCache<String, Module>,
}

impl<A> CourseTree<A>
where
    A: CourseApi + ?Sized,
{
    #[tracing::instrument(skip(api))]
    pub async fn open(api: Arc<A>, slug: &str) -> ApiResult<Self> {
        let details = api.fetch_course(slug).await?;
        Ok(Self::from_details(api, details))
    }

    pub fn from_details(api: Arc<A>, details: CourseDetails) -> Self {
        Self {
            api,
            details,
            modules: QueryCache::new(),
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn details(&self) -> &CourseDetails {
        &self.details
    }

    pub fn slug(&self) -> &str {
        self.details.slug()
    }

    /// Module summaries in display order.
    pub fn modules(&self) -> &[Module] {
        self.details.modules()
    }

    pub fn module_index(&self, slug: &str) -> Option<usize> {
        self.details.module_index(slug)
    }

    /// Full module (with lessons), fetched on first use.
    pub async fn module(&self, slug: &str) -> PlayerResult<Arc<Module>> {
        if self.module_index(slug).is_none() {
            return Err(PlayerError::UnknownModule {
                course_slug: self.slug().to_string(),
                module_slug: slug.to_string(),
            });
        }

        let key = slug.to_string();
        let module_slug = key.clone();
        let api = Arc::clone(&self.api);
        let course_slug = self.slug().to_string();
        let module = self
            .modules
            .get_or_fetch(&key, move || async move {
                tracing::debug!("fetching lessons of module {}/{}", course_slug, module_slug);
                api.fetch_module(&course_slug, &module_slug)
                    .await
                    .map(|details| details.into_module())
            })
            .await?;

        Ok(module)
    }

    /// Full module if it was already fetched; never fetches.
    pub fn loaded_module(&self, slug: &str) -> Option<Arc<Module>> {
        self.modules.get(&slug.to_string())
    }

    pub fn is_loaded(&self, slug: &str) -> bool {
        self.loaded_module(slug).is_some()
    }

    /// Starts a new session: every module is fetched again on next use.
    pub fn reset(&self) {
        self.modules.clear();
    }
}
