use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::api::{ApiError, ApiResult, CatalogQuery, CourseApi};
use crate::cache::QueryCache;
use crate::catalog::{CatalogError, CatalogResult};
use crate::model::Page;
use crate::model::entity::Course;

/// What the catalog screen should look like right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Nothing requested yet.
    Idle,
    /// First load in flight, nothing to show.
    Loading,
    Ready,
    /// Previous page still shown (dimmed) while a new one loads.
    Refreshing,
    /// First load failed; blocking error.
    Failed,
    /// A refresh failed; previous page still shown with a notice.
    Stale,
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    pub page: u32,
    pub filter: String,
    pub total_pages: u32,
    pub data: Option<Arc<Page<Course>>>,
    pub loading: bool,
    pub error: Option<Arc<ApiError>>,
}

impl CatalogView {
    pub fn status(&self) -> CatalogStatus {
        match (&self.data, self.loading, &self.error) {
            (None, true, _) => CatalogStatus::Loading,
            (None, false, Some(_)) => CatalogStatus::Failed,
            (None, false, None) => CatalogStatus::Idle,
            (Some(_), true, _) => CatalogStatus::Refreshing,
            (Some(_), false, Some(_)) => CatalogStatus::Stale,
            (Some(_), false, None) => CatalogStatus::Ready,
        }
    }

    pub fn courses(&self) -> &[Course] {
        self.data.as_deref().map(|p| p.items.as_slice()).unwrap_or_default()
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Applied(Arc<Page<Course>>),
    /// A newer request was issued meanwhile; this response was dropped.
    Superseded,
    Failed {
        error: Arc<ApiError>,
        blocking: bool,
    },
}

impl LoadOutcome {
    /// The applied page, `None` when superseded, or the failure.
    pub fn into_result(self) -> CatalogResult<Option<Arc<Page<Course>>>> {
        match self {
            Self::Applied(page) => Ok(Some(page)),
            Self::Superseded => Ok(None),
            Self::Failed { error, .. } => Err(CatalogError::ApiError(error)),
        }
    }
}

#[derive(Debug)]
struct CatalogState {
    page: u32,
    filter: String,
    generation: u64,
    total_pages: Option<u32>,
    data: Option<Arc<Page<Course>>>,
    /// Query that produced `data`.
    shown: Option<CatalogQuery>,
    loading: bool,
    error: Option<Arc<ApiError>>,
}

#[derive(Debug)]
struct Ticket {
    generation: u64,
    query: CatalogQuery,
}

/// Page/filter state of the catalog plus a result cache keyed by
/// `(page, size, filter)`. The response of the latest request is the only
/// one ever applied.
pub struct CatalogController<A: ?Sized> {
    api: Arc<A>,
    page_size: u32,
    cache: QueryCache<CatalogQuery, Page<Course>>,
    state: Mutex<CatalogState>,
}

impl<A> CatalogController<A>
where
    A: CourseApi + ?Sized,
{
    pub fn new(api: Arc<A>, page_size: u32) -> Self {
        Self {
            api,
            page_size: page_size.max(1),
            cache: QueryCache::new(),
            state: Mutex::new(CatalogState {
                page: 1,
                filter: String::new(),
                generation: 0,
                total_pages: None,
                data: None,
                shown: None,
                loading: false,
                error: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page(&self) -> u32 {
        self.state().page
    }

    pub fn filter(&self) -> String {
        self.state().filter.clone()
    }

    /// Last page count reported by the backend; 1 until the first response.
    pub fn total_pages(&self) -> u32 {
        self.state().total_pages.unwrap_or(1).max(1)
    }

    pub fn has_next_page(&self) -> bool {
        self.page() < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page() > 1
    }

    pub fn query(&self) -> CatalogQuery {
        let state = self.state();
        CatalogQuery::new(state.page, self.page_size, state.filter.clone())
    }

    pub fn view(&self) -> CatalogView {
        let state = self.state();
        CatalogView {
            page: state.page,
            filter: state.filter.clone(),
            total_pages: state.total_pages.unwrap_or(1).max(1),
            data: state.data.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Forgets cached pages; the next load goes to the backend.
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    /// (Re)loads the current page and filter.
    pub async fn load(&self) -> LoadOutcome {
        let ticket = {
            let mut state = self.state();
            self.issue(&mut state)
        };
        self.run(ticket).await
    }

    /// Changes the name filter and goes back to page 1 in the same step.
    pub async fn set_filter(&self, text: impl Into<String>) -> LoadOutcome {
        let ticket = {
            let mut state = self.state();
            state.filter = text.into();
            state.page = 1;
            self.issue(&mut state)
        };
        self.run(ticket).await
    }

    /// Loads page `page` (1-indexed), which must be within the last reported page count.
    pub async fn request_page(&self, page: u32) -> CatalogResult<LoadOutcome> {
        let ticket = {
            let mut state = self.state();
            let total_pages = state.total_pages.unwrap_or(1).max(1);
            if page < 1 || page > total_pages {
                return Err(CatalogError::PageOutOfRange {
                    requested: page,
                    total_pages,
                });
            }
            state.page = page;
            self.issue(&mut state)
        };
        Ok(self.run(ticket).await)
    }

    pub async fn next_page(&self) -> CatalogResult<LoadOutcome> {
        let page = self.page().saturating_add(1);
        self.request_page(page).await
    }

    pub async fn previous_page(&self) -> CatalogResult<LoadOutcome> {
        let page = self.page().saturating_sub(1);
        self.request_page(page).await
    }

    fn issue(&self, state: &mut CatalogState) -> Ticket {
        state.generation += 1;
        state.loading = true;
        Ticket {
            generation: state.generation,
            query: CatalogQuery::new(state.page, self.page_size, state.filter.clone()),
        }
    }

    async fn run(&self, ticket: Ticket) -> LoadOutcome {
        let api = Arc::clone(&self.api);
        let query = ticket.query.clone();
        let result = self
            .cache
            .get_or_fetch(&ticket.query, move || async move {
                api.fetch_catalog(&query).await
            })
            .await;

        self.apply(ticket, result)
    }

    fn apply(&self, ticket: Ticket, result: ApiResult<Arc<Page<Course>>>) -> LoadOutcome {
        let mut state = self.state();
        if ticket.generation != state.generation {
            debug!(
                "discarding superseded catalog response for page {} (filter {:?})",
                ticket.query.page, ticket.query.name
            );
            return LoadOutcome::Superseded;
        }

        state.loading = false;
        match result {
            Ok(page) => {
                state.page = page.page;
                state.total_pages = Some(page.total_pages);
                state.data = Some(Arc::clone(&page));
                state.shown = Some(CatalogQuery::new(page.page, self.page_size, ticket.query.name));
                state.error = None;
                LoadOutcome::Applied(page)
            }
            Err(error) => {
                let error = Arc::new(error);
                let blocking = state.data.is_none();
                // a failed filter change keeps the new filter on page 1
                if let Some(shown) = state.page_shown() {
                    state.page = shown;
                }
                warn!(
                    "catalog load failed for page {} (blocking: {}): {}",
                    ticket.query.page, blocking, error
                );
                state.error = Some(Arc::clone(&error));
                LoadOutcome::Failed { error, blocking }
            }
        }
    }
}

impl CatalogState {
    /// Page on screen, if it was loaded under the current filter.
    fn page_shown(&self) -> Option<u32> {
        self.shown
            .as_ref()
            .filter(|shown| shown.name == self.filter)
            .map(|shown| shown.page)
    }
}
