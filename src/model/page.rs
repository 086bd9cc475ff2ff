use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Catalog,
    Course,
    Module,
    Lesson,
    Instructor,
    LessonCompletion,
}

/// One page of a paginated listing. `page` is always 1-indexed here; the
/// translation from the backend's numbering happens in the api layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_items: u64, total_pages: u32) -> Self {
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
            last: page >= total_pages,
        }
    }

    pub fn with_last(mut self, last: bool) -> Self {
        self.last = last;
        self
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}
