use crate::config::CatalogSchema;

/// Catalog request key: `(page, size, name filter)`. `page` is 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogQuery {
    pub page: u32,
    pub size: u32,
    pub name: String,
}

impl CatalogQuery {
    pub fn new(page: u32, size: u32, name: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            size,
            name: name.into(),
        }
    }

    /// Page number as the backend expects it.
    pub fn backend_page(&self, schema: CatalogSchema) -> u32 {
        match schema {
            CatalogSchema::Paged => self.page.saturating_sub(1),
            CatalogSchema::Legacy => self.page,
        }
    }

    pub fn name_filter(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }

    pub fn params(&self, schema: CatalogSchema) -> Vec<(&'static str, String)> {
        let size_key = match schema {
            CatalogSchema::Paged => "size",
            CatalogSchema::Legacy => "limit",
        };

        let mut params = vec![
            ("page", self.backend_page(schema).to_string()),
            (size_key, self.size.to_string()),
        ];
        if let Some(name) = self.name_filter() {
            params.push(("courseName", name.to_string()));
        }
        params
    }
}
