//! Paginated, filterable course listing.

mod controller;
pub use controller::{CatalogController, CatalogStatus, CatalogView, LoadOutcome};

mod error;
pub use error::{CatalogError, CatalogResult};
