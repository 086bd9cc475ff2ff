//! Boundary with the REST backend.

mod client;
pub use client::CourseApi;

pub mod dto;

mod error;
pub use error::{ApiError, ApiResult};

mod http;
pub use http::HttpCourseApi;

mod query;
pub use query::CatalogQuery;
