use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use trilha::api::HttpCourseApi;
use trilha::config::CatalogSchema;
use url::Url;

/// Shared state of the mock backend: fixtures plus per-route hit counters.
pub struct Backend {
    schema: CatalogSchema,
    catalog: Vec<Value>,
    hits: Mutex<HashMap<String, usize>>,
    last_query: Mutex<HashMap<String, String>>,
}

impl Backend {
    fn hit(&self, route: String) {
        *self.hits.lock().unwrap().entry(route).or_default() += 1;
    }
}

/// Mock course backend listening on an ephemeral port.
pub struct MockServer {
    pub addr: SocketAddr,
    backend: Arc<Backend>,
}

impl MockServer {
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn endpoint(&self) -> String {
        self.base_url().join("/api/v1").unwrap().to_string()
    }

    pub fn client(&self) -> HttpCourseApi {
        HttpCourseApi::new(self.endpoint(), self.backend.schema).unwrap()
    }

    /// Requests received for `route`, e.g. `GET /courses/rust`.
    pub fn hits(&self, route: &str) -> usize {
        self.backend.hits.lock().unwrap().get(route).copied().unwrap_or(0)
    }

    /// Query string of the last catalog request.
    pub fn last_query(&self) -> HashMap<String, String> {
        self.backend.last_query.lock().unwrap().clone()
    }
}

pub async fn setup_server(schema: CatalogSchema, course_count: usize) -> MockServer {
    let catalog = (1..=course_count)
        .map(|i| {
            json!({
                "slug": format!("curso-{i}"),
                "name": format!("Curso {i}"),
                "thumbnailUrl": format!("/uploads/curso-{i}.png"),
                "isFree": i % 2 == 0,
                "durationMinutes": i * 30,
                "instructors": [{ "username": "ana" }],
            })
        })
        .collect();

    let backend = Arc::new(Backend {
        schema,
        catalog,
        hits: Mutex::new(HashMap::new()),
        last_query: Mutex::new(HashMap::new()),
    });

    let app = Router::new()
        .route("/api/v1/courses", get(catalog_route))
        .route("/api/v1/courses/{slug}", get(course_route))
        .route("/api/v1/courses/{slug}/modules/{module}", get(module_route))
        .route(
            "/api/v1/courses/{slug}/modules/{module}/lessons/{lesson}/complete",
            patch(complete_route),
        )
        .with_state(Arc::clone(&backend));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockServer { addr, backend }
}

async fn catalog_route(
    State(backend): State<Arc<Backend>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.hit(String::from("GET /courses"));
    *backend.last_query.lock().unwrap() = params.clone();

    let needle = params
        .get("courseName")
        .map(|n| n.to_lowercase())
        .unwrap_or_default();
    let matching: Vec<&Value> = backend
        .catalog
        .iter()
        .filter(|c| c["name"].as_str().unwrap().to_lowercase().contains(&needle))
        .collect();

    let parse = |key: &str, default: usize| {
        params
            .get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    };

    let body = match backend.schema {
        CatalogSchema::Paged => {
            let (page, size) = (parse("page", 0), parse("size", 6));
            let items: Vec<&Value> = matching.iter().copied().skip(page * size).take(size).collect();
            let total_pages = matching.len().div_ceil(size);
            json!({
                "content": items,
                "page": page,
                "size": size,
                "totalElements": matching.len(),
                "totalPages": total_pages,
                "last": page + 1 >= total_pages,
            })
        }
        CatalogSchema::Legacy => {
            let (page, limit) = (parse("page", 1), parse("limit", 6));
            let items: Vec<&Value> = matching
                .iter()
                .copied()
                .skip(page.saturating_sub(1) * limit)
                .take(limit)
                .collect();
            json!({
                "courses": items,
                "page": page,
                "limit": limit,
                "totalCourses": matching.len(),
                "totalPages": matching.len().div_ceil(limit),
            })
        }
    };

    Json(body)
}

async fn course_route(
    State(backend): State<Arc<Backend>>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    backend.hit(format!("GET /courses/{slug}"));

    match slug.as_str() {
        "rust" => Ok(Json(json!({
            "slug": "rust",
            "name": "Rust do Zero",
            "durationMinutes": 600,
            "introduction": {
                "title": "Boas-vindas",
                "provider": "YOUTUBE",
                "videoId": "intro123",
                "durationMinutes": 3,
            },
            // deliberately out of order; position decides
            "modules": [
                { "slug": "advanced", "position": 4, "lessonsCount": 1 },
                { "slug": "empty", "position": 3, "lessonsCount": 0 },
                { "slug": "intro", "position": 1, "lessonsCount": 2 },
                { "slug": "basics", "position": 2, "lessonsCount": 1 },
            ],
        }))),
        // a body without slug cannot be normalized
        "broken" => Ok(Json(json!({ "name": "Sem slug" }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

fn module_lessons(module: &str) -> Option<Value> {
    let lessons = match module {
        "intro" => json!([
            { "slug": "hello", "title": "Olá", "provider": "YOUTUBE", "videoId": "v1", "durationMinutes": 5 },
            { "slug": "setup", "title": "Setup", "provider": "TEXT", "content": "# cargo", "durationMinutes": 10 },
        ]),
        "basics" => json!([
            {
                "slug": "ownership",
                "provider": "YOUTUBE",
                "videoId": "v2",
                "files": [{ "name": "slides.pdf", "url": "/uploads/slides.pdf" }],
            },
        ]),
        "empty" => json!([]),
        "advanced" => json!([{ "slug": "unsafe", "provider": "VIMEO", "videoId": "v3" }]),
        _ => return None,
    };
    Some(lessons)
}

async fn module_route(
    State(backend): State<Arc<Backend>>,
    Path((slug, module)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    backend.hit(format!("GET /courses/{slug}/modules/{module}"));

    if slug != "rust" {
        return Err(StatusCode::NOT_FOUND);
    }
    let lessons = module_lessons(&module).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({
        "courseSlug": slug,
        "module": { "slug": module, "lessons": lessons },
    })))
}

async fn complete_route(
    State(backend): State<Arc<Backend>>,
    Path((slug, module, lesson)): Path<(String, String, String)>,
) -> StatusCode {
    backend.hit(format!("PATCH /courses/{slug}/modules/{module}/lessons/{lesson}/complete"));

    if lesson == "unsafe" {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::NO_CONTENT
    }
}
