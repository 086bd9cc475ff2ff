mod common;
use std::sync::Arc;

use trilha::api::CourseApi;
use trilha::config::CatalogSchema;
use trilha::model::ResourceType;
use trilha::model::entity::{LessonContent, LessonKey, PlayerEntry};
use trilha::player::{
    Advance, COMPLETED_MESSAGE, COMPLETION_FAILED_MESSAGE, CourseTree, Direction, LessonNavigator,
    complete_lesson,
};

use crate::common::setup_server;

#[tokio::test]
async fn course_details_are_ordered_by_position() {
    let server = setup_server(CatalogSchema::Paged, 0).await;
    let details = server.client().fetch_course("rust").await.unwrap();

    let slugs: Vec<&str> = details.modules().iter().map(|m| m.slug()).collect();
    assert_eq!(slugs, ["intro", "basics", "empty", "advanced"]);
    assert_eq!(details.course().title(), "Rust do Zero");
    assert_eq!(details.introduction().unwrap().video_id(), Some("intro123"));
    assert_eq!(
        details.player_entry(),
        PlayerEntry::Start {
            course_slug: String::from("rust")
        }
    );
}

#[tokio::test]
async fn walk_through_course_fetches_each_module_once() {
    let server = setup_server(CatalogSchema::Paged, 0).await;
    let tree = Arc::new(CourseTree::open(Arc::new(server.client()), "rust").await.unwrap());
    let nav = LessonNavigator::start(tree).await.unwrap();

    let lesson = nav.current_lesson().unwrap();
    assert_eq!(lesson.slug(), "hello");
    assert!(matches!(lesson.content(), LessonContent::Video { video_id, .. } if video_id == "v1"));

    let mut visited = vec![lesson.slug().to_string()];
    while let Advance::Moved(position) = nav.advance(Direction::Next).await.unwrap() {
        visited.push(format!("{}/{}", position.module().slug(), position.lesson().slug()));
    }
    assert_eq!(
        visited,
        ["hello", "intro/setup", "basics/ownership", "advanced/unsafe"]
    );
    assert!(!nav.has_next());

    // back across the empty module, everything already cached
    nav.advance(Direction::Previous).await.unwrap();
    let position = nav.position().unwrap();
    assert_eq!(position.lesson().slug(), "ownership");
    assert_eq!(position.lesson().files()[0].url(), "/uploads/slides.pdf");

    for module in ["intro", "basics", "empty", "advanced"] {
        assert_eq!(server.hits(&format!("GET /courses/rust/modules/{module}")), 1);
    }
    assert_eq!(server.hits("GET /courses/rust"), 1);
}

#[tokio::test]
async fn deep_link_opens_lesson_and_text_content() {
    let server = setup_server(CatalogSchema::Paged, 0).await;
    let tree = Arc::new(CourseTree::open(Arc::new(server.client()), "rust").await.unwrap());
    let nav = LessonNavigator::open_at(tree, "intro", "setup").await.unwrap();

    let lesson = nav.current_lesson().unwrap();
    assert_eq!(lesson.title(), "Setup");
    assert_eq!(
        lesson.content(),
        &LessonContent::Text {
            markdown: String::from("# cargo")
        }
    );
    assert!(nav.has_previous());
    assert_eq!(server.hits("GET /courses/rust/modules/basics"), 0);
}

#[tokio::test]
async fn completion_reports_both_outcomes() {
    let server = setup_server(CatalogSchema::Paged, 0).await;
    let tree = Arc::new(CourseTree::open(Arc::new(server.client()), "rust").await.unwrap());
    let nav = LessonNavigator::open_at(tree, "basics", "ownership").await.unwrap();

    let notice = nav.complete_current().await.unwrap();
    assert_eq!(notice.message, COMPLETED_MESSAGE);
    assert_eq!(
        server.hits("PATCH /courses/rust/modules/basics/lessons/ownership/complete"),
        1
    );

    nav.select("advanced", "unsafe").await.unwrap();
    let notice = nav.complete_current().await.unwrap();
    assert!(!notice.is_success());
    assert_eq!(notice.message, COMPLETION_FAILED_MESSAGE);
    assert_eq!(nav.cursor().unwrap().lesson_slug, "unsafe");
}

#[tokio::test]
async fn completion_without_navigator() {
    let server = setup_server(CatalogSchema::Paged, 0).await;
    let api = server.client();

    let key = LessonKey::new("rust", "intro", "hello");
    assert!(complete_lesson(&api, &key).await.is_success());
    assert!(api.complete_lesson(&key).await.is_ok());
    assert_eq!(
        server.hits("PATCH /courses/rust/modules/intro/lessons/hello/complete"),
        2
    );
}

#[tokio::test]
async fn fetch_errors_are_tagged_with_their_resource() {
    let server = setup_server(CatalogSchema::Paged, 0).await;
    let api = server.client();

    let err = api.fetch_module("rust", "missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.resource_type(), Some(ResourceType::Module));

    let err = api.fetch_course("broken").await.unwrap_err();
    assert_eq!(err.resource_type(), Some(ResourceType::Course));
}
