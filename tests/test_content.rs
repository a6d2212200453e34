mod common;

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;

use common::{cv, project, published_post, TestEnv};

#[tokio::test]
async fn blog_listing_is_paginated_newest_first() {
    let env = TestEnv::new();
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    for id in 1..=12 {
        env.add_post(published_post(
            id,
            &format!("Post {id}"),
            "<p>Body</p>",
            None,
            start + Duration::days(id),
        ))
        .await;
    }

    let server = env.server();
    let first: Value = server.get("/api/blog").await.json();
    assert_eq!(first["currentPage"], 1);
    assert_eq!(first["lastPage"], 2);
    assert_eq!(first["perPage"], 10);
    assert_eq!(first["total"], 12);
    let items = first["items"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["id"], 12);
    assert_eq!(items[9]["id"], 3);

    let second: Value = server
        .get("/api/blog")
        .add_query_param("page", "2")
        .await
        .json();
    let ids: Vec<i64> = second["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn malformed_page_falls_back_to_first_page() {
    let env = TestEnv::new();
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    for id in 1..=3 {
        env.add_post(published_post(
            id,
            &format!("Post {id}"),
            "<p>Body</p>",
            None,
            start + Duration::days(id),
        ))
        .await;
        env.add_project(project(id, &format!("Project {id}"), "Desc", &[]))
            .await;
    }

    let server = env.server();
    for path in ["/api/blog", "/api/projects"] {
        for raw in ["-1", "abc", "0"] {
            let response = server.get(path).add_query_param("page", raw).await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["currentPage"], 1, "{path}?page={raw}");
            assert_eq!(body["items"].as_array().unwrap().len(), 3, "{path}?page={raw}");
        }
    }
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() {
    let env = TestEnv::new();
    env.add_project(project(1, "Only", "Desc", &[])).await;

    let server = env.server();
    let body: Value = server
        .get("/api/projects")
        .add_query_param("page", i64::MAX.to_string())
        .await
        .json();
    assert_eq!(body["total"], 1);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn blog_listing_hides_drafts_and_future_posts() {
    let env = TestEnv::new();
    let past = Utc::now() - Duration::days(1);
    env.add_post(published_post(1, "Live", "<p>Live</p>", None, past))
        .await;
    env.add_post(published_post(
        2,
        "Scheduled",
        "<p>Later</p>",
        None,
        Utc::now() + Duration::days(7),
    ))
    .await;
    let mut draft = published_post(3, "Draft", "<p>Draft</p>", None, past);
    draft.is_published = false;
    env.add_post(draft).await;

    let server = env.server();
    let body: Value = server.get("/api/blog").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "Live");
}

#[tokio::test]
async fn post_detail_renders_markdown() {
    let env = TestEnv::new();
    let mut post = published_post(
        1,
        "Markdown",
        "<p>fallback</p>",
        Some("A *short* summary"),
        Utc::now() - Duration::hours(1),
    );
    post.markdown_content = Some("## Setup\n\n<script>alert(1)</script>\n\nRun it.".to_string());
    env.add_post(post).await;

    let server = env.server();
    let body: Value = server.get("/api/blog/post-1").await.json();
    let html = body["parsed_content"].as_str().unwrap();
    assert!(html.contains("<h2>Setup</h2>"));
    assert!(!html.contains("<script>"));
    assert!(body["parsed_excerpt"]
        .as_str()
        .unwrap()
        .contains("<em>short</em>"));
}

#[tokio::test]
async fn post_detail_not_found_for_future_post() {
    let env = TestEnv::new();
    env.add_post(published_post(
        1,
        "Soon",
        "<p>Soon</p>",
        None,
        Utc::now() + Duration::days(1),
    ))
    .await;

    let server = env.server_permissive();
    let response = server.get("/api/blog/post-1").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("post-1"));

    server
        .get("/api/blog/missing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn projects_listed_by_sort_order() {
    let env = TestEnv::new();
    let mut late = project(1, "Late", "Listed last", &["Rust"]);
    late.sort_order = 9;
    env.add_project(late).await;
    env.add_project(project(2, "Early", "Listed first", &["Go"]))
        .await;

    let server = env.server();
    let body: Value = server.get("/api/projects").await.json();
    assert_eq!(body["perPage"], 12);
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"][0]["title"], "Early");
    assert_eq!(body["items"][1]["title"], "Late");
    assert_eq!(
        body["items"][0]["parsed_content"].as_str().map(str::trim),
        Some("Listed first")
    );
}

#[tokio::test]
async fn project_detail_and_errors() {
    let env = TestEnv::new();
    env.add_project(project(4, "Gateway", "API gateway", &["Rust"]))
        .await;

    let server = env.server_permissive();
    let response = server.get("/api/projects/4").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"], "Gateway");
    assert_eq!(body["technologies"], serde_json::json!(["Rust"]));

    server
        .get("/api/projects/99")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/projects/not-a-number")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cv_listing_only_active() {
    let env = TestEnv::new();
    env.add_cv(cv(1, "Current", Some("<p>Now</p>"), true)).await;
    env.add_cv(cv(2, "Old", Some("<p>Then</p>"), false)).await;

    let server = env.server();
    let body: Value = server.get("/api/cv").await.json();
    let cvs = body.as_array().unwrap();
    assert_eq!(cvs.len(), 1);
    assert_eq!(cvs[0]["title"], "Current");
    assert_eq!(cvs[0]["parsed_content"], "<p>Now</p>");
}

#[tokio::test]
async fn health_reports_ok() {
    let env = TestEnv::new();
    let server = env.server();
    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "folio");
}
