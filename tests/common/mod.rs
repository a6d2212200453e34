#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};

use folio::app::{router, AppState};
use folio::config::Settings;
use folio::db::blog_repository::BlogPostRepository;
use folio::db::cv_repository::CvRepository;
use folio::db::memory::InMemoryContentStore;
use folio::db::models::{BlogPost, Cv, Project};
use folio::db::pagination::{Page, PageRequest};
use folio::db::project_repository::ProjectRepository;
use folio::error::AppError;

pub const BASE_URL: &str = "https://folio.test";

/// Settings for tests: in-memory storage, fixed public origin and a short
/// search deadline.
pub fn test_settings() -> Settings {
    Settings::from_toml(&format!(
        r#"
        [server]
        public_base_url = "{BASE_URL}"

        [storage]
        backend = "memory"

        [search]
        timeout_ms = 200
        "#
    ))
    .expect("Failed to build test settings")
}

/// In-memory content store plus the Axum router wired to it.
pub struct TestEnv {
    pub store: Arc<InMemoryContentStore>,
    pub router: Router,
}

impl TestEnv {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryContentStore::new());
        let state = AppState::new(
            store.clone(),
            store.clone(),
            store.clone(),
            test_settings(),
        );

        Self {
            store,
            router: router(state),
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        permissive_server(self.router.clone())
    }

    pub async fn add_post(&self, post: BlogPost) {
        BlogPostRepository::create_or_update(self.store.as_ref(), post)
            .await
            .expect("Failed to store blog post");
    }

    pub async fn add_project(&self, project: Project) {
        ProjectRepository::create_or_update(self.store.as_ref(), project)
            .await
            .expect("Failed to store project");
    }

    pub async fn add_cv(&self, cv: Cv) {
        CvRepository::create_or_update(self.store.as_ref(), cv)
            .await
            .expect("Failed to store CV");
    }
}

/// `TestServer` over an arbitrary router, without success expectations.
pub fn permissive_server(router: Router) -> axum_test::TestServer {
    axum_test::TestServer::builder()
        .build(router)
        .expect("Failed to build TestServer")
}

/// Router whose repositories are replaced by the given ones.
pub fn router_with(
    blog: Arc<dyn BlogPostRepository>,
    projects: Arc<dyn ProjectRepository>,
    cvs: Arc<dyn CvRepository>,
) -> Router {
    router(AppState::new(blog, projects, cvs, test_settings()))
}

// --- Record builders ---

pub fn published_post(
    id: i64,
    title: &str,
    content: &str,
    excerpt: Option<&str>,
    published_at: DateTime<Utc>,
) -> BlogPost {
    BlogPost {
        id,
        title: title.to_string(),
        slug: format!("post-{id}"),
        content: content.to_string(),
        markdown_content: None,
        excerpt: excerpt.map(str::to_string),
        featured_image: None,
        is_published: true,
        published_at: Some(published_at),
    }
}

pub fn project(id: i64, title: &str, description: &str, technologies: &[&str]) -> Project {
    Project {
        id,
        title: title.to_string(),
        description: description.to_string(),
        markdown_content: None,
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        image: None,
        live_url: None,
        github_url: None,
        is_featured: false,
        sort_order: id as i32,
    }
}

pub fn cv(id: i64, title: &str, content: Option<&str>, is_active: bool) -> Cv {
    Cv {
        id,
        title: title.to_string(),
        content: content.map(str::to_string),
        markdown_content: None,
        file_path: None,
        is_active,
    }
}

// --- Misbehaving sources ---

/// Project source whose every query fails.
pub struct FailingProjects;

#[async_trait]
impl ProjectRepository for FailingProjects {
    async fn search(&self, _query: &str) -> Result<Vec<Project>, AppError> {
        Err(AppError::Database("connection refused".into()))
    }

    async fn list(&self, _page: PageRequest) -> Result<Page<Project>, AppError> {
        Err(AppError::Database("connection refused".into()))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Project>, AppError> {
        Err(AppError::Database("connection refused".into()))
    }

    async fn create_or_update(&self, _project: Project) -> Result<(), AppError> {
        Err(AppError::Database("connection refused".into()))
    }
}

/// CV source that answers only after `delay`.
pub struct SlowCvs {
    pub delay: Duration,
}

#[async_trait]
impl CvRepository for SlowCvs {
    async fn search_active(&self, _query: &str) -> Result<Vec<Cv>, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn list_active(&self) -> Result<Vec<Cv>, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn create_or_update(&self, _cv: Cv) -> Result<(), AppError> {
        Ok(())
    }
}
