use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::db::blog_repository::BlogPostRepository;
use crate::db::cv_repository::CvRepository;
use crate::db::project_repository::ProjectRepository;
use crate::search::aggregator::ContentSources;
use crate::search::normalize::LinkBuilder;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub blog_repo: Arc<dyn BlogPostRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub cv_repo: Arc<dyn CvRepository>,
    pub links: LinkBuilder,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        blog_repo: Arc<dyn BlogPostRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        cv_repo: Arc<dyn CvRepository>,
        settings: Settings,
    ) -> Self {
        Self {
            blog_repo,
            project_repo,
            cv_repo,
            links: LinkBuilder::new(&settings.server.public_base_url),
            settings: Arc::new(settings),
        }
    }

    pub fn sources(&self) -> ContentSources<'_> {
        ContentSources {
            posts: self.blog_repo.as_ref(),
            projects: self.project_repo.as_ref(),
            cvs: self.cv_repo.as_ref(),
        }
    }
}

/// Build the HTTP router with all public routes.
pub fn router(state: AppState) -> Router {
    use crate::api;

    Router::new()
        .route("/api/search", get(api::search::search_handler))
        .route("/api/blog", get(api::content::list_posts_handler))
        .route("/api/blog/{slug}", get(api::content::show_post_handler))
        .route("/api/projects", get(api::content::list_projects_handler))
        .route("/api/projects/{id}", get(api::content::show_project_handler))
        .route("/api/cv", get(api::content::list_cvs_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
