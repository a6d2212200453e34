//! Public read-only endpoints for blog posts, projects and CVs.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::db::models::{BlogPost, Cv, Project};
use crate::db::pagination::{Page, PageRequest};
use crate::error::AppError;
use crate::rendering::markdown::{render_markdown, render_preferring_markdown};

pub const POSTS_PER_PAGE: u64 = 10;
pub const PROJECTS_PER_PAGE: u64 = 12;

/// Listing query parameters. `page` is kept raw so that a malformed or
/// negative value falls back to the first page instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
}

impl PageParams {
    fn request(&self, per_page: u64) -> PageRequest {
        let page = self
            .page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map_or(1, |page| page.max(1) as u64);
        PageRequest::new(page, per_page)
    }
}

/// A blog post as shown to visitors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostView {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// Rendered HTML body.
    pub parsed_content: String,
    /// Summary rendered from Markdown, if there is one.
    pub parsed_excerpt: Option<String>,
}

impl From<BlogPost> for BlogPostView {
    fn from(post: BlogPost) -> Self {
        let parsed_content =
            render_preferring_markdown(post.markdown_content.as_deref(), &post.content);
        let parsed_excerpt = post
            .excerpt
            .as_deref()
            .filter(|e| !e.is_empty())
            .map(render_markdown);

        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            featured_image: post.featured_image,
            published_at: post.published_at,
            parsed_content,
            parsed_excerpt,
        }
    }
}

/// A project as shown to visitors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub image: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub parsed_content: String,
}

impl From<Project> for ProjectView {
    fn from(project: Project) -> Self {
        let parsed_content =
            render_preferring_markdown(project.markdown_content.as_deref(), &project.description);

        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            technologies: project.technologies,
            image: project.image,
            live_url: project.live_url,
            github_url: project.github_url,
            is_featured: project.is_featured,
            sort_order: project.sort_order,
            parsed_content,
        }
    }
}

/// A CV as shown to visitors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvView {
    pub id: i64,
    pub title: String,
    pub file_path: Option<String>,
    /// Rendered body; absent when the CV is only a file.
    pub parsed_content: Option<String>,
}

impl From<Cv> for CvView {
    fn from(cv: Cv) -> Self {
        let has_markdown = cv
            .markdown_content
            .as_deref()
            .is_some_and(|md| !md.trim().is_empty());
        let parsed_content = if has_markdown || cv.content.is_some() {
            Some(render_preferring_markdown(
                cv.markdown_content.as_deref(),
                cv.content.as_deref().unwrap_or_default(),
            ))
        } else {
            None
        };

        Self {
            id: cv.id,
            title: cv.title,
            file_path: cv.file_path,
            parsed_content,
        }
    }
}

/// Axum handler for `GET /api/blog`.
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<BlogPostView>>, AppError> {
    let page = state
        .blog_repo
        .list_published(Utc::now(), params.request(POSTS_PER_PAGE))
        .await?;

    Ok(Json(page.map(BlogPostView::from)))
}

/// Axum handler for `GET /api/blog/{slug}`.
///
/// Unpublished and future-dated posts are reported as not found.
pub async fn show_post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostView>, AppError> {
    let post = state
        .blog_repo
        .find_published_by_slug(&slug, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog post '{slug}' not found")))?;

    Ok(Json(post.into()))
}

/// Axum handler for `GET /api/projects`.
pub async fn list_projects_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<ProjectView>>, AppError> {
    let page = state
        .project_repo
        .list(params.request(PROJECTS_PER_PAGE))
        .await?;

    Ok(Json(page.map(ProjectView::from)))
}

/// Axum handler for `GET /api/projects/{id}`.
pub async fn show_project_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectView>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid project id '{id}'")))?;

    let project = state
        .project_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    Ok(Json(project.into()))
}

/// Axum handler for `GET /api/cv`.
pub async fn list_cvs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CvView>>, AppError> {
    let cvs = state.cv_repo.list_active().await?;
    Ok(Json(cvs.into_iter().map(CvView::from).collect()))
}
