use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::db::blog_repository::BlogPostRepository;
use crate::db::cv_repository::CvRepository;
use crate::db::project_repository::ProjectRepository;
use crate::error::AppError;
use crate::search::models::{SearchResponse, SearchResult, SourceKind, SourceRecord, TypeFilter};
use crate::search::normalize::LinkBuilder;
use crate::search::scoring::rank;

/// The three content sources a search reads from.
#[derive(Clone, Copy)]
pub struct ContentSources<'a> {
    pub posts: &'a dyn BlogPostRepository,
    pub projects: &'a dyn ProjectRepository,
    pub cvs: &'a dyn CvRepository,
}

/// Search parameters after parsing.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'q> {
    pub query: &'q str,
    pub filter: TypeFilter,
}

/// Query every source selected by `filter`, concurrently.
///
/// Either all selected sources succeed or the first error is returned; no
/// partial list is produced. Records come back in source-priority order
/// (blog, project, cv), each source keeping its own ordering, independent of
/// which query finished first.
pub async fn fetch_matches(
    sources: ContentSources<'_>,
    request: SearchRequest<'_>,
    now: DateTime<Utc>,
) -> Result<Vec<SourceRecord>, AppError> {
    let SearchRequest { query, filter } = request;

    let posts = async {
        if filter.includes(SourceKind::Blog) {
            sources.posts.search_published(query, now).await
        } else {
            Ok(Vec::new())
        }
    };
    let projects = async {
        if filter.includes(SourceKind::Project) {
            sources.projects.search(query).await
        } else {
            Ok(Vec::new())
        }
    };
    let cvs = async {
        if filter.includes(SourceKind::Cv) {
            sources.cvs.search_active(query).await
        } else {
            Ok(Vec::new())
        }
    };

    let (posts, projects, cvs) = tokio::try_join!(posts, projects, cvs)?;

    tracing::debug!(
        query,
        ?filter,
        posts = posts.len(),
        projects = projects.len(),
        cvs = cvs.len(),
        "search sources answered"
    );

    Ok(posts
        .into_iter()
        .map(SourceRecord::Blog)
        .chain(projects.into_iter().map(SourceRecord::Project))
        .chain(cvs.into_iter().map(SourceRecord::Cv))
        .collect())
}

/// Core search logic, separated from the HTTP layer for testability.
///
/// An empty query returns an empty response without touching any source.
/// Source queries run under `deadline`; expiry fails the whole search.
pub async fn process_search(
    sources: ContentSources<'_>,
    links: &LinkBuilder,
    request: SearchRequest<'_>,
    now: DateTime<Utc>,
    deadline: Duration,
) -> Result<SearchResponse, AppError> {
    if request.query.is_empty() {
        return Ok(SearchResponse::empty());
    }

    let records = tokio::time::timeout(deadline, fetch_matches(sources, request, now))
        .await
        .map_err(|_| {
            tracing::warn!(query = request.query, "search timed out after {deadline:?}");
            AppError::Timeout(format!("search did not complete within {deadline:?}"))
        })??;

    let mut results: Vec<SearchResult> = records
        .into_iter()
        .map(|record| record.into_result(links))
        .collect();
    rank(&mut results, request.query);

    Ok(SearchResponse::new(results))
}
