use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::AppError;
use crate::search::aggregator::{process_search, SearchRequest};
use crate::search::models::{SearchResponse, TypeFilter};

/// Query parameters of `GET /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    /// `all`, `blog`, `project` or `cv`; anything else searches everything.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Axum handler for `GET /api/search`.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let request = SearchRequest {
        query: &params.q,
        filter: TypeFilter::from_param(params.kind.as_deref()),
    };

    let response = process_search(
        state.sources(),
        &state.links,
        request,
        chrono::Utc::now(),
        state.settings.search.timeout(),
    )
    .await?;

    tracing::debug!(
        query = %params.q,
        total = response.total_results,
        "search completed"
    );

    Ok(Json(response))
}
