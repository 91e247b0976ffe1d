//! Route handlers.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::catalog::{map_game_detail, map_search_results, GameDetail, GameSummary, MappingError};
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

const INDEX_HTML: &str = "<div style='font-family: sans-serif; font-weight: 500; display: flex; \
flex-direction: column; gap: 8px; padding: 8px;'><span>Search - GET /search/{query}</span>\
<span>Details - GET /details/{slug} (get slug from search endpoint)</span></div>";

/// Static usage page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /search/{query}`
pub async fn search(
    State(state): State<AppState>,
    Path(query): Path<String>,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let response = search_games(&state, &query, request_id(&headers))
        .await
        .into_response();
    metrics::record_request("search", response.status().as_u16(), start);
    response
}

async fn search_games(
    state: &AppState,
    query: &str,
    request_id: &str,
) -> Result<Json<Vec<GameSummary>>, ApiError> {
    let objects = match state.catalog.search_games(query).await {
        Ok(Some(objects)) if !objects.is_empty() => objects,
        Ok(_) => {
            tracing::debug!(request_id = %request_id, query = %query, "No search results");
            return Err(ApiError::NoResults);
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, query = %query, error = %e, "Error fetching search data");
            return Err(ApiError::SearchUnavailable);
        }
    };

    let results = map_search_results(&objects).map_err(|e| {
        tracing::error!(request_id = %request_id, query = %query, error = %e, "Error mapping search results");
        ApiError::SearchMapping
    })?;

    Ok(Json(results))
}

/// `GET /details/{slug}`
pub async fn details(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let response = game_details(&state, &slug, request_id(&headers))
        .await
        .into_response();
    metrics::record_request("details", response.status().as_u16(), start);
    response
}

async fn game_details(
    state: &AppState,
    slug: &str,
    request_id: &str,
) -> Result<Json<GameDetail>, ApiError> {
    let object = match state.catalog.get_game_by_slug(slug, state.catalog.region()).await {
        Ok(Some(object)) => object,
        Ok(None) => {
            tracing::warn!(request_id = %request_id, slug = %slug, "Upstream returned no game");
            return Err(ApiError::IncompleteDetails);
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, slug = %slug, error = %e, "Error fetching game data");
            return Err(ApiError::GameUnavailable);
        }
    };

    match map_game_detail(&object, slug) {
        Ok(detail) => Ok(Json(detail)),
        Err(MappingError::MissingPrimaryImage) => {
            tracing::warn!(request_id = %request_id, slug = %slug, "Game has no primary image");
            Err(ApiError::IncompleteDetails)
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, slug = %slug, error = %e, "Error mapping game details");
            Err(ApiError::DetailMapping)
        }
    }
}

/// Fallback for unmatched routes, including `/search/` with no query.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
