use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::PathRejection},
};
use tracing::debug;
use std::sync::Arc;

use super::validation::page_from_query;
use super::{ApiError, AppState};
use crate::constants::limits::DEFAULT_PAGE;
use crate::constants::messages::INVALID_SEARCH_STRING;
use crate::models::ImageResult;

pub async fn search_images(
    State(state): State<Arc<AppState>>,
    search_string: Result<Path<String>, PathRejection>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<ImageResult>>, ApiError> {
    let Path(search_string) = search_string.map_err(|rejection| {
        debug!("Rejected search path: {}", rejection.body_text());
        ApiError::ValidationError(INVALID_SEARCH_STRING.to_string())
    })?;
    let page = page_from_query(query.as_deref());

    let results = state.relay().search(Some(&search_string), page).await?;

    Ok(Json(results))
}

/// `/query/` with no search string.
pub async fn missing_search_string(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ImageResult>>, ApiError> {
    let results = state.relay().search(None, DEFAULT_PAGE).await?;

    Ok(Json(results))
}
