use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::SearchRecord;

pub async fn recent_searches(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SearchRecord>>, ApiError> {
    let records = state.search_log().recent().await?;

    Ok(Json(records))
}
