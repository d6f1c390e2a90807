use crate::models::Stats;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>, AppError> {
    Ok(Json(state.store.stats().await?))
}
