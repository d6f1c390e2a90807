use crate::dtos::MessageResponse;
use crate::models::{CreateFlight, Flight, Page, UpdateFlight};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

fn flight_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Flight {} not found", id))
}

pub async fn create_flight(
    State(state): State<AppState>,
    Json(input): Json<CreateFlight>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    input.validate()?;

    let flight = state.store.create_flight(&input).await?;
    metrics::record_flight_created();

    Ok((StatusCode::CREATED, Json(flight)))
}

pub async fn list_flights(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Flight>>, AppError> {
    page.validate()?;
    Ok(Json(state.store.list_active_flights(page).await?))
}

pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Flight>, AppError> {
    state
        .store
        .get_flight(id)
        .await?
        .map(Json)
        .ok_or_else(|| flight_not_found(id))
}

pub async fn get_flight_by_number(
    State(state): State<AppState>,
    Path(flight_number): Path<String>,
) -> Result<Json<Flight>, AppError> {
    state
        .store
        .get_flight_by_number(&flight_number)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Flight {} not found", flight_number)))
}

pub async fn search_flights(
    State(state): State<AppState>,
    Path((departure, arrival)): Path<(String, String)>,
) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.store.search_flights(&departure, &arrival).await?))
}

pub async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateFlight>,
) -> Result<Json<Flight>, AppError> {
    update.validate()?;

    state
        .store
        .update_flight(id, &update)
        .await?
        .map(Json)
        .ok_or_else(|| flight_not_found(id))
}

pub async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.store.delete_flight(id).await? {
        return Err(flight_not_found(id));
    }
    metrics::record_deleted("flight");

    Ok(Json(MessageResponse::new(format!(
        "Flight {} deleted successfully",
        id
    ))))
}
