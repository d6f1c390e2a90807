use crate::dtos::MessageResponse;
use crate::models::{Booking, CreateBooking, Page, UpdateBooking};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

fn booking_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Booking {} not found", id))
}

pub async fn create_booking(
    State(state): State<AppState>,
    Json(input): Json<CreateBooking>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    input.validate()?;

    let booking = state.store.create_booking(&input).await?;
    metrics::record_booking_created();

    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Booking>>, AppError> {
    page.validate()?;
    Ok(Json(state.store.list_bookings(page).await?))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    state
        .store
        .get_booking(id)
        .await?
        .map(Json)
        .ok_or_else(|| booking_not_found(id))
}

pub async fn search_bookings(
    State(state): State<AppState>,
    Path(passenger_name): Path<String>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(
        state
            .store
            .search_bookings_by_passenger(&passenger_name)
            .await?,
    ))
}

pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateBooking>,
) -> Result<Json<Booking>, AppError> {
    update.validate()?;

    state
        .store
        .update_booking(id, &update)
        .await?
        .map(Json)
        .ok_or_else(|| booking_not_found(id))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.store.delete_booking(id).await? {
        return Err(booking_not_found(id));
    }
    metrics::record_deleted("booking");

    Ok(Json(MessageResponse::new(format!(
        "Booking {} deleted successfully",
        id
    ))))
}
