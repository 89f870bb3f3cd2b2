use axum::{extract::{State, Path, Query}, response::IntoResponse, http::{header, StatusCode}, Json};
use crate::state::AppState;
use crate::api::extractors::csrf::CsrfGuard;
use crate::api::dtos::requests::{BookingForm, BookingListQuery, parse_date};
use crate::api::dtos::responses::StatusResponse;
use crate::domain::models::booking::{Booking, BookingDetail};
use crate::domain::services::calendar::{day_range_utc, generate_ics, touches_date};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let Some(raw_date) = query.date.filter(|d| !d.trim().is_empty()) else {
        return Ok(Json(state.booking_repo.list().await?));
    };

    let date = parse_date(raw_date.trim())?;
    let tz = state.config.timezone;
    let (start, end) = day_range_utc(date, date, tz)?;

    let bookings: Vec<BookingDetail> = state.booking_repo.list_touching(start, end).await?
        .into_iter()
        .filter(|d| touches_date(&d.booking, date, tz))
        .collect();

    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(load_detail(&state, &id).await?))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    _csrf: CsrfGuard,
    Json(form): Json<BookingForm>,
) -> Result<impl IntoResponse, AppError> {
    let params = form.validate(state.config.timezone)
        .inspect_err(|e| warn!("create_booking rejected: {}", e))?;
    let booking = Booking::new(params);

    info!("create_booking: resource {} from {} to {}", booking.resource_id, booking.start_time, booking.end_time);

    let created = state.booking_repo.create(&booking).await
        .inspect_err(|e| warn!("create_booking rejected: {}", e))?;

    info!("Booking confirmed: {} on resource {}", created.id, created.resource_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    _csrf: CsrfGuard,
    Path(id): Path<String>,
    Json(form): Json<BookingForm>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state.booking_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let expected_version = form.version;
    let params = form.validate(state.config.timezone)
        .inspect_err(|e| warn!("update_booking {} rejected: {}", id, e))?;
    booking.apply(params);

    let updated = state.booking_repo.update(&booking, expected_version).await
        .inspect_err(|e| warn!("update_booking {} rejected: {}", id, e))?;

    match updated {
        Some(updated) => {
            info!("Booking updated: {} (version {})", updated.id, updated.version);
            Ok(Json(updated))
        }
        None if !state.booking_repo.exists(&id).await? => {
            warn!("update_booking: {} was deleted concurrently", id);
            Err(AppError::NotFound("Booking not found".into()))
        }
        None => Err(AppError::ConcurrencyConflict(format!(
            "Booking {} was modified by another request (expected version {:?})",
            id, expected_version
        ))),
    }
}

pub async fn confirm_delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(load_detail(&state, &id).await?))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    _csrf: CsrfGuard,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_repo.delete(&id).await?;

    info!("Booking deleted: {}", id);
    Ok(Json(StatusResponse::deleted()))
}

pub async fn export_booking_ics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    let resource = state.resource_repo.find_by_id(&booking.resource_id).await?
        .ok_or(AppError::NotFound("Resource not found".into()))?;

    let ics = generate_ics(&resource, &booking);

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"booking-{}.ics\"", booking.id)),
        ],
        ics,
    ))
}

async fn load_detail(state: &AppState, id: &str) -> Result<BookingDetail, AppError> {
    state.booking_repo.find_detail(id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))
}
