use axum::{extract::{State, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CalendarQuery;
use crate::domain::services::calendar::{build_month, day_range_utc, month_bounds};
use crate::error::AppError;
use chrono::{Datelike, Utc};
use std::sync::Arc;
use tracing::debug;

/// Month view. Missing `year`/`month` default to the current month in the service time zone.
pub async fn get_month(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tz = state.config.timezone;
    let today = Utc::now().with_timezone(&tz).date_naive();

    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let (first, last) = month_bounds(year, month)?;
    let (start, end) = day_range_utc(first, last, tz)?;

    let bookings = state.booking_repo.list_touching(start, end).await?;
    debug!("Calendar {}-{:02}: {} bookings touch the month", year, month, bookings.len());

    Ok(Json(build_month(year, month, &bookings, tz)?))
}
