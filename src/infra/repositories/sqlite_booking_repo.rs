use crate::domain::{models::booking::{Booking, BookingDetail}, ports::BookingRepository};
use crate::domain::services::conflict::check_conflict;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool, Row};
use chrono::{DateTime, Utc};

const DETAIL_SELECT: &str = "SELECT b.*, r.name AS resource_name FROM bookings b LEFT JOIN resources r ON r.id = b.resource_id";

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Touches the resource row so the transaction holds the database write lock before the
/// overlap check runs. Concurrent bookings wait on `busy_timeout` instead of racing.
async fn lock_resource(conn: &mut SqliteConnection, resource_id: &str) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE resources SET version = version WHERE id = ?")
        .bind(resource_id)
        .execute(&mut *conn)
        .await
        .map_err(AppError::Database)?;
    if result.rows_affected() == 0 {
        return Err(AppError::invalid_field("resource_id", "Selected resource does not exist."));
    }
    Ok(())
}

async fn find_overlapping(conn: &mut SqliteConnection, booking: &Booking) -> Result<Vec<Booking>, AppError> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE resource_id = ? AND start_time < ? AND end_time > ?")
        .bind(&booking.resource_id)
        .bind(booking.end_time)
        .bind(booking.start_time)
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::Database)
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        lock_resource(&mut *tx, &booking.resource_id).await?;
        let existing = find_overlapping(&mut *tx, booking).await?;
        check_conflict(booking, &existing)?;

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, resource_id, start_time, end_time, booked_by, purpose, version, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.resource_id).bind(booking.start_time).bind(booking.end_time)
            .bind(&booking.booked_by).bind(&booking.purpose).bind(booking.version).bind(booking.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_detail(&self, id: &str) -> Result<Option<BookingDetail>, AppError> {
        sqlx::query_as::<_, BookingDetail>(&format!("{} WHERE b.id = ?", DETAIL_SELECT)).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<BookingDetail>, AppError> {
        sqlx::query_as::<_, BookingDetail>(&format!("{} ORDER BY b.start_time ASC", DETAIL_SELECT)).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_resource(&self, resource_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE resource_id = ? ORDER BY start_time ASC").bind(resource_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_touching(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<BookingDetail>, AppError> {
        sqlx::query_as::<_, BookingDetail>(&format!("{} WHERE b.start_time < ? AND b.end_time >= ? ORDER BY b.start_time ASC", DETAIL_SELECT))
            .bind(end)
            .bind(start)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
    async fn update(&self, booking: &Booking, expected_version: Option<i64>) -> Result<Option<Booking>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        lock_resource(&mut *tx, &booking.resource_id).await?;
        let existing = find_overlapping(&mut *tx, booking).await?;
        check_conflict(booking, &existing)?;

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET resource_id=?, start_time=?, end_time=?, booked_by=?, purpose=?, version = version + 1
             WHERE id=? AND (? IS NULL OR version = ?)
             RETURNING *"
        )
            .bind(&booking.resource_id).bind(booking.start_time).bind(booking.end_time)
            .bind(&booking.booked_by).bind(&booking.purpose)
            .bind(&booking.id).bind(expected_version).bind(expected_version)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }
    async fn exists(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE id = ?").bind(id).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count") > 0)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Booking not found".into())); }
        Ok(())
    }
}
