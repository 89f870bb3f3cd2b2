use crate::domain::models::{
    resource::{Resource, ResourceOption},
    booking::{Booking, BookingDetail},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn create(&self, resource: &Resource) -> Result<Resource, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Resource>, AppError>;
    /// Lists resources ordered by name, restricted to one availability value when given.
    async fn list(&self, available: Option<bool>) -> Result<Vec<Resource>, AppError>;
    async fn list_options(&self) -> Result<Vec<ResourceOption>, AppError>;
    /// Returns `None` when no row matched the id (and `expected_version`, when given).
    async fn update(&self, resource: &Resource, expected_version: Option<i64>) -> Result<Option<Resource>, AppError>;
    async fn exists(&self, id: &str) -> Result<bool, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking unless it overlaps an existing booking of the same resource.
    /// The overlap check and the insert share one transaction holding the resource lock.
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_detail(&self, id: &str) -> Result<Option<BookingDetail>, AppError>;
    async fn list(&self) -> Result<Vec<BookingDetail>, AppError>;
    async fn list_by_resource(&self, resource_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Bookings with `start_time < end` and `end_time >= start`, i.e. every booking that touches
    /// the closed range. Used for date-only views, where an end exactly at midnight still counts.
    async fn list_touching(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<BookingDetail>, AppError>;
    /// Same locking and overlap rules as `create`, excluding the booking itself from the check.
    /// Returns `None` when no row matched the id (and `expected_version`, when given).
    async fn update(&self, booking: &Booking, expected_version: Option<i64>) -> Result<Option<Booking>, AppError>;
    async fn exists(&self, id: &str) -> Result<bool, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
