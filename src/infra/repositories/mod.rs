pub mod sqlite_resource_repo;
pub mod sqlite_booking_repo;

pub mod postgres_resource_repo;
pub mod postgres_booking_repo;
