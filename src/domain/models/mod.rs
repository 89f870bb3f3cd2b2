pub mod resource;
pub mod booking;
pub mod calendar;
