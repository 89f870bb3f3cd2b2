pub mod booking;
pub mod calendar;
pub mod csrf;
pub mod health;
pub mod resource;
