pub mod conflict;
pub mod resource_filter;
pub mod calendar;
