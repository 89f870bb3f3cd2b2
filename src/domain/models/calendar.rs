use serde::Serialize;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize, Clone)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub previous: MonthRef,
    pub next: MonthRef,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub has_bookings: bool,
    pub bookings: Vec<CalendarBooking>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CalendarBooking {
    pub booking_id: String,
    pub resource_id: String,
    pub resource_name: String,
    pub time_range: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub booked_by: String,
}
