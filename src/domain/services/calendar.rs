use crate::domain::models::{
    booking::{Booking, BookingDetail},
    calendar::{CalendarBooking, CalendarDay, CalendarMonth, MonthRef},
    resource::Resource,
};
use crate::error::AppError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

const UNKNOWN_RESOURCE: &str = "Unknown";

/// First and last day of the month, inclusive.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), AppError> {
    if !(1..=9999).contains(&year) {
        return Err(AppError::Validation(format!("Year {} is out of range", year)));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Validation(format!("Month {} is out of range", month)))?;
    let next = next_month(MonthRef { year, month });
    let last = NaiveDate::from_ymd_opt(next.year, next.month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| AppError::Validation("Month is out of range".into()))?;
    Ok((first, last))
}

pub fn next_month(m: MonthRef) -> MonthRef {
    if m.month == 12 { MonthRef { year: m.year + 1, month: 1 } } else { MonthRef { year: m.year, month: m.month + 1 } }
}

pub fn previous_month(m: MonthRef) -> MonthRef {
    if m.month == 1 { MonthRef { year: m.year - 1, month: 12 } } else { MonthRef { year: m.year, month: m.month - 1 } }
}

/// UTC instant at which local `date` begins in `tz`. When a DST gap skips midnight,
/// the day begins at the first local minute that exists.
pub fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>, AppError> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..24 * 60)
        .map(|minute| midnight + Duration::minutes(minute))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InternalWithMsg(format!("No local start of day for {} in {}", date, tz)))
}

/// UTC range covering the local days `first..=last`; the end is the midnight after `last`.
pub fn day_range_utc(first: NaiveDate, last: NaiveDate, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let after_last = last.succ_opt()
        .ok_or_else(|| AppError::Validation("Date is out of range".into()))?;
    Ok((local_midnight(first, tz)?, local_midnight(after_last, tz)?))
}

/// Date-only test: the booking shows on `date` iff `start.date <= date <= end.date` in `tz`.
pub fn touches_date(booking: &Booking, date: NaiveDate, tz: Tz) -> bool {
    let start = booking.start_time.with_timezone(&tz).date_naive();
    let end = booking.end_time.with_timezone(&tz).date_naive();
    start <= date && date <= end
}

pub fn format_time_range(booking: &Booking, tz: Tz) -> String {
    let start = booking.start_time.with_timezone(&tz);
    let end = booking.end_time.with_timezone(&tz);
    if start.date_naive() == end.date_naive() {
        format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
    } else {
        format!("{} - {}", start.format("%Y-%m-%d %H:%M"), end.format("%Y-%m-%d %H:%M"))
    }
}

/// One entry per day of the month, ascending, each listing every booking that touches the day.
pub fn build_month(year: i32, month: u32, bookings: &[BookingDetail], tz: Tz) -> Result<CalendarMonth, AppError> {
    let (first, last) = month_bounds(year, month)?;

    let days = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| {
            let entries: Vec<CalendarBooking> = bookings
                .iter()
                .filter(|d| touches_date(&d.booking, date, tz))
                .map(|d| CalendarBooking {
                    booking_id: d.booking.id.clone(),
                    resource_id: d.booking.resource_id.clone(),
                    resource_name: d.resource_name.clone().unwrap_or_else(|| UNKNOWN_RESOURCE.to_string()),
                    time_range: format_time_range(&d.booking, tz),
                    start_time: d.booking.start_time,
                    end_time: d.booking.end_time,
                    booked_by: d.booking.booked_by.clone(),
                })
                .collect();

            CalendarDay { date, has_bookings: !entries.is_empty(), bookings: entries }
        })
        .collect();

    let current = MonthRef { year: first.year(), month: first.month() };
    Ok(CalendarMonth {
        year,
        month,
        previous: previous_month(current),
        next: next_month(current),
        days,
    })
}

/// Generates an iCalendar (.ics) string for a specific booking
pub fn generate_ics(resource: &Resource, booking: &Booking) -> String {
    let mut calendar = Calendar::new();

    let location = resource.location.as_deref().unwrap_or(&resource.name);

    let ical_event = IcalEvent::new()
        .summary(&booking.purpose)
        .description(&format!("{} booked by {}", resource.name, booking.booked_by))
        .location(location)
        .starts(booking.start_time)
        .ends(booking.end_time)
        .uid(&booking.id)
        .done();

    calendar.push(ical_event);
    calendar.to_string()
}
