use crate::domain::models::{booking::NewBookingParams, resource::NewResourceParams};
use crate::error::{AppError, FieldError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

const NAIVE_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Resource create/edit submission. Every field is optional at the wire level so that
/// missing values surface as field errors instead of a deserialization rejection.
#[derive(Deserialize, Default)]
pub struct ResourceForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub is_available: Option<bool>,
    pub version: Option<i64>,
}

#[derive(Deserialize, Default)]
pub struct BookingForm {
    pub resource_id: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub booked_by: Option<String>,
    pub purpose: Option<String>,
    pub version: Option<i64>,
}

#[derive(Deserialize)]
pub struct ResourceListQuery {
    pub search: Option<String>,
    pub available: Option<bool>,
}

#[derive(Deserialize)]
pub struct BookingListQuery {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ResourceForm {
    pub fn validate(self) -> Result<NewResourceParams, AppError> {
        let mut errors = Vec::new();

        let name = non_blank(self.name);
        if name.is_none() {
            errors.push(FieldError::new("name", "Name is required."));
        }

        match self.capacity {
            None => errors.push(FieldError::new("capacity", "Capacity is required.")),
            Some(c) if c <= 0 => errors.push(FieldError::new("capacity", "Capacity must be greater than zero.")),
            Some(_) => {}
        }

        match (name, self.capacity) {
            (Some(name), Some(capacity)) if errors.is_empty() => Ok(NewResourceParams {
                name,
                description: non_blank(self.description),
                location: non_blank(self.location),
                capacity,
                is_available: self.is_available.unwrap_or(true),
            }),
            _ => Err(AppError::Invalid(errors)),
        }
    }
}

impl BookingForm {
    /// Checks every field and the interval. A missing or blank `resource_id` is the
    /// "unselected" sentinel and never reaches the persisted entity.
    pub fn validate(self, tz: Tz) -> Result<NewBookingParams, AppError> {
        let mut errors = Vec::new();

        let resource_id = non_blank(self.resource_id);
        if resource_id.is_none() {
            errors.push(FieldError::new("resource_id", "Please select a resource."));
        }

        let start = parse_field("start_time", "Start time", self.start_time, tz, &mut errors);
        let end = parse_field("end_time", "End time", self.end_time, tz, &mut errors);

        if let (Some(start), Some(end)) = (start, end)
            && end <= start {
            errors.push(FieldError::new("end_time", "End time must be after start time."));
        }

        let booked_by = non_blank(self.booked_by);
        if booked_by.is_none() {
            errors.push(FieldError::new("booked_by", "Booked by is required."));
        }

        let purpose = non_blank(self.purpose);
        if purpose.is_none() {
            errors.push(FieldError::new("purpose", "Purpose is required."));
        }

        match (resource_id, start, end, booked_by, purpose) {
            (Some(resource_id), Some(start), Some(end), Some(booked_by), Some(purpose)) if errors.is_empty() => {
                Ok(NewBookingParams { resource_id, start, end, booked_by, purpose })
            }
            _ => Err(AppError::Invalid(errors)),
        }
    }
}

fn parse_field(
    field: &str,
    label: &str,
    value: Option<String>,
    tz: Tz,
    errors: &mut Vec<FieldError>,
) -> Option<DateTime<Utc>> {
    let Some(raw) = non_blank(value) else {
        errors.push(FieldError::new(field, format!("{} is required.", label)));
        return None;
    };

    match parse_form_datetime(&raw, tz) {
        Ok(dt) => Some(dt),
        Err(msg) => {
            errors.push(FieldError::new(field, msg));
            None
        }
    }
}

/// Accepts RFC 3339 with an offset, or a naive local date-time interpreted in `tz`.
pub fn parse_form_datetime(raw: &str, tz: Tz) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| format!("Invalid date/time '{}' (expected YYYY-MM-DDTHH:MM)", raw))?;

    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| "Invalid local time (ambiguous or skipped due to DST)".to_string())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
}
