use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub resource_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub booked_by: String,
    pub purpose: String,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewBookingParams {
    pub resource_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub booked_by: String,
    pub purpose: String,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            resource_id: params.resource_id,
            start_time: params.start,
            end_time: params.end,
            booked_by: params.booked_by,
            purpose: params.purpose,
            version: 1,
            created_at: Utc::now(),
        }
    }

    /// Replaces every editable field, keeping identity and bookkeeping columns.
    pub fn apply(&mut self, params: NewBookingParams) {
        self.resource_id = params.resource_id;
        self.start_time = params.start;
        self.end_time = params.end;
        self.booked_by = params.booked_by;
        self.purpose = params.purpose;
    }
}

/// A booking joined with the display name of its resource.
///
/// `resource_name` is `None` when the resource row could not be joined.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BookingDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub resource_name: Option<String>,
}
