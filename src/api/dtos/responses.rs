use serde::Serialize;
use crate::domain::models::{booking::Booking, resource::Resource};

#[derive(Serialize)]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

#[derive(Serialize)]
pub struct ResourceDetailResponse {
    pub resource: Resource,
    pub bookings: Vec<Booking>,
}

/// Payload behind the resource delete confirmation page.
/// `blocked` is set while bookings still reference the resource.
#[derive(Serialize)]
pub struct ResourceDeleteConfirmation {
    pub resource: Resource,
    pub booking_count: usize,
    pub blocked: bool,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn deleted() -> Self {
        Self { status: "deleted" }
    }
}
