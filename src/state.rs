use std::sync::Arc;
use crate::domain::ports::{BookingRepository, ResourceRepository};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub resource_repo: Arc<dyn ResourceRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
}
