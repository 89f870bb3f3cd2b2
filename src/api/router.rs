use axum::{
    body::Body,
    extract::Request,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, csrf, resource, booking, calendar};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/csrf", get(csrf::issue_token))

        // Resources
        .route("/api/v1/resources", get(resource::list_resources).post(resource::create_resource))
        .route("/api/v1/resources/options", get(resource::list_resource_options))
        .route("/api/v1/resources/{id}", get(resource::get_resource).put(resource::update_resource).delete(resource::delete_resource))
        .route("/api/v1/resources/{id}/delete", get(resource::confirm_delete_resource))

        // Bookings
        .route("/api/v1/bookings", get(booking::list_bookings).post(booking::create_booking))
        .route("/api/v1/bookings/{id}", get(booking::get_booking).put(booking::update_booking).delete(booking::delete_booking))
        .route("/api/v1/bookings/{id}/delete", get(booking::confirm_delete_booking))
        .route("/api/v1/bookings/{id}/ics", get(booking::export_booking_ics))

        // Calendar
        .route("/api/v1/calendar", get(calendar::get_month))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
