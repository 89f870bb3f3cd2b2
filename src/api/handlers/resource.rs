use axum::{extract::{State, Path, Query}, response::IntoResponse, http::StatusCode, Json};
use crate::state::AppState;
use crate::api::extractors::csrf::CsrfGuard;
use crate::api::dtos::requests::{ResourceForm, ResourceListQuery};
use crate::api::dtos::responses::{ResourceDetailResponse, ResourceDeleteConfirmation, StatusResponse};
use crate::domain::models::resource::Resource;
use crate::domain::services::resource_filter::filter_resources;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let resources = state.resource_repo.list(query.available).await?;
    Ok(Json(filter_resources(resources, query.search.as_deref())))
}

pub async fn list_resource_options(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let options = state.resource_repo.list_options().await?;
    Ok(Json(options))
}

pub async fn get_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let resource = load(&state, &id).await?;
    let bookings = state.booking_repo.list_by_resource(&id).await?;
    Ok(Json(ResourceDetailResponse { resource, bookings }))
}

pub async fn create_resource(
    State(state): State<Arc<AppState>>,
    _csrf: CsrfGuard,
    Json(form): Json<ResourceForm>,
) -> Result<impl IntoResponse, AppError> {
    let params = form.validate().inspect_err(|e| warn!("create_resource rejected: {}", e))?;

    let created = state.resource_repo.create(&Resource::new(params)).await?;

    info!("Resource created: {} ({})", created.id, created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_resource(
    State(state): State<Arc<AppState>>,
    _csrf: CsrfGuard,
    Path(id): Path<String>,
    Json(form): Json<ResourceForm>,
) -> Result<impl IntoResponse, AppError> {
    let mut resource = load(&state, &id).await?;

    let expected_version = form.version;
    let params = form.validate().inspect_err(|e| warn!("update_resource {} rejected: {}", id, e))?;
    resource.apply(params);

    match state.resource_repo.update(&resource, expected_version).await? {
        Some(updated) => {
            info!("Resource updated: {} (version {})", updated.id, updated.version);
            Ok(Json(updated))
        }
        None if !state.resource_repo.exists(&id).await? => {
            warn!("update_resource: {} was deleted concurrently", id);
            Err(AppError::NotFound("Resource not found".into()))
        }
        None => Err(AppError::ConcurrencyConflict(format!(
            "Resource {} was modified by another request (expected version {:?})",
            id, expected_version
        ))),
    }
}

pub async fn confirm_delete_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let resource = load(&state, &id).await?;
    let booking_count = state.booking_repo.list_by_resource(&id).await?.len();

    Ok(Json(ResourceDeleteConfirmation {
        resource,
        booking_count,
        blocked: booking_count > 0,
    }))
}

pub async fn delete_resource(
    State(state): State<Arc<AppState>>,
    _csrf: CsrfGuard,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // The foreign key still guards bookings created after this check.
    if !state.booking_repo.list_by_resource(&id).await?.is_empty() {
        warn!("delete_resource: {} still has bookings", id);
        return Err(AppError::Conflict("Resource cannot be deleted while it has bookings.".into()));
    }

    state.resource_repo.delete(&id).await?;

    info!("Resource deleted: {}", id);
    Ok(Json(StatusResponse::deleted()))
}

async fn load(state: &AppState, id: &str) -> Result<Resource, AppError> {
    state.resource_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Resource not found".into()))
}
