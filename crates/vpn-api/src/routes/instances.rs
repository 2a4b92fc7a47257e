use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{LaunchResponse, ListResponse, TerminateResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Validate a region against the provider's live region list before any
/// other provider work happens.
async fn validate_region(state: &AppState, region: String) -> Result<String, ApiError> {
    let known = state.controller.valid_regions().await?;
    if !known.iter().any(|r| r == &region) {
        return Err(ApiError::InvalidRegion(region));
    }
    Ok(region)
}

// ── GET ────────────────────────────────────────────────────────────

pub async fn list_default(
    State(state): State<AppState>,
) -> Result<Json<ListResponse>, ApiError> {
    let region = state.config.default_region.clone();
    list(state, region).await
}

pub async fn list_in_region(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<ListResponse>, ApiError> {
    list(state, region).await
}

async fn list(state: AppState, region: String) -> Result<Json<ListResponse>, ApiError> {
    let region = validate_region(&state, region).await?;
    let running_instances = state.controller.list_instances(&region).await?;

    Ok(Json(ListResponse {
        region,
        running_instances,
    }))
}

// ── POST ───────────────────────────────────────────────────────────

pub async fn launch_default(
    State(state): State<AppState>,
) -> Result<Json<LaunchResponse>, ApiError> {
    let region = state.config.default_region.clone();
    launch(state, region).await
}

pub async fn launch_in_region(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<LaunchResponse>, ApiError> {
    launch(state, region).await
}

async fn launch(state: AppState, region: String) -> Result<Json<LaunchResponse>, ApiError> {
    let region = validate_region(&state, region).await?;

    let template = state
        .config
        .launch_template_name
        .clone()
        .ok_or(ApiError::MissingTemplate)?;

    // One VPN endpoint per region. Check-then-act against the provider:
    // two concurrent launches can both pass this check.
    let running = state.controller.list_instances(&region).await?;
    if !running.is_empty() {
        return Err(ApiError::AlreadyRunning(region));
    }

    let instance = state.controller.launch_instance(&template, &region).await?;

    Ok(Json(LaunchResponse {
        region,
        instance_id: instance.id,
        ip: instance.ip,
    }))
}

// ── DELETE ─────────────────────────────────────────────────────────

pub async fn terminate_default(
    State(state): State<AppState>,
) -> Result<Json<TerminateResponse>, ApiError> {
    let region = state.config.default_region.clone();
    terminate(state, region).await
}

pub async fn terminate_in_region(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<TerminateResponse>, ApiError> {
    terminate(state, region).await
}

async fn terminate(state: AppState, region: String) -> Result<Json<TerminateResponse>, ApiError> {
    let region = validate_region(&state, region).await?;
    let outcome = state.controller.terminate_instances(&region).await?;

    Ok(Json(TerminateResponse {
        region,
        instances_terminated: outcome.count(),
    }))
}

pub async fn not_implemented() -> ApiError {
    ApiError::NotImplemented
}
