//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use super::responses::{
    ApiResponse, CategoriesResponse, CategoryView, CreateTimerRequest, ErrorResponse,
    HealthResponse, NotificationResponse, StatusCounts, StatusResponse, TimerResponse,
};
use crate::{
    error::TimerError,
    state::{categories, group_by_category, AppState, Intent, TimerId},
};

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(e: TimerError) -> ApiError {
    let status = match &e {
        TimerError::Validation(_) => {
            warn!("Rejected request: {}", e);
            StatusCode::UNPROCESSABLE_ENTITY
        }
        TimerError::StoreUnavailable => {
            error!("Timer store unavailable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    (status, Json(ErrorResponse::new(e.to_string())))
}

async fn apply(state: &AppState, intent: Intent) -> Result<Json<ApiResponse>, ApiError> {
    let message = intent.to_string();
    let timers = state.store.apply(intent).await.map_err(api_error)?;
    Ok(Json(ApiResponse::ok(message, &timers)))
}

/// Handle GET /timers
pub async fn list_timers_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timers = state.store.timers();
    Json(ApiResponse::ok(format!("{} timers", timers.len()), &timers))
}

/// Handle POST /timers - Create an idle timer
pub async fn create_timer_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTimerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TimerResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected timer body: {}", rejection.body_text());
        (rejection.status(), Json(ErrorResponse::new(rejection.body_text())))
    })?;

    let timer = state
        .store
        .create(request.name, request.duration, request.category)
        .await
        .map_err(api_error)?;

    info!("Create endpoint called - timer {} added", timer.id);
    Ok((
        StatusCode::CREATED,
        Json(TimerResponse::ok("Timer created".to_string(), &timer)),
    ))
}

/// Handle GET /timers/:id
pub async fn get_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TimerResponse>, ApiError> {
    let id = TimerId::from(id);
    let timers = state.store.timers();
    timers
        .iter()
        .find(|t| t.id == id)
        .map(|timer| Json(TimerResponse::ok("Timer found".to_string(), timer)))
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!("No timer with id {}", id))),
            )
        })
}

/// Handle POST /timers/:id/start
pub async fn start_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    apply(&state, Intent::Start(id.into())).await
}

/// Handle POST /timers/:id/pause
pub async fn pause_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    apply(&state, Intent::Pause(id.into())).await
}

/// Handle POST /timers/:id/reset
pub async fn reset_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    apply(&state, Intent::Reset(id.into())).await
}

/// Handle GET /categories - Timers grouped by category
pub async fn list_categories_handler(State(state): State<Arc<AppState>>) -> Json<CategoriesResponse> {
    let timers = state.store.timers();
    Json(CategoriesResponse {
        timestamp: Utc::now(),
        categories: group_by_category(&timers)
            .into_iter()
            .map(CategoryView::from)
            .collect(),
    })
}

/// Handle POST /categories/:category/start
pub async fn start_category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    apply(&state, Intent::StartCategory(category)).await
}

/// Handle POST /categories/:category/pause
pub async fn pause_category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    apply(&state, Intent::PauseCategory(category)).await
}

/// Handle POST /categories/:category/reset
pub async fn reset_category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    apply(&state, Intent::ResetCategory(category)).await
}

/// Handle GET /notifications - The completion currently on display
pub async fn notification_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let view = state.store.notification().await.map_err(api_error)?;
    Ok(Json(NotificationResponse::new(view.current, view.pending)))
}

/// Handle POST /notifications/dismiss - Dismiss the current completion and show the next
pub async fn dismiss_notification_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NotificationResponse>, ApiError> {
    if let Some(event) = state.store.dismiss_notification().await.map_err(api_error)? {
        info!("Dismissed completion of {:?}", event.timer.name);
    }
    let view = state.store.notification().await.map_err(api_error)?;
    Ok(Json(NotificationResponse::new(view.current, view.pending)))
}

/// Handle GET /status - Return current server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let stats = state.store.stats().await.map_err(api_error)?;
    let timers = state.store.timers();

    Ok(Json(StatusResponse {
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        tick_ms: state.tick_period.as_millis() as u64,
        validation: state.validation.as_str().to_string(),
        notification_mode: stats.notification_mode,
        ticks: stats.ticks,
        completions: stats.completions,
        pending_notifications: stats.pending_notifications,
        categories: categories(&timers).len(),
        timers: StatusCounts::count(&timers),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
