//! HTTP Handlers for the Orchestrator
//!
//! Thin axum adapters over the scheduler: the public expression API and the
//! internal task protocol. The opaque owner identity arrives in the
//! `username` header, supplied by the excluded auth layer.

use super::orchestrator::Scheduler;
use super::protocol::*;
use super::types::SchedulerError;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Extension, Json, Router, extract::Path};
use std::sync::Arc;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Builds the full route table. Shared between `main` and the end-to-end
/// tests so both serve exactly the same surface.
pub fn api_router(scheduler: Arc<Scheduler>) -> Router {
    Router::new()
        .route(ENDPOINT_CALCULATE, post(handle_calculate))
        .route(ENDPOINT_EXPRESSIONS, get(handle_list_expressions))
        .route(
            &format!("{}/:id", ENDPOINT_EXPRESSIONS),
            get(handle_get_expression),
        )
        .route(
            ENDPOINT_INTERNAL_TASK,
            get(handle_get_task).post(handle_post_result),
        )
        .layer(Extension(scheduler))
}

fn error_response(status: StatusCode, message: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn owner_identity(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("username")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "missing username header"))
}

pub async fn handle_calculate(
    Extension(scheduler): Extension<Arc<Scheduler>>,
    headers: HeaderMap,
    Json(req): Json<CalculateRequest>,
) -> Result<(StatusCode, Json<CalculateResponse>), ApiError> {
    let owner = owner_identity(&headers)?;

    match scheduler.submit_expression(&req.expression, &owner) {
        Ok(id) => {
            tracing::info!("Expression submitted: {}", id);
            Ok((StatusCode::CREATED, Json(CalculateResponse { id })))
        }
        Err(SchedulerError::Compile(e)) => {
            tracing::warn!("Rejected expression {:?}: {}", req.expression, e);
            Err(error_response(StatusCode::UNPROCESSABLE_ENTITY, e))
        }
        Err(e) => {
            tracing::error!("Failed to register expression: {}", e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

pub async fn handle_get_expression(
    Extension(scheduler): Extension<Arc<Scheduler>>,
    headers: HeaderMap,
    Path(expr_id): Path<String>,
) -> Result<Json<ExpressionResponse>, ApiError> {
    let owner = owner_identity(&headers)?;

    match scheduler.get_expression(&expr_id, &owner) {
        Ok(expr) => Ok(Json(ExpressionResponse {
            expression: expr.into(),
        })),
        Err(SchedulerError::Unauthorized) => {
            Err(error_response(StatusCode::FORBIDDEN, "unauthorized"))
        }
        Err(e) => Err(error_response(StatusCode::NOT_FOUND, e)),
    }
}

pub async fn handle_list_expressions(
    Extension(scheduler): Extension<Arc<Scheduler>>,
    headers: HeaderMap,
) -> Result<Json<ExpressionsResponse>, ApiError> {
    let owner = owner_identity(&headers)?;

    let expressions = scheduler
        .list_expressions(&owner)
        .into_iter()
        .map(ExpressionView::from)
        .collect();

    Ok(Json(ExpressionsResponse { expressions }))
}

/// Worker pull. 404 means "no ready task right now", an expected signal the
/// worker answers with backoff, not a failure.
pub async fn handle_get_task(
    Extension(scheduler): Extension<Arc<Scheduler>>,
) -> Result<Json<TaskResponse>, ApiError> {
    match scheduler.pull_task() {
        Ok(task) => {
            tracing::debug!("Task dispatched: {}", task.id);
            Ok(Json(TaskResponse { task }))
        }
        Err(SchedulerError::NoTaskAvailable) => {
            Err(error_response(StatusCode::NOT_FOUND, "no task available"))
        }
        Err(e) => {
            tracing::error!("Task dispatch failed: {}", e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

pub async fn handle_post_result(
    Extension(scheduler): Extension<Arc<Scheduler>>,
    Json(req): Json<SubmitResultRequest>,
) -> Result<StatusCode, ApiError> {
    match scheduler.submit_result(&req.id, req.result) {
        Ok(()) => Ok(StatusCode::OK),
        Err(SchedulerError::NodeNotFound(id)) => Err(error_response(
            StatusCode::NOT_FOUND,
            format!("node not found: {}", id),
        )),
        Err(e) => {
            tracing::error!("Failed to accept result for {}: {}", req.id, e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}
