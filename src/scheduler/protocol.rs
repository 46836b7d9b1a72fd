//! Scheduling Protocol Definitions
//!
//! Data Transfer Objects for the two HTTP surfaces of the orchestrator:
//! the public expression API consumed by clients and the internal task
//! protocol consumed by workers.

use super::types::{Expression, ExpressionStatus, Task};
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Public endpoint for submitting a new expression.
pub const ENDPOINT_CALCULATE: &str = "/api/v1/calculate";
/// Public endpoint for expression status queries.
pub const ENDPOINT_EXPRESSIONS: &str = "/api/v1/expressions";
/// Internal endpoint for the worker task protocol (GET pull, POST result).
pub const ENDPOINT_INTERNAL_TASK: &str = "/internal/task";

// --- Data Transfer Objects ---

#[derive(Debug, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub expression: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalculateResponse {
    /// Id of the registered expression, for later status queries.
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Client-facing projection of an expression record.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpressionView {
    pub id: String,
    pub status: ExpressionStatus,
    pub result: Option<f64>,
    pub expression: String,
}

impl From<Expression> for ExpressionView {
    fn from(expr: Expression) -> Self {
        Self {
            id: expr.id,
            status: expr.status,
            result: expr.result,
            expression: expr.text,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpressionResponse {
    pub expression: ExpressionView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpressionsResponse {
    pub expressions: Vec<ExpressionView>,
}

/// Envelope for a pulled task.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task: Task,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResultRequest {
    pub id: String,
    pub result: f64,
}
