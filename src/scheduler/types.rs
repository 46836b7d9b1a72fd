use crate::compiler::types::{CompileError, Op};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a top-level expression.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionStatus {
    Processing,
    Done,
    Error,
}

/// One top-level compilation unit and its lifecycle status.
///
/// The expression record persists after completion for status queries; its
/// node set is a disposable scratch graph deleted at terminal states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expression {
    pub id: String,
    /// Opaque owner identity supplied by the (excluded) auth layer.
    pub owner: String,
    pub status: ExpressionStatus,
    /// The node whose completion finalizes this expression.
    pub root_node_id: String,
    pub result: Option<f64>,
    /// Original source text, kept for display.
    pub text: String,
}

/// The dispatch-ready projection of an operation node handed to a worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub arg1: f64,
    pub arg2: f64,
    pub operation: Op,
    /// Synthetic computation cost the worker must sleep for, per operator.
    pub operation_time_ms: u64,
}

/// Scheduler-facing error taxonomy.
///
/// `NoTaskAvailable` is expected control flow consumed by the worker retry
/// loop, not a system failure. Compile errors reject the submission outright.
/// Store errors propagate to the immediate caller.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("no task available")]
    NoTaskAvailable,
    #[error("node not found: {0}")]
    NodeNotFound(String),
    #[error("expression not found: {0}")]
    ExpressionNotFound(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
