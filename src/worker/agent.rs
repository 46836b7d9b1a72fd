//! Worker Pool Implementation
//!
//! A fixed number of concurrent execution units, each looping: pull a task
//! from the orchestrator over HTTP, compute it locally, sleep the task's
//! synthetic duration, push the result back.
//!
//! ## Resilience
//! - **No task / transport failure**: wait a fixed backoff and retry; this is
//!   expected control flow, never fatal.
//! - **Submit failure**: logged, then the unit moves on. Results are not
//!   retried once computed (at-most-once submission).
//! - **Shutdown**: every unit observes a shared watch signal, so the pool
//!   stops cooperatively instead of looping forever.

use crate::compiler::types::Op;
use crate::scheduler::protocol::{
    ENDPOINT_INTERNAL_TASK, SubmitResultRequest, TaskResponse,
};
use crate::scheduler::types::Task;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Sleep between pull attempts when the orchestrator has nothing ready.
const POLL_BACKOFF: Duration = Duration::from_secs(1);
/// Bound on any single protocol round-trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The engine that drives task execution against a remote orchestrator.
pub struct WorkerPool {
    /// Base URL of the orchestrator, e.g. `http://127.0.0.1:8080`.
    base_url: String,
    /// Number of concurrent worker units.
    worker_count: usize,
    http_client: reqwest::Client,
}

impl WorkerPool {
    pub fn new(base_url: impl Into<String>, worker_count: usize) -> Arc<Self> {
        Arc::new(Self {
            base_url: base_url.into(),
            worker_count,
            http_client: reqwest::Client::new(),
        })
    }

    /// Spawns the worker units and returns immediately.
    pub fn start(self: Arc<Self>, shutdown: watch::Receiver<bool>) {
        tracing::info!("Starting {} worker units", self.worker_count);

        for worker_id in 0..self.worker_count {
            let pool = self.clone();
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                pool.worker_loop(worker_id, shutdown).await;
            });
        }
    }

    /// The main loop for a single worker unit.
    ///
    /// 1. Pull a ready task (404 means none is available).
    /// 2. Compute it locally and sleep the synthetic operation time.
    /// 3. Submit the result; failures are logged but never crash the unit.
    async fn worker_loop(&self, worker_id: usize, mut shutdown: watch::Receiver<bool>) {
        tracing::info!("Worker {} started", worker_id);

        loop {
            if *shutdown.borrow() {
                break;
            }

            match self.pull_task().await {
                Ok(Some(task)) => {
                    self.run_task(worker_id, task).await;
                }
                Ok(None) => {
                    tracing::trace!("Worker {}: no task available", worker_id);
                    if Self::backoff(&mut shutdown).await {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Worker {}: failed to pull task: {}", worker_id, e);
                    if Self::backoff(&mut shutdown).await {
                        break;
                    }
                }
            }
        }

        tracing::info!("Worker {} stopped", worker_id);
    }

    /// Sleeps the poll backoff; returns true when shutdown fired meanwhile.
    async fn backoff(shutdown: &mut watch::Receiver<bool>) -> bool {
        tokio::select! {
            _ = shutdown.changed() => *shutdown.borrow(),
            _ = tokio::time::sleep(POLL_BACKOFF) => false,
        }
    }

    async fn run_task(&self, worker_id: usize, task: Task) {
        tracing::info!(
            "Worker {} executing node {} ({} {} {})",
            worker_id,
            task.id,
            task.arg1,
            task.operation,
            task.arg2
        );

        // The orchestrator filters division by zero before dispatch; this is
        // a defensive check so a bad task fails instead of crashing the unit.
        let result = match compute(task.arg1, task.arg2, task.operation) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Worker {}: computation failed for {}: {}", worker_id, task.id, e);
                return;
            }
        };

        // Simulated per-operator computation cost.
        tokio::time::sleep(Duration::from_millis(task.operation_time_ms)).await;

        if let Err(e) = self.submit_result(&task.id, result).await {
            tracing::error!(
                "Worker {}: failed to submit result for {}: {}",
                worker_id,
                task.id,
                e
            );
        }
    }

    /// Pulls one task. `Ok(None)` means the orchestrator has nothing ready.
    async fn pull_task(&self) -> Result<Option<Task>> {
        let url = format!("{}{}", self.base_url, ENDPOINT_INTERNAL_TASK);

        let response = self
            .http_client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!("task pull failed: {}", response.status()));
        }

        let envelope: TaskResponse = response.json().await?;
        Ok(Some(envelope.task))
    }

    async fn submit_result(&self, node_id: &str, result: f64) -> Result<()> {
        let url = format!("{}{}", self.base_url, ENDPOINT_INTERNAL_TASK);
        let payload = SubmitResultRequest {
            id: node_id.to_string(),
            result,
        };

        let response = self
            .http_client
            .post(url)
            .json(&payload)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "result submission failed: {}",
                response.status()
            ));
        }

        tracing::debug!("Submitted result for node {}: {}", node_id, result);
        Ok(())
    }
}

/// Pure local arithmetic over the dispatched operands.
pub fn compute(a: f64, b: f64, op: Op) -> Result<f64> {
    match op {
        Op::Add => Ok(a + b),
        Op::Sub => Ok(a - b),
        Op::Mul => Ok(a * b),
        Op::Div => {
            if b == 0.0 {
                return Err(anyhow::anyhow!("division by zero"));
            }
            Ok(a / b)
        }
    }
}
