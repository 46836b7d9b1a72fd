//! Scheduler / Orchestrator
//!
//! Owns the authoritative state of all nodes and expressions for every
//! in-flight computation. Workers pull ready tasks and push results through
//! this component; they never mutate shared state directly.
//!
//! ## Concurrency
//! Every graph mutation (registration, dispatch, result submission, deletion)
//! runs under a single dispatch lock, so no two `pull_task` calls can select
//! the same node and no status read observes a half-updated record. Read-only
//! expression queries go straight to the store.

use super::types::{Expression, ExpressionStatus, SchedulerError, Task};
use crate::compiler;
use crate::compiler::ids::IdGenerator;
use crate::compiler::types::{Node, NodeStatus, Op};
use crate::config::Config;
use crate::storage::store::RecordStore;

use std::sync::{Arc, Mutex, MutexGuard};

pub struct Scheduler {
    store: Arc<dyn RecordStore>,
    ids: Arc<dyn IdGenerator>,
    config: Config,
    /// Serializes all graph mutation. Id generation has its own lock and
    /// never contends with this one.
    dispatch: Mutex<()>,
}

impl Scheduler {
    pub fn new(store: Arc<dyn RecordStore>, ids: Arc<dyn IdGenerator>, config: Config) -> Arc<Self> {
        Arc::new(Self {
            store,
            ids,
            config,
            dispatch: Mutex::new(()),
        })
    }

    fn lock_dispatch(&self) -> MutexGuard<'_, ()> {
        self.dispatch.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Compiles the expression and registers it with its full node set.
    ///
    /// Compile errors reject the submission; nothing is stored. A pure
    /// literal expression has a root that is already `Done`, so it finalizes
    /// immediately without ever producing a task.
    pub fn submit_expression(&self, text: &str, owner: &str) -> Result<String, SchedulerError> {
        let expr_id = uuid::Uuid::new_v4().to_string();
        let (root_id, nodes) = compiler::parse_expression(text, &expr_id, self.ids.as_ref())?;

        let root_done = nodes
            .iter()
            .find(|n| n.id == root_id)
            .and_then(|n| match n.status {
                NodeStatus::Done => n.result,
                _ => None,
            });

        let expression = Expression {
            id: expr_id.clone(),
            owner: owner.to_string(),
            status: ExpressionStatus::Processing,
            root_node_id: root_id,
            result: None,
            text: text.to_string(),
        };

        let _guard = self.lock_dispatch();
        self.register_expression(expression, nodes)?;

        if let Some(result) = root_done {
            self.store.set_expression_result(&expr_id, result)?;
            self.store.delete_nodes(&expr_id)?;
            tracing::info!("Expression {} finalized at registration: {}", expr_id, result);
        }

        tracing::info!("Registered expression {} for owner {}", expr_id, owner);
        Ok(expr_id)
    }

    /// Stores a new expression (status `processing`) and its node set.
    /// Caller must hold the dispatch lock.
    fn register_expression(&self, expr: Expression, nodes: Vec<Node>) -> Result<(), SchedulerError> {
        self.store.insert_expression(expr)?;
        self.store.insert_nodes(nodes)?;
        Ok(())
    }

    /// Hands out one ready operation node as a task, at most once per node.
    ///
    /// Ready nodes are scanned in FIFO creation order. Division by zero is
    /// detected here, with the dispatched operands: the node and its owning
    /// expression go terminal `error` instead of being dispatched, and the
    /// scan moves on.
    pub fn pull_task(&self) -> Result<Task, SchedulerError> {
        let _guard = self.lock_dispatch();

        let mut candidates: Vec<Node> = self
            .store
            .operation_nodes()
            .into_iter()
            .filter(|n| n.status == NodeStatus::Pending)
            .collect();
        candidates.sort_by_key(|n| n.seq);

        for node in candidates {
            let (left, right) = match self.resolved_children(&node) {
                Some(pair) => pair,
                None => continue,
            };

            let (arg1, arg2) = match (left.result, right.result) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };

            let op = match node.op {
                Some(op) => op,
                None => continue,
            };

            if op == Op::Div && arg2 == 0.0 {
                self.fail_node(&node)?;
                continue;
            }

            self.store.set_node_status(&node.id, NodeStatus::InProgress)?;

            tracing::debug!("Dispatching node {} ({} {} {})", node.id, arg1, op, arg2);

            return Ok(Task {
                id: node.id,
                arg1,
                arg2,
                operation: op,
                operation_time_ms: self.config.operation_time(op).as_millis() as u64,
            });
        }

        Err(SchedulerError::NoTaskAvailable)
    }

    /// Both children, but only when both are already `Done`.
    fn resolved_children(&self, node: &Node) -> Option<(Node, Node)> {
        let left = self.store.select_node(node.left.as_deref()?)?;
        let right = self.store.select_node(node.right.as_deref()?)?;

        if left.status == NodeStatus::Done && right.status == NodeStatus::Done {
            Some((left, right))
        } else {
            None
        }
    }

    /// Terminal error path: the node and its owning expression become
    /// `error`, and the expression's scratch graph is deleted.
    fn fail_node(&self, node: &Node) -> Result<(), SchedulerError> {
        tracing::warn!(
            "Division by zero in node {} (expression {})",
            node.id,
            node.expr_id
        );

        self.store.set_node_status(&node.id, NodeStatus::Error)?;
        self.store
            .set_expression_status(&node.expr_id, ExpressionStatus::Error)?;
        self.store.delete_nodes(&node.expr_id)?;
        Ok(())
    }

    /// Accepts a computed result for a dispatched node.
    ///
    /// When the node is the expression's root, the expression transitions to
    /// `done` with the same result and its nodes are deleted; the expression
    /// record itself stays queryable.
    pub fn submit_result(&self, node_id: &str, value: f64) -> Result<(), SchedulerError> {
        let _guard = self.lock_dispatch();

        let node = self
            .store
            .select_node(node_id)
            .ok_or_else(|| SchedulerError::NodeNotFound(node_id.to_string()))?;

        self.store.set_node_result(node_id, value)?;
        tracing::debug!("Node {} done: {}", node_id, value);

        let expr = self
            .store
            .select_expression(&node.expr_id)
            .ok_or_else(|| SchedulerError::ExpressionNotFound(node.expr_id.clone()))?;

        if expr.root_node_id == node_id {
            self.store.set_expression_result(&expr.id, value)?;
            self.store.delete_nodes(&expr.id)?;
            tracing::info!("Expression {} done: {}", expr.id, value);
        }

        Ok(())
    }

    /// Read-only status query, scoped to the requesting owner.
    pub fn get_expression(&self, expr_id: &str, owner: &str) -> Result<Expression, SchedulerError> {
        let expr = self
            .store
            .select_expression(expr_id)
            .ok_or_else(|| SchedulerError::ExpressionNotFound(expr_id.to_string()))?;

        if expr.owner != owner {
            return Err(SchedulerError::Unauthorized);
        }

        Ok(expr)
    }

    pub fn list_expressions(&self, owner: &str) -> Vec<Expression> {
        self.store.select_expressions_by_owner(owner)
    }
}
