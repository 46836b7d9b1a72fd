//! Record Store Interface
//!
//! Key-addressed CRUD for expression and node records. The scheduler is the
//! only writer; it serializes graph mutation through its own critical
//! section, so each store operation only has to be individually atomic.
//!
//! The shipped implementation is in-memory (`memory::MemoryStore`); an
//! embedded or client/server database can be swapped in behind this trait
//! without touching the scheduler contract.

use crate::compiler::types::{Node, NodeStatus};
use crate::scheduler::types::{Expression, ExpressionStatus};
use anyhow::Result;

pub trait RecordStore: Send + Sync {
    fn insert_expression(&self, expr: Expression) -> Result<()>;
    fn select_expression(&self, expr_id: &str) -> Option<Expression>;
    fn select_expressions_by_owner(&self, owner: &str) -> Vec<Expression>;
    fn set_expression_status(&self, expr_id: &str, status: ExpressionStatus) -> Result<()>;
    /// Sets the result and transitions the expression to `Done` in one step.
    fn set_expression_result(&self, expr_id: &str, result: f64) -> Result<()>;

    fn insert_nodes(&self, nodes: Vec<Node>) -> Result<()>;
    fn select_node(&self, node_id: &str) -> Option<Node>;
    fn set_node_status(&self, node_id: &str, status: NodeStatus) -> Result<()>;
    /// Sets the result and transitions the node to `Done` in one step.
    fn set_node_result(&self, node_id: &str, result: f64) -> Result<()>;
    /// Drops the whole scratch graph of one expression.
    fn delete_nodes(&self, expr_id: &str) -> Result<()>;

    /// Snapshot of every stored operation node, for the ready-scan.
    fn operation_nodes(&self) -> Vec<Node>;
}
