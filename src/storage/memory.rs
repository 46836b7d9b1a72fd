//! In-Memory Record Store
//!
//! DashMap-backed implementation of `RecordStore`. Expressions and nodes live
//! in separate maps keyed by their string ids; every operation touches a
//! single entry, which keeps the individual-atomicity contract trivially.

use super::store::RecordStore;
use crate::compiler::types::{Node, NodeKind, NodeStatus};
use crate::scheduler::types::{Expression, ExpressionStatus};

use anyhow::Result;
use dashmap::DashMap;

pub struct MemoryStore {
    expressions: DashMap<String, Expression>,
    nodes: DashMap<String, Node>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            expressions: DashMap::new(),
            nodes: DashMap::new(),
        }
    }

    pub fn expression_count(&self) -> usize {
        self.expressions.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn insert_expression(&self, expr: Expression) -> Result<()> {
        self.expressions.insert(expr.id.clone(), expr);
        Ok(())
    }

    fn select_expression(&self, expr_id: &str) -> Option<Expression> {
        self.expressions.get(expr_id).map(|e| e.clone())
    }

    fn select_expressions_by_owner(&self, owner: &str) -> Vec<Expression> {
        self.expressions
            .iter()
            .filter(|entry| entry.value().owner == owner)
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn set_expression_status(&self, expr_id: &str, status: ExpressionStatus) -> Result<()> {
        let mut entry = self
            .expressions
            .get_mut(expr_id)
            .ok_or_else(|| anyhow::anyhow!("expression not found: {}", expr_id))?;
        entry.status = status;
        Ok(())
    }

    fn set_expression_result(&self, expr_id: &str, result: f64) -> Result<()> {
        let mut entry = self
            .expressions
            .get_mut(expr_id)
            .ok_or_else(|| anyhow::anyhow!("expression not found: {}", expr_id))?;
        entry.status = ExpressionStatus::Done;
        entry.result = Some(result);
        Ok(())
    }

    fn insert_nodes(&self, nodes: Vec<Node>) -> Result<()> {
        for node in nodes {
            self.nodes.insert(node.id.clone(), node);
        }
        Ok(())
    }

    fn select_node(&self, node_id: &str) -> Option<Node> {
        self.nodes.get(node_id).map(|n| n.clone())
    }

    fn set_node_status(&self, node_id: &str, status: NodeStatus) -> Result<()> {
        let mut entry = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| anyhow::anyhow!("node not found: {}", node_id))?;
        entry.status = status;
        Ok(())
    }

    fn set_node_result(&self, node_id: &str, result: f64) -> Result<()> {
        let mut entry = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| anyhow::anyhow!("node not found: {}", node_id))?;
        entry.status = NodeStatus::Done;
        entry.result = Some(result);
        Ok(())
    }

    fn delete_nodes(&self, expr_id: &str) -> Result<()> {
        self.nodes.retain(|_, node| node.expr_id != expr_id);
        Ok(())
    }

    fn operation_nodes(&self) -> Vec<Node> {
        self.nodes
            .iter()
            .filter(|entry| entry.value().kind == NodeKind::Operation)
            .map(|entry| entry.value().clone())
            .collect()
    }
}
