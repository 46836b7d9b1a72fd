//! DAG Builder
//!
//! Consumes the postfix token sequence and produces a rooted dependency graph
//! of nodes: leaves are operands (already `Done`), internal vertices are
//! `Pending` operations referencing their children by id.

use super::ids::IdGenerator;
use super::types::{CompileError, Node, Token};

/// Builds the graph for one expression.
///
/// Returns the root node id and the full node set in creation order. The
/// caller registers both with the scheduler atomically; on any error nothing
/// is registered.
pub fn build(
    postfix: &[Token],
    expr_id: &str,
    ids: &dyn IdGenerator,
) -> Result<(String, Vec<Node>), CompileError> {
    // Operand stack holds indices into `nodes` so parent back-references can
    // be patched in place.
    let mut nodes: Vec<Node> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for token in postfix {
        match token {
            Token::Number(value) => {
                let (id, seq) = ids.next_id();
                stack.push(nodes.len());
                nodes.push(Node::number(id, seq, expr_id, *value));
            }
            Token::Operator(op) => {
                if stack.len() < 2 {
                    return Err(CompileError::InvalidExpression);
                }
                let right_idx = stack.pop().ok_or(CompileError::InvalidExpression)?;
                let left_idx = stack.pop().ok_or(CompileError::InvalidExpression)?;

                let (id, seq) = ids.next_id();
                let node = Node::operation(
                    id.clone(),
                    seq,
                    expr_id,
                    *op,
                    nodes[left_idx].id.clone(),
                    nodes[right_idx].id.clone(),
                );

                nodes[left_idx].parents.push(id);
                nodes[right_idx].parents.push(node.id.clone());

                stack.push(nodes.len());
                nodes.push(node);
            }
            // Parentheses never survive the reducer.
            Token::LeftParen | Token::RightParen => {
                return Err(CompileError::InvalidExpression);
            }
        }
    }

    if stack.len() != 1 {
        return Err(CompileError::InvalidExpression);
    }

    let root_idx = stack[0];
    let root_id = nodes[root_idx].id.clone();

    Ok((root_id, nodes))
}
