//! Expression-to-Task-Graph Compiler
//!
//! Turns a raw arithmetic expression into a rooted dependency graph of
//! elementary binary operations that the scheduler can dispatch to workers.
//!
//! ## Pipeline
//! 1. **`tokenizer`**: raw text -> flat token sequence (numbers, operators,
//!    parentheses). Rejects anything outside `0-9 . + - * / ( )`.
//! 2. **`postfix`**: infix tokens -> reverse-Polish order via shunting-yard,
//!    honoring precedence and parentheses.
//! 3. **`dag`**: postfix tokens -> node graph. Operand leaves are born `Done`;
//!    operation vertices are born `Pending` and reference children by id.
//!
//! Node ids come from the injectable `ids::IdGenerator` capability, so
//! concurrent compilations never collide and tests stay deterministic.

pub mod dag;
pub mod ids;
pub mod postfix;
pub mod tokenizer;
pub mod types;


use self::ids::IdGenerator;
use self::types::{CompileError, Node};

/// Full compile pipeline for one expression.
///
/// Returns the root node id and all nodes in creation order.
pub fn parse_expression(
    text: &str,
    expr_id: &str,
    ids: &dyn IdGenerator,
) -> Result<(String, Vec<Node>), CompileError> {
    let tokens = tokenizer::tokenize(text)?;
    let postfix = postfix::to_postfix(tokens)?;
    dag::build(&postfix, expr_id, ids)
}
