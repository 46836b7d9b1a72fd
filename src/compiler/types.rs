use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One of the four supported binary operators.
///
/// Serialized as its source symbol (`"+"`, `"-"`, `"*"`, `"/"`) so the wire
/// format matches what workers and status queries display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Op {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Op {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            _ => None,
        }
    }

    /// Binding strength used by the shunting-yard reducer.
    /// `*` and `/` bind tighter than `+` and `-`.
    pub fn precedence(&self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Transient parse unit produced by the tokenizer and consumed by the
/// reducer and DAG builder. Never stored or sent over the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Op),
    LeftParen,
    RightParen,
}

/// Everything that can go wrong while turning source text into a graph.
///
/// Compile errors are terminal: the submitting client gets a rejected
/// request and nothing is registered with the scheduler.
#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    #[error("invalid character: {0}")]
    InvalidCharacter(char),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("mismatched parentheses")]
    MismatchedParentheses,
    #[error("invalid expression")]
    InvalidExpression,
}

/// Distinguishes operand leaves from operation vertices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Number,
    Operation,
}

/// Lifecycle state of a node in an expression's dependency graph.
///
/// `pending -> in_progress -> done`, or `pending/in_progress -> error`.
/// Number leaves are created already `Done`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Pending,
    InProgress,
    Done,
    Error,
}

/// A vertex in an expression's dependency graph.
///
/// Operation nodes reference their two children by id; the scheduler owns
/// every status/result mutation after the graph is registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Globally unique across all expressions (locked counter + timestamp).
    pub id: String,
    /// Creation order, used as the FIFO dispatch tie-break.
    pub seq: u64,
    /// Owning expression.
    pub expr_id: String,
    pub kind: NodeKind,
    /// Literal value for `Number` nodes.
    pub value: f64,
    /// Operator for `Operation` nodes.
    pub op: Option<Op>,
    pub left: Option<String>,
    pub right: Option<String>,
    pub status: NodeStatus,
    pub result: Option<f64>,
    /// Back-references, informational only.
    pub parents: Vec<String>,
}

impl Node {
    /// Leaf operand: born `Done` with its own value as the result.
    pub fn number(id: String, seq: u64, expr_id: &str, value: f64) -> Self {
        Self {
            id,
            seq,
            expr_id: expr_id.to_string(),
            kind: NodeKind::Number,
            value,
            op: None,
            left: None,
            right: None,
            status: NodeStatus::Done,
            result: Some(value),
            parents: Vec::new(),
        }
    }

    /// Internal vertex: born `Pending`, waiting on both children.
    pub fn operation(id: String, seq: u64, expr_id: &str, op: Op, left: String, right: String) -> Self {
        Self {
            id,
            seq,
            expr_id: expr_id.to_string(),
            kind: NodeKind::Operation,
            value: 0.0,
            op: Some(op),
            left: Some(left),
            right: Some(right),
            status: NodeStatus::Pending,
            result: None,
            parents: Vec::new(),
        }
    }
}
