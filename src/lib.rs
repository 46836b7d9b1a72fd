//! Distributed Arithmetic Calculator Library
//!
//! This library crate defines the core modules that make up the distributed
//! calculator. It serves as the foundation for the binary executable
//! (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of five loosely coupled subsystems:
//!
//! - **`compiler`**: The expression-to-task-graph pipeline. Tokenizes the raw
//!   text, reduces it to postfix order, and builds a rooted dependency graph
//!   of elementary binary operations.
//! - **`scheduler`**: The orchestrator state machine. Owns every node and
//!   expression, dispatches ready operations exactly once, accepts results,
//!   and cascades completion and errors up the graph.
//! - **`worker`**: The execution pool. Concurrent units that pull tasks over
//!   the HTTP protocol, compute them, and push results back with resilient
//!   retry.
//! - **`storage`**: The state layer. A key-addressed record store behind a
//!   trait, shipped with a concurrent in-memory backend, plus the user
//!   record collaborator.
//! - **`config`**: Environment-driven settings: per-operator synthetic
//!   durations, worker concurrency, and network addressing.

pub mod compiler;
pub mod config;
pub mod scheduler;
pub mod storage;
pub mod worker;
