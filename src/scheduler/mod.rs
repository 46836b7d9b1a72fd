//! Scheduler / Orchestrator Module
//!
//! The state-machine engine at the center of the system. It owns every node
//! and expression, tracks readiness, assigns each task exactly once, accepts
//! results and cascades completion (or errors) up the graph.
//!
//! ## Architecture Overview
//! The scheduler follows a **pull-based** model:
//! 1. **Registration**: a submitted expression is compiled into its node
//!    graph and stored atomically with status `processing`.
//! 2. **Dispatch**: workers poll `GET /internal/task`; under a single
//!    dispatch lock the scheduler picks the oldest pending operation whose
//!    children are both done and hands it out as a `Task`.
//! 3. **Completion**: workers post results back; when the root node finishes,
//!    the expression finalizes and its scratch graph is deleted.
//!
//! Division by zero is detected at dispatch time with the actual dispatched
//! operands, so divisors that only become zero through computation are caught
//! the same way as literal zeros.
//!
//! ## Submodules
//! - **`orchestrator`**: the scheduling engine and its critical section.
//! - **`types`**: expressions, tasks and the scheduler error taxonomy.
//! - **`protocol`**: HTTP DTOs for the public API and the worker protocol.
//! - **`handlers`**: axum adapters and the route table.

pub mod handlers;
pub mod orchestrator;
pub mod protocol;
pub mod types;
