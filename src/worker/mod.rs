//! Worker Module
//!
//! The client side of the task protocol: a pool of concurrent execution
//! units that continuously pull ready operations from the orchestrator,
//! compute them, and push results back. Workers only ever talk to the
//! orchestrator's HTTP surface; they hold no shared graph state.

pub mod agent;

#[cfg(test)]
mod tests;
