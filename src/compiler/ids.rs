//! Node Id Generation
//!
//! Every node receives a globally unique id at creation time. The production
//! generator combines a monotonic counter with a high-resolution timestamp,
//! serialized under a dedicated lock so collisions are structurally
//! impossible even when expressions compile concurrently. The trait exists so
//! tests can inject deterministic ids.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Capability for minting node ids.
///
/// Returns the id together with the monotonic sequence number it was minted
/// under; the sequence drives FIFO dispatch ordering in the scheduler.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> (String, u64);
}

/// Counter + nanosecond timestamp under a lock.
///
/// The lock is narrowly scoped to id generation only, so it never contends
/// with graph mutation.
pub struct MonotonicIdGenerator {
    counter: Mutex<u64>,
}

impl MonotonicIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: Mutex::new(0),
        }
    }
}

impl Default for MonotonicIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for MonotonicIdGenerator {
    fn next_id(&self) -> (String, u64) {
        let mut counter = self.counter.lock().unwrap_or_else(|e| e.into_inner());
        *counter += 1;

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();

        (format!("{}-{}", nanos, *counter), *counter)
    }
}
