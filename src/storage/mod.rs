//! Storage Module
//!
//! The state layer behind the scheduler.
//!
//! ## Core Concepts
//! - **Store abstraction**: `RecordStore` is the key-addressed CRUD surface for
//!   expression and node records. The scheduler only talks to this trait.
//! - **In-memory backend**: `MemoryStore` keeps both collections in concurrent
//!   maps; an embedded or external database can be swapped in behind the trait.
//! - **User records**: `UserDirectory` holds user credentials with bcrypt
//!   hashing for the (excluded) auth layer.

pub mod memory;
pub mod store;
pub mod users;

#[cfg(test)]
mod tests;
