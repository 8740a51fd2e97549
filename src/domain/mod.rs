//! Domain layer - aggregates, value objects and shared foundations.
//!
//! Nothing in this layer performs I/O; persistence and transport live behind
//! the traits in `crate::ports`.

pub mod feedback;
pub mod foundation;
pub mod invitation;
pub mod peer;
pub mod taxonomy;
pub mod team;
