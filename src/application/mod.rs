//! Application layer - use case handlers and event listeners.

pub mod handlers;
pub mod listeners;
