//! HonestHive - Peer Feedback Backend
//!
//! This crate implements a peer-feedback service: peers form teams, invite
//! others by mail, exchange feedback, and an asynchronous pipeline classifies
//! each message into growth categories via an outbox and an in-process
//! event bus.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
