//! Adapters - implementations of the port interfaces.
//!
//! - `events` - in-process event bus and the outbox processor
//! - `postgres` - sqlx-backed repositories and the outbox store
//! - `http` - axum routers and request/response types
//! - `auth` - identity verification (Firebase, mock)
//! - `classification` - Eden AI text classification client
//! - `mail` - MailerSend invitation mail
//! - `policy` - invitation email policy

pub mod auth;
pub mod classification;
pub mod events;
pub mod http;
pub mod mail;
pub mod policy;
pub mod postgres;
