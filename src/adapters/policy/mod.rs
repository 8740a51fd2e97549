//! Invitation email policy adapters.

mod gmail_only;

pub use gmail_only::GmailOnlyEmailPolicy;
