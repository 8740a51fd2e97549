//! Outbound mail adapters.

mod mailersend;

pub use mailersend::{MailerSendConfig, MailerSendMailer};
