//! Peer module - people, their identity and team memberships.

mod aggregate;
mod email;
mod name;
mod profile_url;

pub use aggregate::{Peer, TeamLink};
pub use email::Email;
pub use name::{FirstName, LastName};
pub use profile_url::ProfileUrl;
