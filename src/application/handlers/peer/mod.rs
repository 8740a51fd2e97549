//! Peer profile use cases.

mod get_profile;
mod save_profile;

pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use save_profile::{SaveProfileCommand, SaveProfileError, SaveProfileHandler};
