//! Identity verification adapters.

mod firebase;
mod mock;

pub use firebase::{FirebaseConfig, FirebaseIdentityVerifier};
pub use mock::MockIdentityVerifier;
