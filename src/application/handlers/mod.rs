//! Application handlers - one command or query handler per use case.

pub mod feedback;
pub mod invitation;
pub mod peer;
pub mod team;
