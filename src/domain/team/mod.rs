//! Team module - teams, their names and kinds.

mod aggregate;
mod kind;
mod name;

pub use aggregate::Team;
pub use kind::TeamKind;
pub use name::TeamName;
