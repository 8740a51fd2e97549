//! Team use cases.

mod create_team;
mod get_my_team;
mod list_my_teams;
mod list_team_types;

pub use create_team::{
    CreateTeamCommand, CreateTeamError, CreateTeamHandler, CreateTeamResult, TeamCreatedEvent,
};
pub use get_my_team::{GetMyTeamHandler, GetMyTeamQuery};
pub use list_my_teams::{ListMyTeamsHandler, ListMyTeamsQuery};
pub use list_team_types::ListTeamTypesHandler;
