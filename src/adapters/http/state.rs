//! Shared application state for the HTTP surface.

use std::sync::Arc;

use crate::application::handlers::feedback::{GetTeamFeedbackHandler, GiveFeedbackHandler};
use crate::application::handlers::invitation::{
    AcceptInvitationHandler, GetInvitationHandler, SendInvitationHandler,
};
use crate::application::handlers::peer::{GetProfileHandler, SaveProfileHandler};
use crate::application::handlers::team::{
    CreateTeamHandler, GetMyTeamHandler, ListMyTeamsHandler, ListTeamTypesHandler,
};
use crate::ports::{
    EventPublisher, FeedbackRepository, InvitationEmailPolicy, InvitationRepository, Mailer,
    OutboxStore, PeerRepository, TaxonomyRepository, TeamFeedbackRepository, TeamRepository,
};

/// Everything the HTTP handlers need, shared across all routers.
#[derive(Clone)]
pub struct AppState {
    pub peer_repository: Arc<dyn PeerRepository>,
    pub team_repository: Arc<dyn TeamRepository>,
    pub invitation_repository: Arc<dyn InvitationRepository>,
    pub feedback_repository: Arc<dyn FeedbackRepository>,
    pub team_feedback_repository: Arc<dyn TeamFeedbackRepository>,
    pub taxonomy_repository: Arc<dyn TaxonomyRepository>,
    pub outbox_store: Arc<dyn OutboxStore>,
    pub email_policy: Arc<dyn InvitationEmailPolicy>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub mailer: Arc<dyn Mailer>,
    pub mail_enabled: bool,
}

impl AppState {
    pub fn save_profile_handler(&self) -> SaveProfileHandler {
        SaveProfileHandler::new(self.peer_repository.clone())
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.peer_repository.clone())
    }

    pub fn create_team_handler(&self) -> CreateTeamHandler {
        CreateTeamHandler::new(
            self.peer_repository.clone(),
            self.team_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn get_my_team_handler(&self) -> GetMyTeamHandler {
        GetMyTeamHandler::new(self.peer_repository.clone(), self.team_repository.clone())
    }

    pub fn list_my_teams_handler(&self) -> ListMyTeamsHandler {
        ListMyTeamsHandler::new(self.peer_repository.clone())
    }

    pub fn list_team_types_handler(&self) -> ListTeamTypesHandler {
        ListTeamTypesHandler::new(self.taxonomy_repository.clone())
    }

    pub fn send_invitation_handler(&self) -> SendInvitationHandler {
        SendInvitationHandler::new(
            self.peer_repository.clone(),
            self.team_repository.clone(),
            self.invitation_repository.clone(),
            self.email_policy.clone(),
            self.event_publisher.clone(),
            self.mailer.clone(),
            self.mail_enabled,
        )
    }

    pub fn get_invitation_handler(&self) -> GetInvitationHandler {
        GetInvitationHandler::new(self.invitation_repository.clone())
    }

    pub fn accept_invitation_handler(&self) -> AcceptInvitationHandler {
        AcceptInvitationHandler::new(
            self.peer_repository.clone(),
            self.team_repository.clone(),
            self.invitation_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn give_feedback_handler(&self) -> GiveFeedbackHandler {
        GiveFeedbackHandler::new(
            self.peer_repository.clone(),
            self.feedback_repository.clone(),
            self.outbox_store.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn get_team_feedback_handler(&self) -> GetTeamFeedbackHandler {
        GetTeamFeedbackHandler::new(self.team_feedback_repository.clone())
    }
}
