//! HonestHive server entrypoint.
//!
//! Loads configuration, connects to Postgres, wires adapters to the
//! application layer, subscribes the event listeners, starts the outbox
//! processor, and serves the HTTP API until shutdown.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::sync::watch;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use honesthive::adapters::auth::{FirebaseConfig, FirebaseIdentityVerifier};
use honesthive::adapters::classification::{EdenAiClassifier, EdenAiConfig};
use honesthive::adapters::events::{InMemoryEventBus, OutboxProcessor, OutboxProcessorConfig};
use honesthive::adapters::http::{api_router, AppState};
use honesthive::adapters::mail::{MailerSendConfig, MailerSendMailer};
use honesthive::adapters::policy::GmailOnlyEmailPolicy;
use honesthive::adapters::postgres::{
    PostgresFeedbackRepository, PostgresInvitationRepository, PostgresOutboxStore,
    PostgresPeerRepository, PostgresTaxonomyRepository, PostgresTeamFeedbackRepository,
    PostgresTeamRepository,
};
use honesthive::application::handlers::feedback::{ClassifyFeedbackHandler, FEEDBACK_GIVEN};
use honesthive::application::listeners::{
    AddPendingMemberListener, AssignOwnTeamListener, ClassifyFeedbackListener,
    RegisterAcceptedMemberListener, TeamFeedbackProjectionListener, CLASSIFY_FEEDBACK_MESSAGE,
};
use honesthive::config::AppConfig;
use honesthive::ports::{EventPublisher, EventSubscriber, IdentityVerifier, OutboxStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.server.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let peer_repository = Arc::new(PostgresPeerRepository::new(pool.clone()));
    let team_repository = Arc::new(PostgresTeamRepository::new(pool.clone()));
    let invitation_repository = Arc::new(PostgresInvitationRepository::new(pool.clone()));
    let feedback_repository = Arc::new(PostgresFeedbackRepository::new(pool.clone()));
    let team_feedback_repository = Arc::new(PostgresTeamFeedbackRepository::new(pool.clone()));
    let taxonomy_repository = Arc::new(PostgresTaxonomyRepository::new(pool.clone()));
    let outbox_store: Arc<dyn OutboxStore> = Arc::new(PostgresOutboxStore::new(pool.clone()));

    let classifier = Arc::new(EdenAiClassifier::new({
        let mut eden = EdenAiConfig::new(config.classification.eden_api_key.clone());
        if let Some(url) = &config.classification.base_url {
            eden = eden.with_base_url(url.clone());
        }
        eden
    })?);

    let mailer = Arc::new(MailerSendMailer::new(MailerSendConfig::new(
        config.mail.mailersend_api_key.clone(),
        config.mail.invitation_template_id.clone(),
    ))?);

    let verifier: Arc<dyn IdentityVerifier> = Arc::new(FirebaseIdentityVerifier::new(
        FirebaseConfig::new(config.auth.firebase_project_id.clone())
            .with_cache_duration(config.auth.jwks_cache_ttl()),
    )?);

    let bus = Arc::new(InMemoryEventBus::new());
    bus.subscribe(
        "team.created",
        Arc::new(AssignOwnTeamListener::new(peer_repository.clone())),
    );
    bus.subscribe(
        "invitation.sent",
        Arc::new(AddPendingMemberListener::new(
            team_repository.clone(),
            invitation_repository.clone(),
        )),
    );
    bus.subscribe(
        "invitation.accepted",
        Arc::new(RegisterAcceptedMemberListener::new(
            peer_repository.clone(),
            team_repository.clone(),
        )),
    );
    bus.subscribe(
        FEEDBACK_GIVEN,
        Arc::new(TeamFeedbackProjectionListener::new(
            feedback_repository.clone(),
            team_repository.clone(),
            team_feedback_repository.clone(),
        )),
    );
    bus.subscribe(
        CLASSIFY_FEEDBACK_MESSAGE,
        Arc::new(ClassifyFeedbackListener::new(
            outbox_store.clone(),
            Arc::new(ClassifyFeedbackHandler::new(
                team_repository.clone(),
                taxonomy_repository.clone(),
                feedback_repository.clone(),
                classifier,
            )),
        )),
    );
    let event_publisher: Arc<dyn EventPublisher> = bus.clone();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let processor = OutboxProcessor::new(outbox_store.clone(), event_publisher.clone())
        .with_config(
            OutboxProcessorConfig::default().with_poll_interval(config.outbox.poll_interval()),
        );
    let processor_handle = tokio::spawn(processor.run(shutdown_rx));

    let state = AppState {
        peer_repository,
        team_repository,
        invitation_repository,
        feedback_repository,
        team_feedback_repository,
        taxonomy_repository,
        outbox_store,
        email_policy: Arc::new(GmailOnlyEmailPolicy::new()),
        event_publisher,
        mailer,
        mail_enabled: config.mail.enabled,
    };

    let cors = {
        let origins = config.server.cors_origins_list();
        if origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let parsed = origins
                .iter()
                .map(|o| o.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?;
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = api_router(state, verifier)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let the outbox processor drain its final batch before exiting.
    shutdown_tx.send(true).ok();
    processor_handle.await?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
}
