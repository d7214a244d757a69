//! Umoja Hub server binary.
//!
//! Loads configuration, connects to PostgreSQL, wires the adapters into
//! the HTTP router and serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use umoja_hub::adapters::http::{api_router, middleware::AuthVerifier, AppState};
use umoja_hub::adapters::mpesa::{MpesaConfig, MpesaGateway};
use umoja_hub::adapters::postgres::{
    PostgresDonationRepository, PostgresEventRepository, PostgresMembershipRepository,
    PostgresUserRepository,
};
use umoja_hub::application::handlers::{ExpireMembershipsHandler, RemindRenewalsHandler};
use umoja_hub::config::AppConfig;
use umoja_hub::ports::MembershipRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    tracing::info!(
        environment = %config.server.environment,
        sandbox = config.payment.is_sandbox(),
        "Starting Umoja Hub"
    );

    // Database
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Adapters
    let memberships: Arc<dyn MembershipRepository> =
        Arc::new(PostgresMembershipRepository::new(pool.clone()));
    let gateway = Arc::new(MpesaGateway::new(MpesaConfig {
        base_url: config.payment.base_url.clone(),
        consumer_key: config.payment.consumer_key.clone(),
        consumer_secret: config.payment.consumer_secret.clone(),
        short_code: config.payment.short_code.clone(),
        passkey: config.payment.passkey.clone(),
        callback_url: config.payment.callback_url.clone(),
    }));

    let state = AppState {
        memberships: memberships.clone(),
        donations: Arc::new(PostgresDonationRepository::new(pool.clone())),
        events: Arc::new(PostgresEventRepository::new(pool.clone())),
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        gateway,
        org_code: config.organization.org_code.clone(),
        fee_schedule: config.organization.fee_schedule(),
    };

    // Hourly sweep that lapses memberships past their term and flags
    // those nearing it for a renewal reminder.
    spawn_membership_maintenance(memberships);

    let verifier = AuthVerifier::new(
        &config.auth.jwt_secret,
        config.auth.issuer.as_deref(),
    );

    let cors = match config.server.cors_origins_list().as_slice() {
        [] => CorsLayer::permissive(),
        origins => {
            let parsed: Vec<_> = origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
    };

    let app = api_router(state, verifier)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Memberships within this many days of expiry get a renewal reminder.
const RENEWAL_REMINDER_WINDOW_DAYS: u32 = 14;

/// Runs the membership expiry and reminder sweeps once an hour.
fn spawn_membership_maintenance(memberships: Arc<dyn MembershipRepository>) {
    tokio::spawn(async move {
        let expirer = ExpireMembershipsHandler::new(memberships.clone());
        let reminder = RemindRenewalsHandler::new(memberships, RENEWAL_REMINDER_WINDOW_DAYS);
        let mut interval = tokio::time::interval(Duration::from_secs(60 * 60));
        loop {
            interval.tick().await;
            match expirer.handle().await {
                Ok(result) if result.expired > 0 => {
                    tracing::info!(expired = result.expired, "Expiry sweep finished");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e.message(), "Expiry sweep failed");
                }
            }
            match reminder.handle().await {
                Ok(result) if result.reminded > 0 => {
                    tracing::info!(reminded = result.reminded, "Renewal reminders recorded");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e.message(), "Reminder sweep failed");
                }
            }
        }
    });
}
