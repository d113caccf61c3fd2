//! `membership-verifier <user-id>`
//!
//! Runs one membership payment verification and prints the outcome as JSON.
//! Exit status: 0 paid, 1 not paid, 2 usage or configuration error.

use std::process::ExitCode;
use std::sync::Arc;

use membership_verifier::adapters::{
    PostgresExpiryUpdater, PostgresMemberStore, RedisPendingPaymentCache, SquarePaymentProvider,
};
use membership_verifier::application::{
    VerifyMembershipPaymentHandler, VerifyMembershipPaymentQuery,
};
use membership_verifier::config::AppConfig;
use membership_verifier::domain::foundation::UserId;
use membership_verifier::telemetry;

const EXIT_NOT_PAID: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let user_id = match parse_args(std::env::args().skip(1)) {
        Ok(user_id) => user_id,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: membership-verifier <user-id>");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::from(EXIT_USAGE);
    }

    if let Err(e) = telemetry::init(&config.telemetry) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::from(EXIT_USAGE);
    }

    let handler = match build_handler(&config).await {
        Ok(handler) => handler,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize verifier");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let outcome = handler
        .handle(VerifyMembershipPaymentQuery {
            user_id: user_id.clone(),
        })
        .await;

    match serde_json::to_string(&outcome) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Failed to serialize outcome");
            return ExitCode::from(EXIT_NOT_PAID);
        }
    }

    if outcome.is_paid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NOT_PAID)
    }
}

/// Expects exactly one non-empty user id argument, used as given.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<UserId, String> {
    let raw = args.next().ok_or_else(|| "missing <user-id>".to_string())?;
    if args.next().is_some() {
        return Err("unexpected extra arguments".to_string());
    }
    UserId::new(raw).map_err(|e| e.to_string())
}

/// Connect to PostgreSQL, Redis and Square and wire them into the handler.
async fn build_handler(config: &AppConfig) -> Result<VerifyMembershipPaymentHandler, String> {
    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await
        .map_err(|e| format!("Failed to connect to database: {}", e))?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to run migrations: {}", e))?;
        tracing::info!("Database migrations applied");
    }

    let pending_payments = RedisPendingPaymentCache::connect(&config.redis)
        .await
        .map_err(|e| e.to_string())?;

    let payment_provider = SquarePaymentProvider::new(&config.payment).map_err(|e| e.to_string())?;

    tracing::debug!(
        environment = ?config.telemetry.environment,
        square_api = %config.payment.api_base_url(),
        "Verifier dependencies ready"
    );

    Ok(VerifyMembershipPaymentHandler::new(
        Arc::new(PostgresMemberStore::new(pool.clone())),
        Arc::new(pending_payments),
        Arc::new(payment_provider),
        Arc::new(PostgresExpiryUpdater::new(pool)),
    ))
}
