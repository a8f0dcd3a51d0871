use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use credential_service::config::Config;
use credential_service::config::StorageBackend;
use credential_service::credential::ports::CredentialServicePort;
use credential_service::credential::ports::CredentialStore;
use credential_service::credential::service::CredentialService;
use credential_service::inbound::http::router::create_router;
use credential_service::portfolio::ports::PortfolioRepository;
use credential_service::portfolio::ports::PortfolioServicePort;
use credential_service::portfolio::service::PortfolioService;
use credential_service::repositories::InMemoryCredentialStore;
use credential_service::repositories::InMemoryPortfolioRepository;
use credential_service::repositories::PostgresCredentialStore;
use credential_service::repositories::PostgresPortfolioRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        token_lifetime_minutes = config.jwt.expiration_minutes,
        hashing = ?config.hashing,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::with_settings(
        config.jwt.secret.as_bytes(),
        config.hashing.into(),
        Duration::minutes(config.jwt.expiration_minutes),
    )?);

    let (credential_service, portfolio_service) = match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(
                Arc::new(PostgresCredentialStore::new(pg_pool.clone())),
                Arc::new(PostgresPortfolioRepository::new(pg_pool)),
                &authenticator,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; registered users are lost on restart");

            build_services(
                Arc::new(InMemoryCredentialStore::new()),
                Arc::new(InMemoryPortfolioRepository::default()),
                &authenticator,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(credential_service, portfolio_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_services<S, R>(
    credential_store: Arc<S>,
    portfolio_repository: Arc<R>,
    authenticator: &Arc<Authenticator>,
) -> (Arc<dyn CredentialServicePort>, Arc<dyn PortfolioServicePort>)
where
    S: CredentialStore,
    R: PortfolioRepository,
{
    let credential_service: Arc<dyn CredentialServicePort> = Arc::new(CredentialService::new(
        credential_store,
        Arc::clone(authenticator),
    ));
    let portfolio_service: Arc<dyn PortfolioServicePort> =
        Arc::new(PortfolioService::new(portfolio_repository));

    (credential_service, portfolio_service)
}
