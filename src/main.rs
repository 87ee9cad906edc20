//! Alexandria: a GraphQL backend for a shared book catalog.
//!
//! Serves queries and mutations over /graphql and the bookAdded
//! subscription over /graphql/ws. State lives behind the store traits,
//! events ride an in-process bus, and every request resolves its auth
//! context exactly once at the HTTP edge.

mod api;
mod app;
mod config;
mod error;
mod graphql;
mod services;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::app::AppState;
use crate::config::Config;
use crate::services::{CredentialVerifier, EventBus, SharedSecretVerifier, TokenService};
use crate::store::CatalogStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alexandria=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting Alexandria");
    tracing::info!("Configuration loaded");

    let store = CatalogStore::in_memory_with_author_policy(config.auto_create_authors);
    tracing::info!(
        auto_create_authors = config.auto_create_authors,
        "Catalog store ready"
    );

    let tokens = TokenService::new(config.jwt_secret.clone(), config.token_lifetime_secs);
    let bus = EventBus::new();

    // LOGIN_PASSWORD_HASH wins when both are set; hashing at startup keeps
    // the plaintext out of the hot path.
    let credentials: Arc<dyn CredentialVerifier> =
        if let Some(hash) = &config.login_password_hash {
            Arc::new(SharedSecretVerifier::from_hash(hash.clone()))
        } else {
            let password = config
                .login_password
                .as_deref()
                .context("LOGIN_PASSWORD or LOGIN_PASSWORD_HASH is required")?;
            Arc::new(SharedSecretVerifier::from_password(password)?)
        };

    let schema = graphql::build_schema(store.clone(), tokens.clone(), bus, credentials);
    tracing::info!("GraphQL schema built");

    let state = AppState {
        config: config.clone(),
        store,
        schema,
        tokens,
    };

    let app = app::build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
