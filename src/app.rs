/*
 * Responsibility
 * - Config 読み込み → 依存生成 → Router 組み立て
 * - tracing / panic hook の初期化
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::auth::access;
use crate::repos::user_repo::PgUserRepo;
use crate::services::auth::gate::AuthGate;
use crate::services::keycloak::KeycloakClient;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,idgate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting identity gateway in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Process-level services, injected into the shared application state.
    // The Keycloak client is built once from an immutable config; nothing
    // reads provider settings from the environment after startup.
    let keycloak = Arc::new(KeycloakClient::new(config.keycloak.clone())?);

    // Startup connectivity probe, diagnostics only: the gate stays fail-closed
    // whether or not the provider was reachable here.
    match keycloak.discover().await {
        Ok(doc) => tracing::info!(
            issuer = doc["issuer"].as_str().unwrap_or("unknown"),
            "identity provider discovered"
        ),
        Err(err) => tracing::warn!(error = %err, "identity provider discovery failed"),
    }

    let users = Arc::new(PgUserRepo::new(pool));
    let gate = Arc::new(AuthGate::new(keycloak, users));

    Ok(AppState::new(gate))
}

fn build_router(state: AppState) -> Router {
    async fn health() -> &'static str {
        "ok"
    }

    // The authentication gate wraps /api/v1 only; /health stays open.
    let v1 = access::apply(api::v1::routes(), state.clone());

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", v1)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
