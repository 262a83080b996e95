//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::{AuthConfig, AuthGuardState, PgAuthRepository, TokenIssuer, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use papers::{
    HttpObjectStore, HttpScorerClient, ObjectStoreConfig, PapersConfig, PgPaperRepository,
    ScorerConfig, papers_router,
};
use papers::models::{CorpusPolicy, VisibilityPolicy};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,papers=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Credential signing. Refusing to start without a secret beats issuing
    // tokens nobody can verify after a restart.
    let token_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");

    let mut auth_config = AuthConfig::new(token_secret.clone());
    auth_config.password_pepper = env::var("PASSWORD_PEPPER")
        .ok()
        .map(|p| p.into_bytes());

    let issuer = Arc::new(TokenIssuer::new(
        token_secret.as_bytes(),
        auth_config.token_ttl,
    ));
    let guard = AuthGuardState::new(issuer.clone());

    // Outbound gateways. Both stay optional: a missing object store fails
    // uploads at request time, a missing scorer degrades them.
    let store = HttpObjectStore::new(ObjectStoreConfig {
        upload_url: env::var("OBJECT_STORE_UPLOAD_URL").ok(),
        api_key: env::var("OBJECT_STORE_API_KEY").ok(),
        timeout: parse_secs(env::var("OBJECT_STORE_TIMEOUT_SECS").ok()),
    });

    let scorer = HttpScorerClient::new(ScorerConfig {
        base_url: env::var("AI_SERVICE_URL").ok(),
        timeout: parse_secs(env::var("AI_SERVICE_TIMEOUT_SECS").ok()),
    });

    let papers_config = PapersConfig::new(
        env::var("VISIBILITY_POLICY")
            .ok()
            .and_then(|v| VisibilityPolicy::from_code(&v))
            .unwrap_or_default(),
        env::var("CORPUS_POLICY")
            .ok()
            .and_then(|v| CorpusPolicy::from_code(&v))
            .unwrap_or_default(),
    );

    // CORS configuration
    let client_origins =
        env::var("CLIENT_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = client_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            auth_router(
                PgAuthRepository::new(pool.clone()),
                issuer.clone(),
                auth_config,
            ),
        )
        .nest(
            "/api",
            papers_router(
                PgPaperRepository::new(pool.clone()),
                store,
                scorer,
                guard,
                papers_config,
            ),
        )
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn parse_secs(value: Option<String>) -> Option<Duration> {
    value.and_then(|v| v.parse().ok()).map(Duration::from_secs)
}
