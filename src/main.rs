mod api;
mod config;
mod db;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{auth::AuthService, AppState};
use config::Config;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mao_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load();

    // Initialize database
    let database = db::init_database(&config.database_url)
        .await
        .expect("Failed to initialize database");

    let auth = AuthService::new(database.clone(), &config);

    // Seed the super-admin account when configured (for bootstrapping)
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        auth.ensure_super_admin(email, password)
            .await
            .expect("Failed to seed super-admin account");
    }

    let state = Arc::new(AppState {
        db: database,
        auth,
    });

    // Build router with explicit routes
    let app = Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .nest("/api/auth", api::auth_handlers::router())
        .nest("/api/users", api::users::router())
        .nest("/api/mao", api::mao_router())
        .nest("/api/farmers", api::farmers::router())
        .nest("/api/buyers", api::buyers::router())
        .nest("/api/seedlings", api::seedlings::router())
        .nest("/api/articles", api::content::articles_router())
        .nest("/api/team", api::content::team_router())
        .nest("/api/maintenance", api::content::maintenance_router())
        .nest("/api/admin", api::content::admin_router())
        .with_state(state)
        // Registration payloads carry base64 photos
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("MAO portal API starting on http://{}", addr);
    tracing::info!("");
    tracing::info!("API Endpoints:");
    tracing::info!("  POST /api/auth/register/{{farmer,buyer,officer}} - Register");
    tracing::info!("  POST /api/auth/login   - Login and get tokens");
    tracing::info!("  POST /api/auth/refresh - Rotate tokens");
    tracing::info!("  POST /api/auth/logout  - Revoke refresh tokens");
    tracing::info!("  /api/users             - Officer account management");
    tracing::info!("  /api/mao               - Harvests, inventory, sales");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
