//! BookTalk Server - Book Club Social Application
//!
//! A Rust REST API server for book clubs and shared reading.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booktalk_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("booktalk_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BookTalk Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Initialize Redis connection (sessions and staged imports)
    let redis_service = booktalk_server::services::redis::RedisService::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");

    tracing::info!("Connected to Redis");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.sessions.clone(),
        config.catalog.clone(),
        redis_service,
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/logout", post(api::auth::logout))
        .route("/auth/me", get(api::auth::me))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        .route("/users/:id", delete(api::users::delete_user))
        .route("/users/:id/favorites", get(api::users::get_favorites))
        // Clubs and memberships
        .route("/clubs", get(api::clubs::list_clubs))
        .route("/clubs", post(api::clubs::create_club))
        .route("/clubs/:id", get(api::clubs::get_club))
        .route("/clubs/:id", delete(api::clubs::delete_club))
        .route("/clubs/:id/join", post(api::clubs::join_club))
        .route("/clubs/:id/leave", post(api::clubs::leave_club))
        .route(
            "/clubs/:id/members/:user_id/moderator",
            post(api::clubs::toggle_moderator),
        )
        // Club reads (shared reading progress)
        .route("/clubs/:id/reads", get(api::reads::list_reads))
        .route("/clubs/:id/reads", post(api::reads::add_read))
        .route("/clubs/:id/reads/:book_id", delete(api::reads::remove_read))
        .route(
            "/clubs/:id/reads/:book_id/current",
            post(api::reads::toggle_current),
        )
        .route(
            "/clubs/:id/reads/:book_id/complete",
            post(api::reads::toggle_complete),
        )
        // Meetings
        .route("/clubs/:id/meetings", get(api::meetings::list_meetings))
        .route("/clubs/:id/meetings", post(api::meetings::create_meeting))
        .route("/meetings/:id", get(api::meetings::get_meeting))
        .route("/meetings/:id", put(api::meetings::update_meeting))
        .route("/meetings/:id", delete(api::meetings::delete_meeting))
        .route("/meetings/:id/notes", get(api::notes::list_meeting_notes))
        // Books and favorites
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/lookup", get(api::books::lookup_book))
        .route("/books/import", post(api::books::import_book))
        .route("/books/:id", get(api::books::get_book))
        .route("/books/:id/favorite", post(api::books::toggle_favorite))
        .route("/books/:id/notes", get(api::notes::list_book_notes))
        // Notes
        .route("/notes", post(api::notes::create_note))
        .route("/notes/:id", put(api::notes::update_note))
        .route("/notes/:id", delete(api::notes::delete_note))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
