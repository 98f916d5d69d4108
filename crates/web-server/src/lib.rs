use axum::{
    Router,
    routing::{delete, get, post, put},
};
use configuration::Settings;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
// Note: Tracing is initialized by the binary; this crate only emits events.

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

/// Builds the application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    // `/jokes/:id` carries the category listing (GET) as well as the id-based
    // PUT and DELETE, since a path segment can only have one parameter name.
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/jokes", get(handlers::get_jokes).post(handlers::add_joke))
        .route("/jokes/random", get(handlers::get_random_joke))
        .route(
            "/jokes/random/:category",
            get(handlers::get_random_joke_in_category),
        )
        .route(
            "/jokes/:id",
            get(handlers::get_jokes_in_category)
                .put(handlers::vote_on_joke)
                .delete(handlers::delete_joke),
        )
        .route("/jokes/:id/counts", put(handlers::set_joke_counts))
        .route("/jokes/:id/category", post(handlers::assign_category))
        .route(
            "/categories",
            get(handlers::get_categories).post(handlers::add_category),
        )
        .route("/categories/:id", delete(handlers::delete_category))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// The schema is in place before the listener is bound, so no request can
/// reach a table that does not exist yet.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;

    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool.clone());

    let app = router(Arc::new(AppState { db_repo }));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server started on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    tracing::info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        // Without a signal handler the server simply runs until killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
