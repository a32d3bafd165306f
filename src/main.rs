use std::sync::Arc;
use todo_server::api::{self, AppState, SharedState};
use todo_server::service::TaskService;
use todo_server::settings::Settings;
use todo_server::store::TaskStore;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::from_env();

    // ── Open the store ─────────────────────────────────────────
    let store = TaskStore::open(&settings.db_path).expect("Failed to open task database");
    let count = store
        .list(None)
        .expect("Failed to read task database")
        .len();
    info!(path = %settings.db_path, tasks = count, "store loaded");

    // ── Shared state ───────────────────────────────────────────
    let state: SharedState = Arc::new(AppState {
        service: TaskService::new(store),
    });

    // ── Router ─────────────────────────────────────────────────
    let app = api::router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    // ── Start ──────────────────────────────────────────────────
    info!("task API listening on http://{}", settings.bind_addr);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("Server terminated");
}
