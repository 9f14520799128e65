use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use common::log;

use crate::game_service::{get_board_state, get_game_status, make_move, start_game};
use crate::game_store::GameStore;

#[derive(Clone)]
pub struct WebServerState {
    pub store: GameStore,
}

pub fn build_router(state: WebServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/start", post(start_game))
        .route("/api/move", post(make_move))
        .route("/api/status/{game_id}", get(get_game_status))
        .route("/api/board/{game_id}", get(get_board_state))
        .layer(cors)
        .with_state(state)
}

pub async fn run_web_server(store: GameStore, listen_addr: &str) {
    let app = build_router(WebServerState { store });

    log!("Web server listening on {}", listen_addr);

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .expect("Failed to bind web server address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Web server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");

    log!("Shutdown signal received, finishing in-flight requests...");
}
