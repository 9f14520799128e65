use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use common::games::tictactoe::{Board, GameState, Mark};
use common::{GameId, log};

use crate::game_store::StoreError;
use crate::web_server::WebServerState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameResponse {
    pub game_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub game_id: String,
    pub position: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    pub board: Board,
    pub current_player: Mark,
    pub winner: Option<Mark>,
    pub is_finished: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub board: Board,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match self {
            StoreError::GameNotFound => StatusCode::NOT_FOUND,
            StoreError::Move(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

fn game_state_response(state: &GameState) -> GameStateResponse {
    GameStateResponse {
        board: state.board,
        current_player: state.current_mark,
        winner: state.winner(),
        is_finished: state.is_finished(),
    }
}

pub async fn start_game(State(state): State<WebServerState>) -> Json<StartGameResponse> {
    let game = state.store.create_game().await;

    log!("Game created: {}", game.id);

    Json(StartGameResponse {
        game_id: game.id.to_string(),
    })
}

pub async fn make_move(
    State(state): State<WebServerState>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<GameStateResponse>, StoreError> {
    let game_id = GameId::new(request.game_id);
    // Negative positions funnel into the bounds check, keeping the
    // finished-game rejection first.
    let position = usize::try_from(request.position).unwrap_or(usize::MAX);

    let game = match state.store.apply_move(&game_id, position).await {
        Ok(game) => game,
        Err(err) => {
            log!("Move rejected: game {}, position {}: {}", game_id, request.position, err);
            return Err(err);
        }
    };

    log!("Move applied: game {}, position {}", game_id, request.position);

    Ok(Json(game_state_response(&game)))
}

pub async fn get_game_status(
    State(state): State<WebServerState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameStateResponse>, StoreError> {
    let game_id = GameId::new(game_id);
    let game = state
        .store
        .get_game(&game_id)
        .await
        .ok_or(StoreError::GameNotFound)?;

    Ok(Json(game_state_response(&game)))
}

pub async fn get_board_state(
    State(state): State<WebServerState>,
    Path(game_id): Path<String>,
) -> Result<Json<BoardResponse>, StoreError> {
    let game_id = GameId::new(game_id);
    let game = state
        .store
        .get_game(&game_id)
        .await
        .ok_or(StoreError::GameNotFound)?;

    Ok(Json(BoardResponse { board: game.board }))
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::game_store::GameStore;
    use crate::web_server::build_router;

    fn test_router() -> Router {
        build_router(crate::web_server::WebServerState {
            store: GameStore::new(),
        })
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, request).await
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(router, request).await
    }

    async fn start_game(router: &Router) -> String {
        let (status, body) = post(router, "/api/start", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        body["gameId"].as_str().unwrap().to_string()
    }

    async fn make_move(router: &Router, game_id: &str, position: i64) -> (StatusCode, Value) {
        post(
            router,
            "/api/move",
            json!({ "gameId": game_id, "position": position }),
        )
        .await
    }

    #[tokio::test]
    async fn test_start_returns_a_game_id() {
        let router = test_router();

        let (status, body) = post(&router, "/api/start", json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body["gameId"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_valid_move_is_applied() {
        let router = test_router();
        let game_id = start_game(&router).await;

        let (status, body) = make_move(&router, &game_id, 0).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["board"][0], "X");
        assert_eq!(body["board"][1], Value::Null);
        assert_eq!(body["currentPlayer"], "O");
        assert_eq!(body["winner"], Value::Null);
        assert_eq!(body["isFinished"], false);
    }

    #[tokio::test]
    async fn test_taken_cell_is_rejected() {
        let router = test_router();
        let game_id = start_game(&router).await;
        make_move(&router, &game_id, 0).await;

        let (status, body) = make_move(&router, &game_id, 0).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Cell already taken");
    }

    #[tokio::test]
    async fn test_move_on_unknown_game_returns_404() {
        let router = test_router();

        let (status, body) = make_move(&router, "unknown-id", 0).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Game not found");
    }

    #[tokio::test]
    async fn test_out_of_bounds_position_is_rejected() {
        let router = test_router();
        let game_id = start_game(&router).await;

        for position in [9, -1] {
            let (status, body) = make_move(&router, &game_id, position).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Position out of bounds");
        }
    }

    #[tokio::test]
    async fn test_winner_is_detected() {
        let router = test_router();
        let game_id = start_game(&router).await;

        for position in [0, 1, 3, 4] {
            make_move(&router, &game_id, position).await;
        }
        let (status, body) = make_move(&router, &game_id, 6).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["winner"], "X");
        assert_eq!(body["isFinished"], true);
    }

    #[tokio::test]
    async fn test_finished_game_rejects_further_moves() {
        let router = test_router();
        let game_id = start_game(&router).await;

        for position in [0, 1, 3, 4, 6] {
            make_move(&router, &game_id, position).await;
        }
        let (status, body) = make_move(&router, &game_id, 8).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Game has already finished");
    }

    #[tokio::test]
    async fn test_draw_after_nine_moves() {
        let router = test_router();
        let game_id = start_game(&router).await;

        let mut last = (StatusCode::OK, Value::Null);
        for position in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            last = make_move(&router, &game_id, position).await;
        }

        assert_eq!(last.0, StatusCode::OK);
        assert_eq!(last.1["winner"], Value::Null);
        assert_eq!(last.1["isFinished"], true);
    }

    #[tokio::test]
    async fn test_status_reports_full_state() {
        let router = test_router();
        let game_id = start_game(&router).await;
        make_move(&router, &game_id, 4).await;

        let (status, body) = get(&router, &format!("/api/status/{}", game_id)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["board"][4], "X");
        assert_eq!(body["currentPlayer"], "O");
        assert_eq!(body["winner"], Value::Null);
        assert_eq!(body["isFinished"], false);
    }

    #[tokio::test]
    async fn test_status_reads_are_idempotent() {
        let router = test_router();
        let game_id = start_game(&router).await;
        make_move(&router, &game_id, 4).await;

        let first = get(&router, &format!("/api/status/{}", game_id)).await;
        let second = get(&router, &format!("/api/status/{}", game_id)).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_status_unknown_game_returns_404() {
        let router = test_router();

        let (status, body) = get(&router, "/api/status/unknown-id").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Game not found");
    }

    #[tokio::test]
    async fn test_board_endpoint_returns_board_only() {
        let router = test_router();
        let game_id = start_game(&router).await;
        make_move(&router, &game_id, 8).await;

        let (status, body) = get(&router, &format!("/api/board/{}", game_id)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["board"][8], "X");
        assert_eq!(body["board"].as_array().unwrap().len(), 9);
        assert!(body.get("currentPlayer").is_none());
    }

    #[tokio::test]
    async fn test_board_unknown_game_returns_404() {
        let router = test_router();

        let (status, body) = get(&router, "/api/board/unknown-id").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Game not found");
    }
}
