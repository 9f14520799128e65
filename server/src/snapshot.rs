use std::io::ErrorKind;

use serde::{Deserialize, Serialize};

use common::GameId;
use common::games::tictactoe::{Board, GameState, GameStatus, Mark, is_board_full};

/// Persisted form of a game, one record per active game. The on-disk file
/// is a JSON array of these.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: String,
    pub board: Board,
    pub current_player: Mark,
    pub winner: Option<Mark>,
    pub moves_count: usize,
    pub is_finished: bool,
}

impl GameSnapshot {
    pub fn from_game_state(state: &GameState) -> Self {
        Self {
            id: state.id.to_string(),
            board: state.board,
            current_player: state.current_mark,
            winner: state.winner(),
            moves_count: state.moves_count,
            is_finished: state.is_finished(),
        }
    }

    /// Rebuilds a game state, rejecting records that violate the game
    /// invariants so a corrupt file cannot resurrect an impossible game.
    pub fn into_game_state(self) -> Result<GameState, String> {
        let status = match (self.winner, self.is_finished) {
            (Some(Mark::X), true) => GameStatus::XWon,
            (Some(Mark::O), true) => GameStatus::OWon,
            (None, true) => GameStatus::Draw,
            (None, false) => GameStatus::InProgress,
            (Some(Mark::Empty), _) => {
                return Err(format!("game {}: invalid winner mark", self.id));
            }
            (Some(_), false) => {
                return Err(format!("game {}: winner without finished game", self.id));
            }
        };

        if self.current_player == Mark::Empty {
            return Err(format!("game {}: missing current player", self.id));
        }

        let filled = self.board.iter().filter(|&&cell| cell != Mark::Empty).count();
        if filled != self.moves_count {
            return Err(format!(
                "game {}: moves count {} does not match {} filled cells",
                self.id, self.moves_count, filled
            ));
        }

        if status == GameStatus::InProgress && is_board_full(&self.board) {
            return Err(format!("game {}: full board still in progress", self.id));
        }

        Ok(GameState {
            id: GameId::new(self.id),
            board: self.board,
            current_mark: self.current_player,
            status,
            moves_count: self.moves_count,
        })
    }
}

pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<Vec<GameSnapshot>>, String>;
    fn save(&self, snapshots: &[GameSnapshot]) -> Result<(), String>;
}

pub struct FileSnapshotStore {
    file_path: String,
}

impl FileSnapshotStore {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Vec<GameSnapshot>>, String> {
        let content = match std::fs::read_to_string(self.file_path.as_str()) {
            Ok(content) => content,
            Err(err) => {
                return match err.kind() {
                    ErrorKind::NotFound => Ok(None),
                    _ => Err(format!("Failed to read games file: {}", err)),
                };
            }
        };

        let snapshots: Vec<GameSnapshot> = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse games file: {}", e))?;

        Ok(Some(snapshots))
    }

    fn save(&self, snapshots: &[GameSnapshot]) -> Result<(), String> {
        let content = serde_json::to_string_pretty(snapshots)
            .map_err(|e| format!("Failed to serialize games: {}", e))?;

        std::fs::write(self.file_path.as_str(), content)
            .map_err(|e| format!("Failed to write games file: {}", e))
    }
}
