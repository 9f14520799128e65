use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use common::games::tictactoe::{GameState, MoveError};
use common::{GameId, id_generator, log_error};

use crate::snapshot::{GameSnapshot, SnapshotStore};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Game not found")]
    GameNotFound,
    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Authoritative map of game id to game state. The outer lock guards only
/// map access; each game carries its own lock, so moves against the same
/// game are serialized while moves against different games run in parallel.
#[derive(Clone)]
pub struct GameStore {
    games: Arc<Mutex<HashMap<GameId, Arc<Mutex<GameState>>>>>,
    snapshot_store: Option<Arc<dyn SnapshotStore>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::with_snapshot_store(None)
    }

    pub fn with_snapshot_store(snapshot_store: Option<Arc<dyn SnapshotStore>>) -> Self {
        Self {
            games: Arc::new(Mutex::new(HashMap::new())),
            snapshot_store,
        }
    }

    /// Loads persisted games into the map. Corrupt records are skipped so
    /// one bad entry does not take the whole store down.
    pub async fn restore(&self) -> Result<usize, String> {
        let Some(snapshot_store) = &self.snapshot_store else {
            return Ok(0);
        };

        let Some(snapshots) = snapshot_store.load()? else {
            return Ok(0);
        };

        let mut games = self.games.lock().await;
        let mut restored = 0;
        for snapshot in snapshots {
            match snapshot.into_game_state() {
                Ok(state) => {
                    games.insert(state.id.clone(), Arc::new(Mutex::new(state)));
                    restored += 1;
                }
                Err(err) => {
                    log_error!("Skipping corrupt game snapshot: {}", err);
                }
            }
        }

        Ok(restored)
    }

    pub async fn create_game(&self) -> GameState {
        let mut games = self.games.lock().await;

        let id = loop {
            let candidate = GameId::new(id_generator::generate_game_id());
            if !games.contains_key(&candidate) {
                break candidate;
            }
        };

        let state = GameState::new(id.clone());
        games.insert(id, Arc::new(Mutex::new(state.clone())));
        drop(games);

        self.persist().await;
        state
    }

    pub async fn apply_move(&self, id: &GameId, position: usize) -> Result<GameState, StoreError> {
        let games = self.games.lock().await;
        let game = games.get(id).cloned().ok_or(StoreError::GameNotFound)?;
        drop(games);

        let updated = {
            let mut state = game.lock().await;
            state.place_mark(position)?;
            state.clone()
        };

        self.persist().await;
        Ok(updated)
    }

    pub async fn get_game(&self, id: &GameId) -> Option<GameState> {
        let games = self.games.lock().await;
        let game = games.get(id).cloned()?;
        drop(games);

        let state = game.lock().await;
        Some(state.clone())
    }

    /// Writes the whole map to the snapshot store. Failures are logged and
    /// never unwind a move that already happened in memory.
    pub async fn persist(&self) {
        let Some(snapshot_store) = &self.snapshot_store else {
            return;
        };

        let games = self.games.lock().await;
        let mut snapshots = Vec::with_capacity(games.len());
        for game in games.values() {
            let state = game.lock().await;
            snapshots.push(GameSnapshot::from_game_state(&state));
        }
        drop(games);

        if let Err(err) = snapshot_store.save(&snapshots) {
            log_error!("Failed to save games snapshot: {}", err);
        }
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
