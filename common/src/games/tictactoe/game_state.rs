use crate::identifiers::GameId;

use super::board::{self, Board};
use super::error::MoveError;
use super::types::{GameStatus, Mark};
use super::win_detector::check_win;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub id: GameId,
    pub board: Board,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub moves_count: usize,
}

impl GameState {
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            board: board::empty_board(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            moves_count: 0,
        }
    }

    /// Places the current player's mark. Validation order: finished game,
    /// then bounds, then occupancy. On a winning move the current mark is
    /// left pointing at the winner.
    pub fn place_mark(&mut self, position: usize) -> Result<(), MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameFinished);
        }

        if !board::is_in_bounds(position) {
            return Err(MoveError::OutOfBounds);
        }

        if self.board[position] != Mark::Empty {
            return Err(MoveError::CellTaken);
        }

        self.board[position] = self.current_mark;
        self.moves_count += 1;

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    fn switch_turn(&mut self) {
        if let Some(opponent) = self.current_mark.opponent() {
            self.current_mark = opponent;
        }
    }

    fn check_game_over(&mut self) {
        // A move can only complete a line for the player who made it.
        if check_win(&self.board, self.current_mark) {
            self.status = match self.current_mark {
                Mark::X => GameStatus::XWon,
                Mark::O => GameStatus::OWon,
                Mark::Empty => unreachable!(),
            };
            return;
        }

        if self.moves_count == board::CELL_COUNT {
            self.status = GameStatus::Draw;
        }
    }
}
