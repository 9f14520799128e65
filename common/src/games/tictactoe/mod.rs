mod board;
mod error;
mod game_state;
mod types;
mod win_detector;

pub use board::{Board, CELL_COUNT, empty_board, is_board_full, is_in_bounds};
pub use error::MoveError;
pub use game_state::GameState;
pub use types::{GameStatus, Mark};
pub use win_detector::check_win;
