use super::types::Mark;

pub const CELL_COUNT: usize = 9;

/// Row-major 3x3 board, indexed 0-8.
pub type Board = [Mark; CELL_COUNT];

pub fn empty_board() -> Board {
    [Mark::Empty; CELL_COUNT]
}

pub fn is_board_full(board: &Board) -> bool {
    board.iter().all(|&cell| cell != Mark::Empty)
}

pub fn is_in_bounds(position: usize) -> bool {
    position < CELL_COUNT
}
