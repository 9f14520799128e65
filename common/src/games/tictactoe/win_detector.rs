use super::board::Board;
use super::types::Mark;

const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // rows
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6], // columns
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8], // diagonals
    [2, 4, 6],
];

pub fn check_win(board: &Board, mark: Mark) -> bool {
    if mark == Mark::Empty {
        return false;
    }

    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&cell| board[cell] == mark))
}
