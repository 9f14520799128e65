#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("Game has already finished")]
    GameFinished,
    #[error("Position out of bounds")]
    OutOfBounds,
    #[error("Cell already taken")]
    CellTaken,
}
