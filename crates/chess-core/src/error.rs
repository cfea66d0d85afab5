//! Board and history error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Illegal move for the current position")]
    IllegalMove,

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
}

/// Undo was requested with no moves to revert.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("History is empty")]
pub struct EmptyHistory;
