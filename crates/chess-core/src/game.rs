//! Game aggregate: one authoritative position plus its history.

use shakmaty::Move;

use crate::board::{Position, TerminalKind};
use crate::error::{BoardError, EmptyHistory};
use crate::history::History;

/// A game in progress. Every mutation goes through `apply` or `undo`.
#[derive(Debug, Clone)]
pub struct Game {
    current: Position,
    history: History,
}

impl Game {
    /// New game from the standard starting position.
    pub fn new() -> Self {
        Self {
            current: Position::initial(),
            history: History::new(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.current
    }

    /// Number of committed moves.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Validate and commit a move. On success the prior position is pushed
    /// onto the history and the current position advances.
    pub fn apply(&mut self, mv: &Move) -> Result<(), BoardError> {
        let next = self.current.apply(mv)?;
        let prior = std::mem::replace(&mut self.current, next);
        self.history.push(mv.clone(), prior);
        Ok(())
    }

    /// Revert the most recent move, restoring the prior position exactly.
    pub fn undo(&mut self) -> Result<Move, EmptyHistory> {
        let entry = self.history.pop()?;
        self.current = entry.prior;
        Ok(entry.mv)
    }

    pub fn terminal(&self) -> Option<TerminalKind> {
        self.current.terminal()
    }

    /// Position before the most recent move (the analysis baseline).
    pub fn prior_position(&self) -> Option<&Position> {
        self.history.last_prior()
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last_move()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Color;

    fn play(game: &mut Game, from: &str, to: &str) {
        let mv = game
            .position()
            .candidate(from.parse().unwrap(), to.parse().unwrap())
            .unwrap();
        game.apply(&mv).unwrap();
    }

    #[test]
    fn test_apply_then_undo_restores_exactly() {
        let mut game = Game::new();
        let start = game.position().fen();

        play(&mut game, "e2", "e4");
        assert_eq!(game.ply(), 1);
        assert_eq!(game.position().turn(), Color::Black);
        assert_eq!(game.prior_position().unwrap().fen(), start);

        let reverted = game.undo().unwrap();
        assert_eq!(crate::board::uci(&reverted), "e2e4");
        assert_eq!(game.position().fen(), start);
        assert_eq!(game.ply(), 0);
    }

    #[test]
    fn test_undo_restores_clocks_and_rights() {
        let mut game = Game::new();
        // Knight moves tick the halfmove clock; the rook move then drops
        // White's kingside castling right.
        for (from, to) in [("g1", "f3"), ("g8", "f6"), ("h1", "g1")] {
            play(&mut game, from, to);
        }
        let before = game.prior_position().unwrap().fen();

        game.undo().unwrap();
        assert_eq!(game.position().fen(), before);
        assert_eq!(game.position().halfmove_clock(), 2);
        assert!(before.contains("KQkq"));
    }

    #[test]
    fn test_undo_on_fresh_game_fails() {
        let mut game = Game::new();
        assert!(game.undo().is_err());
        assert_eq!(game.position().fen(), Position::initial().fen());
    }

    #[test]
    fn test_one_undo_reverts_one_move() {
        let mut game = Game::new();
        play(&mut game, "e2", "e4");
        play(&mut game, "e7", "e5");
        let after_first = game.prior_position().unwrap().fen();

        game.undo().unwrap();
        assert_eq!(game.ply(), 1);
        assert_eq!(game.position().fen(), after_first);
    }

    #[test]
    fn test_terminal_after_fools_mate() {
        let mut game = Game::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            play(&mut game, from, to);
        }
        assert_eq!(game.terminal(), Some(TerminalKind::Checkmate));

        game.undo().unwrap();
        assert!(game.terminal().is_none());
    }
}
