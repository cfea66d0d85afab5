//! Reversible move history.
//!
//! Each entry pairs the played move with the position it was played from,
//! so one pop restores the prior state exactly, clocks and rights included.

use shakmaty::Move;

use crate::board::Position;
use crate::error::EmptyHistory;

/// One committed move and the position it was played from.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub mv: Move,
    pub prior: Position,
}

/// Stack of committed moves, most recent last.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, mv: Move, prior: Position) {
        self.entries.push(HistoryEntry { mv, prior });
    }

    /// Remove and return the most recent entry.
    pub fn pop(&mut self) -> Result<HistoryEntry, EmptyHistory> {
        self.entries.pop().ok_or(EmptyHistory)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position the most recent move was played from.
    pub fn last_prior(&self) -> Option<&Position> {
        self.entries.last().map(|e| &e.prior)
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.entries.last().map(|e| &e.mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_move(pos: &Position, from: &str, to: &str) -> Move {
        pos.candidate(from.parse().unwrap(), to.parse().unwrap())
            .unwrap()
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut history = History::new();
        let first = Position::initial();
        let e4 = entry_move(&first, "e2", "e4");
        let second = first.apply(&e4).unwrap();
        let e5 = entry_move(&second, "e7", "e5");

        history.push(e4.clone(), first.clone());
        history.push(e5.clone(), second.clone());
        assert_eq!(history.len(), 2);
        assert_eq!(history.last_move(), Some(&e5));
        assert_eq!(history.last_prior().unwrap().fen(), second.fen());

        let top = history.pop().unwrap();
        assert_eq!(top.mv, e5);
        assert_eq!(top.prior.fen(), second.fen());

        let bottom = history.pop().unwrap();
        assert_eq!(bottom.mv, e4);
        assert_eq!(bottom.prior.fen(), first.fen());
        assert!(history.is_empty());
    }

    #[test]
    fn test_pop_empty_fails() {
        let mut history = History::new();
        assert_eq!(history.pop().unwrap_err(), EmptyHistory);
        // Still empty, still the same answer
        assert_eq!(history.pop().unwrap_err(), EmptyHistory);
    }
}
