//! Board state built on shakmaty: immutable position snapshots with
//! legality-checked transitions.

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, File, Move, MoveList, Piece, Position as _, Role,
    Square,
};

use crate::error::BoardError;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
}

/// One position snapshot: placement, side to move, castling rights,
/// en-passant target, and both move clocks.
///
/// `apply` returns a new snapshot; an existing `Position` never changes.
#[derive(Debug, Clone)]
pub struct Position {
    inner: Chess,
}

impl Position {
    /// The standard starting position.
    pub fn initial() -> Self {
        Self {
            inner: Chess::default(),
        }
    }

    /// Parse and validate a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let parsed = fen
            .parse::<Fen>()
            .map_err(|e| BoardError::InvalidFen(e.to_string()))?;
        let inner = parsed
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|e| BoardError::InvalidFen(e.to_string()))?;
        Ok(Self { inner })
    }

    /// FEN for this position. Engines and the advice service address
    /// positions by this string.
    pub fn fen(&self) -> String {
        Fen::from_position(self.inner.clone(), EnPassantMode::Legal).to_string()
    }

    pub fn turn(&self) -> Color {
        self.inner.turn()
    }

    /// All legal moves for the side to move. Empty at checkmate and
    /// stalemate; `is_check` tells the two apart.
    pub fn legal_moves(&self) -> MoveList {
        self.inner.legal_moves()
    }

    pub fn is_check(&self) -> bool {
        self.inner.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.inner.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.inner.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.inner.is_insufficient_material()
    }

    /// Terminal state, if any: checkmate, then stalemate, then
    /// insufficient material.
    pub fn terminal(&self) -> Option<TerminalKind> {
        if self.inner.is_checkmate() {
            Some(TerminalKind::Checkmate)
        } else if self.inner.is_stalemate() {
            Some(TerminalKind::Stalemate)
        } else if self.inner.is_insufficient_material() {
            Some(TerminalKind::InsufficientMaterial)
        } else {
            None
        }
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.inner.halfmoves()
    }

    /// Full-move number, starting at 1 and advancing after Black's move.
    pub fn fullmove_number(&self) -> u32 {
        self.inner.fullmoves().get()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.inner.board().piece_at(square)
    }

    /// Validate and play a move, returning the resulting position with the
    /// side to move flipped.
    pub fn apply(&self, mv: &Move) -> Result<Position, BoardError> {
        if !self.legal_moves().contains(mv) {
            return Err(BoardError::IllegalMove);
        }
        let mut next = self.inner.clone();
        next.play_unchecked(mv);
        Ok(Position { inner: next })
    }

    /// Resolve an (origin, destination) intent against the legal moves.
    ///
    /// Returns `None` when the origin square is empty or nothing legal
    /// matches. Castling matches a king move of two files toward the rook.
    /// When the squares describe a promotion, the queen promotion is chosen;
    /// there is no promotion choice.
    pub fn candidate(&self, origin: Square, dest: Square) -> Option<Move> {
        self.piece_at(origin)?;

        let mut fallback = None;
        for mv in &self.legal_moves() {
            let matches = match mv {
                Move::Normal { from, to, .. } => *from == origin && *to == dest,
                Move::EnPassant { from, to } => *from == origin && *to == dest,
                Move::Castle { king, rook } => {
                    let castle_to_file = if rook.file() > king.file() { 6u32 } else { 2u32 };
                    *king == origin
                        && dest == Square::from_coords(File::new(castle_to_file), king.rank())
                }
                _ => false,
            };
            if !matches {
                continue;
            }
            match mv.promotion() {
                Some(Role::Queen) => return Some(mv.clone()),
                Some(_) => {}
                None => fallback = Some(mv.clone()),
            }
        }
        fallback
    }

    /// SAN rendering of a move that is legal in this position.
    pub fn san(&self, mv: &Move) -> String {
        San::from_move(&self.inner, mv).to_string()
    }
}

/// Coordinate notation for a move, as engines expect it ("e2e4", "a7a8q").
pub fn uci(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}
