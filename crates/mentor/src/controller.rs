//! Interactive game controller: selection state machine, move assessment,
//! undo, and the advice side channel.

use chess_core::board::{self, Position, TerminalKind};
use chess_core::error::EmptyHistory;
use chess_core::game::Game;
use shakmaty::{Color, Square};

use tracing::{debug, info, warn};

use crate::advice::AdviceClient;
use crate::analysis::{classify, sample_for, Verdict};
use crate::config::Config;
use crate::engine::{Evaluator, RawEval};
use crate::error::{AdviceError, EngineError};

/// What a square selection did.
#[derive(Debug)]
pub enum SelectOutcome {
    /// Nothing happened: the game is over, or the square held no piece
    /// while an origin was wanted.
    Ignored,
    /// The square now holds the pending origin.
    OriginHeld(Square),
    /// No legal move connects the held origin to this square. The held
    /// origin has been dropped.
    Rejected,
    /// A move was committed.
    Moved(MoveReport),
}

/// Everything a caller needs to report one committed move.
#[derive(Debug)]
pub struct MoveReport {
    pub san: String,
    pub verdict: Verdict,
    pub game_over: Option<TerminalKind>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum UndoOutcome {
    Reverted,
    NothingToUndo,
}

/// Drives one interactive game. Holds the engine for the session; a failed
/// evaluation releases it and the game continues without assessments.
pub struct GameController<E: Evaluator> {
    game: Game,
    selection: Option<Square>,
    engine: Option<E>,
    advice: Option<AdviceClient>,
    player_color: Color,
    eval_time_ms: u64,
    blunder_threshold: i32,
}

impl<E: Evaluator> GameController<E> {
    pub fn new(
        config: &Config,
        engine: Option<E>,
        advice: Option<AdviceClient>,
        player_color: Color,
    ) -> Self {
        Self {
            game: Game::new(),
            selection: None,
            engine,
            advice,
            player_color,
            eval_time_ms: config.eval_time_ms,
            blunder_threshold: config.blunder_threshold,
        }
    }

    pub fn position(&self) -> &Position {
        self.game.position()
    }

    pub fn player_color(&self) -> Color {
        self.player_color
    }

    pub fn ply(&self) -> usize {
        self.game.ply()
    }

    /// Origin square currently awaiting a destination.
    pub fn held_origin(&self) -> Option<Square> {
        self.selection
    }

    pub fn game_over(&self) -> Option<TerminalKind> {
        self.game.terminal()
    }

    /// Feed one selected square into the state machine. The first selection
    /// holds an origin; the second attempts the move.
    pub async fn select(&mut self, square: Square) -> SelectOutcome {
        if self.game.terminal().is_some() {
            debug!(square = %square, "Game is over; selection ignored");
            return SelectOutcome::Ignored;
        }

        match self.selection.take() {
            None => {
                if self.game.position().piece_at(square).is_some() {
                    self.selection = Some(square);
                    SelectOutcome::OriginHeld(square)
                } else {
                    debug!(square = %square, "Selected square holds no piece");
                    SelectOutcome::Ignored
                }
            }
            Some(origin) => self.try_move(origin, square).await,
        }
    }

    async fn try_move(&mut self, origin: Square, dest: Square) -> SelectOutcome {
        let Some(mv) = self.game.position().candidate(origin, dest) else {
            debug!(%origin, %dest, "No legal move between squares");
            return SelectOutcome::Rejected;
        };

        // SAN needs the pre-move position.
        let san = self.game.position().san(&mv);
        if let Err(err) = self.game.apply(&mv) {
            debug!(%origin, %dest, error = %err, "Move application failed");
            return SelectOutcome::Rejected;
        }

        let game_over = self.game.terminal();
        let verdict = self.assess_last_move(game_over.is_some()).await;
        info!(
            san = %san,
            uci = %board::uci(&mv),
            classification = verdict.classification.label(),
            "Move played"
        );

        SelectOutcome::Moved(MoveReport {
            san,
            verdict,
            game_over,
        })
    }

    /// Evaluate the positions around the move just committed and classify
    /// the swing from the player's point of view.
    async fn assess_last_move(&mut self, game_over: bool) -> Verdict {
        if game_over {
            return Verdict::none_available();
        }
        if self.game.ply() <= 1 {
            debug!("First move; skipping evaluation");
            return Verdict::none_available();
        }

        let (before_fen, before_stm) = match self.game.prior_position() {
            Some(prior) => (prior.fen(), prior.turn()),
            None => return Verdict::none_available(),
        };
        let after_fen = self.game.position().fen();
        let after_stm = self.game.position().turn();

        let Some(engine) = self.engine.as_mut() else {
            debug!("No engine available; skipping evaluation");
            return Verdict::none_available();
        };

        match Self::evaluate_pair(engine, &before_fen, &after_fen, self.eval_time_ms).await {
            Ok((raw_before, raw_after)) => {
                let before = sample_for(raw_before, before_stm, self.player_color);
                let after = sample_for(raw_after, after_stm, self.player_color);
                classify(before, after, self.blunder_threshold)
            }
            Err(err) => {
                warn!(error = %err, "Engine evaluation failed; analysis disabled for this session");
                self.engine = None;
                Verdict::none_available()
            }
        }
    }

    async fn evaluate_pair(
        engine: &mut E,
        before_fen: &str,
        after_fen: &str,
        movetime_ms: u64,
    ) -> Result<(RawEval, RawEval), EngineError> {
        let before = engine.evaluate(before_fen, movetime_ms).await?;
        let after = engine.evaluate(after_fen, movetime_ms).await?;
        Ok((before, after))
    }

    /// Revert the most recent move. Always drops any held origin; reverting
    /// out of a finished game reopens it.
    pub fn undo(&mut self) -> UndoOutcome {
        self.selection = None;
        match self.game.undo() {
            Ok(mv) => {
                info!(uci = %board::uci(&mv), "Move undone");
                UndoOutcome::Reverted
            }
            Err(EmptyHistory) => {
                debug!("Undo requested with no moves to revert");
                UndoOutcome::NothingToUndo
            }
        }
    }

    /// Ask the coaching service about the current position.
    pub async fn request_advice(&self) -> Result<String, AdviceError> {
        let advice = self.advice.as_ref().ok_or(AdviceError::MissingCredential)?;
        let fen = self.game.position().fen();
        let last_move = match self.game.last_move() {
            Some(mv) => board::uci(mv),
            None => "none".to_string(),
        };
        advice.request_advice(&fen, &last_move).await
    }

    /// Release the engine. Safe to call more than once; only the first call
    /// reaches the engine.
    pub async fn shutdown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            info!("Shutting down analysis engine");
            engine.shutdown().await;
        }
    }
}
