//! Score normalization and move quality classification.

use shakmaty::Color;

use crate::engine::RawEval;

/// An engine score fixed to one player's point of view.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationSample {
    /// The player the score is expressed for.
    pub perspective: Color,
    /// Centipawns, positive when `perspective` is better. Absent when the
    /// engine reported a mate or no usable score at all.
    pub score: Option<i32>,
}

/// Quality bucket for a played move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No assessment could be made for this move.
    NoneAvailable,
    Normal,
    Blunder,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::NoneAvailable => "none-available",
            Classification::Normal => "normal",
            Classification::Blunder => "blunder",
        }
    }
}

/// Outcome of comparing the evaluations around one move.
#[derive(Debug, Clone, Copy)]
pub struct Verdict {
    /// Centipawn swing from the player's point of view, when both
    /// surrounding evaluations were usable.
    pub delta: Option<i32>,
    pub classification: Classification,
}

impl Verdict {
    pub fn none_available() -> Self {
        Verdict {
            delta: None,
            classification: Classification::NoneAvailable,
        }
    }
}

/// Fix a raw engine score to `perspective`. UCI scores are relative to the
/// side to move of the searched position, so the sign flips when the mover
/// is the opponent. Mate scores carry no comparable centipawn value and
/// normalize to `None`.
pub fn sample_for(raw: RawEval, side_to_move: Color, perspective: Color) -> EvaluationSample {
    let score = match (raw.cp, raw.mate) {
        (Some(cp), None) => Some(if side_to_move == perspective { cp } else { -cp }),
        _ => None,
    };
    EvaluationSample { perspective, score }
}

/// Compare the evaluations before and after a move, both from the mover's
/// point of view. A drop strictly below `threshold` (itself negative) is a
/// blunder; a missing score on either side yields no assessment.
pub fn classify(before: EvaluationSample, after: EvaluationSample, threshold: i32) -> Verdict {
    let (Some(b), Some(a)) = (before.score, after.score) else {
        return Verdict::none_available();
    };
    let delta = a - b;
    let classification = if delta < threshold {
        Classification::Blunder
    } else {
        Classification::Normal
    };
    Verdict {
        delta: Some(delta),
        classification,
    }
}
