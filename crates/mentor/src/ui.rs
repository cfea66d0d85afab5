//! Terminal presentation: input parsing and board drawing.

use chess_core::board::{Position, TerminalKind};
use shakmaty::{Color, File, Rank, Square};

use crate::analysis::{Classification, Verdict};

/// One parsed line of user input.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Select(Square),
    MovePair(Square, Square),
    Undo,
    Advice,
    Help,
    Quit,
    Empty,
    Unrecognized,
}

/// Parse one line. Commands are case-insensitive; squares are given as
/// `e2`, moves as `e2e4`.
pub fn parse_line(line: &str) -> Input {
    let token = line.trim().to_lowercase();
    match token.as_str() {
        "" => Input::Empty,
        "undo" | "u" => Input::Undo,
        "advice" => Input::Advice,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other if other.len() == 2 => match other.parse::<Square>() {
            Ok(square) => Input::Select(square),
            Err(_) => Input::Unrecognized,
        },
        other if other.len() == 4 => {
            let (from, to) = other.split_at(2);
            match (from.parse::<Square>(), to.parse::<Square>()) {
                (Ok(from), Ok(to)) => Input::MovePair(from, to),
                _ => Input::Unrecognized,
            }
        }
        _ => Input::Unrecognized,
    }
}

/// Draw the board from the given player's side. White pieces print in
/// uppercase, black in lowercase.
pub fn render_board(position: &Position, pov: Color) -> String {
    let ranks: Vec<u32> = match pov {
        Color::White => (0..8).rev().collect(),
        Color::Black => (0..8).collect(),
    };
    let files: Vec<u32> = match pov {
        Color::White => (0..8).collect(),
        Color::Black => (0..8).rev().collect(),
    };

    let mut out = String::new();
    for &r in &ranks {
        out.push_str(&format!("{} ", r + 1));
        for &f in &files {
            let square = Square::from_coords(File::new(f), Rank::new(r));
            out.push(' ');
            match position.piece_at(square) {
                Some(piece) => out.push(piece.char()),
                None => out.push('.'),
            }
        }
        out.push('\n');
    }

    out.push_str("  ");
    for &f in &files {
        out.push(' ');
        out.push(char::from(b'a' + f as u8));
    }
    out.push('\n');
    out
}

/// Player-facing line for a move assessment, when one is warranted.
pub fn describe_verdict(verdict: &Verdict) -> Option<String> {
    match verdict.classification {
        Classification::Blunder => {
            let lost = verdict.delta.unwrap_or(0).abs();
            Some(format!("Blunder! You lost {lost} centipawns."))
        }
        Classification::Normal | Classification::NoneAvailable => None,
    }
}

pub fn describe_game_over(kind: TerminalKind) -> &'static str {
    match kind {
        TerminalKind::Checkmate => "Checkmate!",
        TerminalKind::Stalemate => "Stalemate!",
        TerminalKind::InsufficientMaterial => "Draw by insufficient material.",
    }
}

pub fn help_text() -> &'static str {
    "Commands:\n  e2      select a square (first the piece, then its destination)\n  e2e4    play a move in one line\n  undo    revert the last move\n  advice  ask the coach about the current position\n  help    show this message\n  quit    exit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("undo"), Input::Undo);
        assert_eq!(parse_line("  U "), Input::Undo);
        assert_eq!(parse_line("advice"), Input::Advice);
        assert_eq!(parse_line("help"), Input::Help);
        assert_eq!(parse_line("?"), Input::Help);
        assert_eq!(parse_line("quit"), Input::Quit);
        assert_eq!(parse_line("exit"), Input::Quit);
        assert_eq!(parse_line("q"), Input::Quit);
        assert_eq!(parse_line(""), Input::Empty);
        assert_eq!(parse_line("   "), Input::Empty);
    }

    #[test]
    fn test_parse_squares_and_moves() {
        assert_eq!(parse_line("e2"), Input::Select(Square::E2));
        assert_eq!(parse_line(" E2 "), Input::Select(Square::E2));
        assert_eq!(
            parse_line("e2e4"),
            Input::MovePair(Square::E2, Square::E4)
        );
        assert_eq!(parse_line("z9"), Input::Unrecognized);
        assert_eq!(parse_line("e2x4"), Input::Unrecognized);
        assert_eq!(parse_line("castle"), Input::Unrecognized);
    }

    #[test]
    fn test_render_white_pov() {
        let position =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
                .unwrap();
        let drawn = render_board(&position, Color::White);
        let lines: Vec<&str> = drawn.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[4], "4  . . . . P . . .");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }

    #[test]
    fn test_render_black_pov() {
        let position = Position::initial();
        let drawn = render_board(&position, Color::Black);
        let lines: Vec<&str> = drawn.lines().collect();
        assert_eq!(lines[0], "1  R N B K Q B N R");
        assert_eq!(lines[7], "8  r n b k q b n r");
        assert_eq!(lines[8], "   h g f e d c b a");
    }

    #[test]
    fn test_describe_verdict() {
        let blunder = Verdict {
            delta: Some(-350),
            classification: Classification::Blunder,
        };
        assert_eq!(
            describe_verdict(&blunder),
            Some("Blunder! You lost 350 centipawns.".to_string())
        );

        let normal = Verdict {
            delta: Some(-40),
            classification: Classification::Normal,
        };
        assert_eq!(describe_verdict(&normal), None);
        assert_eq!(describe_verdict(&Verdict::none_available()), None);
    }
}
