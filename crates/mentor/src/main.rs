//! Chess Mentor
//!
//! Play through a game against yourself while an engine flags blunders.
//! An optional coaching side channel answers questions about the position.

use std::io::Write as _;

use shakmaty::Color;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use mentor::advice::AdviceClient;
use mentor::config::Config;
use mentor::controller::{GameController, SelectOutcome, UndoOutcome};
use mentor::engine::{Evaluator, UciEngine};
use mentor::ui::{self, Input};

/// Parse --color white|black from CLI args
fn parse_color() -> Color {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--color" {
            if let Some(value) = args.get(i + 1) {
                match value.to_lowercase().as_str() {
                    "white" => return Color::White,
                    "black" => return Color::Black,
                    other => warn!(color = other, "Unknown color, defaulting to white"),
                }
            }
        }
    }
    Color::White
}

fn prompt<E: Evaluator>(controller: &GameController<E>) -> String {
    if controller.game_over().is_some() {
        return "Game over (undo to continue)> ".to_string();
    }
    let side = match controller.position().turn() {
        Color::White => "White",
        Color::Black => "Black",
    };
    match controller.held_origin() {
        Some(origin) => format!("{side} to move, {origin} selected> "),
        None => format!("{side} to move> "),
    }
}

fn report_outcome<E: Evaluator>(controller: &GameController<E>, outcome: SelectOutcome) {
    match outcome {
        SelectOutcome::Ignored => {}
        SelectOutcome::OriginHeld(square) => println!("Selected {square}."),
        SelectOutcome::Rejected => {
            print!(
                "{}",
                ui::render_board(controller.position(), controller.player_color())
            );
        }
        SelectOutcome::Moved(report) => {
            print!(
                "{}",
                ui::render_board(controller.position(), controller.player_color())
            );
            println!("Played {}.", report.san);
            if let Some(line) = ui::describe_verdict(&report.verdict) {
                println!("{line}");
            }
            if let Some(kind) = report.game_over {
                println!("{}", ui::describe_game_over(kind));
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    let player_color = parse_color();
    info!(
        stockfish_path = %config.stockfish_path,
        eval_time_ms = config.eval_time_ms,
        player_color = %player_color.char(),
        "Session config loaded"
    );

    let engine = match UciEngine::new(&config.stockfish_path).await {
        Ok(engine) => Some(engine),
        Err(e) => {
            warn!(error = %e, "Engine unavailable; moves will not be assessed");
            None
        }
    };

    let advice = match AdviceClient::new(&config) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!(error = %e, "Advice disabled");
            None
        }
    };

    let mut controller = GameController::new(&config, engine, advice, player_color);

    println!("{}", ui::help_text());
    println!();
    print!("{}", ui::render_board(controller.position(), player_color));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", prompt(&controller));
        std::io::stdout().flush()?;

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                info!("Interrupted");
                break;
            }
            line = lines.next_line() => line?,
        };

        // EOF on stdin ends the session like quit does
        let Some(line) = line else {
            println!();
            break;
        };

        match ui::parse_line(&line) {
            Input::Empty => {}
            Input::Unrecognized => println!("Unrecognized input. Type help for commands."),
            Input::Help => println!("{}", ui::help_text()),
            Input::Quit => break,
            Input::Undo => {
                if controller.undo() == UndoOutcome::NothingToUndo {
                    println!("No moves to undo.");
                }
                print!(
                    "{}",
                    ui::render_board(controller.position(), player_color)
                );
            }
            Input::Advice => match controller.request_advice().await {
                Ok(text) => println!("Coach: {text}"),
                Err(e) => println!("Advice unavailable: {e}"),
            },
            Input::Select(square) => {
                let outcome = controller.select(square).await;
                report_outcome(&controller, outcome);
            }
            Input::MovePair(from, to) => {
                let first = controller.select(from).await;
                match first {
                    SelectOutcome::OriginHeld(_) => {
                        let second = controller.select(to).await;
                        report_outcome(&controller, second);
                    }
                    other => report_outcome(&controller, other),
                }
            }
        }
    }

    controller.shutdown().await;
    Ok(())
}
