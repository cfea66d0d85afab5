//! UCI engine wrapper (async I/O) and the evaluator seam.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use tracing::debug;

use crate::error::EngineError;

/// Extra time allowed for the engine to deliver after the search budget.
const IO_GRACE_MS: u64 = 2_000;

/// Bound on the spawn-time UCI handshake.
const HANDSHAKE_MS: u64 = 5_000;

/// Raw engine report for one position, from the side to move's point of
/// view. Exactly one of `cp` and `mate` is set when the engine produced a
/// score line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawEval {
    /// Centipawn score; absent when the engine saw a forced mate.
    pub cp: Option<i32>,
    /// Mate distance in moves, positive when the side to move mates.
    pub mate: Option<i32>,
}

/// Source of position evaluations. The production implementation drives a
/// UCI subprocess; controller tests substitute a scripted double.
#[allow(async_fn_in_trait)]
pub trait Evaluator {
    /// Evaluate a position (by FEN) within the given time budget.
    async fn evaluate(&mut self, fen: &str, movetime_ms: u64) -> Result<RawEval, EngineError>;

    /// Release any held resources. Default is a no-op.
    async fn shutdown(&mut self) {}
}

/// A running UCI engine instance.
pub struct UciEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl UciEngine {
    /// Spawn the engine binary and run the UCI handshake.
    pub async fn new(path: &str) -> Result<Self, EngineError> {
        let mut process = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(EngineError::Spawn)?;

        let stdin = process.stdin.take().unwrap();
        let stdout = BufReader::new(process.stdout.take().unwrap());

        let mut engine = Self {
            process,
            stdin,
            stdout,
        };

        let handshake = tokio::time::timeout(Duration::from_millis(HANDSHAKE_MS), async {
            engine.send("uci").await?;
            engine.wait_for("uciok").await?;

            // One search thread, small hash: a single interactive game
            engine.send("setoption name Threads value 1").await?;
            engine.send("setoption name Hash value 16").await?;
            engine.send("setoption name UCI_AnalyseMode value true").await?;
            engine.send("isready").await?;
            engine.wait_for("readyok").await?;
            Ok::<_, EngineError>(())
        })
        .await;

        match handshake {
            Ok(result) => result?,
            Err(_) => return Err(EngineError::Timeout(HANDSHAKE_MS)),
        }

        Ok(engine)
    }

    /// Send a command line to the engine
    async fn send(&mut self, cmd: &str) -> Result<(), EngineError> {
        debug!(cmd, "engine <");
        self.stdin.write_all(format!("{cmd}\n").as_bytes()).await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Wait for a specific response line
    async fn wait_for(&mut self, expected: &str) -> Result<(), EngineError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self.stdout.read_line(&mut line).await?;
            if read == 0 {
                return Err(EngineError::Closed);
            }
            let trimmed = line.trim();
            debug!(line = trimmed, "engine >");
            if trimmed == expected {
                return Ok(());
            }
        }
    }

    /// Read score lines until `bestmove` terminates the search.
    async fn read_eval(&mut self) -> Result<RawEval, EngineError> {
        let mut result = RawEval::default();
        let mut line = String::new();
        loop {
            line.clear();
            let read = self.stdout.read_line(&mut line).await?;
            if read == 0 {
                return Err(EngineError::Closed);
            }
            let trimmed = line.trim();

            if trimmed.starts_with("info") && trimmed.contains(" score ") {
                if let Some(cp) = parse_cp(trimmed) {
                    result.cp = Some(cp);
                    result.mate = None;
                }
                if let Some(mate) = parse_mate(trimmed) {
                    result.mate = Some(mate);
                    result.cp = None;
                }
            } else if trimmed.starts_with("bestmove") {
                return Ok(result);
            }
        }
    }

    /// Send quit and wait for the process to exit.
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
    }
}

impl Evaluator for UciEngine {
    async fn evaluate(&mut self, fen: &str, movetime_ms: u64) -> Result<RawEval, EngineError> {
        self.send(&format!("position fen {fen}")).await?;
        self.send(&format!("go movetime {movetime_ms}")).await?;

        let deadline = Duration::from_millis(movetime_ms + IO_GRACE_MS);
        match tokio::time::timeout(deadline, self.read_eval()).await {
            Ok(result) => result,
            Err(_) => Err(EngineError::Timeout(movetime_ms + IO_GRACE_MS)),
        }
    }

    async fn shutdown(&mut self) {
        self.quit().await;
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

/// Parse centipawn score from an info line
fn parse_cp(line: &str) -> Option<i32> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    for (i, part) in parts.iter().enumerate() {
        if *part == "cp" && i + 1 < parts.len() {
            return parts[i + 1].parse().ok();
        }
    }
    None
}

/// Parse mate score from an info line
fn parse_mate(line: &str) -> Option<i32> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    for (i, part) in parts.iter().enumerate() {
        if *part == "mate" && i + 1 < parts.len() {
            return parts[i + 1].parse().ok();
        }
    }
    None
}
