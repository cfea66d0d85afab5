use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use mentor::config::Config;
use mentor::controller::{GameController, SelectOutcome};
use mentor::engine::{Evaluator, RawEval};
use mentor::error::EngineError;
use shakmaty::Square;

/// Scripted engine stand-in. Each `evaluate` call records the FEN it was
/// given and pops the next scripted result; an exhausted script fails.
pub struct FakeEvaluator {
    script: VecDeque<Result<RawEval, EngineError>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeEvaluator {
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let fake = Self {
            script: VecDeque::new(),
            calls: calls.clone(),
        };
        (fake, calls)
    }

    pub fn push_cp(&mut self, cp: i32) {
        self.script.push_back(Ok(RawEval {
            cp: Some(cp),
            mate: None,
        }));
    }

    pub fn push_mate(&mut self, mate: i32) {
        self.script.push_back(Ok(RawEval {
            cp: None,
            mate: Some(mate),
        }));
    }

    pub fn push_err(&mut self) {
        self.script.push_back(Err(EngineError::Closed));
    }
}

impl Evaluator for FakeEvaluator {
    async fn evaluate(&mut self, fen: &str, _movetime_ms: u64) -> Result<RawEval, EngineError> {
        self.calls.lock().unwrap().push(fen.to_string());
        self.script.pop_front().unwrap_or(Err(EngineError::Closed))
    }

    async fn shutdown(&mut self) {
        self.calls.lock().unwrap().push("shutdown".to_string());
    }
}

/// Config with defaults suitable for scripted tests.
pub fn test_config() -> Config {
    Config {
        stockfish_path: "stockfish".to_string(),
        eval_time_ms: 10,
        blunder_threshold: -200,
        openai_api_key: None,
        advice_model: "gpt-4".to_string(),
        advice_base_url: "https://api.openai.com/v1".to_string(),
    }
}

/// Select origin and destination in sequence, returning the second outcome.
pub async fn play(
    controller: &mut GameController<FakeEvaluator>,
    from: &str,
    to: &str,
) -> SelectOutcome {
    let origin: Square = from.parse().unwrap();
    let dest: Square = to.parse().unwrap();
    controller.select(origin).await;
    controller.select(dest).await
}
