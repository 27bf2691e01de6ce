//! Shared helpers for the integration suite: in-process fakes for the
//! puzzle source and the engine, plus fast (zero-delay) page configs.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use shakmaty::Square;

use frontend::clients::puzzle_api::{GameInfo, PuzzleData, PuzzleInfo, PuzzleSource};
use frontend::engine::{BestMove, EngineAnalysis};
use frontend::error::FrontendError;
use frontend::pages::play_page::{PlayPage, PlayPageConfig};
use frontend::pages::puzzle_page::{PuzzlePage, PuzzlePageConfig};

pub fn sq(s: &str) -> Square {
    s.parse().expect("valid square")
}

/// Build a puzzle with an explicit start FEN.
pub fn puzzle(id: &str, fen: &str, solution: &[&str]) -> PuzzleData {
    PuzzleData {
        puzzle: PuzzleInfo {
            id: id.to_string(),
            solution: solution.iter().map(|s| s.to_string()).collect(),
            initial_ply: None,
        },
        game: GameInfo {
            fen: Some(fen.to_string()),
            pgn: None,
            url: None,
            perf: None,
        },
    }
}

pub fn start_puzzle(id: &str, solution: &[&str]) -> PuzzleData {
    puzzle(id, chess_core::STANDARD_START_FEN, solution)
}

/// One canned answer from the mock source.
pub enum SourceAnswer {
    Puzzle(PuzzleData),
    Empty,
    Fail,
}

/// Scripted puzzle source; answers are consumed in order, then it runs dry.
pub struct MockSource {
    answers: Mutex<VecDeque<SourceAnswer>>,
    pub calls: AtomicU32,
}

impl MockSource {
    pub fn new(answers: Vec<SourceAnswer>) -> Self {
        MockSource {
            answers: Mutex::new(answers.into()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PuzzleSource for MockSource {
    async fn get_puzzle(&self) -> Result<Option<PuzzleData>, FrontendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answers.lock().unwrap().pop_front() {
            Some(SourceAnswer::Puzzle(p)) => Ok(Some(p)),
            Some(SourceAnswer::Empty) | None => Ok(None),
            Some(SourceAnswer::Fail) => Err(FrontendError::Fetch("mock fetch failure".into())),
        }
    }
}

/// Scripted engine: a fixed answer, or an error when `answer` is `None`.
pub struct MockEngine {
    pub answer: Mutex<Option<BestMove>>,
    pub ready: bool,
}

impl MockEngine {
    pub fn answering(uci: &str) -> Self {
        MockEngine {
            answer: Mutex::new(Some(BestMove::Uci(uci.to_string()))),
            ready: true,
        }
    }

    pub fn failing() -> Self {
        MockEngine {
            answer: Mutex::new(None),
            ready: true,
        }
    }
}

#[async_trait]
impl EngineAnalysis for MockEngine {
    async fn evaluate_position(&self, _fen: &str, _depth: u32) -> Result<BestMove, FrontendError> {
        match self.answer.lock().unwrap().clone() {
            Some(best) => Ok(best),
            None => Err(FrontendError::Engine("mock engine down".into())),
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Zero-delay config so the scheduled replies fire at the next yield.
pub fn fast_puzzle_config() -> PuzzlePageConfig {
    PuzzlePageConfig {
        fetch_attempts: 3,
        fetch_retry_delay: Duration::ZERO,
        opponent_reply_delay: Duration::ZERO,
        free_play_reply_delay: Duration::ZERO,
    }
}

pub fn fast_play_config() -> PlayPageConfig {
    PlayPageConfig {
        depth: 1,
        think_delay_min: Duration::ZERO,
        think_delay_max: Duration::ZERO,
        clock_initial: Duration::from_secs(60),
        clock_tick: Duration::from_millis(10),
    }
}

/// Wait (bounded) until the pending opponent reply has been played.
pub async fn settle_puzzle_replies<S: PuzzleSource + 'static>(page: &PuzzlePage<S>) {
    for _ in 0..500 {
        let replying = page
            .with_session(|s| s.is_opponent_replying())
            .await
            .unwrap_or(false);
        if !replying {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("opponent reply never arrived");
}

/// Wait (bounded) until the pending engine reply has been played.
pub async fn settle_engine_reply<E: EngineAnalysis + 'static>(page: &PlayPage<E>) {
    for _ in 0..500 {
        if !page.with_game(|g| g.is_engine_pending()).await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("engine reply never arrived");
}
