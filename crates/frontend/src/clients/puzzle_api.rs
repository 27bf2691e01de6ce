//! Puzzle source API client.
//!
//! The source hands back a puzzle id, the solution ply list, and the game
//! context, either a FEN of the start position or a PGN prefix plus the
//! initial ply. Both shapes are normalized into a playable position here.

use async_trait::async_trait;
use serde::Deserialize;
use shakmaty::Chess;

use chess_core::moves::MoveInput;
use chess_core::{notation, replay_all};

use crate::error::FrontendError;

/// Capability the puzzle page consumes. Implemented by the HTTP client and
/// by in-process fakes in tests.
#[async_trait]
pub trait PuzzleSource: Send + Sync {
    /// `Ok(None)` means the source currently has nothing to offer.
    async fn get_puzzle(&self) -> Result<Option<PuzzleData>, FrontendError>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleData {
    pub puzzle: PuzzleInfo,
    pub game: GameInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleInfo {
    pub id: String,
    pub solution: Vec<String>,
    #[serde(default)]
    pub initial_ply: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    #[serde(default)]
    pub fen: Option<String>,
    #[serde(default)]
    pub pgn: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub perf: Option<String>,
}

impl PuzzleData {
    /// The position the puzzle starts from. An explicit FEN wins; otherwise
    /// the game PGN is replayed up to (and including) the initial ply.
    pub fn start_position(&self) -> Result<Chess, FrontendError> {
        if let Some(fen) = &self.game.fen {
            return chess_core::parse_fen(fen)
                .map_err(|e| FrontendError::PuzzleData(e.to_string()));
        }

        let pgn = self.game.pgn.as_deref().ok_or_else(|| {
            FrontendError::PuzzleData("puzzle carries neither fen nor pgn".to_string())
        })?;
        let sans = notation::pgn_moves(pgn);
        let take = match self.puzzle.initial_ply {
            Some(ply) => (ply + 1).min(sans.len()),
            None => sans.len(),
        };
        let inputs: Vec<MoveInput> = sans
            .into_iter()
            .take(take)
            .map(MoveInput::Text)
            .collect();
        let replayed = replay_all(&Chess::default(), &inputs);
        if replayed.applied != inputs.len() {
            return Err(FrontendError::PuzzleData(format!(
                "game moves stopped replaying at ply {}",
                replayed.applied
            )));
        }
        Ok(replayed.position)
    }
}

/// HTTP implementation of [`PuzzleSource`].
pub struct PuzzleApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PuzzleApiClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("RidgelineChess/1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PuzzleSource for PuzzleApiClient {
    async fn get_puzzle(&self) -> Result<Option<PuzzleData>, FrontendError> {
        let url = format!("{}/api/puzzles/next", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FrontendError::Fetch(format!("Request error: {e}")))?;

        if resp.status() == reqwest::StatusCode::NO_CONTENT
            || resp.status() == reqwest::StatusCode::NOT_FOUND
        {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(FrontendError::Fetch(format!("HTTP {}", resp.status())));
        }

        let data = resp
            .json::<PuzzleData>()
            .await
            .map_err(|e| FrontendError::Fetch(format!("Body parse error: {e}")))?;
        Ok(Some(data))
    }
}
