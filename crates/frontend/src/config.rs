use std::env;
use std::time::Duration;

use crate::pages::play_page::PlayPageConfig;
use crate::pages::puzzle_page::PuzzlePageConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub engine_path: String,
    pub engine_depth: u32,
    pub fetch_attempts: u32,
    pub fetch_retry_delay: Duration,
    pub opponent_reply_delay: Duration,
    pub free_play_reply_delay: Duration,
    pub think_delay_min: Duration,
    pub think_delay_max: Duration,
    pub clock_initial: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            engine_path: env::var("ENGINE_PATH")
                .unwrap_or_else(|_| "stockfish".to_string()),
            engine_depth: env_u64("ENGINE_DEPTH", 12) as u32,
            fetch_attempts: env_u64("PUZZLE_FETCH_ATTEMPTS", 5) as u32,
            fetch_retry_delay: Duration::from_millis(env_u64("PUZZLE_FETCH_RETRY_MS", 1000)),
            opponent_reply_delay: Duration::from_millis(env_u64("OPPONENT_REPLY_MS", 1000)),
            free_play_reply_delay: Duration::from_millis(env_u64("FREE_PLAY_REPLY_MS", 400)),
            think_delay_min: Duration::from_millis(env_u64("ENGINE_THINK_MIN_MS", 400)),
            think_delay_max: Duration::from_millis(env_u64("ENGINE_THINK_MAX_MS", 1500)),
            clock_initial: Duration::from_secs(env_u64("CLOCK_INITIAL_SECS", 600)),
        }
    }

    pub fn puzzle_page(&self) -> PuzzlePageConfig {
        PuzzlePageConfig {
            fetch_attempts: self.fetch_attempts,
            fetch_retry_delay: self.fetch_retry_delay,
            opponent_reply_delay: self.opponent_reply_delay,
            free_play_reply_delay: self.free_play_reply_delay,
        }
    }

    pub fn play_page(&self) -> PlayPageConfig {
        PlayPageConfig {
            depth: self.engine_depth,
            think_delay_min: self.think_delay_min,
            think_delay_max: self.think_delay_max,
            clock_initial: self.clock_initial,
            clock_tick: Duration::from_secs(1),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
