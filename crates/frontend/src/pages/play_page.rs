//! Play-vs-engine page controller.
//!
//! Wraps the [`EngineGame`] session with the timing side: a randomized
//! "thinking" delay before the engine reply (so the opponent feels
//! deliberate rather than instant), the random-move fallback when the
//! engine fails, and the one-second clock task. All scheduled work is
//! epoch-guarded the same way as the puzzle page.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use shakmaty::{Chess, Color, Role, Square};
use tokio::sync::Mutex;

use chess_core::moves::ResolvedMove;
use chess_core::position_fen;
use chess_session::clock::Clock;
use chess_session::versus::EngineGame;

use crate::engine::{BestMove, EngineAnalysis};
use crate::error::FrontendError;

#[derive(Debug, Clone)]
pub struct PlayPageConfig {
    pub depth: u32,
    pub think_delay_min: Duration,
    pub think_delay_max: Duration,
    pub clock_initial: Duration,
    pub clock_tick: Duration,
}

impl Default for PlayPageConfig {
    fn default() -> Self {
        PlayPageConfig {
            depth: 12,
            think_delay_min: Duration::from_millis(400),
            think_delay_max: Duration::from_millis(1500),
            clock_initial: Duration::from_secs(600),
            clock_tick: Duration::from_secs(1),
        }
    }
}

pub struct PlayPage<E: EngineAnalysis> {
    engine: Arc<E>,
    game: Arc<Mutex<EngineGame>>,
    clock: Arc<Mutex<Clock>>,
    clock_task_alive: Arc<AtomicBool>,
    epoch: Arc<AtomicU64>,
    config: PlayPageConfig,
}

impl<E: EngineAnalysis + 'static> PlayPage<E> {
    pub fn new(engine: Arc<E>, user_color: Color, config: PlayPageConfig) -> Self {
        PlayPage {
            engine,
            game: Arc::new(Mutex::new(EngineGame::new(user_color))),
            clock: Arc::new(Mutex::new(Clock::new(config.clock_initial))),
            clock_task_alive: Arc::new(AtomicBool::new(false)),
            epoch: Arc::new(AtomicU64::new(0)),
            config,
        }
    }

    /// Submit the human's move and schedule the engine's answer.
    pub async fn submit_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<ResolvedMove, FrontendError> {
        let (played, fen, pending) = {
            let mut game = self.game.lock().await;
            let played = game.submit_user_move(from, to, promotion)?;
            (played, position_fen(game.position()), game.is_engine_pending())
        };
        self.clock.lock().await.press();
        if pending {
            self.schedule_engine_reply(fen);
        }
        Ok(played)
    }

    fn schedule_engine_reply(&self, fen: String) {
        let engine = Arc::clone(&self.engine);
        let game = Arc::clone(&self.game);
        let clock = Arc::clone(&self.clock);
        let epoch = Arc::clone(&self.epoch);
        let token = epoch.load(Ordering::SeqCst);
        let depth = self.config.depth;
        let delay = think_delay(self.config.think_delay_min, self.config.think_delay_max);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if epoch.load(Ordering::SeqCst) != token {
                tracing::debug!("Dropping engine reply for a stale game");
                return;
            }

            let best = if engine.is_ready() {
                match engine.evaluate_position(&fen, depth).await {
                    Ok(BestMove::Uci(uci)) => Some(uci),
                    Ok(BestMove::None) => None,
                    Err(e) => {
                        tracing::warn!(error = %e, "Engine evaluation failed");
                        None
                    }
                }
            } else {
                None
            };

            if epoch.load(Ordering::SeqCst) != token {
                return;
            }
            let mut game = game.lock().await;
            if game.resolve_engine_reply(best.as_deref()).is_some() {
                clock.lock().await.press();
            }
        });
    }

    /// Start the one-second countdown task. It stops on its own as soon as
    /// the running flag clears or a flag falls.
    pub async fn start_clock(&self) {
        self.clock.lock().await.start();
        if self.clock_task_alive.swap(true, Ordering::SeqCst) {
            return; // already ticking
        }

        let clock = Arc::clone(&self.clock);
        let alive = Arc::clone(&self.clock_task_alive);
        let tick = self.config.clock_tick;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.tick().await; // the first tick fires immediately
            loop {
                interval.tick().await;
                if !alive.load(Ordering::SeqCst) {
                    break;
                }
                let mut clock = clock.lock().await;
                clock.tick(tick);
                if !clock.is_running() {
                    alive.store(false, Ordering::SeqCst);
                    break;
                }
            }
        });
    }

    /// Stop the countdown; the task exits at its next tick.
    pub async fn stop_clock(&self) {
        self.clock_task_alive.store(false, Ordering::SeqCst);
        self.clock.lock().await.stop();
    }

    /// Reset to a fresh game against the same engine. Invalidates all
    /// scheduled work.
    pub async fn new_game(&self, user_color: Color) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.game.lock().await = EngineGame::new(user_color);
        *self.clock.lock().await = Clock::new(self.config.clock_initial);
    }

    pub async fn navigate_to(&self, index: isize) -> Chess {
        self.game.lock().await.navigate_to(index)
    }

    pub async fn remaining_time(&self, color: Color) -> Duration {
        self.clock.lock().await.remaining(color)
    }

    /// Read a consistent snapshot of the game through a closure.
    pub async fn with_game<R>(&self, f: impl FnOnce(&EngineGame) -> R) -> R {
        let game = self.game.lock().await;
        f(&game)
    }
}

fn think_delay(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let mut rng = rand::rng();
    Duration::from_millis(rng.random_range(min.as_millis() as u64..=max.as_millis() as u64))
}
