//! UCI engine wrapper (async I/O over a child process).
//!
//! The play page only needs one question answered: best move at a FEN to a
//! fixed depth. Anything that goes wrong here is reported as an error and
//! handled upstream with the random-move fallback, so the game never blocks
//! on the engine.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::FrontendError;

/// The engine's answer for a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestMove {
    Uci(String),
    /// The engine reported `(none)`: no legal move from its side.
    None,
}

/// Capability the play page consumes. Implemented by [`UciEngine`] and by
/// in-process fakes in tests.
#[async_trait]
pub trait EngineAnalysis: Send + Sync {
    async fn evaluate_position(&self, fen: &str, depth: u32) -> Result<BestMove, FrontendError>;
    fn is_ready(&self) -> bool;
}

struct EngineProcess {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// A UCI engine child process.
pub struct UciEngine {
    inner: Mutex<EngineProcess>,
    ready: AtomicBool,
}

impl UciEngine {
    /// Spawn the engine binary and run the UCI handshake.
    pub async fn spawn(path: &str) -> Result<Self, FrontendError> {
        let mut process = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| FrontendError::Engine(format!("Failed to spawn engine: {e}")))?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| FrontendError::Engine("Engine stdin unavailable".to_string()))?;
        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| FrontendError::Engine("Engine stdout unavailable".to_string()))?;

        let mut inner = EngineProcess {
            process,
            stdin,
            stdout: BufReader::new(stdout),
        };

        Self::send(&mut inner, "uci").await?;
        Self::wait_for(&mut inner, "uciok").await?;
        Self::send(&mut inner, "setoption name Threads value 1").await?;
        Self::send(&mut inner, "isready").await?;
        Self::wait_for(&mut inner, "readyok").await?;

        Ok(UciEngine {
            inner: Mutex::new(inner),
            ready: AtomicBool::new(true),
        })
    }

    async fn send(inner: &mut EngineProcess, cmd: &str) -> Result<(), FrontendError> {
        debug!(cmd, "engine <");
        inner
            .stdin
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| FrontendError::Engine(format!("Failed to write to engine: {e}")))?;
        inner
            .stdin
            .flush()
            .await
            .map_err(|e| FrontendError::Engine(format!("Failed to flush engine stdin: {e}")))?;
        Ok(())
    }

    async fn wait_for(inner: &mut EngineProcess, expected: &str) -> Result<(), FrontendError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = inner
                .stdout
                .read_line(&mut line)
                .await
                .map_err(|e| FrontendError::Engine(format!("Failed to read from engine: {e}")))?;
            if read == 0 {
                return Err(FrontendError::Engine("Engine closed its stdout".to_string()));
            }
            let trimmed = line.trim();
            debug!(line = trimmed, "engine >");
            if trimmed == expected {
                return Ok(());
            }
        }
    }

    /// Send quit and wait for the process to exit.
    pub async fn quit(&self) {
        let mut inner = self.inner.lock().await;
        self.ready.store(false, Ordering::SeqCst);
        let _ = Self::send(&mut inner, "quit").await;
        let _ = inner.process.wait().await;
    }
}

#[async_trait]
impl EngineAnalysis for UciEngine {
    async fn evaluate_position(&self, fen: &str, depth: u32) -> Result<BestMove, FrontendError> {
        let mut inner = self.inner.lock().await;
        Self::send(&mut inner, &format!("position fen {fen}")).await?;
        Self::send(&mut inner, &format!("go depth {depth}")).await?;

        let mut line = String::new();
        loop {
            line.clear();
            let read = inner
                .stdout
                .read_line(&mut line)
                .await
                .map_err(|e| FrontendError::Engine(format!("Failed to read from engine: {e}")))?;
            if read == 0 {
                return Err(FrontendError::Engine("Engine closed its stdout".to_string()));
            }
            let trimmed = line.trim();

            if trimmed.starts_with("bestmove") {
                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                return match parts.get(1) {
                    None | Some(&"(none)") => Ok(BestMove::None),
                    Some(uci) => Ok(BestMove::Uci(uci.to_string())),
                };
            }
        }
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.inner.get_mut().process.start_kill();
    }
}
