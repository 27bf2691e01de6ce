use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use chess_session::Outcome;
use frontend::clients::puzzle_api::PuzzleApiClient;
use frontend::config::Config;
use frontend::engine::{BestMove, EngineAnalysis, UciEngine};
use frontend::pages::puzzle_page::PuzzlePage;

/// Headless smoke run: fetch a puzzle and let the engine play the human
/// side until the session reaches a verdict. Exercises the source client,
/// the session state machine, reply scheduling and the engine wrapper.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    tracing::info!("Fetching a puzzle from {}", config.api_base_url);
    let source = Arc::new(PuzzleApiClient::new(&config.api_base_url));
    let page = PuzzlePage::new(source, config.puzzle_page());
    if !page.load_next().await? {
        tracing::info!("No puzzle available, nothing to do");
        return Ok(());
    }

    tracing::info!("Starting engine: {}", config.engine_path);
    let engine = UciEngine::spawn(&config.engine_path).await?;

    for _ in 0..32 {
        let (fen, outcome, replying) = match page
            .with_session(|s| {
                (
                    chess_core::position_fen(s.position()),
                    s.outcome(),
                    s.is_opponent_replying(),
                )
            })
            .await
        {
            Some(state) => state,
            None => break,
        };

        if outcome != Outcome::Unknown {
            tracing::info!(?outcome, "Puzzle finished");
            break;
        }
        if replying {
            tokio::time::sleep(Duration::from_millis(200)).await;
            continue;
        }

        let uci = match engine.evaluate_position(&fen, config.engine_depth).await? {
            BestMove::Uci(uci) => uci,
            BestMove::None => break,
        };
        match chess_core::notation::parse_coordinate(&uci) {
            Some(m) => match page.submit_move(m.from, m.to, m.promotion).await {
                Ok(result) => tracing::info!(uci = %uci, ?result, "Move played"),
                Err(e) => {
                    tracing::warn!(uci = %uci, error = %e, "Move rejected");
                    break;
                }
            },
            None => {
                tracing::warn!(uci = %uci, "Engine answered with a non-coordinate move");
                break;
            }
        }
        tokio::time::sleep(config.opponent_reply_delay + Duration::from_millis(200)).await;
    }

    engine.quit().await;
    Ok(())
}
