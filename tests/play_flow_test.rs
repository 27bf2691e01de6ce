//! Play-vs-engine page flows with a scripted engine.

mod common;

use std::sync::Arc;
use std::time::Duration;

use shakmaty::Color;

use frontend::pages::play_page::{PlayPage, PlayPageConfig};

use common::*;

#[tokio::test]
async fn test_engine_reply_is_applied_after_user_move() {
    let engine = Arc::new(MockEngine::answering("e7e5"));
    let page = PlayPage::new(engine, Color::White, fast_play_config());

    let played = page.submit_move(sq("e2"), sq("e4"), None).await.unwrap();
    assert_eq!(played.san, "e4");

    settle_engine_reply(&page).await;

    let sans = page
        .with_game(|g| g.move_list().iter().map(|m| m.san.clone()).collect::<Vec<_>>())
        .await;
    assert_eq!(sans, vec!["e4", "e5"]);
}

#[tokio::test]
async fn test_engine_failure_degrades_to_random_move() {
    let engine = Arc::new(MockEngine::failing());
    let page = PlayPage::new(engine, Color::White, fast_play_config());

    page.submit_move(sq("e2"), sq("e4"), None).await.unwrap();
    settle_engine_reply(&page).await;

    // The game moved on with some legal reply instead of stalling.
    let len = page.with_game(|g| g.move_list().len()).await;
    assert_eq!(len, 2);
}

#[tokio::test]
async fn test_new_game_cancels_the_scheduled_reply() {
    let engine = Arc::new(MockEngine::answering("e7e5"));
    let config = PlayPageConfig {
        think_delay_min: Duration::from_millis(50),
        think_delay_max: Duration::from_millis(50),
        ..fast_play_config()
    };
    let page = PlayPage::new(engine, Color::White, config);

    page.submit_move(sq("e2"), sq("e4"), None).await.unwrap();
    page.new_game(Color::White).await;

    tokio::time::sleep(Duration::from_millis(150)).await;

    let len = page.with_game(|g| g.move_list().len()).await;
    assert_eq!(len, 0);
}

#[tokio::test]
async fn test_history_navigation_during_play() {
    let engine = Arc::new(MockEngine::answering("e7e5"));
    let page = PlayPage::new(engine, Color::White, fast_play_config());

    page.submit_move(sq("e2"), sq("e4"), None).await.unwrap();
    settle_engine_reply(&page).await;

    let at_start = page.navigate_to(-1).await;
    assert_eq!(
        chess_core::position_fen(&at_start),
        chess_core::STANDARD_START_FEN
    );
    // The stored line is untouched by browsing.
    let len = page.with_game(|g| g.move_list().len()).await;
    assert_eq!(len, 2);
}

#[tokio::test]
async fn test_clock_counts_down_and_stops() {
    let engine = Arc::new(MockEngine::answering("e7e5"));
    let page = PlayPage::new(engine, Color::White, fast_play_config());

    page.start_clock().await;
    tokio::time::sleep(Duration::from_millis(120)).await;

    let after_run = page.remaining_time(Color::White).await;
    assert!(after_run < Duration::from_secs(60));

    page.stop_clock().await;
    let stopped_at = page.remaining_time(Color::White).await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(page.remaining_time(Color::White).await, stopped_at);
}
