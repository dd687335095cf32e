//! Tic-Tac-Toe Web API
//!
//! Serves a single in-memory game to a browser front end that does not load
//! the WASM build of tictactoe-core. Both players share one screen; the
//! server only holds the current game and forgets it on restart.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictactoe_core::view::history_entries;
use tictactoe_core::{Game, GameView, HistoryEntry, Ignored, Symbols, Transition};

// =============================================================================
// Configuration
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "tictactoe-api")]
#[command(version, about = "Local web API for a tic-tac-toe game", long_about = None)]
struct Config {
    /// Address to listen on
    #[arg(long, env = "TICTACTOE_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Label for player one's marks
    #[arg(long, env = "TICTACTOE_PLAYER_ONE", default_value = "X")]
    player_one: String,

    /// Label for player two's marks
    #[arg(long, env = "TICTACTOE_PLAYER_TWO", default_value = "O")]
    player_two: String,
}

// =============================================================================
// Session State
// =============================================================================

/// Shared application state
struct AppStateInner {
    game: Mutex<Game>,
    symbols: Symbols,
}

impl AppStateInner {
    fn new(symbols: Symbols) -> Self {
        Self {
            game: Mutex::new(Game::new()),
            symbols,
        }
    }

    /// Every transition replaces the game whole, so a poisoned lock still
    /// guards a consistent value.
    fn game(&self) -> MutexGuard<'_, Game> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

type AppState = Arc<AppStateInner>;

// =============================================================================
// JSON Models
// =============================================================================

#[derive(Serialize)]
struct TransitionModel {
    applied: bool,
    /// Reason code when the request was a no-op, null otherwise
    ignored: Option<&'static str>,
    /// Human-readable reason, null otherwise
    detail: Option<String>,
    game: GameView,
}

#[derive(Serialize)]
struct HistoryModel {
    moves: Vec<HistoryEntry>,
    current_index: usize,
    total_moves: usize,
}

#[derive(Serialize)]
struct HealthModel {
    status: String,
}

fn transition_to_model(transition: Transition, game: &Game, symbols: &Symbols) -> TransitionModel {
    let reason = transition.ignored();
    TransitionModel {
        applied: transition.is_applied(),
        ignored: reason.map(|r| r.code()),
        detail: reason.map(|r| r.to_string()),
        game: GameView::new(game, symbols),
    }
}

// =============================================================================
// API Endpoints
// =============================================================================

async fn get_game(State(state): State<AppState>) -> Json<GameView> {
    let game = state.game();
    Json(GameView::new(&game, &state.symbols))
}

/// Path segments that are not a non-negative integer are no-ops like any
/// other out-of-range index; the raw text goes into the detail.
fn unparsed_to_model(reason: Ignored, raw: &str, game: &Game, symbols: &Symbols) -> TransitionModel {
    let detail = match reason {
        Ignored::CellOutOfRange(_) => format!("cell {} is off the board", raw),
        Ignored::StepOutOfRange(_) => format!("no history entry {}", raw),
        other => other.to_string(),
    };
    TransitionModel {
        applied: false,
        ignored: Some(reason.code()),
        detail: Some(detail),
        game: GameView::new(game, symbols),
    }
}

async fn make_move(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Json<TransitionModel> {
    let mut game = state.game();
    let Ok(index) = raw.parse::<usize>() else {
        info!(index = %raw, "move ignored: not a cell index");
        let reason = Ignored::CellOutOfRange(usize::MAX);
        return Json(unparsed_to_model(reason, &raw, &game, &state.symbols));
    };
    let transition = game.apply_move(index);
    if let Some(reason) = transition.ignored() {
        info!(index, %reason, "move ignored");
    }
    Json(transition_to_model(transition, &game, &state.symbols))
}

async fn jump(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Json<TransitionModel> {
    let mut game = state.game();
    let Ok(step) = raw.parse::<usize>() else {
        info!(step = %raw, "jump ignored: not a history step");
        let reason = Ignored::StepOutOfRange(usize::MAX);
        return Json(unparsed_to_model(reason, &raw, &game, &state.symbols));
    };
    let transition = game.jump_to(step);
    if let Some(reason) = transition.ignored() {
        info!(step, %reason, "jump ignored");
    }
    Json(transition_to_model(transition, &game, &state.symbols))
}

async fn get_history(State(state): State<AppState>) -> Json<HistoryModel> {
    let game = state.game();
    Json(HistoryModel {
        moves: history_entries(&game),
        current_index: game.cursor(),
        total_moves: game.history().len() - 1,
    })
}

async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/game", get(get_game))
        .route("/move/{index}", post(make_move))
        .route("/jump/{step}", post(jump))
        .route("/history", get(get_history))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tictactoe_api=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();
    let symbols = Symbols::new(config.player_one, config.player_two);
    let state: AppState = Arc::new(AppStateInner::new(symbols));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("Tic-tac-toe API running on http://{}", config.bind);

    axum::serve(listener, router(state))
        .await
        .context("server error")?;
    Ok(())
}
