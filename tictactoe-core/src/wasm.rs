//! WASM bindings for tictactoe-core
//!
//! Provides a JavaScript-friendly API for the game logic.

use wasm_bindgen::prelude::*;

use crate::{Game, GameView, Player, Pos, Symbols};

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
    symbols: Symbols,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game with X and O marks
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            inner: Game::new(),
            symbols: Symbols::default(),
        }
    }

    /// Create a new game with custom mark labels
    #[wasm_bindgen(js_name = withSymbols)]
    pub fn with_symbols(player_one: String, player_two: String) -> WasmGame {
        WasmGame {
            inner: Game::new(),
            symbols: Symbols::new(player_one, player_two),
        }
    }

    /// Mark a cell (0-8) for the player to move. Returns false if ignored.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, index: usize) -> bool {
        self.inner.apply_move(index).is_applied()
    }

    /// Move the cursor to a history entry. Returns false if ignored.
    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, step: usize) -> bool {
        self.inner.jump_to(step).is_applied()
    }

    /// Cell owner at the cursor: 0 (empty), 1 (P1), or 2 (P2)
    pub fn cell(&self, index: usize) -> u8 {
        Pos::new(index)
            .and_then(|pos| self.inner.board().cell(pos))
            .map_or(0, |player| player as u8)
    }

    #[wasm_bindgen(js_name = isHighlighted)]
    pub fn is_highlighted(&self, index: usize) -> bool {
        Pos::new(index).is_some_and(|pos| self.inner.is_highlighted(pos))
    }

    /// Current player (1 or 2)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player() as u8
    }

    pub fn cursor(&self) -> usize {
        self.inner.cursor()
    }

    #[wasm_bindgen(js_name = historyLength)]
    pub fn history_length(&self) -> usize {
        self.inner.history().len()
    }

    /// Returns 0 (none), 1 (P1), or 2 (P2)
    pub fn winner(&self) -> u8 {
        match self.inner.outcome().winner() {
            None => 0,
            Some(Player::One) => 1,
            Some(Player::Two) => 2,
        }
    }

    /// Winning line as cell indices, empty if no winner
    #[wasm_bindgen(js_name = winningLine)]
    pub fn winning_line(&self) -> Vec<u8> {
        self.inner
            .outcome()
            .line()
            .map(|line| line.iter().map(|pos| pos.0).collect())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = isDraw)]
    pub fn is_draw(&self) -> bool {
        matches!(self.inner.outcome(), crate::Outcome::Draw)
    }

    /// Status line: "Next player: X", "Winner: X" or "Draw"
    pub fn status(&self) -> String {
        crate::view::status(&self.inner, &self.symbols)
    }

    /// Full view as a plain JS object (see GameView)
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let view = GameView::new(&self.inner, &self.symbols);
        Ok(serde_wasm_bindgen::to_value(&view)?)
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
