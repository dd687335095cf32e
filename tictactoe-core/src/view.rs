//! Serializable snapshot of a game for renderers.
//!
//! A renderer reads one [`GameView`] after every transition instead of
//! poking at [`Game`] piecemeal.

use serde::{Deserialize, Serialize};

use crate::{Game, Outcome, Player};

/// Labels drawn for each player's marks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbols {
    pub player_one: String,
    pub player_two: String,
}

impl Symbols {
    pub fn new(player_one: impl Into<String>, player_two: impl Into<String>) -> Symbols {
        Symbols {
            player_one: player_one.into(),
            player_two: player_two.into(),
        }
    }

    /// Label for a player's mark.
    pub fn label(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player_one,
            Player::Two => &self.player_two,
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Symbols::new("X", "O")
    }
}

/// One entry of the "jump to move" list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub step: usize,
    pub label: String,
    /// (row, col) of the mark placed to reach this step; None for step 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<(u8, u8)>,
    /// Player who made the move (1 or 2); None for step 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<u8>,
    /// True for the entry at the cursor.
    pub current: bool,
}

/// Everything a renderer needs to draw the game at the cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// Cell labels in row-major order, null for empty cells.
    pub cells: Vec<Option<String>>,
    pub highlights: [bool; 9],
    pub status: String,
    /// "ongoing", "player_one_wins", "player_two_wins" or "draw".
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_line: Option<Vec<(u8, u8)>>,
    pub current_player: u8,
    pub cursor: usize,
    pub can_jump_back: bool,
    pub can_jump_forward: bool,
    /// Raw board encoding at the cursor.
    pub encoding: u32,
    pub history: Vec<HistoryEntry>,
}

impl GameView {
    pub fn new(game: &Game, symbols: &Symbols) -> GameView {
        let board = game.board();
        let cells = board
            .cells()
            .iter()
            .map(|cell| cell.map(|player| symbols.label(player).to_string()))
            .collect();

        let winning_line = game
            .outcome()
            .line()
            .map(|line| line.iter().map(|pos| (pos.row(), pos.col())).collect());

        GameView {
            cells,
            highlights: game.highlights(),
            status: status(game, symbols),
            result: result_code(game.outcome()).to_string(),
            winning_line,
            current_player: game.current_player() as u8,
            cursor: game.cursor(),
            can_jump_back: game.can_jump_back(),
            can_jump_forward: game.can_jump_forward(),
            encoding: board.to_u32(),
            history: history_entries(game),
        }
    }
}

/// Status line shown above the board.
pub fn status(game: &Game, symbols: &Symbols) -> String {
    match game.outcome() {
        Outcome::Win(win) => format!("Winner: {}", symbols.label(win.winner)),
        Outcome::Draw => "Draw".to_string(),
        Outcome::Ongoing => format!("Next player: {}", symbols.label(game.current_player())),
    }
}

/// Machine-readable result name.
pub fn result_code(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Ongoing => "ongoing",
        Outcome::Win(win) => match win.winner {
            Player::One => "player_one_wins",
            Player::Two => "player_two_wins",
        },
        Outcome::Draw => "draw",
    }
}

/// The full history list, including entries after the cursor.
pub fn history_entries(game: &Game) -> Vec<HistoryEntry> {
    (0..game.history().len())
        .map(|step| {
            let label = if step == 0 {
                "Go to game start".to_string()
            } else {
                format!("Go to move #{}", step)
            };
            let location = game.move_at(step).map(|pos| (pos.row(), pos.col()));
            let player = (step > 0).then(|| Player::to_move_after(step - 1) as u8);
            HistoryEntry {
                step,
                label,
                location,
                player,
                current: step == game.cursor(),
            }
        })
        .collect()
}
