//! Game state controller.
//!
//! A [`Game`] is the history of board snapshots (index 0 is the empty board)
//! plus a cursor selecting the snapshot on display. The outcome and the
//! per-cell highlights are recomputed from the board at the cursor after
//! every transition.
//!
//! Transitions come in two forms: [`Game::after_move`] / [`Game::after_jump`]
//! build the next state as a new value and leave `self` alone, while
//! [`Game::apply_move`] / [`Game::jump_to`] replace `self` with that value
//! in one assignment. Illegal input never fails; it is reported as
//! [`Transition::Ignored`] and the state stays as it was.

use std::fmt;

use tracing::{debug, instrument};

use crate::{Board, Outcome, Player, Pos};

/// Why a transition was a no-op.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Ignored {
    /// Cell index outside 0-8.
    CellOutOfRange(usize),
    /// Target cell already holds a mark on the board at the cursor.
    CellOccupied(Pos),
    /// The board at the cursor is already won or drawn.
    GameDecided,
    /// Jump target outside the history.
    StepOutOfRange(usize),
}

impl Ignored {
    /// Stable snake_case name, used by front ends.
    pub fn code(self) -> &'static str {
        match self {
            Ignored::CellOutOfRange(_) => "cell_out_of_range",
            Ignored::CellOccupied(_) => "cell_occupied",
            Ignored::GameDecided => "game_decided",
            Ignored::StepOutOfRange(_) => "step_out_of_range",
        }
    }
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ignored::CellOutOfRange(index) => write!(f, "cell {} is off the board", index),
            Ignored::CellOccupied(pos) => {
                write!(f, "cell ({},{}) is already marked", pos.row(), pos.col())
            }
            Ignored::GameDecided => write!(f, "game is already decided"),
            Ignored::StepOutOfRange(step) => write!(f, "no history entry {}", step),
        }
    }
}

/// Result of [`Game::apply_move`] or [`Game::jump_to`].
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Transition {
    /// The state changed.
    Applied,
    /// The state is unchanged.
    Ignored(Ignored),
}

impl Transition {
    #[inline]
    pub fn is_applied(self) -> bool {
        matches!(self, Transition::Applied)
    }

    /// The no-op reason, if the transition was ignored.
    #[inline]
    pub fn ignored(self) -> Option<Ignored> {
        match self {
            Transition::Applied => None,
            Transition::Ignored(reason) => Some(reason),
        }
    }
}

/// History of board snapshots plus a cursor into it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    /// Board snapshots; index 0 is the empty board.
    history: Vec<Board>,
    /// Index of the snapshot on display. Always < history.len().
    cursor: usize,
    outcome: Outcome,
    highlights: [bool; 9],
}

impl Game {
    /// A fresh game: one empty board, player one to move.
    pub fn new() -> Game {
        Game::at_cursor(vec![Board::new()], 0)
    }

    /// Build the derived fields for `history` viewed at `cursor`.
    fn at_cursor(history: Vec<Board>, cursor: usize) -> Game {
        debug_assert!(cursor < history.len());
        let board = history[cursor];

        let outcome = match board.evaluate() {
            Some(win) => Outcome::Win(win),
            None if board.is_full() => Outcome::Draw,
            None => Outcome::Ongoing,
        };

        let mut highlights = [false; 9];
        if let Some(line) = outcome.line() {
            for pos in line {
                highlights[pos.0 as usize] = true;
            }
        }

        Game {
            history,
            cursor,
            outcome,
            highlights,
        }
    }

    /// The board at the cursor.
    #[inline]
    pub fn board(&self) -> Board {
        self.history[self.cursor]
    }

    /// All snapshots, including any after the cursor.
    #[inline]
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whose turn it is at the cursor: player one on even steps.
    #[inline]
    pub fn current_player(&self) -> Player {
        Player::to_move_after(self.cursor)
    }

    /// Outcome of the board at the cursor.
    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Per-cell highlight flags; set exactly on the winning line.
    #[inline]
    pub fn highlights(&self) -> [bool; 9] {
        self.highlights
    }

    #[inline]
    pub fn is_highlighted(&self, pos: Pos) -> bool {
        pos.is_valid() && self.highlights[pos.0 as usize]
    }

    /// The cell marked to reach history entry `step`.
    ///
    /// None for step 0 and for steps past the end of the history.
    pub fn move_at(&self, step: usize) -> Option<Pos> {
        if step == 0 || step >= self.history.len() {
            return None;
        }
        let before = self.history[step - 1];
        let after = self.history[step];
        Pos::all().find(|&pos| before.is_empty(pos) && !after.is_empty(pos))
    }

    /// True if an earlier snapshot exists.
    #[inline]
    pub fn can_jump_back(&self) -> bool {
        self.cursor > 0
    }

    /// True if snapshots after the cursor still exist.
    #[inline]
    pub fn can_jump_forward(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    // ========== Transitions ==========

    /// The state after marking cell `index` for the player to move.
    ///
    /// History past the cursor is dropped: playing from an earlier step
    /// starts a new timeline.
    pub fn after_move(&self, index: usize) -> Result<Game, Ignored> {
        let pos = Pos::new(index).ok_or(Ignored::CellOutOfRange(index))?;
        if self.outcome.is_decided() {
            return Err(Ignored::GameDecided);
        }
        let board = self.board();
        if !board.is_empty(pos) {
            return Err(Ignored::CellOccupied(pos));
        }

        let mut history = Vec::with_capacity(self.cursor + 2);
        history.extend_from_slice(&self.history[..=self.cursor]);
        history.push(board.with_mark(pos, self.current_player()));

        Ok(Game::at_cursor(history, self.cursor + 1))
    }

    /// The state with the cursor moved to `step`.
    ///
    /// Nothing is discarded, so jumping back from a won game reopens play
    /// until a new move is made.
    pub fn after_jump(&self, step: usize) -> Result<Game, Ignored> {
        if step >= self.history.len() {
            return Err(Ignored::StepOutOfRange(step));
        }
        Ok(Game::at_cursor(self.history.clone(), step))
    }

    /// Mark cell `index` for the player to move.
    #[instrument(level = "debug", skip(self), fields(cursor = self.cursor))]
    pub fn apply_move(&mut self, index: usize) -> Transition {
        match self.after_move(index) {
            Ok(next) => {
                *self = next;
                debug!(cursor = self.cursor, outcome = ?self.outcome, "move applied");
                Transition::Applied
            }
            Err(reason) => {
                debug!(%reason, "move ignored");
                Transition::Ignored(reason)
            }
        }
    }

    /// Move the cursor to history entry `step`.
    #[instrument(level = "debug", skip(self), fields(cursor = self.cursor))]
    pub fn jump_to(&mut self, step: usize) -> Transition {
        match self.after_jump(step) {
            Ok(next) => {
                *self = next;
                debug!(outcome = ?self.outcome, "jumped");
                Transition::Applied
            }
            Err(reason) => {
                debug!(%reason, "jump ignored");
                Transition::Ignored(reason)
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
