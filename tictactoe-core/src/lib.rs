//! Tic-tac-toe game logic with move history and time travel.
//!
//! # Board Encoding (32-bit)
//!
//! ```text
//! Bits 0-17:  Board state (9 cells × 2 bits per cell)
//! Bits 18-31: Unused (always zero)
//!
//! Each cell (2 bits): 0 = empty, 1 = player one, 2 = player two
//!
//! Cell indices (row-major order):
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! The board carries no turn bit. Whose turn it is follows from the position
//! of the board in the game history, see [`Game`].

pub mod game;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use game::{Game, Ignored, Transition};
pub use view::{GameView, HistoryEntry, Symbols};

/// Player identifier. Player one always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// Convert from u8 (1 or 2) to Player.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Player> {
        match bits {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// The player to move after `moves` marks have been placed.
    #[inline]
    pub fn to_move_after(moves: usize) -> Player {
        if moves % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from a cell index, or None if it is off the board.
    #[inline]
    pub fn new(index: usize) -> Option<Pos> {
        if index < 9 {
            Some(Pos(index as u8))
        } else {
            None
        }
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Check if this is a valid position (0-8).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 9
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const WIN_LINES: [[Pos; 3]; 8] = [
    [Pos(0), Pos(1), Pos(2)], // Row 0
    [Pos(3), Pos(4), Pos(5)], // Row 1
    [Pos(6), Pos(7), Pos(8)], // Row 2
    [Pos(0), Pos(3), Pos(6)], // Col 0
    [Pos(1), Pos(4), Pos(7)], // Col 1
    [Pos(2), Pos(5), Pos(8)], // Col 2
    [Pos(0), Pos(4), Pos(8)], // Main diagonal
    [Pos(2), Pos(4), Pos(6)], // Anti-diagonal
];

/// A completed line: the mark that owns it and the three cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Win {
    pub winner: Player,
    pub line: [Pos; 3],
}

/// Result of a game at a given point in its history.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Outcome {
    #[default]
    Ongoing,
    Win(Win),
    /// All 9 cells filled and no line completed.
    Draw,
}

impl Outcome {
    /// Whether the game is over (won or drawn).
    #[inline]
    pub fn is_decided(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// The winning player, if any.
    #[inline]
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(win) => Some(win.winner),
            _ => None,
        }
    }

    /// The winning line, if any.
    #[inline]
    pub fn line(self) -> Option<[Pos; 3]> {
        match self {
            Outcome::Win(win) => Some(win.line),
            _ => None,
        }
    }
}

/// Compact board state - fits in a single u32.
///
/// See module documentation for encoding details.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(u32);

impl Board {
    /// Bits per cell.
    const CELL_BITS: u32 = 2;
    /// Mask for a single cell (0b11).
    const CELL_MASK: u32 = 0b11;

    /// Create a new empty board.
    #[inline]
    pub fn new() -> Board {
        Board(0)
    }

    /// Build a board from 9 cells in row-major order.
    pub fn from_cells(cells: [Option<Player>; 9]) -> Board {
        let mut board = Board::new();
        for (pos, cell) in Pos::all().zip(cells) {
            board.set_cell(pos, cell);
        }
        board
    }

    /// Get the raw u32 encoding.
    #[inline]
    pub fn to_u32(self) -> u32 {
        self.0
    }

    #[inline]
    fn raw_cell(&self, pos: Pos) -> u32 {
        debug_assert!(pos.is_valid());
        (self.0 >> (pos.0 as u32 * Self::CELL_BITS)) & Self::CELL_MASK
    }

    /// Get the mark at a position, or None if the cell is empty.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Option<Player> {
        Player::from_bits(self.raw_cell(pos) as u8)
    }

    /// Set (or clear) the mark at a position.
    #[inline]
    pub fn set_cell(&mut self, pos: Pos, value: Option<Player>) {
        debug_assert!(pos.is_valid());
        let shift = pos.0 as u32 * Self::CELL_BITS;
        let bits = value.map_or(0, |p| p as u32);
        self.0 = (self.0 & !(Self::CELL_MASK << shift)) | (bits << shift);
    }

    /// Copy of this board with `player`'s mark at `pos`.
    #[inline]
    pub fn with_mark(self, pos: Pos, player: Player) -> Board {
        let mut next = self;
        next.set_cell(pos, Some(player));
        next
    }

    /// All 9 cells in row-major order.
    pub fn cells(&self) -> [Option<Player>; 9] {
        let mut cells = [None; 9];
        for pos in Pos::all() {
            cells[pos.0 as usize] = self.cell(pos);
        }
        cells
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.raw_cell(pos) == 0
    }

    /// Number of marks `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        Pos::all().filter(|&pos| self.cell(pos) == Some(player)).count()
    }

    /// Number of non-empty cells.
    pub fn filled(&self) -> usize {
        Pos::all().filter(|&pos| !self.is_empty(pos)).count()
    }

    /// True when no empty cell remains.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled() == 9
    }

    // ========== Win Detection ==========

    /// Find the first completed line, scanning rows, then columns, then
    /// diagonals.
    ///
    /// Only reports wins. A full board without a line is not a draw here;
    /// deciding that is up to [`Game`].
    pub fn evaluate(&self) -> Option<Win> {
        WIN_LINES.iter().find_map(|&line| {
            let [a, b, c] = line;
            let mark = self.cell(a)?;
            (self.cell(b) == Some(mark) && self.cell(c) == Some(mark)).then_some(Win {
                winner: mark,
                line,
            })
        })
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board(")?;
        for pos in Pos::all() {
            if pos.0 > 0 && pos.col() == 0 {
                write!(f, "/")?;
            }
            let c = match self.cell(pos) {
                None => '.',
                Some(Player::One) => '1',
                Some(Player::Two) => '2',
            };
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}
