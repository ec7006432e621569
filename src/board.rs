//! Board representation and terminal detection

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lines::LineAnalyzer;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A board coordinate: column `x` and row `y`, both in `0..3`.
///
/// Out-of-range coordinates are a caller precondition; operations index
/// the backing array directly and panic on violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Coord { x, y }
    }

    /// Row-major index into the 9-cell array
    pub(crate) fn index(self) -> usize {
        self.y * 3 + self.x
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        Coord {
            x: idx % 3,
            y: idx / 3,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Terminal status of a board, derived and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Ongoing,
    Won(Player),
    Draw,
}

/// The 3x3 board.
///
/// A plain mapping from coordinate to cell with value semantics: 9 bytes,
/// `Copy`, equal iff the cell arrays agree pointwise. The board carries no
/// turn flag and no other state; whose move it is belongs to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Get cell at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[Coord::new(x, y).index()]
    }

    /// Write a cell at column `x`, row `y`, overwriting unconditionally.
    ///
    /// Occupancy is not checked at this layer; the driver rejects moves on
    /// occupied cells before they reach the board.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[Coord::new(x, y).index()] = cell;
    }

    /// The raw cell array, row-major
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// All coordinates whose cell is empty, in row-major order
    pub fn free_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Coord::from_index(i))
            .collect()
    }

    /// Check if no cell is empty
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// The player owning a completed row, column, or diagonal, if any.
    ///
    /// Lines are scanned rows first, then columns, then diagonals.
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Terminal status, composed from `winner` and `is_full`
    pub fn status(&self) -> Status {
        if let Some(player) = self.winner() {
            Status::Won(player)
        } else if self.is_full() {
            Status::Draw
        } else {
            Status::Ongoing
        }
    }

    /// Return a new board equal to this one except that the given cell
    /// holds the player's mark. The receiver is unchanged.
    #[must_use = "append returns a new board; the receiver is unchanged"]
    pub fn append(&self, coord: Coord, player: Player) -> Board {
        let mut next = *self;
        next.cells[coord.index()] = player.to_cell();
        next
    }

    /// Clear all cells back to empty
    pub fn clear(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Count the marks a player has on the board
    pub fn mark_count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().filter(|&&cell| cell == target).count()
    }

    /// The side to move under the X-first convention, derived from mark
    /// counts. The search never consults this; it exists for the driver
    /// and the CLI.
    pub fn to_move(&self) -> Player {
        if self.mark_count(Player::X) == self.mark_count(Player::O) {
            Player::X
        } else {
            Player::O
        }
    }

    fn count_pieces(cells: &[Cell; 9]) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Create a board from a 9-character row-major string.
    ///
    /// Whitespace is filtered out. Cells are `.` (or space) for empty,
    /// `X`/`x`, and `O`/`o`/`0`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than 9 non-whitespace characters are present
    /// - Any character is not a valid cell representation
    /// - The piece counts are impossible under X-first play
    /// - Both players have completed lines
    pub fn from_string(s: &str) -> crate::Result<Self> {
        let cleaned: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if cleaned.len() < 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: cleaned.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in cleaned.iter().take(9).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let count = Self::count_pieces(&cells);
        if count.x != count.o && count.x != count.o + 1 {
            return Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }

        if LineAnalyzer::has_won(&cells, Player::X) && LineAnalyzer::has_won(&cells, Player::O) {
            return Err(crate::Error::ConflictingWinners {
                context: s.to_string(),
            });
        }

        Ok(Board { cells })
    }

    /// Compact 9-character row-major representation for use as a key
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(board.get(x, y), Cell::Empty);
            }
        }
        assert_eq!(board.status(), Status::Ongoing);
        assert_eq!(board.to_move(), Player::X);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        board.set(1, 2, Cell::X);
        assert_eq!(board.get(1, 2), Cell::X);
        assert_eq!(board.get(2, 1), Cell::Empty);
    }

    #[test]
    fn test_append_leaves_receiver_unchanged() {
        let board = Board::new().append(Coord::new(0, 0), Player::X);
        let next = board.append(Coord::new(1, 1), Player::O);

        assert_eq!(board.get(1, 1), Cell::Empty, "receiver must not change");
        assert_eq!(next.get(1, 1), Cell::O);
        assert_eq!(next.get(0, 0), Cell::X, "other cells must carry over");
    }

    #[test]
    fn test_free_cells() {
        let mut board = Board::new();
        assert_eq!(board.free_cells().len(), 9);

        board.set(1, 1, Cell::X);
        let free = board.free_cells();
        assert_eq!(free.len(), 8);
        assert!(!free.contains(&Coord::new(1, 1)));
        assert!(free.contains(&Coord::new(0, 0)));
    }

    #[test]
    fn test_row_win() {
        let board = Board::from_string("XXX OO. ...").unwrap();
        assert_eq!(board.winner(), Some(Player::X));
        assert_eq!(board.status(), Status::Won(Player::X));
    }

    #[test]
    fn test_column_win() {
        let board = Board::from_string("XOX XO. .O.").unwrap();
        assert_eq!(board.winner(), Some(Player::O));
    }

    #[test]
    fn test_diagonal_win() {
        let board = Board::from_string("X.O .XO ..X").unwrap();
        assert_eq!(board.winner(), Some(Player::X));

        let board = Board::from_string("XXO XO. O..").unwrap();
        assert_eq!(board.winner(), Some(Player::O));
    }

    #[test]
    fn test_draw_detection() {
        let board = Board::from_string("XOX XXO OXO").unwrap();
        assert_eq!(board.winner(), None);
        assert!(board.is_full());
        assert_eq!(board.status(), Status::Draw);
    }

    #[test]
    fn test_status_is_ongoing_mid_game() {
        let board = Board::from_string("XO. .X. ...").unwrap();
        assert_eq!(board.status(), Status::Ongoing);
    }

    #[test]
    fn test_to_move_alternates() {
        let mut board = Board::new();
        assert_eq!(board.to_move(), Player::X);

        board.set(0, 0, Cell::X);
        assert_eq!(board.to_move(), Player::O);

        board.set(1, 1, Cell::O);
        assert_eq!(board.to_move(), Player::X);
    }

    #[test]
    fn test_from_string_rejects_short_input() {
        assert!(Board::from_string("XO").is_err());
    }

    #[test]
    fn test_from_string_rejects_bad_character() {
        assert!(Board::from_string("XOZ......").is_err());
    }

    #[test]
    fn test_from_string_rejects_impossible_counts() {
        // Three X marks and no O marks cannot occur in alternating play
        assert!(Board::from_string("XXX......").is_err());
        // O can never be ahead of X under the X-first convention
        assert!(Board::from_string("O........").is_err());
    }

    #[test]
    fn test_from_string_rejects_double_win() {
        // X wins the top row and O wins the middle row
        assert!(Board::from_string("XXX OOO ...").is_err());
    }

    #[test]
    fn test_encode_roundtrip() {
        let board = Board::from_string("XO. .X. ..O").unwrap();
        assert_eq!(board.encode(), "XO..X...O");
        let parsed = Board::from_string(&board.encode()).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XOX .O. X..").unwrap();
        let display = format!("{board}");
        assert!(display.contains("XOX"));
        assert!(display.contains(".O."));
        assert!(display.contains("X.."));
    }

    #[test]
    fn test_clear() {
        let mut board = Board::from_string("XO. .X. ...").unwrap();
        board.clear();
        assert_eq!(board, Board::new());
    }
}
