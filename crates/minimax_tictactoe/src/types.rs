//! Core domain types for tic-tac-toe.

use super::error::BoardError;
use super::position::Position;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// One of the two players.
///
/// Which side the human plays is a matter of configuration, see
/// [`Seating`](crate::Seating).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Side rendered as `X`.
    #[display("X")]
    #[serde(alias = "x", alias = "X")]
    First,
    /// Side rendered as `O`.
    #[display("O")]
    #[serde(alias = "o", alias = "O")]
    Second,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Mark character used in board notation.
    pub fn symbol(self) -> char {
        match self {
            Side::First => 'X',
            Side::Second => 'O',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Cell marked by a side.
    Mark(Side),
}

impl Cell {
    /// Returns true if the cell holds no mark.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the side owning this cell, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Mark(side) => Some(side),
        }
    }
}

/// 3x3 tic-tac-toe board, row-major.
///
/// Cells are write-once: [`Board::place`] refuses to overwrite a mark, and
/// only [`Board::reset`] (or the search's own undo step) empties a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell at a position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row()][pos.col()]
    }

    /// Returns true if the cell at a position holds no mark.
    pub fn is_free(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Checks whether the cell at `(row, col)` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn is_empty(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        Ok(self.is_free(Position::from_coords(row, col)?))
    }

    /// Writes `side`'s mark at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] for coordinates outside the grid
    /// and [`BoardError::CellOccupied`] if the cell already holds a mark.
    /// The board is unchanged on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, row: usize, col: usize, side: Side) -> Result<Position, BoardError> {
        let pos = Position::from_coords(row, col)?;
        self.place_at(pos, side)?;
        Ok(pos)
    }

    /// Writes `side`'s mark at a position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CellOccupied`] if the cell already holds a mark.
    pub fn place_at(&mut self, pos: Position, side: Side) -> Result<(), BoardError> {
        let cell = &mut self.cells[pos.row()][pos.col()];
        if !cell.is_empty() {
            return Err(BoardError::CellOccupied {
                row: pos.row(),
                col: pos.col(),
            });
        }
        *cell = Cell::Mark(side);
        Ok(())
    }

    /// Removes the mark at a position. Only the search undoes marks.
    pub(crate) fn clear(&mut self, pos: Position) {
        self.cells[pos.row()][pos.col()] = Cell::Empty;
    }

    /// Unoccupied positions in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|&pos| self.is_free(pos))
    }

    /// Clears all nine cells.
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; 3]; 3];
    }

    /// Returns the rows of the board.
    pub fn cells(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    /// Number of marks placed by a side.
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.side() == Some(side))
            .count()
    }

    /// Returns true if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Side whose turn it is, assuming [`Side::First`] opened.
    pub fn side_to_move(&self) -> Side {
        if self.count(Side::First) > self.count(Side::Second) {
            Side::Second
        } else {
            Side::First
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            let symbols: Vec<String> = row
                .iter()
                .map(|cell| cell.side().map_or(' ', Side::symbol).to_string())
                .collect();
            write!(f, "{}", symbols.join("|"))?;
            if r < 2 {
                writeln!(f)?;
                writeln!(f, "-+-+-")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses nine cells from `X`, `O` and `.`/`-`/`_` (empty), ignoring
    /// whitespace and `|` separators.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parsed = Vec::with_capacity(9);
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            let cell = match c.to_ascii_uppercase() {
                'X' => Cell::Mark(Side::First),
                'O' => Cell::Mark(Side::Second),
                '.' | '-' | '_' => Cell::Empty,
                found => return Err(BoardError::InvalidNotation { found }),
            };
            parsed.push(cell);
        }
        if parsed.len() != 9 {
            return Err(BoardError::WrongCellCount {
                found: parsed.len(),
            });
        }

        let mut board = Board::new();
        for (pos, cell) in Position::ALL.into_iter().zip(parsed) {
            board.cells[pos.row()][pos.col()] = cell;
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_writes_mark() {
        let mut board = Board::new();
        let pos = board.place(1, 2, Side::First).unwrap();
        assert_eq!(pos, Position::MiddleRight);
        assert_eq!(board.get(pos), Cell::Mark(Side::First));
        assert_eq!(board.is_empty(1, 2), Ok(false));
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(
            board.place(3, 0, Side::First),
            Err(BoardError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(
            board.is_empty(0, 7),
            Err(BoardError::OutOfBounds { row: 0, col: 7 })
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_cells_are_write_once() {
        let mut board = Board::new();
        board.place(0, 0, Side::First).unwrap();
        let before = board.clone();

        assert_eq!(
            board.place(0, 0, Side::Second),
            Err(BoardError::CellOccupied { row: 0, col: 0 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::new();
        board.place(0, 1, Side::First).unwrap();
        board.place(2, 0, Side::Second).unwrap();

        let empty: Vec<_> = board.empty_cells().map(Position::coords).collect();
        assert_eq!(
            empty,
            vec![(0, 0), (0, 2), (1, 0), (1, 1), (1, 2), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn test_reset_empties_every_cell() {
        let mut board: Board = "XOX/OXO/OX.".replace('/', "").parse().unwrap();
        board.reset();
        assert_eq!(board.empty_cells().count(), 9);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_clear_undoes_placement() {
        let mut board = Board::new();
        board.place_at(Position::Center, Side::Second).unwrap();
        board.clear(Position::Center);
        assert!(board.is_free(Position::Center));
    }

    #[test]
    fn test_display() {
        let board: Board = "X.O .X. ..O".parse().unwrap();
        assert_eq!(board.to_string(), "X| |O\n-+-+-\n |X| \n-+-+-\n | |O");
    }

    #[test]
    fn test_parse_rejects_bad_notation() {
        assert_eq!(
            "XOZ......".parse::<Board>(),
            Err(BoardError::InvalidNotation { found: 'Z' })
        );
        assert_eq!(
            "XO.".parse::<Board>(),
            Err(BoardError::WrongCellCount { found: 3 })
        );
    }

    #[test]
    fn test_side_to_move() {
        assert_eq!(Board::new().side_to_move(), Side::First);
        let board: Board = "X........".parse().unwrap();
        assert_eq!(board.side_to_move(), Side::Second);
        let board: Board = "XO.......".parse().unwrap();
        assert_eq!(board.side_to_move(), Side::First);
    }

    #[test]
    fn test_side_serializes_lowercase() {
        let json = serde_json::to_string(&Side::Second).unwrap();
        assert_eq!(json, "\"second\"");
    }
}
