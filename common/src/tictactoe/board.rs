use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const BOARD_SIZE: usize = 9;

// Rows, then columns, then diagonals. Order decides which line is reported first.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Error, Debug, PartialEq)]
pub enum BoardPositionError {
    #[error("Position {0} is outside the board (0..9)")]
    OutOfBounds(i32),
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    X,
    O,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Taken(Symbol),
}

impl Cell {
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Cell::Taken(symbol) => Some(*symbol),
            Cell::Empty => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardPosition(usize);

impl BoardPosition {
    // Positions arrive signed so that negative client input can be rejected here
    // instead of wrapping around.
    pub fn new(pos: i32) -> Result<Self, BoardPositionError> {
        usize::try_from(pos)
            .ok()
            .filter(|p| *p < BOARD_SIZE)
            .map(BoardPosition)
            .ok_or(BoardPositionError::OutOfBounds(pos))
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Board([Cell; BOARD_SIZE]);

impl Default for Board {
    fn default() -> Self {
        Board([Cell::Empty; BOARD_SIZE])
    }
}

impl Board {
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.0
    }

    pub fn get(&self, position: BoardPosition) -> Cell {
        self.0[position.index()]
    }

    pub fn reset(&mut self) {
        self.0 = [Cell::Empty; BOARD_SIZE];
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| *c == Cell::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|c| matches!(c, Cell::Taken(_)))
    }

    // Out-of-range positions are never free.
    pub fn is_free(&self, pos: i32) -> bool {
        self.free_position(pos).is_some()
    }

    pub fn free_position(&self, pos: i32) -> Option<BoardPosition> {
        BoardPosition::new(pos)
            .ok()
            .filter(|p| self.get(*p) == Cell::Empty)
    }

    // Caller guarantees the position is free
    pub fn place(&mut self, position: BoardPosition, symbol: Symbol) {
        self.0[position.index()] = Cell::Taken(symbol);
    }

    pub fn winner(&self) -> Option<Symbol> {
        WIN_LINES.iter().find_map(|[a, b, c]| {
            let symbol = self.0[*a].symbol()?;
            (self.0[*b] == Cell::Taken(symbol) && self.0[*c] == Cell::Taken(symbol))
                .then_some(symbol)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &[(i32, Symbol)]) -> Board {
        let mut board = Board::default();
        for (pos, symbol) in marks {
            board.place(BoardPosition::new(*pos).unwrap(), *symbol);
        }
        board
    }

    #[test]
    fn test_board_position_bounds() {
        assert_eq!(BoardPosition::new(0).unwrap().index(), 0);
        assert_eq!(BoardPosition::new(8).unwrap().index(), 8);
        assert_eq!(
            BoardPosition::new(9),
            Err(BoardPositionError::OutOfBounds(9))
        );
        assert_eq!(
            BoardPosition::new(-1),
            Err(BoardPositionError::OutOfBounds(-1))
        );
    }

    #[test]
    fn test_is_free() {
        let board = board_from(&[(4, Symbol::X)]);
        assert!(board.is_free(0));
        assert!(!board.is_free(4));
        assert!(!board.is_free(9));
        assert!(!board.is_free(-3));
        assert!(!board.is_free(i32::MAX));
    }

    #[test]
    fn test_is_full_and_reset() {
        let mut board = Board::default();
        assert!(!board.is_full());
        for pos in 0..BOARD_SIZE as i32 {
            let symbol = if pos % 2 == 0 { Symbol::X } else { Symbol::O };
            board.place(BoardPosition::new(pos).unwrap(), symbol);
        }
        assert!(board.is_full());
        board.reset();
        assert!(board.is_empty());
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_winner_lines() {
        let rows = board_from(&[(3, Symbol::O), (4, Symbol::O), (5, Symbol::O)]);
        assert_eq!(rows.winner(), Some(Symbol::O));

        let column = board_from(&[(0, Symbol::X), (3, Symbol::X), (6, Symbol::X)]);
        assert_eq!(column.winner(), Some(Symbol::X));

        let diagonal = board_from(&[(2, Symbol::X), (4, Symbol::X), (6, Symbol::X)]);
        assert_eq!(diagonal.winner(), Some(Symbol::X));
    }

    #[test]
    fn test_no_winner() {
        assert_eq!(Board::default().winner(), None);

        let mixed = board_from(&[(0, Symbol::X), (1, Symbol::O), (2, Symbol::X)]);
        assert_eq!(mixed.winner(), None);

        // X O X / X O O / O X X
        let draw = board_from(&[
            (0, Symbol::X),
            (1, Symbol::O),
            (2, Symbol::X),
            (3, Symbol::X),
            (4, Symbol::O),
            (5, Symbol::O),
            (6, Symbol::O),
            (7, Symbol::X),
            (8, Symbol::X),
        ]);
        assert!(draw.is_full());
        assert_eq!(draw.winner(), None);
    }
}
