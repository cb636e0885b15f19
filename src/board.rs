use crate::error::{InvalidMove, ParseBoardError};
use crate::{Mark, Player};
use std::fmt;
use std::str::FromStr;

/// Number of rows and of columns.
pub const BOARD_SIZE: usize = 4;
/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell coordinate. Valid moves have both `row` and `col` in `0..4`.
///
/// A `Move` can be built for any coordinate so that input coming from outside can be checked
/// by the board; see [`Move::validate`].
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Builds the move for a row-major cell index in `0..16`.
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: index / BOARD_SIZE,
            col: index % BOARD_SIZE,
        }
    }

    /// Row-major index of the cell. Only meaningful for moves on the board.
    pub const fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    pub const fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Returns the move unchanged if it lies on the board.
    pub fn validate(self) -> Result<Self, InvalidMove> {
        if self.is_on_board() {
            Ok(self)
        } else {
            Err(InvalidMove::OutOfRange {
                row: self.row,
                col: self.col,
            })
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 4x4 grid.
///
/// Cells are stored flat in row-major order. The board is mutated in place: searches place a
/// trial mark, explore, and [`clear`](Board::clear) it again before moving on.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    /// Creates a board with every cell empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content of a cell. Panics if the move is off the board.
    pub fn get(&self, mv: Move) -> Mark {
        self.cells[mv.index()]
    }

    /// Puts the player's mark on an empty cell.
    ///
    /// The cell must be empty; callers check [`is_empty`](Board::is_empty) first.
    pub fn place(&mut self, mv: Move, player: Player) {
        debug_assert!(self.is_empty(mv), "placing on occupied cell {mv}");
        self.cells[mv.index()] = player.mark();
    }

    /// Checked version of [`place`](Board::place) for moves coming from outside the engine.
    /// The board is left untouched on error.
    pub fn try_place(&mut self, mv: Move, player: Player) -> Result<(), InvalidMove> {
        let mv = mv.validate()?;
        if !self.is_empty(mv) {
            return Err(InvalidMove::Occupied {
                row: mv.row,
                col: mv.col,
            });
        }

        self.place(mv, player);
        Ok(())
    }

    /// Resets a cell to empty.
    pub fn clear(&mut self, mv: Move) {
        self.cells[mv.index()] = Mark::Empty;
    }

    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv) == Mark::Empty
    }

    /// Returns `true` if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&x| x != Mark::Empty)
    }

    /// Returns `true` if every cell is empty.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&x| x == Mark::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&x| x == mark).count()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, x)| **x == Mark::Empty)
            .map(|(i, _)| Move::from_index(i))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(BOARD_SIZE).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, cell) in cells.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Reads 16 symbols (`X`, `O` or `.`) in row-major order. Whitespace and the grid
    /// characters `|`, `-` and `+` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        for ch in s.chars() {
            let mark = match ch {
                'X' | 'x' => Mark::Human,
                'O' | 'o' => Mark::Computer,
                '.' => Mark::Empty,
                '|' | '-' | '+' => continue,
                c if c.is_whitespace() => continue,
                c => return Err(ParseBoardError::UnexpectedSymbol(c)),
            };
            cells.push(mark);
        }

        let cells: [Mark; CELL_COUNT] = cells
            .try_into()
            .map_err(|rest: Vec<Mark>| ParseBoardError::WrongCellCount(rest.len()))?;
        Ok(Self { cells })
    }
}
