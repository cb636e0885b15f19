//! A small engine for four-in-a-row on a 4x4 board.
//!
//! The human plays `X`, the computer plays `O`, and the first side to fill a row, a column or
//! one of the two long diagonals wins. The computer picks its moves with a depth-limited
//! minimax search using alpha-beta pruning. Trial moves are applied to a single board and
//! undone on the way back up, so no board is ever copied during a search.
//!
//! # Example
//!
//! ```rust
//! use gato4x4::game::Game;
//! use gato4x4::board::Move;
//! use gato4x4::{GameOutcome, Player};
//!
//! // The human moves first by default
//! let mut game = Game::default();
//!
//! // Take a corner, then let the computer answer
//! game.play_human(Move::new(0, 0)).unwrap();
//! let reply = game.play_computer().unwrap();
//!
//! println!("The computer played {}", reply);
//! assert_eq!(game.outcome(), GameOutcome::InProgress);
//! assert_eq!(game.board().count(Player::Computer.mark()), 1);
//! ```

/// The 4x4 grid, moves and the textual board format.
pub mod board;
/// Error types surfaced to the caller.
pub mod error;
/// The turn controller and the plain functions the I/O layer drives a game with.
pub mod game;
/// The minimax search that picks the computer's move.
pub mod minimax;
/// Seedable random move sources for scripted opponents and openings.
pub mod random;
/// Win detection and leaf evaluation.
pub mod terminal;
/// Observers that count or record what a search explores.
pub mod trace;

pub use board::{Board, Move};
pub use error::{InvalidMove, ParseBoardError, TurnError};
pub use game::{Game, TurnState, apply_human_move, computer_move, new_board, status};

/// One of the two sides of the game.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Player {
    /// The side driven by external input. Plays `X`.
    Human,
    /// The side driven by the search. Plays `O`.
    Computer,
}

impl Player {
    /// Returns the mark this player places on the board.
    pub const fn mark(self) -> Mark {
        match self {
            Player::Human => Mark::Human,
            Player::Computer => Mark::Computer,
        }
    }

    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }
}

/// The content of a single cell.
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Mark {
    #[default]
    Empty,
    Human,
    Computer,
}

impl Mark {
    /// Returns the owner of the mark, or `None` for an empty cell.
    pub const fn player(self) -> Option<Player> {
        match self {
            Mark::Empty => None,
            Mark::Human => Some(Player::Human),
            Mark::Computer => Some(Player::Computer),
        }
    }

    /// The symbol used when printing or parsing a board.
    pub const fn symbol(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::Human => 'X',
            Mark::Computer => 'O',
        }
    }
}

/// The state of a game as derived from its board.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    /// Nobody has completed a line and at least one cell is empty.
    InProgress,
    /// The given player has completed a line.
    Won(Player),
    /// Every cell is filled and nobody has completed a line.
    Draw,
}

impl GameOutcome {
    /// Returns `true` once the game can no longer continue.
    pub const fn is_over(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}
