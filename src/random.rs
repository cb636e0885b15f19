use crate::board::{BOARD_SIZE, Board, Move};
use rand::Rng;

const MULTIPLIER_A: i64 = 1103515245;
const INCREMENT_C: i64 = 12345;
const DEFAULT_SEED: i64 = 3819201;

const CORNERS: [Move; 4] = [
    Move::new(0, 0),
    Move::new(0, BOARD_SIZE - 1),
    Move::new(BOARD_SIZE - 1, 0),
    Move::new(BOARD_SIZE - 1, BOARD_SIZE - 1),
];

/// A source of random numbers for scripted play.
///
/// The search never draws from this; it is only used to drive a random opponent or to
/// vary the first move of a game.
pub trait RandomGenerator: Default {
    fn next(&mut self) -> i32;

    /// Returns a number in `from..to`.
    fn next_range(&mut self, from: i32, to: i32) -> i32;

    /// Picks one of the empty cells uniformly, or `None` on a full board.
    fn pick_empty_cell(&mut self, board: &Board) -> Option<Move> {
        let cells: Vec<Move> = board.empty_cells().collect();
        if cells.is_empty() {
            return None;
        }
        cells.get(self.next_range(0, cells.len() as i32) as usize).copied()
    }

    /// Picks one of the four corners. Used as a quick opening when the computer starts on a
    /// blank board.
    fn pick_corner(&mut self) -> Move {
        CORNERS[self.next_range(0, CORNERS.len() as i32) as usize]
    }
}

/// Thread-local entropy from `rand`.
#[derive(Debug, Default)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next(&mut self) -> i32 {
        rand::random()
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        rand::rng().random_range(from..to)
    }
}

/// A linear congruential generator. Same seed, same sequence, which keeps scripted games
/// reproducible.
#[derive(Debug)]
pub struct CustomNumberGenerator {
    seed: i64,
}

impl Default for CustomNumberGenerator {
    fn default() -> Self {
        CustomNumberGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for CustomNumberGenerator {
    fn next(&mut self) -> i32 {
        self.seed = (self.seed * MULTIPLIER_A + INCREMENT_C) % (i32::MAX as i64);
        self.seed as i32
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        (self.next() % (to - from)).abs() + from
    }
}

impl CustomNumberGenerator {
    pub const fn new(seed: i64) -> Self {
        // state stays in 0..i32::MAX
        Self {
            seed: seed.rem_euclid(i32::MAX as i64),
        }
    }
}
