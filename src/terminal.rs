use crate::board::{BOARD_SIZE, Board, Move};
use crate::{GameOutcome, Mark, Player};

/// Leaf score of a position the computer has won. A human win scores the negation.
pub const WIN_SCORE: i32 = 10;

/// Every line of four, as row-major cell indices, in scan order: row `i` then column `i` for
/// each `i`, then the main diagonal and the anti-diagonal.
pub static LINES: [[usize; BOARD_SIZE]; 10] = [
    [0, 1, 2, 3],
    [0, 4, 8, 12],
    [4, 5, 6, 7],
    [1, 5, 9, 13],
    [8, 9, 10, 11],
    [2, 6, 10, 14],
    [12, 13, 14, 15],
    [3, 7, 11, 15],
    [0, 5, 10, 15],
    [3, 6, 9, 12],
];

fn first_winning_line(board: &Board) -> Option<&'static [usize; BOARD_SIZE]> {
    LINES.iter().find(|line| {
        let first = board.get(Move::from_index(line[0]));
        first != Mark::Empty && line[1..].iter().all(|&i| board.get(Move::from_index(i)) == first)
    })
}

/// Returns the mark filling the first complete line in scan order, or [`Mark::Empty`] if
/// there is none.
pub fn winner(board: &Board) -> Mark {
    first_winning_line(board)
        .map(|line| board.get(Move::from_index(line[0])))
        .unwrap_or(Mark::Empty)
}

/// Returns the cells of the first complete line in scan order.
pub fn winning_line(board: &Board) -> Option<[Move; BOARD_SIZE]> {
    first_winning_line(board).map(|line| (*line).map(Move::from_index))
}

/// Scores a position from the computer's point of view: `+10` for a computer win, `-10` for a
/// human win and `0` for anything else. Nothing short of a complete line is rewarded.
pub fn evaluate(board: &Board) -> i32 {
    match winner(board) {
        Mark::Computer => WIN_SCORE,
        Mark::Human => -WIN_SCORE,
        Mark::Empty => 0,
    }
}

/// Derives the state of the game from the board alone.
pub fn outcome(board: &Board) -> GameOutcome {
    match winner(board).player() {
        Some(player) => GameOutcome::Won(player),
        None if board.is_full() => GameOutcome::Draw,
        None => GameOutcome::InProgress,
    }
}
