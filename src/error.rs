/// A proposed move that cannot be placed on the board.
///
/// The caller is expected to ask for another move. The board is never modified when this is
/// returned.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum InvalidMove {
    #[error("cell ({row}, {col}) is outside the 4x4 board")]
    OutOfRange { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already taken")]
    Occupied { row: usize, col: usize },
}

/// Errors raised by the turn controller when it is driven out of order.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum TurnError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),

    #[error("it is not the human's turn")]
    NotHumanTurn,

    #[error("it is not the computer's turn")]
    NotComputerTurn,

    #[error("the game is already over")]
    GameOver,
}

/// Errors raised when reading a board from text.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum ParseBoardError {
    #[error("unexpected symbol '{0}' (expected X, O or .)")]
    UnexpectedSymbol(char),

    #[error("expected 16 cells, found {0}")]
    WrongCellCount(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_move_display() {
        let err = InvalidMove::Occupied { row: 1, col: 2 };
        assert_eq!(err.to_string(), "cell (1, 2) is already taken");

        let err = InvalidMove::OutOfRange { row: 4, col: 0 };
        assert_eq!(err.to_string(), "cell (4, 0) is outside the 4x4 board");
    }

    #[test]
    fn turn_error_wraps_invalid_move() {
        let err: TurnError = InvalidMove::Occupied { row: 0, col: 3 }.into();
        assert_eq!(err, TurnError::InvalidMove(InvalidMove::Occupied { row: 0, col: 3 }));
        assert_eq!(err.to_string(), "invalid move: cell (0, 3) is already taken");
    }

    #[test]
    fn parse_board_error_display() {
        assert_eq!(
            ParseBoardError::WrongCellCount(15).to_string(),
            "expected 16 cells, found 15"
        );
        assert_eq!(
            ParseBoardError::UnexpectedSymbol('Z').to_string(),
            "unexpected symbol 'Z' (expected X, O or .)"
        );
    }
}
