use crate::board::{BOARD_SIZE, Board, Move};
use crate::error::{InvalidMove, TurnError};
use crate::minimax::MinimaxSearch;
use crate::terminal::{outcome, winning_line};
use crate::trace::{NoTrace, SearchObserver};
use crate::{GameOutcome, Player};
use log::{debug, info};

/// Where a game stands between moves.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TurnState {
    /// Waiting for a move from outside.
    HumanTurn,
    /// Waiting for [`Game::play_computer`].
    ComputerTurn,
    /// The given player completed a line. Terminal.
    Won(Player),
    /// The board filled up without a line. Terminal.
    Draw,
}

impl TurnState {
    /// The state in which `player` is to move.
    pub const fn turn_of(player: Player) -> Self {
        match player {
            Player::Human => TurnState::HumanTurn,
            Player::Computer => TurnState::ComputerTurn,
        }
    }

    /// The player to move, or `None` once the game is over.
    pub const fn to_move(self) -> Option<Player> {
        match self {
            TurnState::HumanTurn => Some(Player::Human),
            TurnState::ComputerTurn => Some(Player::Computer),
            TurnState::Won(_) | TurnState::Draw => None,
        }
    }

    pub const fn is_over(self) -> bool {
        self.to_move().is_none()
    }
}

/// The turn controller.
///
/// It alternates between the human, whose moves are passed in from outside, and the computer,
/// whose moves come from a [`MinimaxSearch`]. After every move the board is checked for a
/// line and for fullness before the other side gets a turn.
pub struct Game<O: SearchObserver = NoTrace> {
    board: Board,
    state: TurnState,
    first_player: Player,
    history: Vec<(Player, Move)>,
    search: MinimaxSearch<O>,
}

impl Default for Game<NoTrace> {
    /// Creates a new game with the human moving first.
    fn default() -> Self {
        Game::new(Player::Human)
    }
}

impl Game<NoTrace> {
    /// Creates a new game on a blank board with a pruning search.
    pub fn new(first_player: Player) -> Self {
        Game::with_search(first_player, MinimaxSearch::default())
    }

    /// Continues from an existing position with `to_move` on turn.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut game = Game::new(to_move);
        game.board = board;
        game.state = game.state_after(to_move.opponent());
        game
    }
}

impl<O: SearchObserver> Game<O> {
    /// Creates a new game on a blank board that picks the computer's moves with `search`.
    pub fn with_search(first_player: Player, search: MinimaxSearch<O>) -> Self {
        Self {
            board: Board::new(),
            state: TurnState::turn_of(first_player),
            first_player,
            history: Vec::with_capacity(BOARD_SIZE * BOARD_SIZE),
            search,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// The outcome as derived from the board.
    pub fn outcome(&self) -> GameOutcome {
        outcome(&self.board)
    }

    /// The completed line, if any, for highlighting.
    pub fn winning_line(&self) -> Option<[Move; BOARD_SIZE]> {
        winning_line(&self.board)
    }

    /// Moves played in this game, oldest first.
    pub fn history(&self) -> &[(Player, Move)] {
        &self.history
    }

    pub fn search(&self) -> &MinimaxSearch<O> {
        &self.search
    }

    /// Applies a human move. On error nothing changes and the human is still on turn.
    pub fn play_human(&mut self, mv: Move) -> Result<TurnState, TurnError> {
        self.expect_turn(Player::Human)?;
        self.apply(mv, Player::Human)?;
        Ok(self.state)
    }

    /// Searches for the computer's move, applies it and returns it.
    pub fn play_computer(&mut self) -> Result<Move, TurnError> {
        self.expect_turn(Player::Computer)?;
        let mv = self
            .search
            .choose_move(&mut self.board)
            .ok_or(TurnError::GameOver)?;
        self.apply(mv, Player::Computer)?;
        Ok(mv)
    }

    /// Applies a computer move chosen by the caller instead of the search, such as a random
    /// opening.
    pub fn play_computer_at(&mut self, mv: Move) -> Result<TurnState, TurnError> {
        self.expect_turn(Player::Computer)?;
        self.apply(mv, Player::Computer)?;
        Ok(self.state)
    }

    /// Starts a new game on a blank board with the same first player.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.history.clear();
        self.state = TurnState::turn_of(self.first_player);
        debug!("new game, {:?} moves first", self.first_player);
    }

    fn expect_turn(&self, player: Player) -> Result<(), TurnError> {
        match self.state.to_move() {
            None => Err(TurnError::GameOver),
            Some(p) if p == player => Ok(()),
            Some(Player::Human) => Err(TurnError::NotComputerTurn),
            Some(Player::Computer) => Err(TurnError::NotHumanTurn),
        }
    }

    fn apply(&mut self, mv: Move, player: Player) -> Result<(), InvalidMove> {
        self.board.try_place(mv, player)?;
        self.history.push((player, mv));
        self.state = self.state_after(player);
        debug!("{player:?} played {mv}");

        match self.state {
            TurnState::Won(winner) => info!("game over: {winner:?} wins"),
            TurnState::Draw => info!("game over: draw"),
            _ => {}
        }
        Ok(())
    }

    fn state_after(&self, last: Player) -> TurnState {
        match outcome(&self.board) {
            GameOutcome::Won(winner) => TurnState::Won(winner),
            GameOutcome::Draw => TurnState::Draw,
            GameOutcome::InProgress => TurnState::turn_of(last.opponent()),
        }
    }
}

/// Creates a blank board for a new game.
pub fn new_board() -> Board {
    Board::new()
}

/// Places the human's mark if the cell is on the board and empty. The board is unchanged on
/// error.
pub fn apply_human_move(board: &mut Board, mv: Move) -> Result<(), InvalidMove> {
    board.try_place(mv, Player::Human)
}

/// Picks the computer's move with a pruning search and applies it. Returns `None` only on a
/// full board.
pub fn computer_move(board: &mut Board) -> Option<Move> {
    let mv = MinimaxSearch::default().choose_move(board)?;
    board.place(mv, Player::Computer);
    Some(mv)
}

/// The outcome of the game on `board`.
pub fn status(board: &Board) -> GameOutcome {
    outcome(board)
}
