use crate::Player;
use crate::board::{Board, CELL_COUNT, Move};
use crate::terminal::{WIN_SCORE, evaluate};
use crate::trace::{NoTrace, SearchObserver};
use log::{debug, trace};

/// Deepest depth that is still expanded. Positions reached at a greater depth score `0`
/// unless they are already won.
pub const MAX_DEPTH: i32 = 4;

/// The outcome of a top-level search.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct SearchResult {
    /// First move in row-major order among those with the highest score. `None` if the board
    /// had no empty cell.
    pub best_move: Option<Move>,
    /// Score of `best_move`, or `i32::MIN` when there was nothing to search.
    pub score: i32,
}

/// Depth-limited minimax over a single mutable board.
///
/// The computer is the maximizing side and the human the minimizing side. Scores come from
/// [`evaluate`] adjusted by depth, so a quicker win scores higher and a later loss scores
/// less negatively. Every trial mark is removed before the search returns.
pub struct MinimaxSearch<O: SearchObserver = NoTrace> {
    observer: O,
    use_alpha_beta_pruning: bool,
}

impl Default for MinimaxSearch<NoTrace> {
    fn default() -> Self {
        MinimaxSearchBuilder::new().build()
    }
}

/// A builder for creating instances of `MinimaxSearch`.
pub struct MinimaxSearchBuilder<O: SearchObserver> {
    observer: O,
    use_alpha_beta_pruning: bool,
}

impl Default for MinimaxSearchBuilder<NoTrace> {
    fn default() -> Self {
        MinimaxSearchBuilder::new()
    }
}

impl MinimaxSearchBuilder<NoTrace> {
    /// Creates a builder with pruning enabled and no observer.
    pub fn new() -> Self {
        Self {
            observer: NoTrace,
            use_alpha_beta_pruning: true,
        }
    }
}

impl<O: SearchObserver> MinimaxSearchBuilder<O> {
    /// Enables or disables alpha-beta pruning. Disabling it does not change any score, only
    /// how much of the tree gets visited.
    pub fn with_alpha_beta_pruning(mut self, use_abp: bool) -> Self {
        self.use_alpha_beta_pruning = use_abp;
        self
    }

    /// Attaches an observer that is notified of every explored move.
    pub fn with_observer<P: SearchObserver>(self, observer: P) -> MinimaxSearchBuilder<P> {
        MinimaxSearchBuilder {
            observer,
            use_alpha_beta_pruning: self.use_alpha_beta_pruning,
        }
    }

    pub fn build(self) -> MinimaxSearch<O> {
        MinimaxSearch::new(self.observer, self.use_alpha_beta_pruning)
    }
}

impl MinimaxSearch<NoTrace> {
    /// Returns a new builder for `MinimaxSearch`.
    pub fn builder() -> MinimaxSearchBuilder<NoTrace> {
        MinimaxSearchBuilder::new()
    }
}

impl<O: SearchObserver> MinimaxSearch<O> {
    /// Creates a new `MinimaxSearch` instance.
    ///
    /// It is recommended to use the builder pattern via `MinimaxSearch::builder()` instead.
    pub fn new(observer: O, use_alpha_beta_pruning: bool) -> Self {
        Self {
            observer,
            use_alpha_beta_pruning,
        }
    }

    pub fn uses_alpha_beta_pruning(&self) -> bool {
        self.use_alpha_beta_pruning
    }

    pub fn get_observer(&self) -> &O {
        &self.observer
    }

    pub fn get_observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Scores every empty cell as the computer's next move and returns the best one.
    ///
    /// Each candidate is searched with a fresh `(i32::MIN, i32::MAX)` window, so its score is
    /// exact. Only a strictly greater score replaces the current best, which makes ties go to
    /// the first candidate in row-major order. The board is unchanged on return.
    pub fn search(&mut self, board: &mut Board) -> SearchResult {
        self.observer.on_search_start(board);

        let mut result = SearchResult {
            best_move: None,
            score: i32::MIN,
        };
        for index in 0..CELL_COUNT {
            let mv = Move::from_index(index);
            if !board.is_empty(mv) {
                continue;
            }

            board.place(mv, Player::Computer);
            self.observer.on_enter(mv, Player::Computer, 0);
            let score = self.minimax(board, 0, false, i32::MIN, i32::MAX);
            self.observer.on_exit(score);
            board.clear(mv);

            trace!("candidate {mv} scored {score}");
            if result.best_move.is_none() || score > result.score {
                result = SearchResult {
                    best_move: Some(mv),
                    score,
                };
            }
        }

        match result.best_move {
            Some(mv) => debug!("search picked {mv} with score {}", result.score),
            None => debug!("search called on a full board"),
        }
        result
    }

    /// Returns the computer's best move, or `None` on a full board.
    pub fn choose_move(&mut self, board: &mut Board) -> Option<Move> {
        self.search(board).best_move
    }

    /// Scores the position on `board` at `depth` plies below the candidate move.
    ///
    /// `maximizing` tells whether the computer is to move. `alpha` is the score the computer
    /// can already guarantee elsewhere and `beta` the score the human can already guarantee;
    /// once `beta <= alpha` the remaining moves of this position are skipped.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        let score = evaluate(board);
        if score == WIN_SCORE {
            return score - depth;
        }
        if score == -WIN_SCORE {
            return score + depth;
        }
        if board.is_full() || depth > MAX_DEPTH {
            return 0;
        }

        let player = if maximizing {
            Player::Computer
        } else {
            Player::Human
        };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for index in 0..CELL_COUNT {
            let mv = Move::from_index(index);
            if !board.is_empty(mv) {
                continue;
            }

            board.place(mv, player);
            self.observer.on_enter(mv, player, depth + 1);
            let value = self.minimax(board, depth + 1, !maximizing, alpha, beta);
            self.observer.on_exit(value);
            board.clear(mv);

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }

            if self.use_alpha_beta_pruning && beta <= alpha {
                // only report a cutoff when some move is actually left unsearched
                if (index + 1..CELL_COUNT).any(|rest| board.is_empty(Move::from_index(rest))) {
                    self.observer.on_cutoff(depth);
                }
                break;
            }
        }

        best
    }
}

/// Runs [`MinimaxSearch::minimax`] with pruning and no observer.
pub fn minimax(board: &mut Board, depth: i32, maximizing: bool, alpha: i32, beta: i32) -> i32 {
    MinimaxSearch::default().minimax(board, depth, maximizing, alpha, beta)
}

/// Runs [`MinimaxSearch::choose_move`] with pruning and no observer.
pub fn choose_move(board: &mut Board) -> Option<Move> {
    MinimaxSearch::default().choose_move(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mark;
    use crate::random::{CustomNumberGenerator, RandomGenerator};
    use crate::terminal::winner;
    use crate::trace::{SearchStats, SearchTrace};

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    /// Plays `moves` random alternating moves, human first, stopping early rather than
    /// completing a line.
    fn random_position(rg: &mut CustomNumberGenerator, moves: usize) -> Board {
        let mut b = Board::new();
        let mut player = Player::Human;
        for _ in 0..moves {
            let Some(mv) = rg.pick_empty_cell(&b) else {
                break;
            };
            b.place(mv, player);
            if winner(&b) != Mark::Empty {
                b.clear(mv);
                break;
            }
            player = player.opponent();
        }
        b
    }

    #[test]
    fn takes_immediate_win() {
        // arrange
        let mut b = board(
            "X..O
             X..O
             .X.O
             .X..",
        );

        // act
        let result = MinimaxSearch::default().search(&mut b);

        // assert
        assert_eq!(result.best_move, Some(Move::new(3, 3)));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn blocks_single_threat() {
        // arrange
        let mut b = board(
            "XXX.
             O...
             .O..
             ....",
        );

        // act
        let mv = choose_move(&mut b);

        // assert
        assert_eq!(mv, Some(Move::new(0, 3)));
    }

    #[test]
    fn prefers_winning_over_blocking() {
        let mut b = board(
            "XXX.
             OOO.
             X...
             ....",
        );
        let result = MinimaxSearch::default().search(&mut b);
        assert_eq!(result.best_move, Some(Move::new(1, 3)));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn blank_board_picks_first_cell() {
        // neither side can complete a line within the horizon, so every candidate ties at 0
        let mut b = Board::new();
        let result = MinimaxSearch::default().search(&mut b);
        assert_eq!(result.best_move, Some(Move::new(0, 0)));
        assert_eq!(result.score, 0);
        assert!(b.is_blank());
    }

    #[test]
    fn full_board_has_no_move() {
        let mut b = board("XXOO OOXX XXOO OOXX");
        let result = MinimaxSearch::default().search(&mut b);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, i32::MIN);
    }

    #[test]
    fn scores_are_depth_adjusted() {
        let mut won = board("OOOO XXX. X... ....");
        assert_eq!(minimax(&mut won, 3, false, i32::MIN, i32::MAX), 7);

        let mut lost = board("XXXX OOO. .... ....");
        assert_eq!(minimax(&mut lost, 2, true, i32::MIN, i32::MAX), -8);
    }

    #[test]
    fn depth_ceiling_scores_open_positions_as_zero() {
        // the computer could win on its next move, but the ceiling is already passed
        let mut b = board("OOO. XXX. .... ....");
        assert_eq!(minimax(&mut b, MAX_DEPTH + 1, true, i32::MIN, i32::MAX), 0);
        assert_eq!(minimax(&mut b, MAX_DEPTH, true, i32::MIN, i32::MAX), 10 - (MAX_DEPTH + 1));
    }

    #[test]
    fn search_leaves_board_untouched() {
        let mut rg = CustomNumberGenerator::new(2024);
        for moves in 1..14 {
            // arrange
            let mut b = random_position(&mut rg, moves);
            let before = b.clone();

            // act
            MinimaxSearch::default().search(&mut b);

            // assert
            assert_eq!(b, before);
        }
    }

    #[test]
    fn pruning_does_not_change_scores() {
        let mut rg = CustomNumberGenerator::new(31337);
        for moves in [6, 7, 8, 9, 10, 11, 12, 12, 13, 13] {
            // arrange
            let mut b = random_position(&mut rg, moves);
            let mut pruned = MinimaxSearch::builder()
                .with_observer(SearchStats::default())
                .build();
            let mut full = MinimaxSearch::builder()
                .with_alpha_beta_pruning(false)
                .with_observer(SearchStats::default())
                .build();

            // act
            let pruned_result = pruned.search(&mut b);
            let full_result = full.search(&mut b);

            // assert
            assert_eq!(pruned_result, full_result, "{b}");
            assert!(pruned.get_observer().nodes <= full.get_observer().nodes);
            assert_eq!(full.get_observer().cutoffs, 0);
            for maximizing in [true, false] {
                assert_eq!(
                    pruned.minimax(&mut b, 0, maximizing, i32::MIN, i32::MAX),
                    full.minimax(&mut b, 0, maximizing, i32::MIN, i32::MAX),
                    "{b}"
                );
            }
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let mut b = board(
            "X...
             .O..
             ..X.
             ....",
        );
        let mut pruned = MinimaxSearch::builder()
            .with_observer(SearchStats::default())
            .build();
        let mut full = MinimaxSearch::builder()
            .with_alpha_beta_pruning(false)
            .with_observer(SearchStats::default())
            .build();

        let pruned_result = pruned.search(&mut b);
        let full_result = full.search(&mut b);

        assert_eq!(pruned_result, full_result);
        assert!(pruned.get_observer().cutoffs > 0);
        assert!(pruned.get_observer().nodes < full.get_observer().nodes);
        assert_eq!(full.get_observer().max_depth, MAX_DEPTH + 1);
    }

    #[test]
    fn trace_records_every_candidate() {
        // arrange
        let mut b = board(
            "XXX.
             O...
             .O..
             ....",
        );
        let mut search = MinimaxSearch::builder()
            .with_observer(SearchTrace::new())
            .build();

        // act
        let result = search.search(&mut b);

        // assert
        let candidates = search.get_observer().candidates();
        let empties: Vec<Move> = b.empty_cells().collect();
        assert_eq!(candidates.iter().map(|(m, _)| *m).collect::<Vec<_>>(), empties);
        for (mv, score) in &candidates {
            if *mv == Move::new(0, 3) {
                assert_eq!(*score, result.score);
            } else {
                assert_eq!(*score, -9, "{mv}");
            }
        }
        assert!(search.get_observer().node_count() >= candidates.len());
    }

    #[test]
    fn trace_marks_only_cut_positions_as_pruned() {
        // arrange
        let mut b = board(
            "X...
             .O..
             ..X.
             ....",
        );
        let root_empties = b.empty_cells().count() as i32;
        let mut search = MinimaxSearch::builder()
            .with_observer(SearchTrace::new())
            .build();

        // act
        search.search(&mut b);

        // assert
        let mut pruned_nodes = 0;
        for node in search.get_observer().get_tree().nodes() {
            let value = node.value();
            // a position at depth d lies d + 1 trial moves below the searched board
            let empties = (root_empties - (value.depth + 1)) as usize;
            let children = node.children().count();
            if value.pruned {
                pruned_nodes += 1;
                assert!(children < empties, "{:?} at depth {}", value.mv, value.depth);
            } else {
                assert!(children == 0 || children == empties, "{:?}", value.mv);
            }
        }
        assert!(pruned_nodes > 0);
        assert!(!search.get_observer().get_root().value().pruned);
    }
}
