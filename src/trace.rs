use crate::Player;
use crate::board::{Board, Move};
use ego_tree::{NodeId, NodeRef, Tree};

/// Hooks called by [`MinimaxSearch`](crate::minimax::MinimaxSearch) while it explores.
///
/// Every method has an empty default so observers only implement what they need. The calls
/// always nest: each `on_enter` is matched by exactly one `on_exit`.
pub trait SearchObserver {
    /// A new top-level search is starting from `board`.
    fn on_search_start(&mut self, _board: &Board) {}

    /// `player` has just placed a trial mark on `mv`; the resulting position is about to be
    /// searched at `depth`.
    fn on_enter(&mut self, _mv: Move, _player: Player, _depth: i32) {}

    /// The position entered last has been scored and its trial mark removed.
    fn on_exit(&mut self, _score: i32) {}

    /// The remaining moves of the position at `depth` are being skipped because
    /// `beta <= alpha`.
    fn on_cutoff(&mut self, _depth: i32) {}
}

/// Observer that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl SearchObserver for NoTrace {}

/// Counts what a search explored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchStats {
    /// Trial moves placed.
    pub nodes: u64,
    /// Times the remaining moves of a position were skipped.
    pub cutoffs: u64,
    /// Deepest depth a trial move was searched at.
    pub max_depth: i32,
}

impl SearchObserver for SearchStats {
    fn on_search_start(&mut self, _board: &Board) {
        *self = SearchStats::default();
    }

    fn on_enter(&mut self, _mv: Move, _player: Player, depth: i32) {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    fn on_cutoff(&mut self, _depth: i32) {
        self.cutoffs += 1;
    }
}

/// A single explored position in a [`SearchTrace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceNode {
    /// The trial move that led here. `None` for the root.
    pub mv: Option<Move>,
    /// Who made the trial move. `None` for the root.
    pub player: Option<Player>,
    /// Depth the position was searched at. The root sits at `-1`.
    pub depth: i32,
    /// The value returned for this position. `None` while it is being searched.
    pub score: Option<i32>,
    /// Whether some of this position's moves were skipped by a cutoff.
    pub pruned: bool,
}

impl TraceNode {
    fn root() -> Self {
        Self {
            mv: None,
            player: None,
            depth: -1,
            score: None,
            pruned: false,
        }
    }
}

/// Records the explored part of the game tree of the last search.
///
/// Only moves and scores are stored; the positions themselves can be rebuilt by replaying the
/// moves from the root.
#[derive(Debug, Clone)]
pub struct SearchTrace {
    tree: Tree<TraceNode>,
    path: Vec<NodeId>,
}

impl Default for SearchTrace {
    fn default() -> Self {
        SearchTrace::new()
    }
}

impl SearchTrace {
    pub fn new() -> Self {
        let tree = Tree::new(TraceNode::root());
        let root_id = tree.root().id();
        Self {
            tree,
            path: vec![root_id],
        }
    }

    /// Returns an immutable reference to the recorded tree.
    pub fn get_tree(&self) -> &Tree<TraceNode> {
        &self.tree
    }

    pub fn get_root(&self) -> NodeRef<'_, TraceNode> {
        self.tree.root()
    }

    /// Number of recorded trial moves.
    pub fn node_count(&self) -> usize {
        self.tree.nodes().count() - 1
    }

    /// The computer's candidate moves at the root with the score each one received, in the
    /// order they were searched.
    pub fn candidates(&self) -> Vec<(Move, i32)> {
        self.tree
            .root()
            .children()
            .filter_map(|child| {
                let node = child.value();
                Some((node.mv?, node.score?))
            })
            .collect()
    }

    fn current(&self) -> NodeId {
        self.path.last().copied().unwrap_or_else(|| self.tree.root().id())
    }
}

impl SearchObserver for SearchTrace {
    fn on_search_start(&mut self, _board: &Board) {
        *self = SearchTrace::new();
    }

    fn on_enter(&mut self, mv: Move, player: Player, depth: i32) {
        let parent = self.current();
        if let Some(mut node) = self.tree.get_mut(parent) {
            let child = node.append(TraceNode {
                mv: Some(mv),
                player: Some(player),
                depth,
                score: None,
                pruned: false,
            });
            self.path.push(child.id());
        }
    }

    fn on_exit(&mut self, score: i32) {
        if self.path.len() <= 1 {
            return;
        }
        if let Some(id) = self.path.pop() {
            if let Some(mut node) = self.tree.get_mut(id) {
                node.value().score = Some(score);
            }
        }
    }

    fn on_cutoff(&mut self, _depth: i32) {
        let id = self.current();
        if let Some(mut node) = self.tree.get_mut(id) {
            node.value().pruned = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_nests_enter_and_exit() {
        // arrange
        let mut trace = SearchTrace::new();

        // act
        trace.on_enter(Move::new(0, 0), Player::Computer, 0);
        trace.on_enter(Move::new(0, 1), Player::Human, 1);
        trace.on_exit(-9);
        trace.on_enter(Move::new(0, 2), Player::Human, 1);
        trace.on_exit(-9);
        trace.on_cutoff(0);
        trace.on_exit(-9);
        trace.on_enter(Move::new(0, 1), Player::Computer, 0);
        trace.on_exit(0);

        // assert
        assert_eq!(trace.node_count(), 4);
        assert_eq!(
            trace.candidates(),
            vec![(Move::new(0, 0), -9), (Move::new(0, 1), 0)]
        );
        let first = trace.get_root().first_child().unwrap();
        assert!(first.value().pruned);
        assert_eq!(first.children().count(), 2);
        assert!(first.children().all(|child| !child.value().pruned));
        assert_eq!(first.first_child().unwrap().value().depth, 1);
    }

    #[test]
    fn unmatched_exit_keeps_root() {
        let mut trace = SearchTrace::new();
        trace.on_exit(3);
        assert_eq!(trace.node_count(), 0);
        assert_eq!(trace.get_root().value().score, None);
    }

    #[test]
    fn stats_reset_on_search_start() {
        let mut stats = SearchStats::default();
        stats.on_enter(Move::new(1, 1), Player::Human, 3);
        stats.on_cutoff(2);
        assert_eq!(
            stats,
            SearchStats {
                nodes: 1,
                cutoffs: 1,
                max_depth: 3
            }
        );

        stats.on_search_start(&Board::new());
        assert_eq!(stats, SearchStats::default());
    }
}
