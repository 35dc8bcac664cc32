//! Arena-backed search tree for Monte Carlo Tree Search.
//!
//! Nodes live in a [`SearchTree`] scoped to one move decision. Parent links
//! are arena indices, so the tree forms a simple forest without ownership
//! cycles and is freed wholesale when the driver returns.

use rand::Rng;
use rand::RngExt;

use crate::game::direction::Direction;
use crate::game::game_state::GameState;

pub type NodeId = usize;

/// Arena index of the root node.
pub const ROOT: NodeId = 0;

/// One node of the search tree: a state snapshot plus visit statistics.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// State snapshot owned by this node. Never mutated after creation,
    /// with the single exception of the root respawn in
    /// [`SearchTree::add_all_children`].
    pub state: GameState,
    /// Arena index of the parent; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Child ids in insertion order. Grow-only.
    pub children: Vec<NodeId>,
    /// Move that produced this node from its parent; `None` for the root.
    pub mv: Option<Direction>,
    /// Number of rollouts that updated this node.
    pub n_games: usize,
    /// Sum of rollout outcomes, 1.0 per win.
    pub wins: f64,
    /// Valid moves not yet materialized as children.
    unexpanded: Vec<Direction>,
}

impl SearchNode {
    fn new(state: GameState, parent: Option<NodeId>, mv: Option<Direction>) -> SearchNode {
        let unexpanded = state.valid_moves();
        SearchNode {
            state,
            parent,
            children: Vec::new(),
            mv,
            n_games: 0,
            wins: 0.0,
            unexpanded,
        }
    }

    pub fn record(&mut self, won: bool) {
        self.n_games += 1;
        if won {
            self.wins += 1.0;
        }
    }

    /// Mean rollout outcome of this node.
    ///
    /// # Panics
    /// Panics on a node that has never been recorded; the driver records
    /// every node right after creation, so a read here always follows a
    /// write.
    pub fn win_rate(&self) -> f64 {
        assert!(self.n_games > 0, "win_rate read on an unvisited node");
        self.wins / self.n_games as f64
    }

    pub fn can_add_child(&self) -> bool {
        !self.unexpanded.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Exclusive owner of all nodes created during one move decision.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn with_root(state: GameState) -> SearchTree {
        SearchTree {
            nodes: vec![SearchNode::new(state, None, None)],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id]
    }

    /// Materializes every candidate first move as a root child, so each can
    /// be evaluated once before the selection loop starts. A root carrying
    /// a post-spawn state is first replaced by a fresh spawn.
    pub fn add_all_children<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.nodes[ROOT].state.is_post_spawn() {
            self.nodes[ROOT].state = self.nodes[ROOT].state.random_spawn(rng);
        }

        let moves = self.nodes[ROOT].state.valid_moves();
        self.nodes[ROOT].unexpanded.clear();

        for mv in moves {
            let child_state = self.nodes[ROOT].state.apply_move(mv);
            self.push_child(ROOT, mv, child_state);
        }
    }

    /// Expands one uniformly random unexpanded move of `id` and returns the
    /// new child.
    ///
    /// # Panics
    /// Panics if `id` has no unexpanded move left.
    pub fn add_random_child<R: Rng + ?Sized>(&mut self, id: NodeId, rng: &mut R) -> NodeId {
        let node = &mut self.nodes[id];
        assert!(
            !node.unexpanded.is_empty(),
            "add_random_child called with no unexpanded moves"
        );

        let pick = rng.random_range(0..node.unexpanded.len());
        let mv = node.unexpanded.swap_remove(pick);
        let child_state = node.state.apply_move(mv);

        self.push_child(id, mv, child_state)
    }

    /// Records `won` on `id` and every ancestor up to and including the
    /// root.
    pub fn backpropagate(&mut self, id: NodeId, won: bool) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            self.nodes[node_id].record(won);
            current = self.nodes[node_id].parent;
        }
    }

    fn push_child(&mut self, parent: NodeId, mv: Direction, state: GameState) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SearchNode::new(state, Some(parent), Some(mv)));
        self.nodes[parent].children.push(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::game_state::Transition;
    use crate::game::grid::Grid;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A single tile in the top-left corner: exactly Down and Right are
    /// valid. The `Shift` tag keeps `add_all_children` from respawning.
    fn two_move_state() -> GameState {
        let mut grid = Grid::empty();
        grid.cells[0][0] = 2;
        GameState {
            grid,
            transition: Transition::Shift(Direction::Left),
        }
    }

    #[test]
    fn test_add_all_children_one_child_per_valid_move() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = two_move_state();
        let expected = state.valid_moves();

        let mut tree = SearchTree::with_root(state);
        tree.add_all_children(&mut rng);

        let root = tree.get(ROOT);
        assert_eq!(root.children.len(), expected.len());
        assert!(!root.can_add_child());

        let labels: Vec<Direction> = root
            .children
            .iter()
            .map(|&child| tree.get(child).mv.unwrap())
            .collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_add_all_children_respawns_a_post_spawn_root() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::empty();
        grid.cells[0][0] = 2;
        let state = GameState {
            grid,
            transition: Transition::Spawn,
        };

        let mut tree = SearchTree::with_root(state);
        tree.add_all_children(&mut rng);

        let filled = tree
            .get(ROOT)
            .state
            .board_encoding()
            .into_iter()
            .filter(|&value| value != 0)
            .count();
        assert_eq!(filled, 2);
    }

    #[test]
    fn test_add_random_child_consumes_unexpanded_moves() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut tree = SearchTree::with_root(two_move_state());

        assert!(tree.get(ROOT).can_add_child());
        let first = tree.add_random_child(ROOT, &mut rng);
        assert!(tree.get(ROOT).can_add_child());
        let second = tree.add_random_child(ROOT, &mut rng);
        assert!(!tree.get(ROOT).can_add_child());

        assert_eq!(tree.get(ROOT).children, vec![first, second]);
        assert_ne!(tree.get(first).mv, tree.get(second).mv);
        assert_eq!(tree.get(first).parent, Some(ROOT));
    }

    #[test]
    #[should_panic(expected = "no unexpanded moves")]
    fn test_add_random_child_panics_when_exhausted() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut tree = SearchTree::with_root(two_move_state());

        tree.add_random_child(ROOT, &mut rng);
        tree.add_random_child(ROOT, &mut rng);
        tree.add_random_child(ROOT, &mut rng);
    }

    #[test]
    fn test_record_keeps_wins_below_visits() {
        let mut tree = SearchTree::with_root(two_move_state());

        for won in [true, true, false, true, false] {
            tree.get_mut(ROOT).record(won);
        }

        let root = tree.get(ROOT);
        assert_eq!(root.n_games, 5);
        assert!(root.wins <= root.n_games as f64);
        assert!((root.win_rate() - 0.6).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "unvisited")]
    fn test_win_rate_panics_before_first_record() {
        let tree = SearchTree::with_root(two_move_state());
        tree.get(ROOT).win_rate();
    }

    #[test]
    fn test_backpropagate_updates_the_full_ancestor_chain_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut tree = SearchTree::with_root(two_move_state());

        let child = tree.add_random_child(ROOT, &mut rng);
        let sibling = tree.add_random_child(ROOT, &mut rng);
        let grandchild = tree.add_random_child(child, &mut rng);

        tree.backpropagate(grandchild, true);

        // depth 2: exactly the node and its two ancestors, once each
        assert_eq!(tree.get(grandchild).n_games, 1);
        assert_eq!(tree.get(child).n_games, 1);
        assert_eq!(tree.get(ROOT).n_games, 1);
        assert_eq!(tree.get(sibling).n_games, 0);

        tree.backpropagate(grandchild, false);
        assert_eq!(tree.get(grandchild).n_games, 2);
        assert_eq!(tree.get(ROOT).n_games, 2);
        assert!((tree.get(ROOT).win_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_leaf_status_follows_children() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut tree = SearchTree::with_root(two_move_state());

        assert!(tree.get(ROOT).is_leaf());
        tree.add_random_child(ROOT, &mut rng);
        assert!(!tree.get(ROOT).is_leaf());
    }
}
