//! UCT scoring and child selection.

use crate::mcts::node::{NodeId, SearchTree};

/// Default exploration weight in the UCT formula.
pub const EXPLORATION_WEIGHT: f64 = 1.5;

/// Upper-confidence score of a node among its siblings.
///
/// `total_sibling_visits` is the visit sum over all siblings at the same
/// level, recomputed at every selection step. It is at least 1 whenever
/// selection runs, because every node is recorded once right after
/// creation.
pub fn uct_score(
    win_rate: f64,
    total_sibling_visits: usize,
    node_visits: usize,
    exploration_weight: f64,
) -> f64 {
    let exploration = ((total_sibling_visits as f64).ln() / node_visits as f64).sqrt();
    win_rate + exploration_weight * exploration
}

/// Picks the child of `id` with the highest UCT score. Ties keep the first
/// child in insertion order, so selection is deterministic for a given
/// visit history. A node with no children selects itself.
pub fn select_child(tree: &SearchTree, id: NodeId, exploration_weight: f64) -> NodeId {
    let node = tree.get(id);
    if node.children.is_empty() {
        return id;
    }

    let total_games: usize = node
        .children
        .iter()
        .map(|&child| tree.get(child).n_games)
        .sum();

    let mut best = id;
    let mut max_score = f64::NEG_INFINITY;
    for &child_id in &node.children {
        let child = tree.get(child_id);
        let score = uct_score(
            child.win_rate(),
            total_games,
            child.n_games,
            exploration_weight,
        );
        if score > max_score {
            max_score = score;
            best = child_id;
        }
    }

    best
}
