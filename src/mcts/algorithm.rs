//! Search driver: one-shot parallel evaluation of every candidate first
//! move, followed by the sequential select/expand/simulate/backpropagate
//! loop, then arg-max over mean win rates per move label.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};
use rayon::prelude::*;

use crate::game::direction::Direction;
use crate::game::game_state::GameState;
use crate::mcts::node::{NodeId, SearchTree, ROOT};
use crate::mcts::search_options::SearchOptions;
use crate::mcts::selection::select_child;
use crate::{Result, Twenty48Error};

/// Monte Carlo agent choosing one move per call from a fresh search tree.
pub struct MonteCarloAgent {
    options: SearchOptions,
}

impl MonteCarloAgent {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Runs a full search from `state` and returns the move with the best
    /// mean win rate.
    ///
    /// Fails when `state` has no valid move left. The search tree is
    /// scoped to this call and discarded before returning.
    pub fn select_move<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        rng: &mut R,
    ) -> Result<Direction> {
        let tree = self.run_search(state, rng)?;
        Ok(best_move_by_mean_win_rate(&tree)
            .expect("a playable state yields at least one root child"))
    }

    fn run_search<R: Rng + ?Sized>(&self, state: &GameState, rng: &mut R) -> Result<SearchTree> {
        if !state.can_play() {
            return Err(Twenty48Error::Search("game is over".to_string()));
        }

        let mut tree = SearchTree::with_root(state.clone());

        let start = Instant::now();
        tree.add_all_children(rng);

        // Scatter/gather: one rollout per root child, each task seeded from
        // the driver RNG and owning a private copy of its state. Results
        // are joined in child order before anything else runs.
        let tasks: Vec<(NodeId, GameState, u64)> = tree
            .get(ROOT)
            .children
            .iter()
            .map(|&child| (child, tree.get(child).state.clone(), rng.random::<u64>()))
            .collect();
        let rewards: Vec<(NodeId, bool)> = tasks
            .par_iter()
            .map(|(child, child_state, seed)| {
                let mut task_rng = StdRng::seed_from_u64(*seed);
                (*child, simulate_game(child_state, &mut task_rng))
            })
            .collect();
        for (child, won) in rewards {
            tree.get_mut(child).record(won);
            tree.get_mut(ROOT).record(won);
        }
        log::debug!(
            "root pre-expansion finished in {:.3}s",
            start.elapsed().as_secs_f64()
        );

        // Sequential budgeted loop: statistics read by UCT selection must
        // reflect every prior iteration's writes.
        let mut uct_descents = 0usize;
        let loop_start = Instant::now();
        while loop_start.elapsed() < self.options.duration {
            let mut node = ROOT;

            while !tree.get(node).can_add_child() && !tree.get(node).is_leaf() {
                node = select_child(&tree, node, self.options.exploration_weight);
                if node != ROOT {
                    uct_descents += 1;
                }
            }

            if tree.get(node).can_add_child() {
                node = tree.add_random_child(node, rng);
            }

            let won = simulate_game(&tree.get(node).state, rng);
            tree.backpropagate(node, won);
        }
        log::debug!("uct descents: {}", uct_descents);

        Ok(tree)
    }
}

/// Plays a uniformly random game out from `state` and reports whether the
/// terminal position is a win. Termination comes from the engine contract:
/// the board is finite and valid-move sets eventually empty out.
pub fn simulate_game<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> bool {
    let mut state = state.clone();

    if state.is_post_spawn() {
        state = state.random_spawn(rng);
    }

    while state.can_play() {
        let moves = state.valid_moves();
        let mv = moves[rng.random_range(0..moves.len())];

        state = state.apply_move(mv);
        if state.can_play() {
            state = state.random_spawn(rng);
        }
    }

    let won = state.is_win();
    if won {
        log::debug!("rollout win:\n{:?}", state.grid);
    }
    won
}

/// Mean win rate per distinct root move label, arg-max with
/// first-encountered tie-breaking. Several children may share a label once
/// spawn outcomes branch before the move is applied; their rates are
/// averaged.
fn best_move_by_mean_win_rate(tree: &SearchTree) -> Option<Direction> {
    let mut grouped: Vec<(Direction, Vec<f64>)> = Vec::new();
    for &child_id in &tree.get(ROOT).children {
        let child = tree.get(child_id);
        let mv = child.mv.expect("root children always carry a move label");
        match grouped.iter_mut().find(|(label, _)| *label == mv) {
            Some((_, rates)) => rates.push(child.win_rate()),
            None => grouped.push((mv, vec![child.win_rate()])),
        }
    }

    let mut best = None;
    let mut max_mean = -1.0;
    for (label, rates) in &grouped {
        let mean = rates.iter().sum::<f64>() / rates.len() as f64;
        if mean > max_mean {
            max_mean = mean;
            best = Some(*label);
        }
    }
    best
}
