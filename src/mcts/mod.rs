pub mod algorithm;
pub mod node;
pub mod search_options;
pub mod selection;

pub use algorithm::{simulate_game, MonteCarloAgent};
pub use node::{NodeId, SearchNode, SearchTree, ROOT};
pub use search_options::SearchOptions;
pub use selection::{select_child, uct_score, EXPLORATION_WEIGHT};
