use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use twenty48::game::GameState;
use twenty48::logging::setup_logging;
use twenty48::mcts::{MonteCarloAgent, SearchOptions};
use twenty48::recording::{Collector, LOSS_LABEL, WIN_LABEL};

#[derive(Parser, Debug)]
#[command(name = "twenty48")]
struct Config {
    /// Number of game episodes to play
    #[arg(short = 'e', long, default_value_t = 1)]
    episodes: usize,

    /// Wall-clock search budget per move, in seconds
    #[arg(short = 'd', long, default_value_t = 2)]
    duration: u64,

    /// Directory where trajectory batch files are written
    #[arg(short = 'o', long, default_value = "data")]
    output_dir: PathBuf,

    /// Completed games per batch before rotating to a fresh collector
    #[arg(long, default_value_t = 10)]
    rotate_after: usize,

    /// Safety cap on moves per episode
    #[arg(long, default_value_t = 1_000_000_000)]
    max_moves: usize,

    /// RNG seed for reproducible runs (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

/// Plays one full game, recording every decision into the collector.
fn collect_episode(
    agent: &MonteCarloAgent,
    collector: &mut Collector,
    rng: &mut StdRng,
    max_moves: usize,
) -> twenty48::Result<()> {
    let start = Instant::now();

    let mut state = GameState::new().random_spawn(rng);
    collector.begin_record();

    let mut count = 0usize;
    while state.can_play() && count < max_moves {
        let mv = agent.select_move(&state, rng)?;
        collector.add(state.board_encoding(), mv);

        state = state.apply_move(mv);
        if state.can_play() {
            state = state.random_spawn(rng);
        }

        count += 1;
        log::info!("move #{}: {}", count, mv);
    }

    let won = state.is_win();
    collector.stop_record(if won { WIN_LABEL } else { LOSS_LABEL });

    log::debug!("win: {}", won);
    log::debug!("final grid: {:?}", state.grid);
    log::debug!(
        "episode finished in {:.2} mins",
        start.elapsed().as_secs_f64() / 60.0
    );

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    let _logger = setup_logging("logs")?;

    let agent = MonteCarloAgent::new(SearchOptions::with_duration(Duration::from_secs(
        config.duration,
    )));
    let mut collector = Collector::new();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut epoch = 0usize;

    for episode in 0..config.episodes {
        log::info!("starting episode #{}", episode);

        collect_episode(&agent, &mut collector, &mut rng, config.max_moves)?;

        let batch_path = config.output_dir.join(format!("games_{}.csv", epoch));
        collector.serialize(&batch_path)?;
        log::info!(
            "serialized {} game(s) to {}",
            collector.len(),
            batch_path.display()
        );

        if collector.len() >= config.rotate_after {
            epoch += 1;
            collector = Collector::new();
        }
    }

    Ok(())
}
