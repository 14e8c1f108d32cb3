use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use judge::{load_deck, load_engine_config, play_game, HumanModel, Recorder, SimulatedHuman};
use pairs::{Deck, Engine, EngineConfig, Outcome, Recording};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Path to an engine config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a deck JSON file (an array of cards); the built-in deck is used otherwise
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// How the simulated human plays
    #[arg(long, value_enum, default_value_t = HumanModel::Memory)]
    human: HumanModel,

    /// Record every game's presentation events as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct MatchScore {
    human_wins: usize,
    computer_wins: usize,
    draws: usize,
    total_duration: Duration,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let config = match &args.config {
        Some(path) => load_engine_config(path)?,
        None => EngineConfig::default(),
    };
    let deck = match &args.deck {
        Some(path) => load_deck(path)?,
        None => Deck::standard(),
    };
    info!(pairs = deck.num_pairs(), human = ?args.human, "Starting");

    let engine_rng = StdRng::seed_from_u64(rng.gen());
    let mut engine = Engine::new(deck, config, Recording::new(), engine_rng);
    let mut human = SimulatedHuman::new(args.human, StdRng::seed_from_u64(rng.gen()));

    let mut match_score = MatchScore::default();
    for game_idx in 0..args.num_games {
        let summary = play_game(&mut engine, &mut human, &mut recorder)?;
        debug!(
            game_idx,
            human = summary.score.human,
            computer = summary.score.computer,
            "{}",
            summary.outcome
        );
        match summary.outcome {
            Outcome::HumanWins => match_score.human_wins += 1,
            Outcome::ComputerWins => match_score.computer_wins += 1,
            Outcome::Draw => match_score.draws += 1,
        }
        match_score.total_duration += summary.duration;
    }

    let average_secs = if args.num_games > 0 {
        match_score.total_duration.as_secs_f32() / args.num_games as f32
    } else {
        0.0
    };
    eprintln!(
        "End result:\n- {} wins by the human ({:?})\n- {} wins by the computer\n- {} draws\n- {:.1}s per game on average",
        match_score.human_wins,
        args.human,
        match_score.computer_wins,
        match_score.draws,
        average_secs
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
