use anyhow::Context;
use clap::Parser;
use greenfelt_engine::storage::{FileStorage, MemoryStorage, Storage};
use greenfelt_simulator::{Game, Simulator};
use greenfelt_types::casino::Chips;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game to run.
    #[arg(short, long, value_enum, default_value_t = Game::Blackjack)]
    game: Game,

    /// Rounds to play.
    #[arg(short, long, default_value_t = 10)]
    rounds: u32,

    /// Chips staked per round.
    #[arg(short, long, default_value_t = 10.0)]
    bet: f64,

    /// RNG seed for a reproducible run.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Path of the persisted ledger record (in-memory when omitted).
    #[arg(long)]
    state: Option<std::path::PathBuf>,

    /// Player name for the leaderboard.
    #[arg(long, default_value = "anon")]
    name: String,

    /// Player emoji for the leaderboard.
    #[arg(long, default_value = "")]
    emoji: String,
}

fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let bet = Chips::from_f64(args.bet).context("bet must be a finite chip amount")?;
    if bet.is_zero() {
        anyhow::bail!("bet must be positive");
    }

    let storage: Box<dyn Storage> = match &args.state {
        Some(path) => Box::new(FileStorage::new(path.clone())),
        None => Box::new(MemoryStorage::new()),
    };

    let mut simulator = Simulator::new(storage, args.seed);
    simulator.set_identity(&args.name, &args.emoji);

    for round in 1..=args.rounds {
        info!(round, game = ?args.game, "playing round");
        simulator.play_round(args.game, bet);
        if simulator.ledger().borrow().balance() < bet {
            info!("bankroll exhausted");
            break;
        }
    }

    simulator.record_score();
    info!(balance = %simulator.ledger().borrow().balance(), "final bankroll");
    Ok(())
}
