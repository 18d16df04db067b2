use anyhow::Context;
use clap::Parser;
use highroller_execution::{FileStore, GameEngine, GameRng, Memory, Store};
use highroller_simulator::{command::HELP, Bet, Command, Config, Simulator};
use highroller_types::casino::{GameState, Phase, WinStatus, RISK_COST, WIN_TARGET};
use std::{fs, path::PathBuf};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    data_dir: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    /// Play without saving anything.
    #[arg(long)]
    memory: bool,

    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let file = fs::read_to_string(path)
                .with_context(|| format!("could not read config file {}", path.display()))?;
            serde_yaml::from_str(&file).context("could not parse config file")?
        }
        None => Config::default(),
    };

    // Flags override the file
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone();
    }
    Ok(config)
}

fn print_state(state: &GameState) {
    println!("balance: {}", state.balance);
    match (state.phase(), state.win) {
        (Phase::Dead, _) => println!("You are dead. Type 'restart' to play again."),
        (Phase::Active, WinStatus::Pending) => {
            println!("You reached {WIN_TARGET} tokens! Type 'ack' to keep playing.")
        }
        (Phase::Active, _) => {
            println!("max bet: {}", state.max_bet());
            if state.can_play_risk() {
                println!("risk available ({RISK_COST} tokens)");
            }
        }
    }
}

fn print_history(state: &GameState) {
    if state.history.is_empty() {
        println!("No plays yet.");
        return;
    }
    for entry in state.history.newest_first() {
        println!("  {entry}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();
    let config = load_config(&args)?
        .validate()
        .context("invalid configuration")?;

    // Create logger (stdout is reserved for the game)
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    // Open the table
    let rng = match config.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let store: Box<dyn Store + Send> = if args.memory {
        Box::new(Memory::default())
    } else {
        let store = FileStore::open(&config.data_dir).with_context(|| {
            format!("failed to open data directory {}", config.data_dir.display())
        })?;
        info!(directory = %store.directory().display(), "opened data directory");
        Box::new(store)
    };
    let simulator = Simulator::new(GameEngine::new(store, rng), config.pacing);
    if config.demo_history && simulator.seed_demo_history() {
        info!("seeded demo history");
    }

    // Print updates as they arrive
    let mut updates = simulator.subscribe();
    tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(update) => println!("{update}"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "update printer fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("HighRoller: reach {WIN_TARGET} tokens. Type 'help' for commands.");
    print_state(&simulator.state());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let command = match input.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Spin(bet) => {
                let bet = match bet {
                    Bet::Tokens(tokens) => tokens,
                    Bet::Max => i64::try_from(simulator.state().max_bet()).unwrap_or(i64::MAX),
                };
                // Refusals reach the printer as updates
                let _ = simulator.spin(bet).await;
            }
            Command::Auto { bet, count } => {
                if simulator.start_autoplay(bet, count).is_ok() {
                    println!("Auto: {count} spins at {bet}.");
                }
            }
            Command::Stop => {
                if !simulator.cancel_autoplay() {
                    println!("Autoplay is not running.");
                }
            }
            Command::Risk => {
                println!("Pay {RISK_COST} tokens to roll the die? A 1 takes everything. (y/n)");
                let answer = lines.next_line().await.context("failed to read stdin")?;
                let confirmed = answer.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y"));
                if !confirmed {
                    println!("Maybe next time.");
                } else {
                    let _ = simulator.play_risk().await;
                }
            }
            Command::Ack => {
                if simulator.acknowledge_win().is_ok() {
                    println!("Keep playing!");
                }
            }
            Command::Reset => simulator.reset(),
            Command::State => {
                print_state(&simulator.state());
                let autoplay = simulator.autoplay();
                if autoplay.is_active() {
                    println!("autoplay: {} spins left", autoplay.remaining());
                }
            }
            Command::History => print_history(&simulator.state()),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    simulator.cancel_autoplay();
    info!(balance = simulator.state().balance, "leaving the table");
    Ok(())
}
