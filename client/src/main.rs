mod broadcaster;
mod commands;
mod config;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use tictactoe_common::games::tictactoe::{
    GameMode, LowestEmptyOpponent, OpponentPolicy, RandomOpponent, TicTacToeEngine,
    TicTacToeSession, TicTacToeSessionSettings,
};
use tictactoe_common::config::Validate;
use tictactoe_common::{log, logger};
use tokio::io::{AsyncBufReadExt, BufReader};

use broadcaster::ConsoleBroadcaster;
use commands::{ClientCommand, HELP_TEXT, parse_command};
use config::{Config, get_config_manager};
use ui::Controls;

type ConsoleSession = TicTacToeSession<Box<dyn OpponentPolicy + Send>, ConsoleBroadcaster>;

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Play tic-tac-toe in the terminal")]
struct Args {
    /// Start immediately in this mode (two or single)
    #[arg(long)]
    mode: Option<GameMode>,

    /// Delay before the computer answers, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed for the computer's random moves
    #[arg(long)]
    seed: Option<u64>,

    /// Computer always takes the lowest free cell
    #[arg(long)]
    deterministic_opponent: bool,

    /// Config file path (defaults to a file next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn effective_config(args: &Args, loaded: Config) -> Config {
    Config {
        tictactoe: TicTacToeSessionSettings {
            default_mode: args.mode.or(loaded.tictactoe.default_mode),
            computer_delay_ms: args.delay_ms.unwrap_or(loaded.tictactoe.computer_delay_ms),
            opponent_seed: args.seed.or(loaded.tictactoe.opponent_seed),
        },
        use_log_prefix: args.use_log_prefix || loaded.use_log_prefix,
    }
}

fn build_opponent(args: &Args, settings: &TicTacToeSessionSettings) -> Box<dyn OpponentPolicy + Send> {
    if args.deterministic_opponent {
        return Box::new(LowestEmptyOpponent);
    }
    let opponent = match settings.opponent_seed {
        Some(seed) => RandomOpponent::new(seed),
        None => RandomOpponent::from_random(),
    };
    log!("Computer opponent seed: {}", opponent.seed());
    Box::new(opponent)
}

async fn handle_command(session: &ConsoleSession, command: ClientCommand) -> bool {
    let controls = Controls::from_snapshot(&session.snapshot().await);

    let result = match command {
        ClientCommand::Start(mode) if !controls.is_mode_enabled(mode) => {
            Err(format!("Already playing {}; use 'restart' for a new round", mode))
        }
        ClientCommand::Start(mode) => {
            session.start(mode).await;
            Ok(())
        }
        ClientCommand::Restart if !controls.restart_enabled => {
            Err("Start a game first".to_string())
        }
        ClientCommand::Restart => session.restart().await,
        ClientCommand::PlaceMark(index) if !controls.is_cell_enabled(index) => {
            Err(format!("Cell {} is not available right now", index))
        }
        ClientCommand::PlaceMark(index) => session.apply_human_move(index).await,
        ClientCommand::Help => {
            println!("{}", HELP_TEXT);
            Ok(())
        }
        ClientCommand::Quit => return false,
    };

    if let Err(e) = result {
        println!("{}", e);
    }
    true
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config.clone());
    let loaded = config_manager.get_config().unwrap_or_else(|e| {
        eprintln!("{}; using defaults", e);
        Config::default()
    });
    let config = effective_config(&args, loaded);
    config.validate()?;

    let prefix = config.use_log_prefix.then(|| "Client".to_string());
    logger::init_logger(prefix);

    if args.save_config {
        match config_manager.set_config(&config) {
            Ok(()) => log!("Saved settings"),
            Err(e) => eprintln!("{}", e),
        }
    }

    let settings = &config.tictactoe;
    let engine = TicTacToeEngine::new(build_opponent(&args, settings));
    let session = TicTacToeSession::new(engine, settings.computer_delay(), ConsoleBroadcaster);

    println!("{}", HELP_TEXT);
    match settings.default_mode {
        Some(mode) => session.start(mode).await,
        None => println!("\n{}", ui::status_text(&session.snapshot().await)),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if !handle_command(&session, command).await {
                    break;
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    session.cancel_pending_computer_turn().await;
    log!("Client shut down");
    Ok(())
}
