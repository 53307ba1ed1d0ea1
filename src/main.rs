// main.rs
use clap::Parser;
use risky::console::{Console, TerminalConsole};
use risky::dice::RngDice;
use risky::{GameError, GameSession};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play Risk(y) at the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for dice and shuffles, to replay a game
    #[arg(long)]
    seed: Option<u64>,

    /// Log game events to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), GameError> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let dice = match args.seed {
        Some(seed) => {
            info!(seed, "using seeded dice");
            RngDice::seeded(seed)
        }
        None => RngDice::from_entropy(),
    };

    let mut console = TerminalConsole::new();
    console.write_line("===== RISK(y) =====")?;
    let mut session = GameSession::new(console, dice)?;
    let victor = session.play()?;
    let name = session
        .player(victor)
        .map_or_else(|| victor.to_string(), |player| player.name.clone());
    println!("=== Congratulations, {}! You conquered the world! ===", name);
    Ok(())
}
