extern crate pelletbot;

use std::io;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pelletbot::{error::Result, join_commands, Game, InputReader, Ranking, TargetSelector};

/// Grab the pellets as fast as you can!
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// How competing pellets are ranked.
    #[arg(long, value_enum, default_value_t = Ranking::Nearest)]
    ranking: Ranking,
}

fn run(args: Args) -> Result<()> {
    let stdin = io::stdin();
    let mut reader = InputReader::new(stdin.lock());

    let setup = reader.read_setup()?;
    let mut game = Game::from_setup(&setup, TargetSelector::new(args.ranking))?;

    // game loop
    while let Some(turn) = reader.read_turn()? {
        let commands = game.play(turn);
        println!("{}", join_commands(&commands));
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    if let Err(err) = run(args) {
        error!(%err, "bot stopped");
        std::process::exit(1);
    }
}
