use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use dfagame::session::{Outcome, Session, HELP};
use dfagame::{BoardConfig, Game, GameConfig};

/// Build a DFA on a grid that accepts exactly the target language.
#[derive(Parser)]
#[command(name = "dfagame")]
#[command(version)]
struct Cli {
    /// Target regular expression over {0, 1}
    #[arg(short, long, default_value = "01")]
    regex: String,

    /// Rows and columns on the board
    #[arg(short, long, default_value_t = 5)]
    grid_size: i32,

    /// Shortest string length the checker tries up to
    #[arg(long, default_value_t = 13)]
    min_bound: usize,

    /// Longest string length the checker enumerates; beyond it the check is
    /// an exact product search
    #[arg(long, default_value_t = 16)]
    max_bound: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = GameConfig {
        board: BoardConfig {
            grid_size: cli.grid_size,
            min_bound: cli.min_bound,
            max_bound: cli.max_bound,
            ..BoardConfig::default()
        },
        target: cli.regex,
    };
    let game = Game::new(config).context("could not start the game")?;
    println!("Regex: {}", game.target());
    println!("{}", HELP);

    let mut session = Session::new(game);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        match session.handle_line(&line) {
            Outcome::Continue(msg) if msg.is_empty() => {}
            Outcome::Continue(msg) => writeln!(stdout, "{}", msg)?,
            Outcome::Quit => break,
        }
        stdout.flush()?;
    }
    Ok(())
}
