//! Terminal front end for numguess.

use std::{io::BufRead, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use numguess::{
    SyncMessage, UpdateMessage,
    config::Options,
    easter_egg::Key,
    feedback::{Cue, Progress},
    game::Game,
    tunnel::Tunnel,
};
use tracing_subscriber::EnvFilter;

/// Width of the attempts bar in characters
const BAR_WIDTH: u32 = 20;

/// Guess the secret number in as few attempts as you can
#[derive(Parser, Debug)]
#[command(name = "numguess")]
#[command(about = "Single-player number guessing game", long_about = None)]
#[command(version)]
struct Cli {
    /// Upper bound of the guess range (overrides the config file)
    #[arg(short, long)]
    max: Option<u32>,

    /// Seed for the random source, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a JSON options file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// One line of player input
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    New,
    Max(Option<u32>),
    Key(Key),
    Guess(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some("quit" | "exit"), None) => Command::Quit,
        (Some("new"), None) => Command::New,
        (Some("max"), value) => Command::Max(value.and_then(|v| v.parse().ok())),
        (Some("key"), Some(name)) => Command::Key(match name {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "b" => Key::B,
            "a" => Key::A,
            _ => Key::Other,
        }),
        _ => Command::Guess(line),
    }
}

fn progress_bar(progress: Progress) -> String {
    let filled = (progress.used * BAR_WIDTH)
        .checked_div(progress.max)
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled as usize),
        "-".repeat((BAR_WIDTH - filled) as usize),
        progress.used,
        progress.max
    )
}

/// Prints game messages to stdout
struct TerminalTunnel;

impl Tunnel for TerminalTunnel {
    fn send_message(&self, message: &UpdateMessage) {
        match message {
            UpdateMessage::NewGame {
                range_max,
                attempts_max,
            } => println!(
                "New game: guess a number between 1 and {range_max}. You have {attempts_max} attempts."
            ),
            UpdateMessage::Feedback(feedback) => {
                let shake = if feedback.cues.contains(&Cue::Shake) { "!" } else { "" };
                println!("{} {}{shake}", feedback.icon, feedback.message);
                if feedback.cues.contains(&Cue::Confetti) {
                    println!("🎊 🎊 🎊");
                }
            }
            UpdateMessage::Progress { progress, band } => {
                println!("Attempts {} ({band:?})", progress_bar(*progress));
            }
            UpdateMessage::InputLocked(true) => {
                println!("Type `new` to play again or `quit` to leave.");
            }
            // Lines are checked on submit, there is no live typing to flag.
            UpdateMessage::InputLocked(false) | UpdateMessage::InputValid(_) => {}
            UpdateMessage::EasterEgg(message) => println!("{message}"),
        }
    }

    fn send_state(&self, state: &SyncMessage) {
        println!(
            "Range 1 - {}. Attempts {}",
            state.session.range_max,
            progress_bar(state.progress)
        );
        println!("{} {}", state.feedback.icon, state.feedback.message);
    }

    fn close(self) {
        println!("Bye!");
    }
}

fn load_options(cli: &Cli) -> Result<Options> {
    let options = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading options from {}", path.display()))?;
            Options::from_json(&json).context("loading options")?
        }
        None => Options::default(),
    };

    match cli.max {
        Some(range_max) => Options::new(range_max).context("applying --max"),
        None => Ok(options),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = load_options(&cli)?;
    let rng = cli.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

    let mut game = Game::new(options, rng)?;
    let tunnel = TerminalTunnel;
    game.send_sync(&tunnel);

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading input")?;
        let result = match parse_command(&line) {
            Command::Quit => break,
            Command::New => game.start_new_game(&tunnel),
            Command::Max(Some(range_max)) => game.set_range_max(range_max, &tunnel),
            Command::Max(None) => {
                println!("Usage: max <number>");
                Ok(())
            }
            Command::Key(key) => {
                game.key_pressed(key, &tunnel);
                Ok(())
            }
            Command::Guess(input) => game.submit_input(input, &tunnel).map(|_| ()),
        };

        if let Err(error) = result {
            println!("⚠ {error}");
        }
    }

    tunnel.close();
    Ok(())
}
