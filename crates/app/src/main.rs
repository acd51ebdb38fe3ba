use std::fmt;
use std::sync::Arc;

use goon_core::model::Difficulty;
use services::{Clock, QuizRunner, QuizService};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt as log_fmt, prelude::*};

mod terminal;

use terminal::{BellFeedback, TerminalRenderer};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDifficulty { raw: String },
    InvalidSeed { raw: String },
    InvalidQuota { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw} (expected E, 1 or 2)")
            }
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidQuota { raw } => write!(f, "invalid --quota value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  maths-goon [play] [--difficulty <E|1|2>] [--seed <n>] [--quota <n>] [--quiet] [--json]");
    eprintln!("  maths-goon levels");
    eprintln!();
    eprintln!("Defaults for play:");
    eprintln!("  --difficulty E");
    eprintln!("  --quota 10");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GOON_DIFFICULTY, GOON_SEED, RUST_LOG");
}

fn print_levels() {
    println!("Maths Goon: answer the arithmetic questions by typing the number and pressing Enter.");
    println!();
    println!("Difficulty levels:");
    for level in Difficulty::ALL {
        println!("  {}  {}", level.code(), level.label());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Levels,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "levels" => Some(Self::Levels),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    difficulty: Difficulty,
    seed: Option<u64>,
    quota: Option<u32>,
    bell: bool,
    json: bool,
}

impl Args {
    fn parse_play(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut difficulty = std::env::var("GOON_DIFFICULTY")
            .ok()
            .and_then(|value| value.parse::<Difficulty>().ok())
            .unwrap_or_default();
        let mut seed = std::env::var("GOON_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());
        let mut quota = None;
        let mut bell = true;
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--difficulty" | "-d" => {
                    let value = require_value(args, "--difficulty")?;
                    difficulty = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDifficulty { raw: value.clone() })?;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--quota" => {
                    let value = require_value(args, "--quota")?;
                    let parsed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidQuota { raw: value.clone() })?;
                    quota = Some(parsed);
                }
                "--quiet" => bell = false,
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            difficulty,
            seed,
            quota,
            bell,
            json,
        })
    }
}

fn init_tracing() {
    // Game text owns stdout; logs go to stderr and stay quiet unless asked for.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(log_fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

/// Forwards stdin lines until EOF, then closes the channel.
fn spawn_stdin_pump() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(%err, "stdin read failed");
                    break;
                }
            }
        }
    });
    rx
}

async fn play(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = QuizService::new(Clock::system())
        .with_feedback(Arc::new(BellFeedback::new(args.bell)))
        .with_seed(args.seed);
    if let Some(quota) = args.quota {
        service = service.with_quota(quota)?;
    }

    let mut input = spawn_stdin_pump();
    let mut runner = QuizRunner::new();
    let mut renderer = TerminalRenderer::default();

    println!("Maths Goon: simple and engaging maths practice.");
    println!("{}", args.difficulty.label());

    loop {
        let mut session = service.start_session(args.difficulty);
        let Some(_results) = runner.run(&mut session, &mut input, &mut renderer).await? else {
            println!();
            return Ok(());
        };

        if args.json {
            if let Some(summary) = session.summary() {
                println!("{}", serde_json::to_string(summary)?);
            }
        }

        println!();
        print!("Play again? [y/N] ");
        let _ = std::io::Write::flush(&mut std::io::stdout());
        match input.recv().await {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            ArgsError::UnknownArg(first.to_string())
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    match cmd {
        Command::Levels => {
            print_levels();
            Ok(())
        }
        Command::Play => {
            let parsed = Args::parse_play(&mut argv.into_iter()).map_err(|e| {
                eprintln!("{e}");
                print_usage();
                e
            })?;
            tracing::debug!(?parsed, "starting");
            play(parsed).await
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
