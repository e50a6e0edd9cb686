//! Terminal front end for the BloomGarden savings tracker.
//!
//! Reads one command per line from stdin and prints the resulting progress.

use anyhow::Result;
use bloomgarden::{initialize_backend, parse_amount, AppConfig, SavingsError, ValidationError};
use shared::{ProgressSnapshot, SavingsEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  add <amount>   deposit a whole amount
  sub <amount>   withdraw a whole amount
  undo           undo the last deposit or withdrawal
  reset          delete all savings (goal flag is kept)
  status         show progress
  history        list ledger entries
  help           show this help
  quit           exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Add(i64),
    Subtract(i64),
    Undo,
    Reset,
    Status,
    History,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum CommandError {
    Unknown(String),
    Amount(ValidationError),
}

fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or("").to_lowercase();
    let rest = parts.next().unwrap_or("");

    match verb.as_str() {
        "add" | "+" => parse_amount(rest).map(Command::Add).map_err(CommandError::Amount),
        "sub" | "subtract" | "-" => parse_amount(rest).map(Command::Subtract).map_err(CommandError::Amount),
        "undo" => Ok(Command::Undo),
        "reset" => Ok(Command::Reset),
        "status" | "" => Ok(Command::Status),
        "history" => Ok(Command::History),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn print_progress(snapshot: &ProgressSnapshot) {
    println!("{}", snapshot.status_line);
    println!("{}", snapshot.message);
    if !snapshot.can_add_savings {
        println!("🌸 Goal Reached!");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::default();
    info!(database = %config.database_path.display(), goal = config.savings_goal, "Starting BloomGarden");

    let mut backend = initialize_backend(config).await?;
    let service = &mut backend.savings_service;
    let mut events = service.subscribe();

    print_progress(&service.refresh_progress().await?);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(CommandError::Unknown(verb)) => {
                println!("Unknown command '{}'. Type 'help' for commands.", verb);
                continue;
            }
            Err(CommandError::Amount(e)) => {
                println!("Oops! {}", e);
                continue;
            }
        };

        let result = match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::History => service.entries().await.map(|entries| {
                if entries.is_empty() {
                    println!("No savings yet.");
                }
                for entry in entries {
                    println!("#{:<5} {:+}", entry.id, entry.amount);
                }
            }),
            Command::Add(amount) => service.add_savings(amount).await.map(|_| ()),
            Command::Subtract(amount) => service.subtract_savings(amount).await.map(|_| ()),
            Command::Undo => service.undo_last().await.map(|_| ()),
            Command::Reset => service.reset_all().await.map(|_| ()),
            Command::Status => Ok(()),
        };

        match result {
            Ok(()) => {}
            Err(e @ SavingsError::Storage(_)) => {
                error!("Operation failed: {:#}", e);
                println!("Something went wrong saving your data. Please try again.");
                continue;
            }
            Err(e) => {
                println!("{}", e);
                continue;
            }
        }

        loop {
            match events.try_recv() {
                Ok(SavingsEvent::GoalReached { .. }) => println!("🌸 You did it! Goal achieved!"),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }

        match service.progress().await {
            Ok(snapshot) => print_progress(&snapshot),
            Err(e) => error!("Failed to load progress: {:#}", e),
        }
    }

    backend.db.close().await;
    Ok(())
}
