//! Cryptochat terminal client.
//!
//! Runs against an in-memory room directory and identity backend, optionally
//! seeded from the command line.

use std::{
    fs::File,
    io,
    path::PathBuf,
    process::ExitCode,
    sync::{Arc, Mutex},
};

use clap::Parser;
use cryptochat_app::Runtime;
use cryptochat_core::{
    IdentityError, MemoryDirectory, MemoryIdentity, Room, RoomListProvider, validate_room_name,
};
use cryptochat_tui::{TerminalDriver, TerminalError};
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Creator recorded for rooms seeded with `--room`.
const SEED_CREATOR: &str = "cryptochat";

#[derive(Parser, Debug)]
#[command(name = "cryptochat-tui", version, about = "Browse and create chat rooms")]
struct Args {
    /// Email of a demo account to sign in with at start
    #[arg(long, requires = "password")]
    email: Option<String>,

    /// Password of the demo account
    #[arg(long, requires = "email")]
    password: Option<String>,

    /// Display name of the demo account (defaults to the email's local part)
    #[arg(long, default_value = "")]
    name: String,

    /// Room to seed the directory with (repeatable)
    #[arg(long = "room", value_name = "NAME")]
    rooms: Vec<String>,

    /// File to write logs to
    #[arg(long, default_value = "cryptochat-tui.log")]
    log_file: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Error, Debug)]
enum StartupError {
    #[error("cannot open log file {path}: {source}")]
    LogFile { path: PathBuf, source: io::Error },

    #[error("invalid demo account: {0}")]
    Account(#[from] IdentityError),

    #[error(transparent)]
    Terminal(#[from] TerminalError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "cryptochat-tui failed");
            report(&err);
            ExitCode::FAILURE
        },
    }
}

async fn run(args: Args) -> Result<(), StartupError> {
    init_logging(&args)?;

    let directory = Arc::new(MemoryDirectory::with_rooms(seed_rooms(&args.rooms)));
    let identity = Arc::new(identity(&args)?);
    let provider = Arc::new(RoomListProvider::new(directory));

    info!(rooms = args.rooms.len(), signed_in = args.email.is_some(), "starting");

    let driver = TerminalDriver::new()?;
    let mut runtime = Runtime::new(driver, provider, identity);
    runtime.run().await?;
    Ok(())
}

fn init_logging(args: &Args) -> Result<(), StartupError> {
    let file = File::create(&args.log_file)
        .map_err(|source| StartupError::LogFile { path: args.log_file.clone(), source })?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn seed_rooms(names: &[String]) -> Vec<Room> {
    names
        .iter()
        .filter_map(|raw| match validate_room_name(raw) {
            Ok(name) => Some(Room::new(name, SEED_CREATOR)),
            Err(err) => {
                warn!(room = %raw, reason = err.message(), "skipping seed room");
                None
            },
        })
        .collect()
}

fn identity(args: &Args) -> Result<MemoryIdentity, IdentityError> {
    let identity = MemoryIdentity::new();
    match (&args.email, &args.password) {
        (Some(email), Some(password)) => {
            identity.with_account(email, password, &args.name)?.signed_in(email)
        },
        _ => Ok(identity),
    }
}

#[allow(clippy::print_stderr)]
fn report(err: &StartupError) {
    eprintln!("cryptochat-tui: {err}");
}
