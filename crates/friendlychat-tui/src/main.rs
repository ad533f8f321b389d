//! FriendlyChat TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Sign in through the modal form
//! friendlychat --log-file friendlychat.log
//!
//! # Skip the form as a returning user
//! friendlychat --user Alice --email alice@example.com
//! ```

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use friendlychat_app::{AppConfig, Credential, IdentityProvider};
use friendlychat_backend::{LocalBackend, MemoryDatabase};
use friendlychat_tui::{Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// FriendlyChat terminal client
#[derive(Parser, Debug)]
#[command(name = "friendlychat")]
#[command(about = "Single-room realtime chat in the terminal")]
#[command(version)]
struct Args {
    /// Path of the message collection
    #[arg(long, default_value = friendlychat_app::DEFAULT_MESSAGES_PATH)]
    path: String,

    /// Maximum message length in characters
    #[arg(long, default_value_t = friendlychat_app::DEFAULT_MSG_LENGTH_LIMIT)]
    max_length: usize,

    /// Start signed in with this display name
    #[arg(long)]
    user: Option<String>,

    /// Email for the pre-signed-in account (uses email sign-in)
    #[arg(long)]
    email: Option<String>,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        let writer = Mutex::new(File::create(path)?);

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .with(filter)
            .init();
    }

    tracing::info!("FriendlyChat starting");

    let database = MemoryDatabase::new();
    let backend = match returning_user(&args) {
        Some(credential) => LocalBackend::signed_in(database, credential)?,
        None => LocalBackend::new(database),
    };

    let config = AppConfig {
        messages_path: args.path,
        max_message_length: args.max_length,
        ..AppConfig::default()
    };

    let driver = TerminalDriver::new()?;
    Ok(Runtime::new(driver, backend, config).run().await?)
}

/// Credential for `--user`/`--email`, if either was given.
fn returning_user(args: &Args) -> Option<Credential> {
    if args.user.is_none() && args.email.is_none() {
        return None;
    }

    let provider =
        if args.email.is_some() { IdentityProvider::Email } else { IdentityProvider::Google };
    Some(Credential { provider, email: args.email.clone(), display_name: args.user.clone() })
}
