//! # chainerr CLI
//!
//! Command-line demo of chained errors and normalized outcomes.
//!
//! Usage:
//!   chainerr lookup <user-id> [--fail-with <mode>] [--async]
//!   chainerr format <message> [--cause <text>]... [--root <text>] [--prepend <text>]
//!
//! Examples:
//!   chainerr lookup 7
//!   chainerr lookup 7 --fail-with chained --json
//!   chainerr --log-level debug lookup 7 --fail-with io --async
//!   chainerr format "failed to save" --cause "disk full" --prepend job-42

mod repo;
mod report;

use chainerr_outcome::{attempt, attempt_async, err, Cause, ChainedError, GenericError};
use clap::{Parser, Subcommand};
use repo::{FailureMode, UserRepository};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chainerr")]
#[command(author, version, about = "chainerr - readable error chains")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Print the annotations of a reported error as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a user through the data-access stub
    Lookup {
        /// The user to load
        user_id: u64,

        /// Make the repository fail in a specific way
        #[arg(long, value_enum, default_value_t = FailureMode::None)]
        fail_with: FailureMode,

        /// Go through the asynchronous code path
        #[arg(long = "async")]
        use_async: bool,
    },
    /// Build a chain from flags and print it formatted
    Format {
        /// Message of the outermost error
        message: String,

        /// Plain-error causes, outermost first
        #[arg(long = "cause")]
        causes: Vec<String>,

        /// Raw string at the bottom of the chain
        #[arg(long)]
        root: Option<String>,

        /// Text placed before the chain
        #[arg(long)]
        prepend: Option<String>,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Nest plain errors below `message`, ending in an optional raw string
fn build_chain(message: &str, causes: &[String], root: Option<&str>) -> ChainedError {
    let cause = causes.iter().rev().fold(Cause::from(root), |below, text| {
        GenericError::new(text.as_str()).with_cause(below).into()
    });
    err(message, cause)
}

async fn run_lookup(user_id: u64, fail_with: FailureMode, use_async: bool, json_out: bool) {
    let repo = UserRepository::new(fail_with);

    let outcome = if use_async {
        attempt_async(|| repo.find_async(user_id)).await
    } else {
        attempt(|| repo.find(user_id))
    };

    match outcome.into_result() {
        Ok(user) => {
            println!("{}", serde_json::to_string_pretty(&user).unwrap_or_default());
        }
        Err(cause) => {
            let error = err("failed to load user", cause)
                .with_context([("user_id", json!(user_id)), ("operation", json!("lookup"))]);

            report::report(&error);
            if json_out {
                let annotations = report::annotations(&error);
                println!("{}", serde_json::to_string_pretty(&annotations).unwrap_or_default());
            }
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Lookup {
            user_id,
            fail_with,
            use_async,
        } => {
            run_lookup(user_id, fail_with, use_async, cli.json).await;
        }
        Commands::Format {
            message,
            causes,
            root,
            prepend,
        } => {
            let error = build_chain(&message, &causes, root.as_deref());
            println!("{}", error.fmt_err(prepend.as_deref()));
        }
    }
}
