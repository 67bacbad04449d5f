use std::{fs::File, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use menu_bank::bin_utils::{ScriptError, ScriptService, session::Session};
use tracing_subscriber::EnvFilter;

/// Console simulator of savings, checking and fixed-deposit accounts.
#[derive(Parser, Debug)]
#[command(name = "menu-bank", version, about)]
struct Args {
    /// Replay operations from a CSV file instead of showing the menu
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    match args.script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open `{}`", path.display()))?;
            let service = ScriptService {
                input: file,
                output: &mut io::stdout(),
                error_printer: Box::new(|line, err| match err {
                    ScriptError::Malformed(err) => eprintln!("Error at line {line}: {err}"),
                    ScriptError::Rejected(err) => eprintln!("Rejected at line {line}: {err}"),
                }),
            };
            service.run()
        }
        None => {
            let session = Session {
                input: io::stdin().lock(),
                output: &mut io::stdout(),
            };
            session.run().map(|_| ())
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
