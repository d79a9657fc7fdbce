//! # basket
//!
//! ## Usage
//! ```bash
//! # Totals for a spec file
//! basket totals ./cart.json
//!
//! # Items as JSON, dropping id 3 first
//! basket --output json items ./cart.json --remove 3
//! ```
//!
//! ## Environment
//! - `BASKET_CART_NAME` - cart display name (default: `default`)
//! - `BASKET_OUTPUT` - `text` or `json` (default: `text`)
//! - `BASKET_VERBOSE` - debug logging (default: `false`)
//! - `RUST_LOG` - full tracing filter, wins over everything above

use std::process::ExitCode;

use basket_cli::{commands, Args, CliConfig, CliError, ErrorReport, OutputFormat};
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match CliConfig::load() {
        Ok(config) => args.apply(config),
        Err(err) => {
            init_tracing(args.verbose);
            return report(&CliError::from(err), args.output.unwrap_or_default());
        }
    };

    init_tracing(config.verbose);
    debug!(?config, "configuration loaded");

    match commands::run(&args.command, &config) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(err) => report(&err, config.output),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - verbose flag - `info,basket=debug` (covers basket-core and basket-cli)
/// - default - warnings only
///
/// Logs go to stderr so stdout stays clean for JSON output.
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "info,basket=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report(err: &CliError, output: OutputFormat) -> ExitCode {
    error!(code = ?err.code(), "{}", err);

    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(&ErrorReport::from(err)) {
            Ok(json) => println!("{}", json),
            Err(_) => eprintln!("{}", err),
        },
        OutputFormat::Text => eprintln!("error: {}", err),
    }

    ExitCode::FAILURE
}
