//! Transync
//!
//! Keeps a project's multilingual JSON translation catalogs (one
//! `<code>.json` per language) sorted, complete and in sync across
//! environments.
//!
//! ## Usage
//!
//! ```bash
//! transync sync                    # Add placeholders for keys used in sources
//! transync push                    # Upload catalogs to the shared store
//! transync pull --overwrite        # Merge remote catalogs, remote values win
//! transync keys set nav.home --value en=Home --value uk=Головна
//! ```
//!
//! ## Library
//!
//! The engine is usable without the CLI: [`catalog`] holds the flat/nested
//! codec, the file store and the merge rules, [`scan`] finds keys in
//! sources, and [`remote`] pushes and pulls through any [`remote::ObjectStore`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod remote;
pub mod scan;

pub use cli::Cli;
pub use error::{Error, Result};

/// CLI version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the CLI with the given arguments.
///
/// This is the main entry point for the CLI, parsing arguments and
/// dispatching to the appropriate command handler.
pub async fn run(args: Vec<String>) -> Result<()> {
    use clap::Parser;

    let cli_args = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            // Print clap error (includes help/version)
            e.print().ok();
            use clap::error::ErrorKind;
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => return Ok(()),
                _ => return Err(Error::InvalidArgument(String::new())),
            }
        },
    };

    if cli_args.debug {
        init_logging();
    }

    let ctx = client::Context::from_cli(&cli_args)?;
    tracing::debug!(
        locales = %ctx.config.locales_path.display(),
        languages = ?ctx.config.language_codes(),
        "resolved configuration"
    );

    commands::execute(&ctx, &cli_args.command).await
}

/// Initialize tracing/logging for debug mode.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("transync=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}
