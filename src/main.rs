//! Transync CLI
//!
//! Command-line interface for keeping JSON translation catalogs in sync.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    match transync::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Usage errors were already printed by clap.
            if !matches!(&e, transync::Error::InvalidArgument(m) if m.is_empty()) {
                eprintln!("Error: {e}");
            }

            let code = e.exit_code();
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        },
    }
}
