//! Command implementations for the transync CLI.
//!
//! Each submodule implements a group of related commands.

mod config;
mod keys;
mod remote;
mod stats;
mod sync;

pub use remote::{pull, push, status};
pub use stats::stats;
pub use sync::{missing, sync};

use crate::{
    cli::{Commands, ConfigCommands, KeysCommands, Shell},
    client::Context,
    error::Result,
};

/// Column header for a locale: the upper-cased code, then the language label.
fn locale_header(ctx: &Context, code: &str) -> String {
    let upper = code.to_uppercase();
    match ctx.config.language(code) {
        Some(lang) => format!("{upper} {}", lang.label()),
        None => upper,
    }
}

/// Execute a CLI command.
pub async fn execute(ctx: &Context, command: &Commands) -> Result<()> {
    match command {
        // Source scanning
        Commands::Sync { dry_run } => sync(ctx, *dry_run).await,
        Commands::Missing => missing(ctx).await,

        // Shared store
        Commands::Push { lang } => push(ctx, lang.as_deref()).await,
        Commands::Pull { lang, force, overwrite } => {
            pull(ctx, lang.as_deref(), *force, *overwrite).await
        },
        Commands::Status => status(ctx).await,

        // Reporting
        Commands::Stats { groups } => stats(ctx, *groups).await,

        // Key commands
        Commands::Keys(sub) => match sub {
            KeysCommands::List { search, missing, group } => {
                keys::list(ctx, search.as_deref(), *missing, group.as_deref()).await
            },
            KeysCommands::Set { key, values } => keys::set(ctx, key, values).await,
            KeysCommands::Add { key, values } => keys::add(ctx, key, values).await,
            KeysCommands::Delete { key } => keys::delete(ctx, key).await,
        },

        // Config commands
        Commands::Config(sub) => match sub {
            ConfigCommands::Show => config::show(ctx).await,
            ConfigCommands::Path => config::path(ctx).await,
            ConfigCommands::Init { user, force } => config::init(ctx, *user, *force).await,
        },

        Commands::Completion { shell } => completion(*shell),
    }
}

fn completion(shell: Shell) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{Generator, generate};

    fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
        let name = cmd.get_name().to_string();
        generate(generator, cmd, name, &mut std::io::stdout());
    }

    let mut cmd = crate::cli::Cli::command();
    match shell {
        Shell::Bash => print_completions(clap_complete::shells::Bash, &mut cmd),
        Shell::Zsh => print_completions(clap_complete::shells::Zsh, &mut cmd),
        Shell::Fish => print_completions(clap_complete::shells::Fish, &mut cmd),
        Shell::PowerShell => print_completions(clap_complete::shells::PowerShell, &mut cmd),
    }

    Ok(())
}
