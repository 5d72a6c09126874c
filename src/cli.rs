//! Command-line argument parsing and command definitions.
//!
//! Uses clap with derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Transync - keep JSON translation catalogs sorted, complete and in sync
#[derive(Parser, Debug)]
#[command(name = "transync")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Configuration file (replaces the user and project config files)
    #[arg(long, global = true, env = "TRANSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the <code>.json catalogs
    #[arg(long, global = true)]
    pub locales_path: Option<PathBuf>,

    /// Output format [default: table]
    #[arg(short, long, global = true, value_parser = ["table", "json", "yaml", "jsonl"])]
    pub output: Option<String>,

    /// Color output mode [default: auto]
    #[arg(long, global = true, value_parser = ["auto", "always", "never"])]
    pub color: Option<String>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Skip confirmations (answer yes to all prompts)
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan sources and add empty placeholders for missing keys
    Sync {
        /// Report missing keys without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// List keys used in sources but missing from catalogs
    Missing,

    /// Upload local catalogs to the shared store
    Push {
        /// Only push this language
        #[arg(long, short)]
        lang: Option<String>,
    },

    /// Download catalogs from the shared store and merge them
    Pull {
        /// Only pull this language
        #[arg(long, short)]
        lang: Option<String>,

        /// Replace local catalogs with the remote ones
        #[arg(long)]
        force: bool,

        /// Let remote values overwrite differing local values
        #[arg(long)]
        overwrite: bool,
    },

    /// Show the last push recorded in the shared store
    Status,

    /// Show translation coverage
    Stats {
        /// Break coverage down by key group
        #[arg(long)]
        groups: bool,
    },

    /// Inspect and edit translation keys
    #[command(subcommand)]
    Keys(KeysCommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Key inspection and editing commands.
#[derive(Subcommand, Debug)]
pub enum KeysCommands {
    /// List keys with their value in every language
    List {
        /// Case-insensitive substring matched against keys and values
        #[arg(long, short)]
        search: Option<String>,

        /// Only keys missing in at least one language
        #[arg(long)]
        missing: bool,

        /// Only keys in this group (first key segment)
        #[arg(long, short)]
        group: Option<String>,
    },

    /// Set values for a key, creating it if needed
    Set {
        /// Dotted key (e.g. nav.home)
        key: String,

        /// Value as <code>=<text>; repeat for several languages
        #[arg(long = "value", value_name = "CODE=TEXT", value_parser = parse_assignment, required = true)]
        values: Vec<(String, String)>,
    },

    /// Create a new key; fails if it already exists
    Add {
        /// Dotted key (e.g. nav.home)
        key: String,

        /// Value as <code>=<text>; repeat for several languages
        #[arg(long = "value", value_name = "CODE=TEXT", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },

    /// Delete a key from every language
    Delete {
        /// Dotted key (e.g. nav.home)
        key: String,
    },
}

/// Configuration management commands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show configuration file paths
    Path,

    /// Write a starter configuration file
    Init {
        /// Write the user config instead of ./.transync.yaml
        #[arg(long)]
        user: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Shell types for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// PowerShell.
    PowerShell,
}

/// Parse a `code=text` pair. The text may itself contain `=`.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (code, text) =
        s.split_once('=').ok_or_else(|| format!("expected <code>=<text>, got '{s}'"))?;
    let code = code.trim();
    if code.is_empty() {
        return Err(format!("missing language code in '{s}'"));
    }
    Ok((code.to_string(), text.to_string()))
}
