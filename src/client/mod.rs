//! Execution context shared by every command.
//!
//! Resolves the layered configuration, applies CLI overrides and builds the
//! engine components (catalog store, scanner, remote sync) from it.

use std::path::Path;

use crate::{
    catalog::CatalogStore,
    cli::Cli,
    config::{Config, Language, SyncBackend},
    error::{Error, Result},
    output::Output,
    remote::{FsStore, HttpStore, RemoteSync, Store},
    scan::KeyScanner,
};

/// Context for CLI command execution.
pub struct Context {
    /// Effective configuration after environment and CLI overrides.
    pub config: Config,

    /// Output configuration.
    pub output: Output,

    /// Skip confirmations.
    pub yes: bool,
}

impl Context {
    /// Create a context from parsed CLI options.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Config::load(cli.config.as_deref())?;
        if let Some(path) = &cli.locales_path {
            config.locales_path.clone_from(path);
        }

        let format = cli.output.as_deref().unwrap_or(&config.output.format);
        let color = cli.color.as_deref().unwrap_or(&config.output.color);
        let output = Output::from_cli(format, color, cli.quiet)?;

        Ok(Self::new(config, output, cli.yes))
    }

    /// Create a context from already resolved parts.
    pub fn new(config: Config, output: Output, yes: bool) -> Self {
        Self { config, output, yes }
    }

    /// Store for the local catalog files.
    pub fn catalogs(&self) -> CatalogStore {
        CatalogStore::new(&self.config.locales_path)
    }

    /// Languages selected by an optional `--lang` filter.
    ///
    /// An unknown code selects nothing; the caller reports it.
    pub fn languages(&self, filter: Option<&str>) -> Vec<Language> {
        self.config.select_languages(filter)
    }

    /// Scanner built from the `scan` section.
    pub fn scanner(&self) -> Result<KeyScanner> {
        KeyScanner::from_config(&self.config.scan)
    }

    /// Object store selected by the `sync` section.
    pub fn store(&self) -> Result<Store> {
        let sync = &self.config.sync;
        match sync.backend {
            SyncBackend::Fs => {
                let root = sync.root.as_deref().ok_or_else(|| {
                    Error::config(
                        "sync.root is not set. Set it in your transync config or via TRANSYNC_SYNC_ROOT.",
                    )
                })?;
                Ok(Store::Fs(FsStore::new(root)))
            },
            SyncBackend::Http => {
                let url = sync.url.as_deref().ok_or_else(|| {
                    Error::config(
                        "sync.url is not set. Set it in your transync config or via TRANSYNC_SYNC_URL.",
                    )
                })?;
                Ok(Store::Http(HttpStore::new(url, sync.token.clone())?))
            },
        }
    }

    /// Push/pull engine over the configured store.
    pub fn remote<'a>(&self, catalogs: &'a CatalogStore) -> Result<RemoteSync<'a, Store>> {
        Ok(RemoteSync::builder()
            .store(self.store()?)
            .catalogs(catalogs)
            .sync_path(self.config.sync.path.as_str())
            .environment(self.config.sync.environment.as_str())
            .build())
    }

    /// Prompt for confirmation (respects --yes flag).
    pub fn confirm(&self, message: &str) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }

        eprint!("{message} [y/N]: ");
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        let answer = input.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    /// Locales directory, for messages.
    pub fn locales_path(&self) -> &Path {
        &self.config.locales_path
    }
}
