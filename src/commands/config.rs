//! Configuration commands.

use std::path::PathBuf;

use serde::Serialize;

use crate::{
    client::Context,
    config::{Config, PROJECT_CONFIG_FILE},
    error::{Error, Result},
};

/// Print the effective configuration.
pub async fn show(ctx: &Context) -> Result<()> {
    if ctx.output.is_table() {
        print!("{}", serde_yaml::to_string(&ctx.config)?);
        return Ok(());
    }
    ctx.output.value(&ctx.config)
}

#[derive(Debug, Serialize)]
struct ConfigPaths {
    user: Option<PathBuf>,
    user_exists: bool,
    project: PathBuf,
    project_exists: bool,
}

/// Print the config file locations that are consulted.
pub async fn path(ctx: &Context) -> Result<()> {
    let user = Config::user_config_path();
    let project = PathBuf::from(PROJECT_CONFIG_FILE);
    let paths = ConfigPaths {
        user_exists: user.as_ref().is_some_and(|p| p.is_file()),
        user,
        project_exists: project.is_file(),
        project,
    };

    if !ctx.output.is_table() {
        return ctx.output.value(&paths);
    }

    let marker = |exists: bool| if exists { "" } else { " (not found)" };
    match &paths.user {
        Some(user) => {
            ctx.output.line(&format!("user:    {}{}", user.display(), marker(paths.user_exists)));
        },
        None => ctx.output.line("user:    (no home directory)"),
    }
    ctx.output.line(&format!(
        "project: {}{}",
        paths.project.display(),
        marker(paths.project_exists)
    ));
    Ok(())
}

/// Write the default configuration to the project or user config file.
pub async fn init(ctx: &Context, user: bool, force: bool) -> Result<()> {
    let target = if user {
        Config::user_config_path()
            .ok_or_else(|| Error::config("Cannot determine the user config directory"))?
    } else {
        PathBuf::from(PROJECT_CONFIG_FILE)
    };

    if target.exists() && !force {
        return Err(Error::invalid_arg(format!(
            "{} already exists. Use --force to overwrite it.",
            target.display()
        )));
    }

    Config::default().write_to(&target)?;
    ctx.output.success(&format!("Wrote {}", target.display()));
    Ok(())
}
