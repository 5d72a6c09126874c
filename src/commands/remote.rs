//! Shared-store commands: `push`, `pull` and `status`.

use crate::{
    catalog::MergePolicy,
    client::Context,
    config::Language,
    error::{Error, Result},
    output::{Displayable, TableFormatter},
    remote::{LocaleOutcome, Operation, SyncMetadata, SyncReport},
};

impl Displayable for LocaleOutcome {
    fn table_row(&self) -> Vec<String> {
        vec![self.code.clone(), self.outcome.label().to_string(), self.outcome.detail()]
    }

    fn table_headers() -> Vec<&'static str> {
        vec!["LANG", "STATUS", "DETAIL"]
    }
}

fn select(ctx: &Context, lang: Option<&str>, operation: Operation) -> Result<Vec<Language>> {
    let languages = ctx.languages(lang);
    if languages.is_empty() {
        if let Some(code) = lang {
            ctx.output.warn(&format!("Language '{code}' is not configured."));
        }
        return Err(Error::EmptyResult(operation.past_tense()));
    }
    Ok(languages)
}

fn print_report(ctx: &Context, report: &SyncReport) -> Result<()> {
    if !ctx.output.is_table() {
        return ctx.output.value(report);
    }

    ctx.output.table(&report.outcomes)?;
    for warning in &report.warnings {
        ctx.output.warn(warning);
    }
    Ok(())
}

/// Upload local catalogs.
pub async fn push(ctx: &Context, lang: Option<&str>) -> Result<()> {
    let languages = select(ctx, lang, Operation::Push)?;
    let catalogs = ctx.catalogs();
    let remote = ctx.remote(&catalogs)?;

    let report = remote.push(&languages).await;
    print_report(ctx, &report)?;
    report.ensure_success()?;

    match &report.metadata {
        Some(meta) => ctx.output.success(&format!(
            "Pushed {} languages (version {}).",
            report.succeeded(),
            meta.version
        )),
        None => ctx.output.success(&format!("Pushed {} languages.", report.succeeded())),
    }
    Ok(())
}

/// Download remote catalogs and merge them into the local ones.
pub async fn pull(ctx: &Context, lang: Option<&str>, force: bool, overwrite: bool) -> Result<()> {
    let languages = select(ctx, lang, Operation::Pull)?;
    let policy = MergePolicy::from_flags(force, overwrite);

    let catalogs = ctx.catalogs();
    let remote = ctx.remote(&catalogs)?;

    let report = remote.pull(&languages, policy).await;
    if let Some(meta) = &report.metadata
        && ctx.output.is_table()
    {
        ctx.output.info(&format!(
            "Remote version {} pushed from {} at {}.",
            meta.version,
            meta.pushed_from,
            meta.pushed_at.to_rfc3339()
        ));
    }
    print_report(ctx, &report)?;
    report.ensure_success()?;

    ctx.output.success(&format!("Pulled {} languages.", report.succeeded()));
    Ok(())
}

/// Show the metadata of the last push.
pub async fn status(ctx: &Context) -> Result<()> {
    let catalogs = ctx.catalogs();
    let remote = ctx.remote(&catalogs)?;
    let metadata = remote.remote_status().await?;

    if !ctx.output.is_table() {
        return ctx.output.value(&metadata);
    }

    match metadata {
        Some(meta) => print_metadata(&meta),
        None => ctx.output.info("Nothing has been pushed yet."),
    }
    Ok(())
}

fn print_metadata(meta: &SyncMetadata) {
    let mut table = TableFormatter::new();
    table.row(["Version".to_string(), meta.version.to_string()]);
    table.row(["Pushed at".to_string(), meta.pushed_at.to_rfc3339()]);
    table.row(["Pushed from".to_string(), meta.pushed_from.clone()]);
    table.row(["Languages".to_string(), meta.languages.join(", ")]);
    table.print();
}
