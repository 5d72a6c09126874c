//! Coverage statistics.

use crate::{
    catalog::{CoverageStats, coverage},
    client::Context,
    error::Result,
    output::TableFormatter,
};

fn stats_row(scope: &str, stats: &CoverageStats) -> Vec<String> {
    let mut row = vec![scope.to_string(), stats.total.to_string()];
    for (code, missing) in &stats.missing {
        row.push(format!("{missing} ({:.1}%)", stats.coverage(code) * 100.0));
    }
    row
}

/// Show key counts and missing values per language.
pub async fn stats(ctx: &Context, groups: bool) -> Result<()> {
    let catalogs = ctx.catalogs().load_all(&ctx.config.languages)?;
    let report = coverage::stats(&catalogs);

    if !ctx.output.is_table() {
        return if groups { ctx.output.value(&report) } else { ctx.output.value(&report.global) };
    }

    let mut table = TableFormatter::new();
    let mut headers = vec!["SCOPE".to_string(), "KEYS".to_string()];
    headers.extend(
        catalogs.codes().map(|code| format!("MISSING {}", super::locale_header(ctx, code))),
    );
    table.headers(headers);

    table.row(stats_row("all", &report.global));
    if groups {
        for (group, stats) in &report.groups {
            table.row(stats_row(group, stats));
        }
    }
    table.print();

    Ok(())
}
