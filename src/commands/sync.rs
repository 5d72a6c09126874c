//! Source scanning commands: `sync` and `missing`.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    catalog::{LocaleCatalogs, codec, missing_keys},
    client::Context,
    error::Result,
    output::Displayable,
};

#[derive(Debug, Clone, Serialize)]
struct MissingRow {
    key: String,
    missing_in: Vec<String>,
}

impl Displayable for MissingRow {
    fn table_row(&self) -> Vec<String> {
        vec![self.key.clone(), self.missing_in.join(", ")]
    }

    fn table_headers() -> Vec<&'static str> {
        vec!["KEY", "MISSING IN"]
    }
}

struct ScanResult {
    used: usize,
    catalogs: LocaleCatalogs,
    missing: BTreeMap<String, BTreeSet<String>>,
}

fn scan_missing(ctx: &Context) -> Result<ScanResult> {
    let scanner = ctx.scanner()?;
    let used = scanner.scan()?;
    let catalogs = ctx.catalogs().load_all(&ctx.config.languages)?;
    let missing = missing_keys(&used, &catalogs);

    tracing::debug!(used = used.len(), missing = missing.len(), "compared sources with catalogs");
    Ok(ScanResult { used: used.len(), catalogs, missing })
}

fn print_missing(
    ctx: &Context,
    used: usize,
    missing: &BTreeMap<String, BTreeSet<String>>,
) -> Result<()> {
    if missing.is_empty() && ctx.output.is_table() {
        ctx.output.success(&format!("All {used} keys used in sources are translated."));
        return Ok(());
    }

    let rows: Vec<MissingRow> = missing
        .iter()
        .map(|(key, codes)| MissingRow {
            key: key.clone(),
            missing_in: codes.iter().cloned().collect(),
        })
        .collect();
    ctx.output.table(&rows)
}

/// List keys used in sources that are missing or empty in some language.
pub async fn missing(ctx: &Context) -> Result<()> {
    let result = scan_missing(ctx)?;
    print_missing(ctx, result.used, &result.missing)?;

    if !result.missing.is_empty() {
        ctx.output.info(&format!(
            "\n{} of {} keys used in sources need translation.",
            result.missing.len(),
            result.used
        ));
    }
    Ok(())
}

/// Report missing keys and add empty placeholders where a key is absent.
///
/// Keys that exist with an empty value are reported but left alone. Only
/// languages that actually gained a key are written.
pub async fn sync(ctx: &Context, dry_run: bool) -> Result<()> {
    let ScanResult { used, mut catalogs, missing } = scan_missing(ctx)?;
    print_missing(ctx, used, &missing)?;

    if missing.is_empty() {
        return Ok(());
    }

    if dry_run {
        ctx.output.info(&format!("\nDry run: {} missing keys, no files written.", missing.len()));
        return Ok(());
    }

    let mut changed = Vec::new();
    for lang in &ctx.config.languages {
        let Some(catalog) = catalogs.get_mut(&lang.code) else {
            continue;
        };

        let mut added = 0usize;
        for key in missing.keys() {
            if !catalog.contains_key(key) {
                catalog.insert(key.clone(), String::new());
                added += 1;
            }
        }
        if added > 0 {
            changed.push((lang.code.clone(), added));
        }
    }

    // Check every catalog still nests before touching any file.
    for (code, _) in &changed {
        if let Some(catalog) = catalogs.get(code) {
            codec::nest(catalog)?;
        }
    }

    let store = ctx.catalogs();
    let mut total = 0usize;
    for (code, added) in &changed {
        if let Some(catalog) = catalogs.get(code) {
            store.save(code, catalog)?;
            tracing::info!(code = code.as_str(), added, "added placeholders");
            total += added;
        }
    }

    if total == 0 {
        ctx.output.info("\nMissing keys exist but are empty; nothing to add.");
    } else {
        ctx.output.success(&format!(
            "Added {total} placeholders across {} languages in {}.",
            changed.len(),
            ctx.locales_path().display()
        ));
    }
    Ok(())
}
