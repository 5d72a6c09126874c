//! Key listing and single-key edits.

use crate::{
    catalog::{CatalogEditor, EntryFilter, LocaleCatalogs, TranslationEntry, coverage},
    client::Context,
    error::{Error, Result},
    output::{MAX_CELL_WIDTH, TableFormatter},
};

/// List keys with their value in every language.
pub async fn list(
    ctx: &Context,
    search: Option<&str>,
    missing: bool,
    group: Option<&str>,
) -> Result<()> {
    let catalogs = ctx.catalogs().load_all(&ctx.config.languages)?;
    let filter = EntryFilter {
        search: search.map(str::to_string),
        missing_only: missing,
        group: group.map(str::to_string),
    };
    let entries = filter.apply(coverage::entries(&catalogs));

    if entries.is_empty() && ctx.output.is_table() {
        ctx.output.info("No keys match.");
        return Ok(());
    }

    let mut table = TableFormatter::new();
    let mut headers = vec!["KEY".to_string()];
    headers.extend(catalogs.codes().map(|code| super::locale_header(ctx, code)));
    table.headers(headers).max_width(MAX_CELL_WIDTH);

    for entry in &entries {
        let mut row = vec![entry.key.clone()];
        row.extend(catalogs.codes().map(|code| entry.value(code).to_string()));
        table.row(row);
    }

    ctx.output.list(table, &entries)?;
    if ctx.output.is_table() {
        ctx.output.info(&format!("\n{} keys", entries.len()));
    }
    Ok(())
}

fn entry_for(catalogs: &LocaleCatalogs, key: &str) -> Option<TranslationEntry> {
    coverage::entries(catalogs).into_iter().find(|e| e.key == key)
}

fn print_entry(ctx: &Context, catalogs: &LocaleCatalogs, key: &str, message: &str) -> Result<()> {
    if ctx.output.is_table() {
        ctx.output.success(message);
        return Ok(());
    }
    ctx.output.value(&entry_for(catalogs, key))
}

/// Set values for a key, creating it where absent.
pub async fn set(ctx: &Context, key: &str, values: &[(String, String)]) -> Result<()> {
    let store = ctx.catalogs();
    let editor = CatalogEditor::new(&store, &ctx.config.languages);
    let catalogs = editor.upsert(key, values)?;

    print_entry(ctx, &catalogs, key, &format!("Saved '{key}' ({} values).", values.len()))
}

/// Create a key that must not exist yet.
pub async fn add(ctx: &Context, key: &str, values: &[(String, String)]) -> Result<()> {
    let store = ctx.catalogs();
    let editor = CatalogEditor::new(&store, &ctx.config.languages);
    let catalogs = editor.create(key, values)?;

    print_entry(
        ctx,
        &catalogs,
        key,
        &format!("Added '{key}' to {} languages.", ctx.config.languages.len()),
    )
}

/// Delete a key from every language.
pub async fn delete(ctx: &Context, key: &str) -> Result<()> {
    if !ctx.confirm(&format!("Delete '{key}' from every language?"))? {
        return Err(Error::Cancelled);
    }

    let store = ctx.catalogs();
    let editor = CatalogEditor::new(&store, &ctx.config.languages);
    editor.delete(key)?;

    ctx.output.success(&format!("Deleted '{key}'."));
    Ok(())
}
