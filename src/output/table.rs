//! Table formatting for CLI output.
//!
//! Columns are sized to their widest cell (measured in terminal columns, so
//! Cyrillic and CJK translations line up). A per-column cap truncates long
//! translation values with `...`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A simple table formatter.
#[derive(Debug, Default)]
pub struct TableFormatter {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_width: Option<usize>,
}

impl TableFormatter {
    /// Create a new table formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column headers.
    pub fn headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Add a row to the table.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Cap every column at `width` terminal columns.
    pub fn max_width(&mut self, width: usize) -> &mut Self {
        self.max_width = Some(width);
        self
    }

    fn widths(&self) -> Vec<usize> {
        let columns =
            self.rows.iter().map(Vec::len).chain(std::iter::once(self.headers.len())).max();
        let mut widths = vec![0usize; columns.unwrap_or(0)];

        for row in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }

        if let Some(cap) = self.max_width {
            for width in &mut widths {
                *width = (*width).min(cap);
            }
        }

        widths
    }

    /// Print the table to stdout.
    pub fn print(&self) {
        print!("{}", self.render());
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut output = String::new();

        if !self.headers.is_empty() {
            output.push_str(&render_row(&self.headers, &widths));
            output.push('\n');
            let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            output.push_str(&sep.join("  "));
            output.push('\n');
        }

        for row in &self.rows {
            output.push_str(&render_row(row, &widths));
            output.push('\n');
        }

        output
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let parts: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let width = widths.get(i).copied().unwrap_or(0);
            let cell_width = cell.width();
            if cell_width <= width {
                format!("{cell}{}", " ".repeat(width - cell_width))
            } else {
                truncate(cell, width)
            }
        })
        .collect();

    parts.join("  ").trim_end().to_string()
}

/// Truncate a string to fit within a given width.
fn truncate(s: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut width = 0;
    let mut out = String::new();

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width + 3 > max_width {
            out.push_str("...");
            width += 3;
            break;
        }
        out.push(c);
        width += char_width;
    }

    if width < max_width {
        out.push_str(&" ".repeat(max_width - width));
    }

    out
}
