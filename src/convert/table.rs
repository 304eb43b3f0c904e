//! Pipe table rendering

use crate::document::Table;

/// Render a table as Markdown pipe-table lines.
///
/// The first row is the header regardless of table properties; the
/// separator has one `---` per header cell. Body rows keep their own width.
/// Returns no lines for a table without rows.
pub fn render_table(table: &Table) -> Vec<String> {
    let grid = table.grid_texts();
    let Some((header, body)) = grid.split_first() else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(grid.len() + 1);
    lines.push(pipe_row(header));
    lines.push(format!("|{}|", vec!["---"; header.len()].join("|")));
    lines.extend(body.iter().map(|row| pipe_row(row)));
    lines
}

fn pipe_row(cells: &[String]) -> String {
    let cells: Vec<&str> = cells.iter().map(|c| c.trim()).collect();
    format!("| {} |", cells.join(" | "))
}
