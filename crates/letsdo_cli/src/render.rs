//! Plain-text rendering of the list view.

use letsdo_core::{TodoId, TodoListView, TodoRow};
use std::io::{self, Write};

const SHORT_ID_LEN: usize = 8;

/// First characters of the id, enough to address it.
pub fn short_id(id: &TodoId) -> String {
    id.as_str().chars().take(SHORT_ID_LEN).collect()
}

pub fn render_list(view: &TodoListView, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Show finished: {}  ({} todos, {} done)",
        if view.show_finished { "on" } else { "off" },
        view.total,
        view.completed
    )?;

    if let Some(message) = view.empty_message {
        writeln!(out, "  {message}")?;
        return Ok(());
    }

    for row in &view.rows {
        render_row(row, out)?;
    }
    Ok(())
}

fn render_row(row: &TodoRow, out: &mut impl Write) -> io::Result<()> {
    let mark = if row.is_completed { "x" } else { " " };
    writeln!(out, "  [{mark}] {}  {}", short_id(&row.id), row.text)?;
    writeln!(out, "               Added on: {}", row.created_at)
}
