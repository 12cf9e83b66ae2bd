//! Terminal rendering surface.

use std::io::Write;

use todo_view::{RenderSurface, Row, StatusLabel, Todo, TodoClient};
use tracing::warn;

const STRIKE_ON: &str = "\x1b[9m";
const STRIKE_OFF: &str = "\x1b[0m";

pub struct TerminalSurface<W: Write> {
    out: W,
    rows: Vec<Row>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rows: Vec::new(),
        }
    }

    /// Row from the last render, by its on-screen number.
    pub fn row(&self, display_index: usize) -> Option<&Row> {
        self.rows.iter().find(|r| r.display_index == display_index)
    }

    pub fn notice(&mut self, message: &str) {
        if let Err(err) = writeln!(self.out, "{message}") {
            warn!(%err, "failed to write to terminal");
        }
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }

    fn draw(&mut self) -> std::io::Result<()> {
        if self.rows.is_empty() {
            writeln!(self.out, "  (no tasks)")?;
        }
        for row in &self.rows {
            let title = if row.struck_through {
                format!("{STRIKE_ON}{}{STRIKE_OFF}", row.title)
            } else {
                row.title.clone()
            };
            let actions: Vec<String> = row.actions.iter().map(|a| format!("[{}]", a.label)).collect();
            writeln!(
                self.out,
                "{:>3}. {:<40} {:<10} {}",
                row.display_index,
                title,
                row.status.as_str(),
                actions.join(" ")
            )?;
        }
        self.out.flush()
    }
}

/// Multi-line detail view of one item, server-only fields included.
pub fn describe(todo: &Todo) -> String {
    let status = if todo.completed {
        StatusLabel::Completed
    } else {
        StatusLabel::Active
    };
    let mut out = format!(
        "{} ({})\n  id: {}\n  status: {}",
        todo.title,
        TodoClient::detail_href(&todo.id),
        todo.id,
        status.as_str()
    );
    for (key, value) in &todo.extra {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out.push_str(&format!("\n  {key}: {value}"));
    }
    out
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn render(&mut self, rows: &[Row]) {
        self.rows = rows.to_vec();
        if let Err(err) = self.draw() {
            warn!(%err, "failed to draw list");
        }
    }

    fn alert(&mut self, message: &str) {
        self.notice(&format!("!! {message}"));
    }
}
