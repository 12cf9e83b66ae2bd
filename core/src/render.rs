//! Row descriptors handed to the rendering surface.
//!
//! # Design
//! Rows are plain data. Every action carries a `Gesture` naming the item by
//! id, so a handler bound before a reorder still targets the right item
//! after it. The surface decides how rows look; this module only decides
//! what they contain.

use crate::client::TodoClient;
use crate::order::position_context;
use crate::types::{Todo, TodoId};

pub const ACTIVE_LABEL: &str = "active";
pub const COMPLETED_LABEL: &str = "completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Active,
    Completed,
}

impl StatusLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Active => ACTIVE_LABEL,
            StatusLabel::Completed => COMPLETED_LABEL,
        }
    }
}

/// A user intent, addressed by item id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Toggle { id: TodoId, completed: bool },
    MoveUp { id: TodoId },
    MoveDown { id: TodoId },
    Delete { id: TodoId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Toggle,
    Up,
    Down,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub kind: ActionKind,
    pub label: &'static str,
    pub gesture: Gesture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub display_index: usize,
    pub id: TodoId,
    pub title: String,
    pub struck_through: bool,
    pub status: StatusLabel,
    pub detail_href: String,
    pub actions: Vec<RowAction>,
}

impl Row {
    pub fn action(&self, kind: ActionKind) -> Option<&RowAction> {
        self.actions.iter().find(|a| a.kind == kind)
    }

    pub fn has_action(&self, kind: ActionKind) -> bool {
        self.action(kind).is_some()
    }
}

/// Where rows and blocking notifications go.
pub trait RenderSurface {
    /// Replace whatever is displayed with `rows`, in order.
    fn render(&mut self, rows: &[Row]);

    /// Show a blocking notification to the user.
    fn alert(&mut self, message: &str);
}

pub fn render_rows(items: &[Todo]) -> Vec<Row> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, todo)| {
            let ctx = position_context(items, index)?;
            Some(build_row(todo, ctx.display_index, ctx.can_move_up, ctx.can_move_down))
        })
        .collect()
}

fn build_row(todo: &Todo, display_index: usize, up: bool, down: bool) -> Row {
    let id = todo.id.clone();
    let mut actions = Vec::with_capacity(4);

    actions.push(RowAction {
        kind: ActionKind::Toggle,
        label: if todo.completed { "Reopen" } else { "Complete" },
        gesture: Gesture::Toggle {
            id: id.clone(),
            completed: !todo.completed,
        },
    });
    if up {
        actions.push(RowAction {
            kind: ActionKind::Up,
            label: "↑",
            gesture: Gesture::MoveUp { id: id.clone() },
        });
    }
    if down {
        actions.push(RowAction {
            kind: ActionKind::Down,
            label: "↓",
            gesture: Gesture::MoveDown { id: id.clone() },
        });
    }
    actions.push(RowAction {
        kind: ActionKind::Delete,
        label: "×",
        gesture: Gesture::Delete { id: id.clone() },
    });

    Row {
        display_index,
        detail_href: TodoClient::detail_href(&id),
        id,
        title: todo.title.clone(),
        struck_through: todo.completed,
        status: if todo.completed {
            StatusLabel::Completed
        } else {
            StatusLabel::Active
        },
        actions,
    }
}
