//! View-model for a remote to-do list.
//!
//! # Overview
//! Mirrors a REST to-do collection locally, keeps it in display order
//! (active items before completed ones), and turns user gestures into
//! create/update/delete calls. Rendering and HTTP are both the host's job:
//! the crate emits `Row` descriptors and `HttpRequest` values and consumes
//! `HttpResponse` values.
//!
//! # Design
//! - `TodoClient` builds requests and parses responses without I/O.
//! - `TodoListView` owns the list; remote operations are split into
//!   `begin_*` and `complete`, so any event loop can drive it.
//! - `TodoList` is a blocking driver over a `Transport` for simple hosts.
//! - Reordering is local and optimistic and is never persisted.
//! - With the default `ureq` feature, `UreqTransport` is a ready-made
//!   blocking transport. Hosts with their own HTTP stack can turn it off.

pub mod client;
pub mod error;
pub mod http;
pub mod list;
pub mod order;
pub mod render;
pub mod types;
#[cfg(feature = "ureq")]
pub mod ureq_transport;
pub mod view;

pub use client::TodoClient;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use list::TodoList;
pub use order::{can_move_down, can_move_up, position_context, sort_completed_last, PositionContext};
pub use render::{render_rows, ActionKind, Gesture, RenderSurface, Row, RowAction, StatusLabel};
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo};
pub use view::{Completion, Pending, PendingOp, TodoListView};
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;
