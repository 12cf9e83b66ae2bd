//! The to-do list view-model.
//!
//! # Design
//! `TodoListView` owns the local copy of the collection and never performs
//! I/O. Every remote operation is split in two: a `begin_*` call returns a
//! `Pending` carrying the request to execute, and `complete` later applies
//! the host's outcome. Completions run one at a time against `&mut self`,
//! which is the whole concurrency story.
//!
//! Loads are tokened. Only the completion of the most recently issued load
//! may replace the list; older ones are reported as `Stale` and dropped.

use tracing::{debug, error, info, warn};

use crate::client::TodoClient;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::order::{can_move_down, can_move_up, sort_completed_last};
use crate::render::{render_rows, RenderSurface, Row};
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

pub const ADD_FAILED_ALERT: &str = "Could not add the task";
pub const MISSING_ID_ALERT: &str = "Error: the task was not created";

/// The remote operation a `Pending` belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOp {
    Load,
    Add { title: String },
    Toggle { id: TodoId, completed: bool },
    Delete { id: TodoId },
}

/// An issued request awaiting its outcome.
#[derive(Debug, Clone)]
pub struct Pending {
    token: u64,
    op: PendingOp,
    request: HttpRequest,
}

impl Pending {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn op(&self) -> &PendingOp {
        &self.op
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

/// What happened to local state as a result of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// State changed and the surface was re-rendered.
    Applied,
    /// Nothing to do; no request issued, no state touched.
    Skipped,
    /// The operation failed and was logged. State is unchanged.
    Ignored,
    /// The operation failed and the user was alerted. State is unchanged.
    Alerted,
    /// A load completed after a newer load was issued and was discarded.
    Stale,
}

#[derive(Debug)]
pub struct TodoListView {
    client: TodoClient,
    items: Vec<Todo>,
    next_token: u64,
    latest_load: Option<u64>,
}

impl TodoListView {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            next_token: 0,
            latest_load: None,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    /// Local items in display order.
    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn rows(&self) -> Vec<Row> {
        render_rows(&self.items)
    }

    pub fn index_of(&self, id: &TodoId) -> Option<usize> {
        self.items.iter().position(|t| &t.id == id)
    }

    fn issue(&mut self, op: PendingOp, request: HttpRequest) -> Pending {
        self.next_token += 1;
        Pending {
            token: self.next_token,
            op,
            request,
        }
    }

    pub fn begin_load(&mut self) -> Pending {
        let request = self.client.build_list_todos();
        let pending = self.issue(PendingOp::Load, request);
        self.latest_load = Some(pending.token);
        pending
    }

    /// Returns `Ok(None)` for a blank title; nothing is issued.
    pub fn begin_add(&mut self, title: &str) -> Result<Option<Pending>, ApiError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let request = self.client.build_create_todo(&CreateTodo {
            title: title.to_string(),
            completed: false,
        })?;
        let op = PendingOp::Add {
            title: title.to_string(),
        };
        Ok(Some(self.issue(op, request)))
    }

    pub fn begin_toggle(&mut self, id: &TodoId, completed: bool) -> Result<Pending, ApiError> {
        let request = self
            .client
            .build_update_todo(id, &UpdateTodo::completed(completed))?;
        let op = PendingOp::Toggle {
            id: id.clone(),
            completed,
        };
        Ok(self.issue(op, request))
    }

    pub fn begin_delete(&mut self, id: &TodoId) -> Pending {
        let request = self.client.build_delete_todo(id);
        self.issue(PendingOp::Delete { id: id.clone() }, request)
    }

    /// Apply the outcome of a previously issued request.
    pub fn complete<S>(
        &mut self,
        pending: Pending,
        outcome: Result<HttpResponse, TransportError>,
        surface: &mut S,
    ) -> Completion
    where
        S: RenderSurface + ?Sized,
    {
        let Pending { token, op, .. } = pending;
        let response = outcome.map_err(ApiError::from);
        match op {
            PendingOp::Load => self.finish_load(token, response, surface),
            PendingOp::Add { title } => self.finish_add(&title, response, surface),
            PendingOp::Toggle { id, completed } => {
                self.finish_toggle(&id, completed, response, surface)
            }
            PendingOp::Delete { id } => self.finish_delete(&id, response, surface),
        }
    }

    fn finish_load<S>(
        &mut self,
        token: u64,
        response: Result<HttpResponse, ApiError>,
        surface: &mut S,
    ) -> Completion
    where
        S: RenderSurface + ?Sized,
    {
        if self.latest_load != Some(token) {
            debug!(token, latest = ?self.latest_load, "discarding stale load");
            return Completion::Stale;
        }
        match response.and_then(|r| self.client.parse_list_todos(r)) {
            Ok(todos) => {
                info!(count = todos.len(), "loaded todos");
                self.items = todos;
                self.resort_and_render(surface);
                Completion::Applied
            }
            Err(err) => {
                error!(%err, "failed to load todos");
                Completion::Ignored
            }
        }
    }

    fn finish_add<S>(
        &mut self,
        title: &str,
        response: Result<HttpResponse, ApiError>,
        surface: &mut S,
    ) -> Completion
    where
        S: RenderSurface + ?Sized,
    {
        match response.and_then(|r| self.client.parse_create_todo(r)) {
            Ok(todo) => {
                info!(id = %todo.id, title, "created todo");
                self.items.push(todo);
                self.resort_and_render(surface);
                Completion::Applied
            }
            Err(err) if err.is_semantic() => {
                error!(%err, title, "create returned no id");
                surface.alert(MISSING_ID_ALERT);
                Completion::Alerted
            }
            Err(err) => {
                error!(%err, title, "failed to add todo");
                surface.alert(ADD_FAILED_ALERT);
                Completion::Alerted
            }
        }
    }

    fn finish_toggle<S>(
        &mut self,
        id: &TodoId,
        completed: bool,
        response: Result<HttpResponse, ApiError>,
        surface: &mut S,
    ) -> Completion
    where
        S: RenderSurface + ?Sized,
    {
        match response.and_then(|r| self.client.parse_update_todo(r)) {
            Ok(updated) => {
                match self.items.iter_mut().find(|t| &t.id == id) {
                    Some(slot) => *slot = updated,
                    None => warn!(%id, "toggled todo is no longer in the local list"),
                }
                info!(%id, completed, "updated todo status");
                self.resort_and_render(surface);
                Completion::Applied
            }
            Err(err) => {
                error!(%err, %id, "failed to update todo status");
                Completion::Ignored
            }
        }
    }

    fn finish_delete<S>(
        &mut self,
        id: &TodoId,
        response: Result<HttpResponse, ApiError>,
        surface: &mut S,
    ) -> Completion
    where
        S: RenderSurface + ?Sized,
    {
        let response = match response {
            Ok(response) => response,
            Err(err) => {
                error!(%err, %id, "failed to delete todo");
                return Completion::Ignored;
            }
        };
        // Any answer from the server removes the item locally; the body is
        // never read.
        if let Err(err) = self.client.parse_delete_todo(response) {
            warn!(%err, %id, "delete answered with a non-success status");
        }
        let before = self.items.len();
        self.items.retain(|t| &t.id != id);
        info!(%id, removed = before - self.items.len(), "deleted todo");
        surface.render(&self.rows());
        Completion::Applied
    }

    /// Swap the item at `index` with its predecessor if both are active.
    /// Local only; the next load discards it.
    pub fn move_up<S>(&mut self, index: usize, surface: &mut S) -> Completion
    where
        S: RenderSurface + ?Sized,
    {
        if !can_move_up(&self.items, index) {
            debug!(index, "move up not eligible");
            return Completion::Skipped;
        }
        self.items.swap(index - 1, index);
        surface.render(&self.rows());
        Completion::Applied
    }

    /// Swap the item at `index` with its successor unless it is the last
    /// active item. Local only; the next load discards it.
    pub fn move_down<S>(&mut self, index: usize, surface: &mut S) -> Completion
    where
        S: RenderSurface + ?Sized,
    {
        if !can_move_down(&self.items, index) {
            debug!(index, "move down not eligible");
            return Completion::Skipped;
        }
        self.items.swap(index, index + 1);
        surface.render(&self.rows());
        Completion::Applied
    }

    /// `move_up` with the index resolved from `id` at call time.
    pub fn move_item_up<S>(&mut self, id: &TodoId, surface: &mut S) -> Completion
    where
        S: RenderSurface + ?Sized,
    {
        match self.index_of(id) {
            Some(index) => self.move_up(index, surface),
            None => Completion::Skipped,
        }
    }

    pub fn move_item_down<S>(&mut self, id: &TodoId, surface: &mut S) -> Completion
    where
        S: RenderSurface + ?Sized,
    {
        match self.index_of(id) {
            Some(index) => self.move_down(index, surface),
            None => Completion::Skipped,
        }
    }

    fn resort_and_render<S>(&mut self, surface: &mut S)
    where
        S: RenderSurface + ?Sized,
    {
        sort_completed_last(&mut self.items);
        surface.render(&self.rows());
    }
}
