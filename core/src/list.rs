//! Synchronous driver tying the view-model to a transport and a surface.
//!
//! Each operation issues its request, waits for the transport, and runs
//! the completion before returning. Hosts that juggle several in-flight
//! requests use `TodoListView` directly instead.

use tracing::{debug, error};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::render::{Gesture, RenderSurface};
use crate::types::{Todo, TodoId};
use crate::view::{Completion, Pending, TodoListView, ADD_FAILED_ALERT};

pub struct TodoList<T, S> {
    view: TodoListView,
    transport: T,
    surface: S,
}

impl<T: Transport, S: RenderSurface> TodoList<T, S> {
    pub fn new(client: TodoClient, transport: T, surface: S) -> Self {
        Self {
            view: TodoListView::new(client),
            transport,
            surface,
        }
    }

    pub fn view(&self) -> &TodoListView {
        &self.view
    }

    pub fn items(&self) -> &[Todo] {
        self.view.items()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn run(&mut self, pending: Pending) -> Completion {
        let outcome = self.transport.execute(pending.request().clone());
        self.view.complete(pending, outcome, &mut self.surface)
    }

    pub fn load(&mut self) -> Completion {
        let pending = self.view.begin_load();
        self.run(pending)
    }

    pub fn add(&mut self, title: &str) -> Completion {
        match self.view.begin_add(title) {
            Ok(Some(pending)) => self.run(pending),
            Ok(None) => Completion::Skipped,
            Err(err) => {
                error!(%err, "failed to build create request");
                self.surface.alert(ADD_FAILED_ALERT);
                Completion::Alerted
            }
        }
    }

    pub fn toggle_completed(&mut self, id: &TodoId, completed: bool) -> Completion {
        match self.view.begin_toggle(id, completed) {
            Ok(pending) => self.run(pending),
            Err(err) => {
                error!(%err, %id, "failed to build update request");
                Completion::Ignored
            }
        }
    }

    pub fn delete(&mut self, id: &TodoId) -> Completion {
        let pending = self.view.begin_delete(id);
        self.run(pending)
    }

    /// Fetch one item's current server state. The local list is untouched.
    pub fn fetch(&mut self, id: &TodoId) -> Result<Todo, ApiError> {
        let request = self.view.client().build_get_todo(id);
        let response = self.transport.execute(request)?;
        let todo = self.view.client().parse_get_todo(response)?;
        debug!(%id, "fetched todo");
        Ok(todo)
    }

    pub fn move_up(&mut self, index: usize) -> Completion {
        self.view.move_up(index, &mut self.surface)
    }

    pub fn move_down(&mut self, index: usize) -> Completion {
        self.view.move_down(index, &mut self.surface)
    }

    /// Run the gesture a row action was bound to.
    pub fn dispatch(&mut self, gesture: &Gesture) -> Completion {
        match gesture {
            Gesture::Toggle { id, completed } => self.toggle_completed(id, *completed),
            Gesture::MoveUp { id } => self.view.move_item_up(id, &mut self.surface),
            Gesture::MoveDown { id } => self.view.move_item_down(id, &mut self.surface),
            Gesture::Delete { id } => self.delete(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use crate::render::{ActionKind, Row};

    #[derive(Default)]
    struct Scripted {
        replies: VecDeque<Result<HttpResponse, TransportError>>,
        sent: Vec<HttpRequest>,
    }

    impl Scripted {
        fn reply(mut self, status: u16, body: &str) -> Self {
            self.replies.push_back(Ok(HttpResponse::new(status, body)));
            self
        }
    }

    impl Transport for Scripted {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.push(request);
            self.replies
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("no scripted reply")))
        }
    }

    #[derive(Default)]
    struct Screen {
        rows: Vec<Row>,
        renders: usize,
        alerts: Vec<String>,
    }

    impl RenderSurface for Screen {
        fn render(&mut self, rows: &[Row]) {
            self.rows = rows.to_vec();
            self.renders += 1;
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
    }

    fn list(transport: Scripted) -> TodoList<Scripted, Screen> {
        TodoList::new(TodoClient::new("http://h"), transport, Screen::default())
    }

    #[test]
    fn blank_add_sends_nothing() {
        let mut l = list(Scripted::default());
        assert_eq!(l.add(""), Completion::Skipped);
        assert_eq!(l.add("   "), Completion::Skipped);
        assert!(l.transport_mut().sent.is_empty());
        assert_eq!(l.surface().renders, 0);
    }

    #[test]
    fn operations_hit_expected_endpoints() {
        let transport = Scripted::default()
            .reply(200, r#"[{"id":1,"title":"a","completed":false}]"#)
            .reply(201, r#"{"id":2,"title":"b","completed":false}"#)
            .reply(200, r#"{"id":1,"title":"a","completed":true}"#)
            .reply(204, "");
        let mut l = list(transport);

        assert_eq!(l.load(), Completion::Applied);
        assert_eq!(l.add("b"), Completion::Applied);
        assert_eq!(l.toggle_completed(&TodoId::Int(1), true), Completion::Applied);
        assert_eq!(l.delete(&TodoId::Int(2)), Completion::Applied);

        let sent: Vec<(HttpMethod, String)> = l
            .transport_mut()
            .sent
            .iter()
            .map(|r| (r.method, r.path.clone()))
            .collect();
        assert_eq!(
            sent,
            vec![
                (HttpMethod::Get, "http://h/api/todos".to_string()),
                (HttpMethod::Post, "http://h/api/todos".to_string()),
                (HttpMethod::Put, "http://h/api/todos/1".to_string()),
                (HttpMethod::Delete, "http://h/api/todos/2".to_string()),
            ]
        );
        assert_eq!(l.items().len(), 1);
        assert!(l.items()[0].completed);
    }

    #[test]
    fn dispatching_row_actions_uses_item_ids() {
        let transport = Scripted::default().reply(
            200,
            r#"[{"id":1,"title":"a","completed":false},{"id":2,"title":"b","completed":false},{"id":3,"title":"c","completed":true}]"#,
        );
        let mut l = list(transport);
        l.load();

        // Capture the down action of "a", then reorder before using it.
        let down_a = l.surface().rows[0].action(ActionKind::Down).unwrap().gesture.clone();
        assert_eq!(l.move_down(0), Completion::Applied);
        assert_eq!(l.surface().rows[1].title, "a");

        // "a" is now the last active item, so its down gesture is a no-op.
        assert_eq!(l.dispatch(&down_a), Completion::Skipped);
        let order: Vec<&str> = l.items().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[test]
    fn fetch_reads_one_item_without_touching_the_list() {
        let transport = Scripted::default()
            .reply(200, r#"[{"id":1,"title":"a","completed":false}]"#)
            .reply(200, r#"{"id":1,"title":"a (server)","completed":true,"description":"d"}"#)
            .reply(404, "");
        let mut l = list(transport);
        l.load();
        let renders = l.surface().renders;

        let todo = l.fetch(&TodoId::Int(1)).unwrap();
        assert_eq!(todo.title, "a (server)");
        assert_eq!(todo.extra["description"], "d");
        assert!(matches!(l.fetch(&TodoId::Int(9)), Err(ApiError::NotFound)));
        assert!(matches!(l.fetch(&TodoId::Int(1)), Err(ApiError::Transport(_))));

        assert_eq!(l.items()[0].title, "a");
        assert_eq!(l.surface().renders, renders);
        let last = l.transport_mut().sent.last().unwrap().clone();
        assert_eq!(last.method, HttpMethod::Get);
        assert_eq!(last.path, "http://h/api/todos/1");
    }

    #[test]
    fn failed_create_alerts_user() {
        let mut l = list(Scripted::default());
        assert_eq!(l.add("x"), Completion::Alerted);
        assert_eq!(l.surface().alerts, [ADD_FAILED_ALERT]);
        assert!(l.items().is_empty());
    }
}
