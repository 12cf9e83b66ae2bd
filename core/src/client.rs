//! Stateless HTTP request builder and response parser for the to-do
//! collection resource.
//!
//! # Design
//! `TodoClient` holds only the collection URL. Each operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the host performs the round-trip in
//! between.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

pub const DEFAULT_COLLECTION_PATH: &str = "/api/todos";

/// Synchronous, stateless client for the to-do collection.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
    collection: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: DEFAULT_COLLECTION_PATH.to_string(),
        }
    }

    /// Point the client at a collection path other than `/api/todos`.
    pub fn with_collection(mut self, path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        self.collection = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.collection)
    }

    fn item_url(&self, id: &TodoId) -> String {
        format!("{}{}/{id}", self.base_url, self.collection)
    }

    /// Link target for an item's detail page, relative to the site root.
    pub fn detail_href(id: &TodoId) -> String {
        format!("/todo/{id}")
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_todo(&self, id: &TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_update_todo(&self, id: &TodoId, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url(id),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_delete_todo(&self, id: &TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// Parse a create response. An absent, `null`, blank or zero `id` is
    /// `MissingId`.
    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        let created: CreatedTodo = from_json(&response.body)?;
        let id = created
            .id
            .filter(|id| !id.is_blank())
            .ok_or(ApiError::MissingId)?;
        Ok(Todo {
            id,
            title: created.title,
            completed: created.completed,
            extra: created.extra,
        })
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// Any 2xx counts; the body is never inspected.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Shape of a create response before the id has been checked.
#[derive(Deserialize)]
struct CreatedTodo {
    #[serde(default)]
    id: Option<TodoId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    completed: bool,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:8080")
    }

    #[test]
    fn build_list_todos_targets_collection() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/api/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_todo_appends_id() {
        let req = client().build_get_todo(&TodoId::Int(42));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/api/todos/42");
    }

    #[test]
    fn build_create_todo_posts_json() {
        let input = CreateTodo {
            title: "Buy milk".to_string(),
            completed: false,
        };
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/api/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["completed"], false);
    }

    #[test]
    fn build_update_todo_sends_only_completed() {
        let req = client()
            .build_update_todo(&TodoId::Int(3), &UpdateTodo::completed(true))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8080/api/todos/3");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn build_delete_todo_has_no_body() {
        let req = client().build_delete_todo(&TodoId::from("abc"));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8080/api/todos/abc");
        assert!(req.body.is_none());
    }

    #[test]
    fn custom_collection_path_is_normalized() {
        let c = TodoClient::new("http://h/").with_collection("todos/");
        assert_eq!(c.build_list_todos().path, "http://h/todos");
        assert_eq!(c.build_delete_todo(&TodoId::Int(1)).path, "http://h/todos/1");
    }

    #[test]
    fn parse_list_todos_success() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":1,"title":"A","completed":false},{"id":2,"title":"B","completed":true}]"#,
        );
        let todos = client().parse_list_todos(response).unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[1].title, "B");
        assert!(todos[1].completed);
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client()
            .parse_list_todos(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_create_todo_accepts_any_2xx() {
        let body = r#"{"id":9,"title":"New","completed":false,"priority":"MEDIUM"}"#;
        let todo = client().parse_create_todo(HttpResponse::new(201, body)).unwrap();
        assert_eq!(todo.id, TodoId::Int(9));
        assert_eq!(todo.extra["priority"], "MEDIUM");
        assert!(client().parse_create_todo(HttpResponse::new(200, body)).is_ok());
    }

    #[test]
    fn parse_create_todo_without_id_is_missing_id() {
        let err = client()
            .parse_create_todo(HttpResponse::new(201, r#"{"title":"New","completed":false}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingId));

        let err = client()
            .parse_create_todo(HttpResponse::new(201, r#"{"id":null,"title":"New"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingId));
    }

    #[test]
    fn parse_create_todo_blank_or_zero_id_is_missing_id() {
        for body in [
            r#"{"id":"","title":"x","completed":false}"#,
            r#"{"id":"   ","title":"x","completed":false}"#,
            r#"{"id":0,"title":"x","completed":false}"#,
        ] {
            let err = client()
                .parse_create_todo(HttpResponse::new(201, body))
                .unwrap_err();
            assert!(matches!(err, ApiError::MissingId), "{body}");
        }
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn parse_update_todo_keeps_server_fields() {
        let response = HttpResponse::new(
            200,
            r#"{"id":1,"title":"A","completed":true,"description":"d"}"#,
        );
        let todo = client().parse_update_todo(response).unwrap();
        assert!(todo.completed);
        assert_eq!(todo.extra["description"], "d");
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = client().parse_get_todo(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_todo_ignores_body() {
        assert!(client().parse_delete_todo(HttpResponse::new(204, "")).is_ok());
        assert!(client()
            .parse_delete_todo(HttpResponse::new(200, "<html>gone</html>"))
            .is_ok());
        assert!(matches!(
            client().parse_delete_todo(HttpResponse::new(404, "")),
            Err(ApiError::NotFound)
        ));
    }

    #[test]
    fn detail_href_uses_item_id() {
        assert_eq!(TodoClient::detail_href(&TodoId::Int(5)), "/todo/5");
    }
}
