use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    #[serde(rename = "userId")]
    pub user_id: u32,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    #[serde(rename = "userId")]
    pub user_id: u32,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    #[serde(rename = "userId")]
    pub user_id: Option<u32>,
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(rename = "_limit")]
    pub limit: Option<usize>,
}

/// Initial contents of the server.
#[derive(Clone, Debug, Default)]
pub struct Seed {
    pub users: Vec<User>,
    pub todos: Vec<Todo>,
}

impl Seed {
    /// A handful of users with a few todos each, for local development.
    pub fn demo() -> Self {
        let names = [
            ("Ada Lovelace", "ada"),
            ("Grace Hopper", "grace"),
            ("Alan Turing", "alan"),
            ("Barbara Liskov", "barbara"),
        ];
        let users = names
            .iter()
            .zip(1..)
            .map(|((name, username), id)| User {
                id,
                name: (*name).to_string(),
                username: (*username).to_string(),
                email: format!("{username}@example.com"),
            })
            .collect::<Vec<_>>();
        let titles = [
            "Read the compiler notes",
            "Fix the flaky build",
            "Review pull requests",
            "Write release notes",
            "Plan the sprint",
            "Answer support tickets",
        ];
        let todos = titles
            .iter()
            .zip(1..)
            .map(|(title, id)| Todo {
                id,
                user_id: (id - 1) % users.len() as u32 + 1,
                title: (*title).to_string(),
                completed: id % 3 == 0,
            })
            .collect();
        Self { users, todos }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    users: Vec<User>,
    todos: BTreeMap<u32, Todo>,
    next_id: u32,
}

impl Store {
    fn from_seed(seed: Seed) -> Self {
        let next_id = seed.todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            users: seed.users,
            todos: seed.todos.into_iter().map(|t| (t.id, t)).collect(),
            next_id,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Router with no users and no todos.
pub fn app() -> Router {
    app_with(Seed::default())
}

pub fn app_with(seed: Seed) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::from_seed(seed)));
    Router::new()
        .route("/users", get(list_users))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .layer(middleware::from_fn(cors))
        .with_state(db)
}

pub async fn run(listener: TcpListener, seed: Seed) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(seed)).await
}

/// Lets a page served from another origin call the server, preflight included.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };
    allow_any_origin(response.headers_mut());
    response
}

fn allow_any_origin(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PATCH, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
}

async fn list_users(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<User>> {
    let store = db.read().await;
    let limit = params.limit.unwrap_or(usize::MAX);
    Json(store.users.iter().take(limit).cloned().collect())
}

async fn list_todos(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    let limit = params.limit.unwrap_or(usize::MAX);
    Json(store.todos.values().take(limit).cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut store = db.write().await;
    let todo = Todo {
        id: store.next_id,
        user_id: input.user_id,
        title: input.title,
        completed: input.completed,
    };
    store.next_id += 1;
    store.todos.insert(todo.id, todo.clone());
    debug!(id = todo.id, "created todo");
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<Todo>, StatusCode> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(user_id) = input.user_id {
        todo.user_id = user_id;
    }
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    debug!(id, completed = todo.completed, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut store = db.write().await;
    store.todos.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    debug!(id, "deleted todo");
    Ok(Json(json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_camel_case_user_id() {
        let todo = Todo {
            id: 1,
            user_id: 2,
            title: "Test".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["userId"], 2);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn create_todo_defaults_completed_to_false() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"userId":1,"title":"No completed field"}"#).unwrap();
        assert_eq!(input.title, "No completed field");
        assert!(!input.completed);
    }

    #[test]
    fn create_todo_rejects_missing_user() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"title":"Orphan"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_all_fields_optional() {
        let input: UpdateTodo = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.completed.is_none());
        assert!(input.user_id.is_none());
    }

    #[test]
    fn demo_seed_assigns_every_todo_to_a_seeded_user() {
        let seed = Seed::demo();
        assert!(!seed.users.is_empty());
        for todo in &seed.todos {
            assert!(seed.users.iter().any(|u| u.id == todo.user_id));
        }
    }

    #[test]
    fn next_id_follows_seeded_todos() {
        let store = Store::from_seed(Seed::demo());
        assert_eq!(store.next_id, Seed::demo().todos.len() as u32 + 1);
        assert_eq!(Store::from_seed(Seed::default()).next_id, 1);
    }
}
