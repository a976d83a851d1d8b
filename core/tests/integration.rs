//! Full lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `TodoApp` over real
//! HTTP using ureq as the transport. Validates that request building, the
//! server's schema, and response parsing agree end-to-end.

mod common;

use async_trait::async_trait;
use common::RecordingView;
use mock_server::{Seed, Todo as ServerTodo, User as ServerUser};
use todo_client_core::{
    ApiError, ClientConfig, Collection, HttpMethod, HttpRequest, HttpResponse, TodoApp,
    TodoClient, Todo, Transport, User,
};

/// Executes requests with ureq, returning 4xx/5xx as data rather than `Err`
/// so the core client handles status interpretation.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

#[async_trait(?Send)]
impl Transport for UreqTransport {
    async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let body = req.body.unwrap_or_default();
        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.url), &req.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.url), &req.headers).call(),
            HttpMethod::Post => {
                with_headers(self.agent.post(&req.url), &req.headers).send(body.as_bytes())
            }
            HttpMethod::Patch => {
                with_headers(self.agent.patch(&req.url), &req.headers).send(body.as_bytes())
            }
        };
        let mut response = result.map_err(|e| ApiError::TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::TransportError(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

fn seed() -> Seed {
    Seed {
        users: vec![ServerUser {
            id: 1,
            name: "Ada".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
        }],
        todos: vec![ServerTodo {
            id: 1,
            user_id: 1,
            title: "Existing".to_string(),
            completed: false,
        }],
    }
}

/// Start the mock server on a random port and return its base URL.
fn spawn_server(seed: Seed) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, seed).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn app(base_url: String) -> TodoApp<UreqTransport, RecordingView> {
    let config = ClientConfig {
        base_url,
        limit: 15,
    };
    TodoApp::new(
        TodoClient::new(&config),
        UreqTransport::new(),
        RecordingView::default(),
    )
}

#[tokio::test]
async fn lifecycle_against_live_server() {
    let app = app(spawn_server(seed()));

    // Step 1: startup loads both collections.
    app.start().await;
    assert_eq!(app.view().options.borrow().len(), 1);
    assert_eq!(app.view().row_ids(), vec![1]);

    // Step 2: create a todo.
    app.submit("Write spec", "1").await;
    assert_eq!(app.view().row_ids(), vec![2, 1]);
    let created = app.view().row(2).unwrap();
    assert_eq!(created.user_name.as_deref(), Some("Ada"));
    assert_eq!(created.title, "Write spec");
    assert!(!created.checked);

    // Step 3: complete it.
    let created_key = app.store().key_of(2).unwrap();
    app.toggle_completion(created_key, true).await;
    assert!(app.store().todo(created_key).unwrap().completed);

    // Step 4: the server agrees.
    let todos: Vec<Todo> = app.fetch_collection(Collection::Todos).await.unwrap();
    assert!(todos.iter().any(|t| t.id == 2 && t.completed));

    // Step 5: delete the seeded todo.
    let seeded_key = app.store().key_of(1).unwrap();
    app.delete(seeded_key).await;
    assert_eq!(app.view().row_ids(), vec![2]);
    assert!(app.store().key_of(1).is_none());

    // Step 6: the server now answers 404 for it, reported but harmless.
    assert!(!app.delete_todo(1).await);
    assert_eq!(app.view().alerts.borrow().len(), 1);
    assert_eq!(app.view().row_ids(), vec![2]);

    let users: Vec<User> = app.fetch_collection(Collection::Users).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop so the port is very likely closed.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let app = app(format!("http://{addr}"));

    app.start().await;
    assert_eq!(app.view().alerts.borrow().len(), 2);
    assert!(app.view().rows.borrow().is_empty());
}
