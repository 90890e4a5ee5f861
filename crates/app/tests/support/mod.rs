//! In-process stand-in for a JSONPlaceholder-style posts/users service.

#![allow(dead_code)]

use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Json;
use serde_json::{Value, json};
use tokio::runtime::Builder;
use tokio::sync::oneshot;

/// Deviations from the conforming service.
#[derive(Debug, Clone, Copy)]
pub struct StubOptions {
    /// Status returned by `DELETE /posts/{id}`.
    pub delete_status: u16,
    /// `GET /posts` returns `[]`.
    pub empty_posts: bool,
    /// `GET /users/{id}` returns HTML instead of JSON.
    pub malformed_users: bool,
    /// Users come back without `address.geo`.
    pub drop_geo: bool,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            delete_status: 200,
            empty_posts: false,
            malformed_users: false,
            drop_geo: false,
        }
    }
}

#[derive(Clone)]
struct StubState {
    options: StubOptions,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubState {
    fn record(&self, line: String) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(line);
        }
    }
}

/// Handle for the stub server. Shuts the server down on drop.
pub struct StubHandle {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubHandle {
    /// Returns the service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns `"METHOD /path"` for every request served so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }
}

impl Drop for StubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawns a conforming service.
pub fn spawn_service() -> StubHandle {
    spawn_service_with(StubOptions::default())
}

/// Spawns a service on its own thread and runtime, bound to `127.0.0.1:0`.
pub fn spawn_service_with(options: StubOptions) -> StubHandle {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("stub bind failed");
    listener
        .set_nonblocking(true)
        .expect("stub listener nonblocking failed");
    let addr = listener.local_addr().expect("stub local addr failed");

    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        options,
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });

    StubHandle {
        base_url: format!("http://{addr}"),
        shutdown: Some(shutdown_tx),
        join: Some(join),
        requests,
    }
}

fn post(id: u64) -> Value {
    json!({
        "userId": 1,
        "id": id,
        "title": format!("post {id}"),
        "body": "quia et suscipit\nsuscipit recusandae"
    })
}

fn user(id: u64, drop_geo: bool) -> Value {
    let mut user = json!({
        "id": id,
        "name": "Ervin Howell",
        "username": "Antonette",
        "email": "Shanna@melissa.tv",
        "address": {
            "street": "Victor Plains",
            "suite": "Suite 879",
            "city": "Wisokyburgh",
            "zipcode": "90566-7771",
            "geo": {"lat": "-43.9509", "lng": "-34.4618"}
        },
        "phone": "010-692-6593 x09125",
        "website": "anastasia.net",
        "company": {
            "name": "Deckow-Crist",
            "catchPhrase": "Proactive didactic contingency",
            "bs": "synergize scalable supply-chains"
        }
    });
    if drop_geo {
        if let Some(address) = user["address"].as_object_mut() {
            address.remove("geo");
        }
    }
    user
}

async fn list_posts(State(state): State<StubState>) -> Json<Value> {
    state.record("GET /posts".to_string());
    if state.options.empty_posts {
        return Json(json!([]));
    }
    Json(Value::Array((1..=3).map(post).collect()))
}

async fn create_post(
    State(state): State<StubState>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record("POST /posts".to_string());
    body["id"] = json!(101);
    (StatusCode::CREATED, Json(body))
}

async fn get_post(State(state): State<StubState>, Path(id): Path<u64>) -> Json<Value> {
    state.record(format!("GET /posts/{id}"));
    Json(post(id))
}

async fn update_post(
    State(state): State<StubState>,
    Path(id): Path<u64>,
    Json(mut body): Json<Value>,
) -> Json<Value> {
    state.record(format!("PUT /posts/{id}"));
    body["id"] = json!(id);
    Json(body)
}

async fn delete_post(State(state): State<StubState>, Path(id): Path<u64>) -> Response {
    state.record(format!("DELETE /posts/{id}"));
    let status = StatusCode::from_u16(state.options.delete_status).unwrap_or(StatusCode::OK);
    if status == StatusCode::NO_CONTENT {
        return status.into_response();
    }
    (status, Json(json!({}))).into_response()
}

async fn list_users(State(state): State<StubState>) -> Json<Value> {
    state.record("GET /users".to_string());
    let drop_geo = state.options.drop_geo;
    Json(json!([user(1, drop_geo), user(2, drop_geo), user(3, drop_geo)]))
}

async fn get_user(State(state): State<StubState>, Path(id): Path<u64>) -> Response {
    state.record(format!("GET /users/{id}"));
    if state.options.malformed_users {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    if id > 10 {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    }
    Json(user(id, state.options.drop_geo)).into_response()
}
