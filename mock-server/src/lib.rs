//! In-memory stand-in for the remote user-management REST service.
//!
//! Mirrors the slice of the gorest-style API the client exercises: users,
//! per-user posts, per-post comments, bearer-token auth on writes, and the
//! service's error shapes — `{"message": ...}` objects for auth/lookup
//! failures and `[{"field", "message"}]` arrays for validation failures.
//! Ids are sequential integers assigned by the server.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub gender: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

// Create payloads default missing fields to empty strings so they fall into
// the service's own blank-field validation instead of axum's decode error.

#[derive(Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreatePost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Deserialize)]
pub struct CreateComment {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
struct FieldError {
    field: &'static str,
    message: &'static str,
}

#[derive(Default)]
pub struct MockState {
    next_id: u64,
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl MockState {
    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<MockState>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(MockState::default()));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}/comments",
            get(list_comments).post(create_comment),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Writes require `Authorization: Bearer <token>` with a non-empty token.
fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({"message": "Authentication failed"})),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"message": "Resource not found"})),
    )
        .into_response()
}

fn invalid(errors: Vec<FieldError>) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
}

/// Loose server-side email shape: something@something.something, no spaces.
fn plausible_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .rsplit_once('.')
                    .is_some_and(|(d, tld)| !d.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.read().await.users.clone())
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Response {
    let state = db.read().await;
    match state.users.iter().find(|u| u.id == id) {
        Some(user) => Json(user.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateUser>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut errors = Vec::new();
    if input.name.is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "can't be blank",
        });
    }
    if input.email.is_empty() {
        errors.push(FieldError {
            field: "email",
            message: "can't be blank",
        });
    } else if !plausible_email(&input.email) {
        errors.push(FieldError {
            field: "email",
            message: "is invalid",
        });
    }
    if !matches!(input.gender.as_str(), "male" | "female") {
        errors.push(FieldError {
            field: "gender",
            message: "can't be blank, can be male of female",
        });
    }
    if !matches!(input.status.as_str(), "active" | "inactive") {
        errors.push(FieldError {
            field: "status",
            message: "can't be blank",
        });
    }
    if !errors.is_empty() {
        return invalid(errors);
    }

    let mut state = db.write().await;
    let user = User {
        id: state.alloc_id(),
        name: input.name,
        email: input.email,
        gender: input.gender,
        status: input.status,
    };
    state.users.push(user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn list_posts(State(db): State<Db>, Path(user_id): Path<u64>) -> Response {
    let state = db.read().await;
    if !state.users.iter().any(|u| u.id == user_id) {
        return not_found();
    }
    let posts: Vec<Post> = state
        .posts
        .iter()
        .filter(|p| p.user_id == user_id)
        .cloned()
        .collect();
    Json(posts).into_response()
}

async fn create_post(
    State(db): State<Db>,
    Path(user_id): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<CreatePost>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut errors = Vec::new();
    if input.title.is_empty() {
        errors.push(FieldError {
            field: "title",
            message: "can't be blank",
        });
    }
    if input.body.is_empty() {
        errors.push(FieldError {
            field: "body",
            message: "can't be blank",
        });
    }
    if !errors.is_empty() {
        return invalid(errors);
    }

    let mut state = db.write().await;
    if !state.users.iter().any(|u| u.id == user_id) {
        return not_found();
    }
    let post = Post {
        id: state.alloc_id(),
        user_id,
        title: input.title,
        body: input.body,
    };
    state.posts.push(post.clone());
    (StatusCode::CREATED, Json(post)).into_response()
}

async fn list_comments(State(db): State<Db>, Path(post_id): Path<u64>) -> Response {
    let state = db.read().await;
    if !state.posts.iter().any(|p| p.id == post_id) {
        return not_found();
    }
    let comments: Vec<Comment> = state
        .comments
        .iter()
        .filter(|c| c.post_id == post_id)
        .cloned()
        .collect();
    Json(comments).into_response()
}

async fn create_comment(
    State(db): State<Db>,
    Path(post_id): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<CreateComment>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut errors = Vec::new();
    if input.body.is_empty() {
        errors.push(FieldError {
            field: "body",
            message: "can't be blank",
        });
    }
    if input.name.is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "can't be blank",
        });
    }
    if !plausible_email(&input.email) {
        errors.push(FieldError {
            field: "email",
            message: "is invalid",
        });
    }
    if !errors.is_empty() {
        return invalid(errors);
    }

    let mut state = db.write().await;
    if !state.posts.iter().any(|p| p.id == post_id) {
        return not_found();
    }
    let comment = Comment {
        id: state.alloc_id(),
        post_id,
        name: input.name,
        email: input.email,
        body: input.body,
    };
    state.comments.push(comment.clone());
    (StatusCode::CREATED, Json(comment)).into_response()
}
