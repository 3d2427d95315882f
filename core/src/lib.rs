//! Deterministic client core for a gorest-style user-management service.
//!
//! # Overview
//! Everything that can be decided without a socket lives here: DTOs, the
//! request-building/response-parsing client, form validation, notifications,
//! and the two view state machines (user list, user detail) expressed as
//! command/event cycles. The [`runtime`] module supplies the async driver
//! that executes commands over a [`Transport`] and feeds outcomes back.
//!
//! # Design
//! - `ApiClient` is stateless — base URL plus bearer token, `build_*` /
//!   `parse_*` per operation (host-does-IO pattern).
//! - Views never perform I/O; interactions yield commands, and outcomes
//!   arrive as events. State transitions are pure previous-state → next-state
//!   functions, so concurrent fan-out completions merge safely in any order.
//! - The driver composes the commands as futures with an explicit join-all
//!   for the comment fan-out, making the "all must complete, none may block
//!   the others" contract visible and testable.

pub mod client;
pub mod error;
pub mod http;
pub mod notify;
pub mod runtime;
pub mod types;
pub mod user_detail;
pub mod user_list;
pub mod validate;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use notify::{Notification, Severity};
pub use types::{Comment, Gender, NewComment, NewPost, NewUser, Post, Status, User};
pub use user_detail::{DetailCommand, DetailEvent, PostEntry, UserDetailView};
pub use user_list::{ListCommand, ListEvent, UserListView};
pub use validate::{PostDraft, UserDraft, ValidationError};
