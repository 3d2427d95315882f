//! Async driver: executes view commands and feeds outcomes back.
//!
//! # Design
//! Instead of nested completion callbacks, the flow is explicit future
//! composition: every command becomes one future, all
//! in-flight futures live in a single `FuturesUnordered` polled on one task,
//! and each completion is applied to the view immediately — in whatever
//! order the network resolves. Follow-up commands (the comment fan-out) join
//! the same in-flight set, so the loop ending means every member of the
//! fan-out has completed: an explicit join-all. Dropping the driver future
//! is the unmount path; completions that never get applied are simply lost,
//! which the views treat as a no-op by construction.
//!
//! Single task, no locks — the only discipline is that `apply` runs between
//! polls, never concurrently with itself.

use futures::stream::{FuturesUnordered, StreamExt};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::user_detail::{DetailCommand, DetailEvent, UserDetailView};
use crate::user_list::{ListCommand, ListEvent, UserListView};

async fn round_trip<T: Transport + ?Sized>(
    transport: &T,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    transport.execute(request).await
}

/// Execute one list-view command and parse the outcome into an event.
pub async fn list_event<T: Transport + ?Sized>(
    client: &ApiClient,
    transport: &T,
    command: ListCommand,
) -> ListEvent {
    match command {
        ListCommand::FetchUsers(request) => ListEvent::UsersLoaded(
            round_trip(transport, request)
                .await
                .and_then(|r| client.parse_list_users(r)),
        ),
        ListCommand::CreateUser(request) => ListEvent::UserCreated(
            round_trip(transport, request)
                .await
                .and_then(|r| client.parse_create_user(r)),
        ),
    }
}

/// Execute one detail-view command and parse the outcome into an event.
pub async fn detail_event<T: Transport + ?Sized>(
    client: &ApiClient,
    transport: &T,
    command: DetailCommand,
) -> DetailEvent {
    match command {
        DetailCommand::FetchUser(request) => DetailEvent::UserLoaded(
            round_trip(transport, request)
                .await
                .and_then(|r| client.parse_get_user(r)),
        ),
        DetailCommand::FetchPosts(request) => DetailEvent::PostsLoaded(
            round_trip(transport, request)
                .await
                .and_then(|r| client.parse_list_posts(r)),
        ),
        DetailCommand::FetchComments { post_id, request } => DetailEvent::CommentsLoaded {
            post_id,
            result: round_trip(transport, request)
                .await
                .and_then(|r| client.parse_list_comments(r)),
        },
        DetailCommand::CreatePost(request) => DetailEvent::PostCreated(
            round_trip(transport, request)
                .await
                .and_then(|r| client.parse_create_post(r)),
        ),
        DetailCommand::CreateComment { post_id, request } => DetailEvent::CommentCreated {
            post_id,
            result: round_trip(transport, request)
                .await
                .and_then(|r| client.parse_create_comment(r)),
        },
    }
}

/// Execute one list-view command to completion and apply the outcome.
pub async fn drive_list<T: Transport + ?Sized>(
    view: &mut UserListView,
    client: &ApiClient,
    transport: &T,
    command: ListCommand,
) {
    let event = list_event(client, transport, command).await;
    view.apply(event);
}

/// Run detail-view commands to quiescence.
///
/// All commands execute concurrently; outcomes are applied in completion
/// order, and any follow-up commands (the comment fan-out) are pushed into
/// the same in-flight set. Returns once nothing is in flight, i.e. after the
/// join-all of every fan-out member.
pub async fn drive_detail<T: Transport + ?Sized>(
    view: &mut UserDetailView,
    client: &ApiClient,
    transport: &T,
    commands: Vec<DetailCommand>,
) {
    let mut in_flight: FuturesUnordered<_> = commands
        .into_iter()
        .map(|command| detail_event(client, transport, command))
        .collect();
    while let Some(event) = in_flight.next().await {
        for follow_up in view.apply(client, event) {
            in_flight.push(detail_event(client, transport, follow_up));
        }
    }
}
