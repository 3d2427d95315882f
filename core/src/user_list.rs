//! User list view: load all users once, create new ones.
//!
//! # Design
//! The view is a deterministic state machine. Interactions produce
//! [`ListCommand`] values (requests to execute); the driver feeds request
//! outcomes back as [`ListEvent`] values. Nothing in here touches the
//! network, so every property — validation gating, the prepend-on-create
//! rule, flag transitions — is testable with plain function calls.

use tracing::error;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::notify::Notification;
use crate::types::User;
use crate::validate::{self, UserDraft};

/// A request the list view wants executed.
#[derive(Debug)]
pub enum ListCommand {
    FetchUsers(HttpRequest),
    CreateUser(HttpRequest),
}

/// Outcome of an executed [`ListCommand`].
#[derive(Debug)]
pub enum ListEvent {
    UsersLoaded(Result<Vec<User>, ApiError>),
    UserCreated(Result<User, ApiError>),
}

/// Client-side state of the user list screen.
#[derive(Debug)]
pub struct UserListView {
    users: Vec<User>,
    /// Create-user form contents, edited in place by the host.
    pub draft: UserDraft,
    loading: bool,
    creating: bool,
    error: Option<String>,
    notifications: Vec<Notification>,
}

impl UserListView {
    /// Mount the view: the list starts loading immediately.
    pub fn mount(client: &ApiClient) -> (Self, ListCommand) {
        let view = Self {
            users: Vec::new(),
            draft: UserDraft::default(),
            loading: true,
            creating: false,
            error: None,
            notifications: Vec::new(),
        };
        (view, ListCommand::FetchUsers(client.build_list_users()))
    }

    /// Submit the create-user form.
    ///
    /// Validation failures push an error notification and produce no
    /// command — no network call happens. While a create is already
    /// in flight further submissions are ignored.
    pub fn submit(&mut self, client: &ApiClient) -> Option<ListCommand> {
        if self.creating {
            return None;
        }
        let input = match validate::validate_new_user(&self.draft) {
            Ok(input) => input,
            Err(invalid) => {
                self.notifications
                    .push(Notification::error(invalid.title, invalid.message));
                return None;
            }
        };
        match client.build_create_user(&input) {
            Ok(request) => {
                self.creating = true;
                Some(ListCommand::CreateUser(request))
            }
            Err(err) => {
                error!(%err, "failed to build create-user request");
                None
            }
        }
    }

    /// Apply a request outcome to the view state.
    pub fn apply(&mut self, event: ListEvent) {
        match event {
            ListEvent::UsersLoaded(result) => {
                if !self.loading {
                    return; // stale completion, e.g. after a reload superseded it
                }
                self.loading = false;
                match result {
                    Ok(users) => self.users = users,
                    Err(err) => {
                        error!(%err, "failed to fetch users");
                        self.error = Some(err.display_message());
                    }
                }
            }
            ListEvent::UserCreated(result) => {
                self.creating = false;
                match result {
                    Ok(user) => {
                        self.users.insert(0, user);
                        self.draft = UserDraft::default();
                        self.error = None;
                        self.notifications.push(Notification::success(
                            "User created.",
                            "The user has been created successfully.",
                        ));
                    }
                    Err(err) => {
                        error!(%err, "failed to create user");
                        self.error = Some(err.display_message());
                        // draft intentionally preserved for correction
                    }
                }
            }
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Display-level error from the last failed request, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Drain pending notifications for display.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
