//! Client-side validation run before any mutating request is issued.
//!
//! A failed check blocks the request entirely — the caller gets a
//! [`ValidationError`] to turn into a notification and no command is
//! produced. Presence checks intentionally do not trim: the empty string is
//! the only absent value, and an all-whitespace email fails the pattern
//! rather than the presence check.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Gender, NewPost, NewUser, Status};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A validation failure, pre-worded for the notification boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub title: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    const fn new(title: &'static str, message: &'static str) -> Self {
        Self { title, message }
    }
}

/// `local-part@domain.tld` with no whitespace anywhere.
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Draft of the create-user form. Selects start unset, text fields empty.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub gender: Option<Gender>,
    pub status: Option<Status>,
}

/// Draft of the create-post form.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

/// Validate the create-user form: all four fields present, then the email
/// pattern. Field presence is always checked before the pattern.
pub fn validate_new_user(draft: &UserDraft) -> Result<NewUser, ValidationError> {
    let (gender, status) = match (draft.gender, draft.status) {
        (Some(g), Some(s)) if !draft.name.is_empty() && !draft.email.is_empty() => (g, s),
        _ => {
            return Err(ValidationError::new(
                "Validation Error",
                "All fields are mandatory. Please fill in all the fields.",
            ))
        }
    };
    if !valid_email(&draft.email) {
        return Err(ValidationError::new(
            "Invalid Email",
            "Please enter a valid email address.",
        ));
    }
    Ok(NewUser {
        name: draft.name.clone(),
        email: draft.email.clone(),
        gender,
        status,
    })
}

/// Validate the create-post form: title and body must be non-empty.
pub fn validate_new_post(draft: &PostDraft) -> Result<NewPost, ValidationError> {
    if draft.title.is_empty() || draft.body.is_empty() {
        return Err(ValidationError::new(
            "Validation Error",
            "Post title and body are mandatory.",
        ));
    }
    Ok(NewPost {
        title: draft.title.clone(),
        body: draft.body.clone(),
    })
}

/// Validate a comment draft: the body must be non-empty.
pub fn validate_comment_body(body: &str) -> Result<(), ValidationError> {
    if body.is_empty() {
        return Err(ValidationError::new(
            "Validation Error",
            "Add a comment to submit",
        ));
    }
    Ok(())
}
