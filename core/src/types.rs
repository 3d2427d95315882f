//! Domain DTOs for the remote user-management API.
//!
//! # Design
//! These types mirror the remote service's JSON schema but are defined
//! independently of the mock-server crate; integration tests catch any
//! schema drift between the two. Comments are deliberately absent from
//! [`Post`]: the server never embeds them, and the merged per-post comment
//! lists live only in detail-view state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: Status,
}

/// A post owned by a user. The server representation carries no comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// A comment on a post. `name` and `email` are the submitter's attribution,
/// copied from the current user at submission time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

/// Request payload for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: Status,
}

/// Request payload for `POST /users/{id}/posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

/// Request payload for `POST /posts/{id}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub body: String,
    pub name: String,
    pub email: String,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// FromStr impls back the CLI boundary, where gender/status arrive as text.

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender {other:?}, expected male or female")),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            other => Err(format!(
                "unknown status {other:?}, expected active or inactive"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_roundtrips_through_json() {
        let user = User {
            id: 42,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            gender: Gender::Female,
            status: Status::Active,
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn gender_and_status_serialize_lowercase() {
        assert_eq!(serde_json::to_value(Gender::Male).unwrap(), "male");
        assert_eq!(serde_json::to_value(Status::Inactive).unwrap(), "inactive");
    }

    #[test]
    fn user_deserializes_from_api_shape() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"name":"Ann","email":"ann@example.com","gender":"female","status":"active"}"#,
        )
        .unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(user.gender, Gender::Female);
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let result: Result<Gender, _> = serde_json::from_str(r#""other""#);
        assert!(result.is_err());
    }

    #[test]
    fn from_str_matches_serde_spelling() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("inactive".parse::<Status>().unwrap(), Status::Inactive);
        assert!("Active".parse::<Status>().is_err());
    }
}
