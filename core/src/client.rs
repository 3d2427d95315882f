//! Stateless HTTP request builder and response parser for the remote API.
//!
//! # Design
//! `ApiClient` holds only a base URL and the bearer token and carries no
//! mutable state between calls. Each remote operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The transport executes the actual HTTP
//! round-trip in between, keeping the client deterministic and free of I/O
//! dependencies.
//!
//! Every built request carries the fixed `Authorization: Bearer` credential;
//! there is no retry, no timeout configuration and no caching.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Comment, NewComment, NewPost, NewUser, Post, User};

/// Stateless client for the user-management API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The transport is responsible for executing the
/// HTTP round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{path}", self.base_url),
            headers: vec![self.auth_header()],
            body: None,
        }
    }

    fn post<T: Serialize>(&self, path: String, payload: &T) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{path}", self.base_url),
            headers: vec![
                self.auth_header(),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    fn auth_header(&self) -> (String, String) {
        ("authorization".to_string(), format!("Bearer {}", self.token))
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.get("/users".to_string())
    }

    pub fn build_create_user(&self, input: &NewUser) -> Result<HttpRequest, ApiError> {
        self.post("/users".to_string(), input)
    }

    pub fn build_get_user(&self, id: u64) -> HttpRequest {
        self.get(format!("/users/{id}"))
    }

    pub fn build_list_posts(&self, user_id: u64) -> HttpRequest {
        self.get(format!("/users/{user_id}/posts"))
    }

    pub fn build_create_post(&self, user_id: u64, input: &NewPost) -> Result<HttpRequest, ApiError> {
        self.post(format!("/users/{user_id}/posts"), input)
    }

    pub fn build_list_comments(&self, post_id: u64) -> HttpRequest {
        self.get(format!("/posts/{post_id}/comments"))
    }

    pub fn build_create_comment(
        &self,
        post_id: u64,
        input: &NewComment,
    ) -> Result<HttpRequest, ApiError> {
        self.post(format!("/posts/{post_id}/comments"), input)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        decode(response, 200)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(response, 201)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(response, 200)
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        decode(response, 200)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        decode(response, 201)
    }

    pub fn parse_list_comments(&self, response: HttpResponse) -> Result<Vec<Comment>, ApiError> {
        decode(response, 200)
    }

    pub fn parse_create_comment(&self, response: HttpResponse) -> Result<Comment, ApiError> {
        decode(response, 201)
    }
}

fn decode<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::RequestFailed {
        status: response.status,
        message: extract_error_message(&response.body, response.status),
    })
}

/// Pull a display-ready message out of an error response body.
///
/// The server answers either `{"message": "..."}` or, for validation
/// failures, an array of `{"field": "...", "message": "..."}` records. Any
/// other body yields a generic fallback.
fn extract_error_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
        if let Some(errors) = value.as_array() {
            let parts: Vec<String> = errors
                .iter()
                .filter_map(|e| {
                    let field = e.get("field")?.as_str()?;
                    let message = e.get("message")?.as_str()?;
                    Some(format!("{field} {message}"))
                })
                .collect();
            if !parts.is_empty() {
                return parts.join(", ");
            }
        }
    }
    format!("request failed with status {status}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gender, Status};

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3000", "secret-token")
    }

    fn bearer(req: &HttpRequest) -> Option<&str> {
        req.headers
            .iter()
            .find(|(name, _)| name == "authorization")
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn build_list_users_produces_correct_request() {
        let req = client().build_list_users();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/users");
        assert!(req.body.is_none());
        assert_eq!(bearer(&req), Some("Bearer secret-token"));
    }

    #[test]
    fn every_built_request_carries_the_bearer_token() {
        let client = client();
        let input = NewPost {
            title: "t".to_string(),
            body: "b".to_string(),
        };
        let requests = vec![
            client.build_list_users(),
            client.build_get_user(1),
            client.build_list_posts(1),
            client.build_list_comments(10),
            client.build_create_post(1, &input).unwrap(),
        ];
        for req in requests {
            assert_eq!(bearer(&req), Some("Bearer secret-token"), "{}", req.url);
        }
    }

    #[test]
    fn build_create_user_produces_correct_request() {
        let input = NewUser {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            gender: Gender::Female,
            status: Status::Active,
        };
        let req = client().build_create_user(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/users");
        assert!(req
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Ann");
        assert_eq!(body["gender"], "female");
        assert_eq!(body["status"], "active");
    }

    #[test]
    fn build_create_comment_scopes_to_post() {
        let input = NewComment {
            body: "Nice".to_string(),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
        };
        let req = client().build_create_comment(10, &input).unwrap();
        assert_eq!(req.url, "http://localhost:3000/posts/10/comments");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["body"], "Nice");
        assert_eq!(body["email"], "ann@example.com");
    }

    #[test]
    fn build_list_posts_scopes_to_user() {
        let req = client().build_list_posts(7);
        assert_eq!(req.url, "http://localhost:3000/users/7/posts");
    }

    #[test]
    fn parse_list_users_success() {
        let response = HttpResponse {
            status: 200,
            body: r#"[{"id":1,"name":"Ann","email":"ann@example.com","gender":"female","status":"active"}]"#
                .to_string(),
        };
        let users = client().parse_list_users(response).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Ann");
    }

    #[test]
    fn parse_get_user_not_found() {
        let response = HttpResponse {
            status: 404,
            body: r#"{"message":"Resource not found"}"#.to_string(),
        };
        let err = client().parse_get_user(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_user_extracts_field_errors() {
        let response = HttpResponse {
            status: 422,
            body: r#"[{"field":"email","message":"has already been taken"}]"#.to_string(),
        };
        let err = client().parse_create_user(response).unwrap_err();
        match err {
            ApiError::RequestFailed { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "email has already been taken");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_create_user_extracts_message_object() {
        let response = HttpResponse {
            status: 401,
            body: r#"{"message":"Authentication failed"}"#.to_string(),
        };
        let err = client().parse_create_user(response).unwrap_err();
        assert_eq!(err.display_message(), "Authentication failed");
    }

    #[test]
    fn parse_error_without_json_body_falls_back() {
        let response = HttpResponse {
            status: 500,
            body: "<html>oops</html>".to_string(),
        };
        let err = client().parse_list_users(response).unwrap_err();
        assert_eq!(err.display_message(), "request failed with status 500");
    }

    #[test]
    fn parse_list_comments_bad_json() {
        let response = HttpResponse {
            status: 200,
            body: "not json".to_string(),
        };
        let err = client().parse_list_comments(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/", "t");
        let req = client.build_list_users();
        assert_eq!(req.url, "http://localhost:3000/users");
    }
}
