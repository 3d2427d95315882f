//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port and drives the
//! views over real HTTP with a reqwest-backed transport, validating that
//! request building, the concurrent fan-out and response parsing work
//! end-to-end with an actual server.

use async_trait::async_trait;

use userhub_core::{
    runtime, ApiClient, ApiError, Gender, HttpMethod, HttpRequest, HttpResponse, NewComment,
    NewPost, NewUser, Severity, Status, Transport, User, UserDetailView, UserListView,
};

struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

/// Start a fresh mock server; returns its base URL.
async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        mock_server::run(listener).await.unwrap();
    });
    format!("http://{addr}")
}

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        gender: Gender::Female,
        status: Status::Active,
    }
}

async fn seed_user(client: &ApiClient, transport: &HttpTransport, name: &str, email: &str) -> User {
    let req = client.build_create_user(&new_user(name, email)).unwrap();
    client
        .parse_create_user(transport.execute(req).await.unwrap())
        .unwrap()
}

#[tokio::test]
async fn list_create_and_detail_scenario() {
    let base = start_server().await;
    let client = ApiClient::new(&base, "test-token");
    let transport = HttpTransport::new();

    // Fresh list: loads, comes back empty.
    let (mut list, command) = UserListView::mount(&client);
    runtime::drive_list(&mut list, &client, &transport, command).await;
    assert!(!list.is_loading());
    assert!(list.users().is_empty());

    // Create Ann through the form.
    list.draft.name = "Ann".to_string();
    list.draft.email = "ann@example.com".to_string();
    list.draft.gender = Some(Gender::Female);
    list.draft.status = Some(Status::Active);
    let command = list.submit(&client).unwrap();
    runtime::drive_list(&mut list, &client, &transport, command).await;
    assert_eq!(list.users().len(), 1);
    let ann_id = list.users()[0].id;
    assert_eq!(list.take_notifications()[0].severity, Severity::Success);

    // Create Bo: prepends, so the list reads [Bo, Ann].
    list.draft.name = "Bo".to_string();
    list.draft.email = "bo@example.com".to_string();
    list.draft.gender = Some(Gender::Male);
    list.draft.status = Some(Status::Active);
    let command = list.submit(&client).unwrap();
    runtime::drive_list(&mut list, &client, &transport, command).await;
    let names: Vec<&str> = list.users().iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["Bo", "Ann"]);
    assert!(list.draft.name.is_empty());

    // Ann's detail view: no posts yet, flags settle.
    let (mut detail, commands) = UserDetailView::mount(&client, ann_id);
    runtime::drive_detail(&mut detail, &client, &transport, commands).await;
    assert!(!detail.is_loading_user());
    assert!(!detail.is_loading_posts());
    assert_eq!(detail.user().unwrap().name, "Ann");
    assert!(detail.entries().is_empty());
}

#[tokio::test]
async fn detail_view_merges_the_comment_fan_out() {
    let base = start_server().await;
    let client = ApiClient::new(&base, "test-token");
    let transport = HttpTransport::new();

    let ann = seed_user(&client, &transport, "Ann", "ann@example.com").await;

    // Two posts; the first gets two comments, the second none.
    let mut post_ids = Vec::new();
    for title in ["First", "Second"] {
        let req = client
            .build_create_post(
                ann.id,
                &NewPost {
                    title: title.to_string(),
                    body: "body".to_string(),
                },
            )
            .unwrap();
        let post = client
            .parse_create_post(transport.execute(req).await.unwrap())
            .unwrap();
        post_ids.push(post.id);
    }
    for body in ["hello", "again"] {
        let req = client
            .build_create_comment(
                post_ids[0],
                &NewComment {
                    body: body.to_string(),
                    name: "Bo".to_string(),
                    email: "bo@example.com".to_string(),
                },
            )
            .unwrap();
        client
            .parse_create_comment(transport.execute(req).await.unwrap())
            .unwrap();
    }

    let (mut detail, commands) = UserDetailView::mount(&client, ann.id);
    runtime::drive_detail(&mut detail, &client, &transport, commands).await;

    assert!(!detail.is_loading_posts());
    assert_eq!(detail.entries().len(), 2);
    let first = detail
        .entries()
        .iter()
        .find(|e| e.post.id == post_ids[0])
        .unwrap();
    let bodies: Vec<&str> = first.comments().iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, ["hello", "again"]);
    let second = detail
        .entries()
        .iter()
        .find(|e| e.post.id == post_ids[1])
        .unwrap();
    assert!(second.comments().is_empty());

    // Create a post through the view: prepended, empty comments.
    detail.post_draft.title = "Third".to_string();
    detail.post_draft.body = "fresh".to_string();
    let command = detail.submit_post(&client).unwrap();
    runtime::drive_detail(&mut detail, &client, &transport, vec![command]).await;
    assert_eq!(detail.entries().len(), 3);
    assert_eq!(detail.entries()[0].post.title, "Third");
    assert!(detail.entries()[0].comments().is_empty());

    // Comment through the view: appended at the tail with Ann's attribution.
    detail.set_comment_draft(post_ids[0], "third comment");
    let command = detail.submit_comment(&client, post_ids[0]).unwrap();
    runtime::drive_detail(&mut detail, &client, &transport, vec![command]).await;
    let first = detail
        .entries()
        .iter()
        .find(|e| e.post.id == post_ids[0])
        .unwrap();
    assert_eq!(first.comments().len(), 3);
    let last = first.comments().last().unwrap();
    assert_eq!(last.body, "third comment");
    assert_eq!(last.name, "Ann");
    assert_eq!(last.email, "ann@example.com");
    assert!(!first.is_submitting());
}

#[tokio::test]
async fn write_without_token_surfaces_the_server_message() {
    let base = start_server().await;
    let client = ApiClient::new(&base, "");
    let transport = HttpTransport::new();

    let (mut list, _) = UserListView::mount(&client);
    list.draft.name = "Ann".to_string();
    list.draft.email = "ann@example.com".to_string();
    list.draft.gender = Some(Gender::Female);
    list.draft.status = Some(Status::Active);
    let command = list.submit(&client).unwrap();
    runtime::drive_list(&mut list, &client, &transport, command).await;

    assert!(!list.is_creating());
    assert!(list.users().is_empty());
    assert_eq!(list.error(), Some("Authentication failed"));
    // form preserved for retry
    assert_eq!(list.draft.name, "Ann");
}

#[tokio::test]
async fn server_side_validation_error_is_extracted() {
    let base = start_server().await;
    let client = ApiClient::new(&base, "test-token");
    let transport = HttpTransport::new();

    // Passes the client's loose pattern but trips the server's check.
    let req = client
        .build_create_user(&new_user("Ann", "ann@host.x."))
        .unwrap();
    let err = client
        .parse_create_user(transport.execute(req).await.unwrap())
        .unwrap_err();
    match err {
        ApiError::RequestFailed { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "email is invalid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_user_resolves_to_not_found_without_hanging() {
    let base = start_server().await;
    let client = ApiClient::new(&base, "test-token");
    let transport = HttpTransport::new();

    let (mut detail, commands) = UserDetailView::mount(&client, 999);
    runtime::drive_detail(&mut detail, &client, &transport, commands).await;

    assert!(!detail.is_loading_user());
    assert!(!detail.is_loading_posts());
    assert!(detail.user().is_none());
    assert!(detail.entries().is_empty());
    let notes = detail.take_notifications();
    assert_eq!(notes.len(), 2, "both the user and posts loads should surface");
    assert!(notes.iter().all(|n| n.severity == Severity::Error));
}
