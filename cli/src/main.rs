//! `userhub` — command-line host for the user-management client core.
//!
//! Each subcommand maps to one user-facing action: listing and
//! creating users, showing a user's aggregate (posts with merged comments),
//! creating posts, adding comments. The core's views do all the state work;
//! this binary parses arguments into drafts, drives the views over a
//! reqwest transport and renders the result as plain text. Notifications go
//! to stderr; an error notification or banner makes the process exit
//! non-zero.

mod transport;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use userhub_core::{
    runtime, ApiClient, Gender, Notification, Severity, Status, UserDetailView, UserListView,
};

use transport::ReqwestTransport;

const DEFAULT_BASE_URL: &str = "https://gorest.co.in/public/v2";

#[derive(Parser)]
#[command(name = "userhub", about = "User management client for a gorest-style API")]
struct Cli {
    /// Base URL of the remote API (env: GOREST_API_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for write operations (env: GOREST_API_TOKEN).
    #[arg(long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all users.
    Users,
    /// Create a user.
    CreateUser {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// male or female.
        #[arg(long)]
        gender: Option<Gender>,
        /// active or inactive.
        #[arg(long)]
        status: Option<Status>,
    },
    /// Show one user with their posts and all comments.
    User { id: u64 },
    /// Create a post owned by a user.
    CreatePost {
        user_id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// Add a comment to one of a user's posts.
    Comment {
        user_id: u64,
        post_id: u64,
        #[arg(long)]
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let base_url = cli
        .base_url
        .or_else(|| std::env::var("GOREST_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let token = cli
        .token
        .or_else(|| std::env::var("GOREST_API_TOKEN").ok())
        .unwrap_or_default();
    let client = ApiClient::new(&base_url, &token);
    let transport = ReqwestTransport::new()?;

    match cli.command {
        Command::Users => {
            let (mut view, command) = UserListView::mount(&client);
            runtime::drive_list(&mut view, &client, &transport, command).await;
            if let Some(banner) = view.error() {
                bail!("{banner}");
            }
            render_users(view.users());
        }
        Command::CreateUser {
            name,
            email,
            gender,
            status,
        } => {
            let (mut view, _) = UserListView::mount(&client);
            view.draft.name = name.unwrap_or_default();
            view.draft.email = email.unwrap_or_default();
            view.draft.gender = gender;
            view.draft.status = status;
            if let Some(command) = view.submit(&client) {
                runtime::drive_list(&mut view, &client, &transport, command).await;
            }
            let failed = show_notifications(view.take_notifications());
            if let Some(banner) = view.error() {
                bail!("{banner}");
            }
            if failed {
                bail!("user not created");
            }
            if let Some(user) = view.users().first() {
                println!(
                    "created user {} {} <{}> ({}, {})",
                    user.id, user.name, user.email, user.gender, user.status
                );
            }
        }
        Command::User { id } => {
            let (mut view, commands) = UserDetailView::mount(&client, id);
            runtime::drive_detail(&mut view, &client, &transport, commands).await;
            let failed = show_notifications(view.take_notifications());
            render_detail(&view);
            if failed {
                bail!("failed to load user {id}");
            }
        }
        Command::CreatePost {
            user_id,
            title,
            body,
        } => {
            let (mut view, _) = UserDetailView::mount(&client, user_id);
            view.post_draft.title = title.unwrap_or_default();
            view.post_draft.body = body.unwrap_or_default();
            if let Some(command) = view.submit_post(&client) {
                runtime::drive_detail(&mut view, &client, &transport, vec![command]).await;
            }
            let failed = show_notifications(view.take_notifications());
            if failed {
                bail!("post not created");
            }
            if let Some(entry) = view.entries().first() {
                println!("created post {}: {}", entry.post.id, entry.post.title);
            }
        }
        Command::Comment {
            user_id,
            post_id,
            body,
        } => {
            // Comment attribution needs the loaded user, so run the full
            // mount (user + posts + comment fan-out) before submitting.
            let (mut view, commands) = UserDetailView::mount(&client, user_id);
            runtime::drive_detail(&mut view, &client, &transport, commands).await;
            if show_notifications(view.take_notifications()) {
                bail!("failed to load user {user_id}");
            }
            if !view.entries().iter().any(|e| e.post.id == post_id) {
                bail!("user {user_id} has no post {post_id}");
            }
            view.set_comment_draft(post_id, &body.unwrap_or_default());
            if let Some(command) = view.submit_comment(&client, post_id) {
                runtime::drive_detail(&mut view, &client, &transport, vec![command]).await;
            }
            if show_notifications(view.take_notifications()) {
                bail!("comment not added");
            }
        }
    }
    Ok(())
}

/// Print notifications to stderr; returns true if any was an error.
fn show_notifications(notifications: Vec<Notification>) -> bool {
    let mut failed = false;
    for note in notifications {
        let tag = match note.severity {
            Severity::Success => "ok",
            Severity::Error => {
                failed = true;
                "error"
            }
        };
        eprintln!("[{tag}] {} {}", note.title, note.description);
    }
    failed
}

fn render_users(users: &[userhub_core::User]) {
    if users.is_empty() {
        println!("no users");
        return;
    }
    println!("{:>6}  {:24} {:32} {:8} {:8}", "ID", "NAME", "EMAIL", "GENDER", "STATUS");
    for user in users {
        println!(
            "{:>6}  {:24} {:32} {:8} {:8}",
            user.id, user.name, user.email, user.gender, user.status
        );
    }
}

fn render_detail(view: &UserDetailView) {
    match view.user() {
        Some(user) => {
            println!("{} <{}> ({}, {})", user.name, user.email, user.gender, user.status);
        }
        None => println!("user {} not loaded", view.user_id()),
    }
    if view.entries().is_empty() {
        println!("no posts");
        return;
    }
    for entry in view.entries() {
        println!();
        println!("#{} {}", entry.post.id, entry.post.title);
        println!("  {}", entry.post.body);
        if entry.comments().is_empty() {
            println!("  (no comments)");
        }
        for comment in entry.comments() {
            println!("  - {} <{}>: {}", comment.name, comment.email, comment.body);
        }
    }
}
