//! User detail view: one user, their posts, and every post's comments.
//!
//! # Design
//! Mounting issues two independent reads (user record, post list). Once the
//! posts arrive, a comment fetch is issued for every post simultaneously;
//! the posts-loading flag stays set until the whole fan-out has resolved.
//! Each resolution performs a pointwise merge — only the entry whose post id
//! matches is touched — so completions may arrive in any order and
//! interleave freely without lost updates. A failed comment fetch is logged
//! and leaves that one post's comments empty; it never blocks the others.
//!
//! Completions that no longer match pending state (a duplicate posts load, a
//! comment result for an unknown post id, anything arriving after the view
//! was superseded) are ignored as no-ops.

use std::collections::HashSet;

use tracing::{error, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::notify::Notification;
use crate::types::{Comment, NewComment, Post, User};
use crate::validate::{self, PostDraft};

/// A request the detail view wants executed.
#[derive(Debug)]
pub enum DetailCommand {
    FetchUser(HttpRequest),
    FetchPosts(HttpRequest),
    FetchComments { post_id: u64, request: HttpRequest },
    CreatePost(HttpRequest),
    CreateComment { post_id: u64, request: HttpRequest },
}

/// Outcome of an executed [`DetailCommand`].
#[derive(Debug)]
pub enum DetailEvent {
    UserLoaded(Result<User, ApiError>),
    PostsLoaded(Result<Vec<Post>, ApiError>),
    CommentsLoaded {
        post_id: u64,
        result: Result<Vec<Comment>, ApiError>,
    },
    PostCreated(Result<Post, ApiError>),
    CommentCreated {
        post_id: u64,
        result: Result<Comment, ApiError>,
    },
}

/// A post plus its client-side attachments: the merged comment list and the
/// per-post UI sub-state (comment draft, submission flag). One record per
/// post by construction.
#[derive(Debug)]
pub struct PostEntry {
    pub post: Post,
    comments: Vec<Comment>,
    draft: String,
    submitting: bool,
}

impl PostEntry {
    fn new(post: Post) -> Self {
        Self {
            post,
            comments: Vec::new(),
            draft: String::new(),
            submitting: false,
        }
    }

    /// Comments merged in so far: empty until the fetch for this post
    /// resolves (or forever, if it failed), never partially loaded.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Current comment draft text for this post.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether a comment submission for this post is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

/// Client-side state of the user detail screen, keyed by a route-supplied
/// user identifier. Owns the merged user+posts+comments aggregate for the
/// lifetime of the mounted view.
#[derive(Debug)]
pub struct UserDetailView {
    user_id: u64,
    user: Option<User>,
    entries: Vec<PostEntry>,
    loading_user: bool,
    loading_posts: bool,
    /// True between mount and the arrival of the post list; guards against
    /// duplicate post-list completions.
    awaiting_posts: bool,
    /// Post ids whose comment fetch has not resolved yet.
    pending_comment_loads: HashSet<u64>,
    /// Create-post form contents, edited in place by the host.
    pub post_draft: PostDraft,
    notifications: Vec<Notification>,
}

impl UserDetailView {
    /// Mount the view: the user record and the post list load concurrently.
    pub fn mount(client: &ApiClient, user_id: u64) -> (Self, Vec<DetailCommand>) {
        let view = Self {
            user_id,
            user: None,
            entries: Vec::new(),
            loading_user: true,
            loading_posts: true,
            awaiting_posts: true,
            pending_comment_loads: HashSet::new(),
            post_draft: PostDraft::default(),
            notifications: Vec::new(),
        };
        let commands = vec![
            DetailCommand::FetchUser(client.build_get_user(user_id)),
            DetailCommand::FetchPosts(client.build_list_posts(user_id)),
        ];
        (view, commands)
    }

    /// Apply a request outcome. May produce follow-up commands — the comment
    /// fan-out when the post list arrives.
    pub fn apply(&mut self, client: &ApiClient, event: DetailEvent) -> Vec<DetailCommand> {
        match event {
            DetailEvent::UserLoaded(result) => {
                if self.loading_user {
                    self.loading_user = false;
                    match result {
                        Ok(user) => self.user = Some(user),
                        Err(err) => {
                            error!(user_id = self.user_id, %err, "failed to fetch user");
                            self.notifications.push(Notification::error(
                                "Error loading user.",
                                &err.display_message(),
                            ));
                        }
                    }
                }
                Vec::new()
            }
            DetailEvent::PostsLoaded(result) => self.apply_posts_loaded(client, result),
            DetailEvent::CommentsLoaded { post_id, result } => {
                self.apply_comments_loaded(post_id, result);
                Vec::new()
            }
            DetailEvent::PostCreated(result) => {
                self.apply_post_created(result);
                Vec::new()
            }
            DetailEvent::CommentCreated { post_id, result } => {
                self.apply_comment_created(post_id, result);
                Vec::new()
            }
        }
    }

    fn apply_posts_loaded(
        &mut self,
        client: &ApiClient,
        result: Result<Vec<Post>, ApiError>,
    ) -> Vec<DetailCommand> {
        if !self.awaiting_posts {
            return Vec::new();
        }
        self.awaiting_posts = false;
        let posts = match result {
            Ok(posts) => posts,
            Err(err) => {
                error!(user_id = self.user_id, %err, "failed to fetch posts");
                self.notifications.push(Notification::error(
                    "Error loading posts.",
                    &err.display_message(),
                ));
                self.loading_posts = false;
                return Vec::new();
            }
        };
        if posts.is_empty() {
            self.loading_posts = false;
            return Vec::new();
        }
        // Every post gets an empty comment list and one concurrent fetch.
        self.pending_comment_loads = posts.iter().map(|p| p.id).collect();
        let commands = posts
            .iter()
            .map(|post| DetailCommand::FetchComments {
                post_id: post.id,
                request: client.build_list_comments(post.id),
            })
            .collect();
        self.entries = posts.into_iter().map(PostEntry::new).collect();
        commands
    }

    fn apply_comments_loaded(&mut self, post_id: u64, result: Result<Vec<Comment>, ApiError>) {
        if !self.pending_comment_loads.remove(&post_id) {
            return; // stale or unknown post — a structural no-op
        }
        match result {
            Ok(comments) => {
                // Pointwise merge: only the matching entry changes.
                if let Some(entry) = self.entries.iter_mut().find(|e| e.post.id == post_id) {
                    entry.comments = comments;
                }
            }
            Err(err) => {
                // This post keeps an empty comment list; the rest of the
                // fan-out is unaffected.
                warn!(post_id, %err, "failed to fetch comments");
            }
        }
        if self.pending_comment_loads.is_empty() && !self.awaiting_posts {
            self.loading_posts = false;
        }
    }

    fn apply_post_created(&mut self, result: Result<Post, ApiError>) {
        match result {
            Ok(post) => {
                self.entries.insert(0, PostEntry::new(post));
                self.post_draft = PostDraft::default();
                self.notifications.push(Notification::success(
                    "Post created.",
                    "The post has been created successfully.",
                ));
            }
            Err(err) => {
                error!(user_id = self.user_id, %err, "failed to create post");
                self.notifications.push(Notification::error(
                    "Error creating post.",
                    &err.display_message(),
                ));
            }
        }
    }

    fn apply_comment_created(&mut self, post_id: u64, result: Result<Comment, ApiError>) {
        let Some(entry) = self.entries.iter_mut().find(|e| e.post.id == post_id) else {
            return;
        };
        entry.submitting = false;
        match result {
            Ok(comment) => {
                entry.comments.push(comment);
                entry.draft.clear();
                self.notifications.push(Notification::success(
                    "Comment added.",
                    "The comment has been added successfully.",
                ));
            }
            Err(err) => {
                // Draft preserved so the user can retry.
                error!(post_id, %err, "failed to create comment");
                self.notifications.push(Notification::error(
                    "Error creating comment.",
                    &err.display_message(),
                ));
            }
        }
    }

    /// Submit the create-post form. Validation failures push a notification
    /// and produce no command.
    pub fn submit_post(&mut self, client: &ApiClient) -> Option<DetailCommand> {
        let input = match validate::validate_new_post(&self.post_draft) {
            Ok(input) => input,
            Err(invalid) => {
                self.notifications
                    .push(Notification::error(invalid.title, invalid.message));
                return None;
            }
        };
        match client.build_create_post(self.user_id, &input) {
            Ok(request) => Some(DetailCommand::CreatePost(request)),
            Err(err) => {
                error!(user_id = self.user_id, %err, "failed to build create-post request");
                None
            }
        }
    }

    /// Submit the comment draft of one post. The comment carries the loaded
    /// user's name and email as attribution; submitting before the user
    /// record has arrived is rejected.
    pub fn submit_comment(&mut self, client: &ApiClient, post_id: u64) -> Option<DetailCommand> {
        let (name, email) = match &self.user {
            Some(user) => (user.name.clone(), user.email.clone()),
            None => {
                self.notifications.push(Notification::error(
                    "Validation Error",
                    "User details are still loading.",
                ));
                return None;
            }
        };
        let entry = self.entries.iter_mut().find(|e| e.post.id == post_id)?;
        if entry.submitting {
            return None;
        }
        if let Err(invalid) = validate::validate_comment_body(&entry.draft) {
            self.notifications
                .push(Notification::error(invalid.title, invalid.message));
            return None;
        }
        let input = NewComment {
            body: entry.draft.clone(),
            name,
            email,
        };
        match client.build_create_comment(post_id, &input) {
            Ok(request) => {
                entry.submitting = true;
                Some(DetailCommand::CreateComment { post_id, request })
            }
            Err(err) => {
                error!(post_id, %err, "failed to build create-comment request");
                None
            }
        }
    }

    /// Replace the comment draft text of one post.
    pub fn set_comment_draft(&mut self, post_id: u64, text: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.post.id == post_id) {
            entry.draft = text.to_string();
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Posts with their merged comments, newest-created first.
    pub fn entries(&self) -> &[PostEntry] {
        &self.entries
    }

    pub fn is_loading_user(&self) -> bool {
        self.loading_user
    }

    /// True until the post list and every comment fetch have resolved.
    pub fn is_loading_posts(&self) -> bool {
        self.loading_posts
    }

    /// Drain pending notifications for display.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
