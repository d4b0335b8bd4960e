use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Method;
use tracing::{info, warn};
use url::Url;

use crate::config::MAX_SUGGESTIONS;
use crate::core::errors::ClientResult;
use crate::core::helpers::media_url;
use crate::core::http::ApiClient;
use crate::core::notify::Notifier;
use crate::models::models::{FollowCounts, FollowRequest, FollowStatus, Id, User};

// === Follow button ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    Follow,
    Unfollow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowButton {
    pub label: &'static str,
    pub enabled: bool,
    pub action: Option<FollowAction>,
}

pub fn follow_button(status: Option<FollowStatus>) -> FollowButton {
    match status.unwrap_or(FollowStatus::None) {
        FollowStatus::Accepted => FollowButton {
            label: "Following",
            enabled: true,
            action: Some(FollowAction::Unfollow),
        },
        FollowStatus::Pending => FollowButton {
            label: "Requested",
            enabled: false,
            action: None,
        },
        FollowStatus::None => FollowButton {
            label: "Follow",
            enabled: true,
            action: Some(FollowAction::Follow),
        },
    }
}

// === Sidebar ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    Follow(Id),
    Unfollow(Id),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub url: Option<String>,
    pub initial: char,
}

impl Avatar {
    fn of(user: &User, media_host: &Url) -> Self {
        Self {
            url: user.profile_image.as_deref().map(|p| media_url(media_host, p)),
            initial: user.initial(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarProfile {
    pub username: String,
    pub email: String,
    pub avatar: Avatar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion<'a> {
    pub user: &'a User,
    pub avatar: Avatar,
    pub button: FollowButton,
}

impl Suggestion<'_> {
    pub fn click(&self) -> Option<SidebarAction> {
        if !self.button.enabled {
            return None;
        }
        self.button.action.map(|action| match action {
            FollowAction::Follow => SidebarAction::Follow(self.user.id),
            FollowAction::Unfollow => SidebarAction::Unfollow(self.user.id),
        })
    }
}

/// Right-hand sidebar over data owned by the page: the signed-in user, every
/// known user and the follow status per user id. It keeps no state and sends
/// no requests.
#[derive(Debug, Clone, Copy)]
pub struct Sidebar<'a> {
    pub current: Option<&'a User>,
    pub all_users: &'a [User],
    pub statuses: &'a HashMap<Id, FollowStatus>,
    pub media_host: &'a Url,
}

impl<'a> Sidebar<'a> {
    pub fn profile(&self) -> Option<SidebarProfile> {
        self.current.map(|user| SidebarProfile {
            username: if user.username.is_empty() { "User".to_string() } else { user.username.clone() },
            email: user.email.clone(),
            avatar: Avatar::of(user, self.media_host),
        })
    }

    pub fn suggestions(&self) -> Vec<Suggestion<'a>> {
        let current_email = self.current.map(|u| u.email.as_str());
        self.all_users
            .iter()
            .filter(|u| Some(u.email.as_str()) != current_email)
            .take(MAX_SUGGESTIONS)
            .map(|user| Suggestion {
                user,
                avatar: Avatar::of(user, self.media_host),
                button: follow_button(self.statuses.get(&user.id).copied()),
            })
            .collect()
    }
}

// === Follow API ===

#[derive(Debug, Clone)]
pub struct FollowApi {
    api: ApiClient,
}

impl FollowApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn counts(&self) -> ClientResult<FollowCounts> {
        self.api.get("follow/counts").await
    }

    pub async fn requests(&self) -> ClientResult<Vec<FollowRequest>> {
        self.api.get("follow/requests").await
    }

    pub async fn accept(&self, request_id: Id) -> ClientResult<()> {
        self.api
            .send_empty(Method::POST, &format!("follow/accept/{request_id}"))
            .await
    }
}

// === Incoming requests panel ===

pub struct FollowRequests {
    api: FollowApi,
    notifier: Arc<dyn Notifier>,
    requests: Vec<FollowRequest>,
}

impl FollowRequests {
    pub fn new(api: FollowApi, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            requests: Vec::new(),
        }
    }

    pub fn requests(&self) -> &[FollowRequest] {
        &self.requests
    }

    pub async fn load(&mut self) -> bool {
        match self.api.requests().await {
            Ok(requests) => {
                self.requests = requests;
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not load follow requests");
                self.notifier.error(&e.user_message("Could not fetch follow requests"));
                false
            }
        }
    }

    pub async fn accept(&mut self, request_id: Id) -> bool {
        match self.api.accept(request_id).await {
            Ok(()) => {
                self.requests.retain(|r| r.id != request_id);
                info!(request_id, "Follow request accepted");
                self.notifier.success("Follow request accepted");
                true
            }
            Err(e) => {
                warn!(error = %e, request_id, "Accept failed");
                self.notifier.error(&e.user_message("Failed to accept follow request"));
                false
            }
        }
    }

    pub fn ignore(&mut self, request_id: Id) -> bool {
        let before = self.requests.len();
        self.requests.retain(|r| r.id != request_id);
        before != self.requests.len()
    }
}
