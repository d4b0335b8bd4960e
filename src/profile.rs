use std::sync::Arc;

use tracing::warn;

use crate::core::http::ApiClient;
use crate::core::notify::Notifier;
use crate::follow::{FollowApi, FollowRequests};
use crate::forms::post::PostForm;
use crate::forms::ResourceForm;
use crate::media::MediaFile;
use crate::models::models::{FollowCounts, Id, Status};
use crate::posts::{PostRepository, PostsView, POST_LABELS};
use crate::repository::Refreshed;
use crate::status::StatusApi;

pub struct Profile {
    pub posts: PostsView,
    pub follow_requests: FollowRequests,
    follow: FollowApi,
    status: StatusApi,
    notifier: Arc<dyn Notifier>,
    counts: FollowCounts,
    statuses: Vec<Status>,
}

impl Profile {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        let follow = FollowApi::new(api.clone());
        Self {
            posts: PostsView::new(PostRepository::new(api.clone()), notifier.clone(), POST_LABELS),
            follow_requests: FollowRequests::new(follow.clone(), notifier.clone()),
            follow,
            status: StatusApi::new(api),
            notifier,
            counts: FollowCounts::default(),
            statuses: Vec::new(),
        }
    }

    pub fn counts(&self) -> FollowCounts {
        self.counts
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    pub async fn load(&mut self) {
        let (_, _, counts, statuses) = tokio::join!(
            self.posts.load(),
            self.follow_requests.load(),
            self.follow.counts(),
            self.status.list(),
        );

        match counts {
            Ok(counts) => self.counts = counts,
            Err(e) => {
                warn!(error = %e, "Could not load follow counts");
                self.notifier.error(&e.user_message("Could not fetch follow counts"));
            }
        }
        self.store_statuses(statuses);
    }

    fn store_statuses(&mut self, statuses: Refreshed<Status>) {
        match statuses {
            Ok(statuses) => self.statuses = statuses,
            Err(e) => {
                warn!(error = %e, "Could not load statuses");
                self.notifier.error(&e.user_message("Could not fetch statuses"));
            }
        }
    }

    pub async fn edit_post(&mut self, id: Id) -> bool {
        match self.posts.repository().get(id).await {
            Ok(post) => {
                self.posts.open_edit_with(id, PostForm::from_item(&post));
                true
            }
            Err(e) => {
                warn!(error = %e, id, "Could not load post");
                self.notifier.error(&e.user_message("Failed to load post"));
                false
            }
        }
    }

    pub async fn upload_status(&mut self, file: &MediaFile) -> bool {
        match self.status.upload(file).await {
            Ok(refreshed) => {
                self.notifier.success("Status uploaded");
                self.store_statuses(refreshed);
                true
            }
            Err(e) => {
                self.notifier.error(&e.user_message("Status upload failed"));
                false
            }
        }
    }

    pub async fn delete_status(&mut self, id: Id) -> bool {
        match self.status.delete(id).await {
            Ok(refreshed) => {
                self.statuses.retain(|s| s.id != id);
                self.store_statuses(refreshed);
                true
            }
            Err(e) => {
                self.notifier.error(&e.user_message("Failed to delete status"));
                false
            }
        }
    }
}
