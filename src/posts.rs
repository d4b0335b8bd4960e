use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use crate::core::errors::ClientResult;
use crate::core::http::ApiClient;
use crate::forms::post::{PostDraft, PostForm};
use crate::lifecycle::{ResourceLabels, ResourceView};
use crate::models::models::{Id, Post};
use crate::repository::{Refreshed, ResourceRepository};

pub const POST_LABELS: ResourceLabels = ResourceLabels {
    load_failed: "Could not fetch posts",
    created: "Post created!",
    create_failed: "Post upload failed",
    updated: "Post updated!",
    update_failed: "Failed to update post",
    deleted: "Post deleted",
    delete_failed: "Failed to delete post",
    empty_call_to_action: "Share your first post",
};

pub type PostsView = ResourceView<PostRepository, PostForm>;

#[derive(Debug, Clone)]
pub struct PostRepository {
    api: ApiClient,
}

impl PostRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self, id: Id) -> ClientResult<Post> {
        self.api.get(&format!("posts/{id}")).await
    }
}

#[async_trait]
impl ResourceRepository for PostRepository {
    type Item = Post;
    type Draft = PostDraft;

    async fn list(&self) -> ClientResult<Vec<Post>> {
        self.api.get("posts/my").await
    }

    async fn create(&self, draft: PostDraft) -> ClientResult<Refreshed<Post>> {
        let form = draft.to_form()?;
        self.api.send_multipart(Method::POST, "posts", form).await?;
        info!(title = %draft.title, files = draft.files.len(), "Post created");
        Ok(self.list().await)
    }

    async fn update(&self, id: Id, draft: PostDraft) -> ClientResult<Refreshed<Post>> {
        let form = draft.to_form()?;
        self.api
            .send_multipart(Method::PUT, &format!("posts/{id}"), form)
            .await?;
        info!(id, files = draft.files.len(), "Post updated");
        Ok(self.list().await)
    }

    async fn delete(&self, id: Id) -> ClientResult<Refreshed<Post>> {
        self.api.delete(&format!("posts/{id}")).await?;
        info!(id, "Post deleted");
        Ok(self.list().await)
    }
}
