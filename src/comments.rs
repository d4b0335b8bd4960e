use reqwest::Method;
use serde_json::json;
use tracing::info;

use crate::core::errors::{ClientError, ClientResult};
use crate::core::http::ApiClient;
use crate::models::models::{Comment, Id};

pub const MSG_EMPTY_COMMENT: &str = "Comment cannot be empty";

#[derive(Debug, Clone)]
pub struct CommentsApi {
    api: ApiClient,
}

fn content_of(content: &str) -> ClientResult<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ClientError::validation(MSG_EMPTY_COMMENT));
    }
    Ok(trimmed)
}

impl CommentsApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, post_id: Id) -> ClientResult<Vec<Comment>> {
        self.api.get(&format!("comments/{post_id}")).await
    }

    pub async fn add(&self, post_id: Id, content: &str) -> ClientResult<Comment> {
        let content = content_of(content)?;
        let comment = self
            .api
            .post_json(&format!("comments/{post_id}"), &json!({ "content": content }))
            .await?;
        info!(post_id, "Comment added");
        Ok(comment)
    }

    pub async fn edit(&self, comment_id: Id, content: &str) -> ClientResult<()> {
        let content = content_of(content)?;
        self.api
            .send_json(Method::PUT, &format!("comments/{comment_id}"), &json!({ "content": content }))
            .await
    }

    pub async fn delete(&self, comment_id: Id) -> ClientResult<()> {
        self.api.delete(&format!("comments/{comment_id}")).await
    }
}
