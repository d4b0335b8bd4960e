use reqwest::multipart::Form;
use reqwest::Method;
use tracing::info;

use crate::core::errors::ClientResult;
use crate::core::http::ApiClient;
use crate::media::MediaFile;
use crate::models::models::{Id, Status};
use crate::repository::Refreshed;

#[derive(Debug, Clone)]
pub struct StatusApi {
    api: ApiClient,
}

impl StatusApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ClientResult<Vec<Status>> {
        self.api.get("status").await
    }

    pub async fn upload(&self, file: &MediaFile) -> ClientResult<Refreshed<Status>> {
        let form = Form::new().part("file", file.to_part()?);
        self.api.send_multipart(Method::POST, "status", form).await?;
        info!(name = %file.name(), "Status uploaded");
        Ok(self.list().await)
    }

    pub async fn delete(&self, id: Id) -> ClientResult<Refreshed<Status>> {
        self.api.delete(&format!("status/{id}")).await?;
        info!(id, "Status deleted");
        Ok(self.list().await)
    }
}
