use crate::core::errors::ClientResult;
use crate::core::http::ApiClient;
use crate::models::models::User;

#[derive(Debug, Clone)]
pub struct UsersApi {
    api: ApiClient,
}

impl UsersApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn me(&self) -> ClientResult<User> {
        self.api.get("users/me").await
    }

    pub async fn all(&self) -> ClientResult<Vec<User>> {
        self.api.get("users/all").await
    }
}
