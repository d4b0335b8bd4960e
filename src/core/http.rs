use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::core::errors::{ClientError, ClientResult};
use crate::core::session::Session;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<Config>,
    session: Session,
}

impl ApiClient {
    pub fn new(config: Config, session: Session) -> Self {
        Self::with_client(Client::new(), config, session)
    }

    pub fn with_client(http: Client, config: Config, session: Session) -> Self {
        Self {
            http,
            config: Arc::new(config),
            session,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        self.config
            .api_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Config(format!("bad path {path}: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let builder = self.http.request(method, self.url(path)?);
        Ok(match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn execute(&self, builder: RequestBuilder, method: Method, path: &str) -> ClientResult<Response> {
        debug!(%method, path, "Sending request");
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(%method, path, %status, "Request failed");
        Err(ClientError::from_response(status, path, &body))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let builder = self.request(Method::GET, path)?;
        let response = self.execute(builder, Method::GET, path).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path)?.json(body);
        let response = self.execute(builder, Method::POST, path).await?;
        Ok(response.json().await?)
    }

    pub async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(method.clone(), path)?.json(body);
        self.execute(builder, method, path).await?;
        Ok(())
    }

    pub async fn send_empty(&self, method: Method, path: &str) -> ClientResult<()> {
        let builder = self.request(method.clone(), path)?;
        self.execute(builder, method, path).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send_empty(Method::DELETE, path).await
    }

    pub async fn multipart<T: DeserializeOwned>(&self, method: Method, path: &str, form: Form) -> ClientResult<T> {
        let builder = self.request(method.clone(), path)?.multipart(form);
        let response = self.execute(builder, method, path).await?;
        Ok(response.json().await?)
    }

    pub async fn send_multipart(&self, method: Method, path: &str, form: Form) -> ClientResult<()> {
        let builder = self.request(method.clone(), path)?.multipart(form);
        self.execute(builder, method, path).await?;
        Ok(())
    }
}
