use std::sync::Arc;

use reqwest::Method;
use tracing::{info, warn};
use url::Url;

use crate::config::{LANDING_ROUTE, SIGN_IN_ROUTE};
use crate::core::errors::ClientResult;
use crate::core::http::ApiClient;
use crate::core::notify::Notifier;
use crate::core::query_params::{get_string, parse_query_params};
use crate::core::session::Session;
use crate::forms::auth::{Credentials, Registration, SignInForm, SignUpForm};
use crate::models::models::TokenResponse;

pub const MSG_OAUTH_SUCCESS: &str = "Logged in with Google";
pub const MSG_OAUTH_FAILED: &str = "OAuth login failed";

#[derive(Debug, Clone)]
pub struct AuthApi {
    api: ApiClient,
}

impl AuthApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> ClientResult<String> {
        let resp: TokenResponse = self.api.post_json("auth/signin", credentials).await?;
        Ok(resp.token)
    }

    pub async fn sign_up(&self, registration: &Registration) -> ClientResult<String> {
        let resp: TokenResponse = self
            .api
            .multipart(Method::POST, "auth/signup-with-image", registration.to_form()?)
            .await?;
        Ok(resp.token)
    }

    pub fn authorize_url(&self) -> &Url {
        &self.api.config().oauth_url
    }
}

pub struct AuthFlow {
    auth: AuthApi,
    session: Session,
    notifier: Arc<dyn Notifier>,
}

impl AuthFlow {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session: api.session().clone(),
            auth: AuthApi::new(api),
            notifier,
        }
    }

    pub fn authorize_url(&self) -> &Url {
        self.auth.authorize_url()
    }

    pub async fn sign_in(&self, form: &SignInForm) -> Option<&'static str> {
        let credentials = match form.validate() {
            Ok(c) => c,
            Err(e) => {
                self.notifier.error(&e.user_message(""));
                return None;
            }
        };
        match self.auth.sign_in(&credentials).await {
            Ok(token) => {
                self.session.login(token);
                info!(email = %credentials.email, "Signed in");
                self.notifier.success("Login successful!");
                Some(LANDING_ROUTE)
            }
            Err(e) => {
                warn!(error = %e, "Sign in failed");
                self.notifier.error(&e.user_message("Login failed"));
                None
            }
        }
    }

    pub async fn sign_up(&self, form: &SignUpForm) -> Option<&'static str> {
        let registration = match form.validate() {
            Ok(r) => r,
            Err(e) => {
                self.notifier.error(&e.user_message(""));
                return None;
            }
        };
        match self.auth.sign_up(&registration).await {
            Ok(token) => {
                self.session.login(token);
                info!(email = %registration.email, "Account created");
                self.notifier.success("Account created!");
                Some(LANDING_ROUTE)
            }
            Err(e) => {
                warn!(error = %e, "Sign up failed");
                self.notifier.error(&e.user_message("Sign up failed"));
                None
            }
        }
    }

    pub fn logout(&self) {
        self.session.logout();
    }
}

pub struct OAuthCallback {
    session: Session,
    notifier: Arc<dyn Notifier>,
    handled: bool,
}

impl OAuthCallback {
    pub fn new(session: Session, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            handled: false,
        }
    }

    pub fn on_mount(&mut self, redirect_uri: &str) -> Option<&'static str> {
        if self.handled {
            return None;
        }
        self.handled = true;

        let params = parse_query_params(redirect_uri);
        match get_string(&params, "token") {
            Some(token) => {
                self.session.login(token);
                info!("Signed in through OAuth");
                self.notifier.success(MSG_OAUTH_SUCCESS);
                Some(LANDING_ROUTE)
            }
            None => {
                warn!("OAuth redirect carried no token");
                self.notifier.error(MSG_OAUTH_FAILED);
                Some(SIGN_IN_ROUTE)
            }
        }
    }
}
