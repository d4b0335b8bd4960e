use std::env;

use tracing::{debug, warn};
use url::Url;

use crate::core::errors::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:9090/api";
pub const DEFAULT_MEDIA_HOST: &str = "http://localhost:9090";
pub const DEFAULT_OAUTH_URL: &str = "http://localhost:9090/oauth2/authorization/google";

pub const LANDING_ROUTE: &str = "/home";
pub const SIGN_IN_ROUTE: &str = "/signin";

pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub media_host: Url,
    pub oauth_url: Url,
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(
            &var_or("SKILLPLUS_API_URL", DEFAULT_API_URL),
            &var_or("SKILLPLUS_MEDIA_HOST", DEFAULT_MEDIA_HOST),
            &var_or("SKILLPLUS_OAUTH_URL", DEFAULT_OAUTH_URL),
        )
    }

    pub fn new(api_url: &str, media_host: &str, oauth_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            api_url: parse_base(api_url)?,
            media_host: parse_base(media_host)?,
            oauth_url: parse_url(oauth_url)?,
        })
    }

    pub fn for_origin(origin: &str) -> Result<Self, ClientError> {
        let origin = origin.trim_end_matches('/');
        Self::new(
            &format!("{origin}/api"),
            origin,
            &format!("{origin}/oauth2/authorization/google"),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Url::parse(&format!("{DEFAULT_API_URL}/")).expect("default api url is valid"),
            media_host: Url::parse(&format!("{DEFAULT_MEDIA_HOST}/"))
                .expect("default media host is valid"),
            oauth_url: Url::parse(DEFAULT_OAUTH_URL).expect("default oauth url is valid"),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        debug!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_url(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw).map_err(|e| {
        warn!("Invalid url {raw}: {e}");
        ClientError::Config(format!("invalid url {raw}: {e}"))
    })
}

// Joining relative paths only works against a base ending in '/'.
fn parse_base(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim_end_matches('/');
    parse_url(&format!("{trimmed}/"))
}
