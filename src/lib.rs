//! Client for the Skill Plus learning network.
//!
//! The backend does the real work; this crate holds the session token, talks
//! to the REST API and keeps the state a front end renders: resource lists with
//! their create / edit / delete dialogs, forms with client-side validation,
//! media attachments and follow controls.
//!
//! ```no_run
//! use std::sync::Arc;
//! use skillplus::prelude::*;
//!
//! # async fn run() -> Result<(), ClientError> {
//! let api = ApiClient::new(Config::from_env()?, Session::new());
//! let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
//!
//! let flow = AuthFlow::new(api.clone(), notifier.clone());
//! let form = SignInForm { email: "ada@example.com".into(), password: "engine".into() };
//! if flow.sign_in(&form).await.is_some() {
//!     let mut plans = LearningPlansView::new(LearningPlanRepository::new(api), notifier, PLAN_LABELS);
//!     plans.load().await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod comments;
pub mod config;
pub mod core;
pub mod follow;
pub mod forms;
pub mod learning_plans;
pub mod lifecycle;
pub mod media;
pub mod models;
pub mod posts;
pub mod profile;
pub mod repository;
pub mod status;
pub mod users;

pub mod prelude {
    pub use crate::auth::{AuthApi, AuthFlow, OAuthCallback};
    pub use crate::comments::CommentsApi;
    pub use crate::config::Config;
    pub use crate::core::errors::{ClientError, ClientResult};
    pub use crate::core::http::ApiClient;
    pub use crate::core::notify::{MemoryNotifier, Notification, Notifier, TracingNotifier};
    pub use crate::core::session::Session;
    pub use crate::follow::{follow_button, FollowApi, FollowRequests, Sidebar, SidebarAction};
    pub use crate::forms::auth::{SignInForm, SignUpForm};
    pub use crate::forms::learning_plan::LearningPlanForm;
    pub use crate::forms::post::PostForm;
    pub use crate::forms::{Mode, ResourceForm};
    pub use crate::learning_plans::{LearningPlanRepository, LearningPlansView, PLAN_LABELS};
    pub use crate::lifecycle::{ResourceView, SubmitOutcome, ViewState};
    pub use crate::media::{MediaFile, PendingMedia};
    pub use crate::models::models::*;
    pub use crate::posts::{PostRepository, PostsView, POST_LABELS};
    pub use crate::profile::Profile;
    pub use crate::repository::{Refreshed, ResourceRepository};
    pub use crate::status::StatusApi;
    pub use crate::users::UsersApi;
}
