//! Controlled-input forms and their client-side validation.
//!
//! Validation never touches the network: a form either produces a draft ready
//! to submit or a [`ClientError::Validation`](crate::core::errors::ClientError)
//! whose text is shown to the user.

pub mod auth;
pub mod learning_plan;
pub mod list_text;
pub mod post;

use chrono::NaiveDate;

use crate::core::errors::ClientResult;
use crate::models::models::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit(Id),
}

pub trait ResourceForm: Send + Sync {
    type Item;
    type Draft: Send;

    /// Pre-populates an edit form from a listed item.
    fn from_item(item: &Self::Item) -> Self;

    fn validate(&self, mode: Mode, today: NaiveDate) -> ClientResult<Self::Draft>;
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
