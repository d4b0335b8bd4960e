use chrono::NaiveDate;
use reqwest::multipart::Form;
use url::Url;

use crate::core::errors::{ClientError, ClientResult};
use crate::core::helpers::{is_video_path, media_url};
use crate::forms::{is_blank, Mode, ResourceForm};
use crate::media::{MediaKind, PendingMedia};
use crate::models::models::Post;

pub const MSG_CREATE_REQUIRED: &str = "All fields and at least one image are required.";
pub const MSG_EDIT_REQUIRED: &str = "Title and description are required.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub description: String,
    pub existing_media: Vec<String>,
    pub pending: PendingMedia,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingMedia {
    pub url: String,
    pub kind: MediaKind,
}

impl PostForm {
    pub fn existing_media(&self, media_host: &Url) -> Vec<ExistingMedia> {
        self.existing_media
            .iter()
            .map(|path| ExistingMedia {
                url: media_url(media_host, path),
                kind: if is_video_path(path) { MediaKind::Video } else { MediaKind::Image },
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub files: PendingMedia,
}

impl PostDraft {
    pub fn to_form(&self) -> ClientResult<Form> {
        let form = Form::new()
            .text("title", self.title.clone())
            .text("description", self.description.clone());
        self.files.append_to(form)
    }
}

impl ResourceForm for PostForm {
    type Item = Post;
    type Draft = PostDraft;

    fn from_item(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            existing_media: post.media_paths.clone(),
            pending: PendingMedia::new(),
        }
    }

    fn validate(&self, mode: Mode, _today: NaiveDate) -> ClientResult<PostDraft> {
        let missing_text = is_blank(&self.title) || is_blank(&self.description);
        match mode {
            Mode::Create if missing_text || self.pending.is_empty() => {
                return Err(ClientError::validation(MSG_CREATE_REQUIRED));
            }
            Mode::Edit(_) if missing_text => {
                return Err(ClientError::validation(MSG_EDIT_REQUIRED));
            }
            _ => {}
        }

        Ok(PostDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            files: self.pending.clone(),
        })
    }
}
