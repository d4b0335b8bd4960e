//! Local media attachments waiting to be uploaded.
//!
//! Pending files live only in this process. Their previews use `local:` handles
//! that are never sent to the server; only the paths the server hands back in a
//! [`Post`](crate::models::models::Post) are durable.

use std::fs;
use std::path::Path;

use mime_guess::from_path;
use reqwest::multipart::{Form, Part};
use tracing::debug;
use uuid::Uuid;

use crate::core::errors::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    fn of(content_type: &str) -> Option<Self> {
        if content_type.starts_with("image/") {
            Some(MediaKind::Image)
        } else if content_type.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub handle: String,
    pub name: String,
    pub kind: MediaKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    id: Uuid,
    name: String,
    content_type: String,
    kind: MediaKind,
    bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> ClientResult<Self> {
        let name = name.into();
        let content_type = from_path(&name).first_or_octet_stream().to_string();
        let kind = MediaKind::of(&content_type).ok_or_else(|| {
            ClientError::validation(format!("{name} is not an image or video"))
        })?;
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            content_type,
            kind,
            bytes,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ClientError::validation(format!("{} is not a file", path.display())))?;
        let bytes = fs::read(path)?;
        Self::new(name, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn preview(&self) -> Preview {
        Preview {
            handle: format!("local:{}", self.id),
            name: self.name.clone(),
            kind: self.kind,
        }
    }

    pub fn to_part(&self) -> ClientResult<Part> {
        Ok(Part::bytes(self.bytes.clone())
            .file_name(self.name.clone())
            .mime_str(&self.content_type)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingMedia {
    files: Vec<MediaFile>,
}

impl PendingMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: MediaFile) {
        debug!(name = %file.name, "Attached media");
        self.files.push(file);
    }

    /// Picker selection. Nothing is added if any path fails to load.
    pub fn add_paths<P: AsRef<Path>>(&mut self, paths: impl IntoIterator<Item = P>) -> ClientResult<usize> {
        let loaded = paths
            .into_iter()
            .map(MediaFile::from_path)
            .collect::<ClientResult<Vec<_>>>()?;
        let count = loaded.len();
        loaded.into_iter().for_each(|f| self.add(f));
        Ok(count)
    }

    pub fn add_dropped(&mut self, files: impl IntoIterator<Item = MediaFile>) -> usize {
        let before = self.files.len();
        files.into_iter().for_each(|f| self.add(f));
        self.files.len() - before
    }

    pub fn remove(&mut self, index: usize) -> Option<MediaFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[MediaFile] {
        &self.files
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(MediaFile::name).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn previews(&self) -> Vec<Preview> {
        self.files.iter().map(MediaFile::preview).collect()
    }

    pub fn append_to(&self, form: Form) -> ClientResult<Form> {
        self.files
            .iter()
            .try_fold(form, |form, file| Ok(form.part("files", file.to_part()?)))
    }
}
