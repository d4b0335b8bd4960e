//! List / create / edit / delete state for one resource collection.
//!
//! A [`ResourceView`] is what a page renders: the last fetched items, a loading
//! flag, an optional editor dialog, an optional pending-delete confirmation and
//! a submitting flag. Operations never return errors; failures become
//! notifications and the view stays usable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::core::helpers::today;
use crate::core::notify::Notifier;
use crate::forms::{Mode, ResourceForm};
use crate::models::models::Id;
use crate::repository::{Identified, Refreshed, ResourceRepository};

/// Notification texts of one resource kind. Server messages replace the
/// `*_failed` fallbacks when the backend sends one.
#[derive(Debug, Clone, Copy)]
pub struct ResourceLabels {
    pub load_failed: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub updated: &'static str,
    pub update_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
    pub empty_call_to_action: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ViewState<'a, T> {
    Loading,
    Empty { call_to_action: &'static str },
    Items(&'a [T]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor<F> {
    pub mode: Mode,
    pub form: F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    NoEditor,
    Invalid,
    Saved,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct SubmittingFlag(Arc<AtomicBool>);

impl SubmittingFlag {
    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// Raised for the duration of one request, lowered on every exit path.
struct SubmitGuard(Arc<AtomicBool>);

impl SubmitGuard {
    fn raise(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ResourceView<R, F>
where
    R: ResourceRepository,
{
    repo: R,
    notifier: Arc<dyn Notifier>,
    labels: ResourceLabels,
    items: Vec<R::Item>,
    loading: bool,
    editor: Option<Editor<F>>,
    pending_delete: Option<Id>,
    submitting: Arc<AtomicBool>,
    clock: fn() -> NaiveDate,
}

impl<R, F> ResourceView<R, F>
where
    R: ResourceRepository,
    F: ResourceForm<Item = R::Item, Draft = R::Draft>,
{
    pub fn new(repo: R, notifier: Arc<dyn Notifier>, labels: ResourceLabels) -> Self {
        Self {
            repo,
            notifier,
            labels,
            items: Vec::new(),
            loading: true,
            editor: None,
            pending_delete: None,
            submitting: Arc::new(AtomicBool::new(false)),
            clock: today,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> ViewState<'_, R::Item> {
        if self.loading {
            ViewState::Loading
        } else if self.items.is_empty() {
            ViewState::Empty {
                call_to_action: self.labels.empty_call_to_action,
            }
        } else {
            ViewState::Items(&self.items)
        }
    }

    pub async fn load(&mut self) -> bool {
        self.loading = true;
        let result = self.repo.list().await;
        self.loading = false;
        self.store(result)
    }

    // On failure the previous items stay.
    fn store(&mut self, result: Refreshed<R::Item>) -> bool {
        match result {
            Ok(items) => {
                debug!(count = items.len(), "Collection loaded");
                self.items = items;
                true
            }
            Err(e) => {
                warn!(error = %e, "Collection load failed");
                self.notifier.error(&e.user_message(self.labels.load_failed));
                false
            }
        }
    }

    pub fn editor(&self) -> Option<&Editor<F>> {
        self.editor.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut F> {
        self.editor.as_mut().map(|e| &mut e.form)
    }

    pub fn open_create(&mut self)
    where
        F: Default,
    {
        self.open_create_with(F::default());
    }

    pub fn open_create_with(&mut self, form: F) {
        self.editor = Some(Editor { mode: Mode::Create, form });
    }

    pub fn open_edit(&mut self, id: Id) -> bool
    where
        R::Item: Identified,
    {
        let Some(item) = self.items.iter().find(|i| i.id() == Some(id)) else {
            return false;
        };
        let form = F::from_item(item);
        self.open_edit_with(id, form);
        true
    }

    pub fn open_edit_with(&mut self, id: Id, form: F) {
        self.editor = Some(Editor { mode: Mode::Edit(id), form });
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    pub fn submitting_flag(&self) -> SubmittingFlag {
        SubmittingFlag(Arc::clone(&self.submitting))
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn can_submit(&self) -> bool {
        self.editor.is_some() && !self.is_submitting()
    }

    /// Validates and sends the open editor. The editor closes once the server
    /// accepts the change, even if the refresh after it fails; otherwise it keeps
    /// what the user typed.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(editor) = self.editor.as_ref() else {
            return SubmitOutcome::NoEditor;
        };
        let mode = editor.mode;
        let draft = match editor.form.validate(mode, (self.clock)()) {
            Ok(draft) => draft,
            Err(e) => {
                debug!(error = %e, "Form rejected");
                self.notifier.error(&e.user_message(""));
                return SubmitOutcome::Invalid;
            }
        };

        let _guard = SubmitGuard::raise(&self.submitting);
        let (result, done, failed) = match mode {
            Mode::Create => (self.repo.create(draft).await, self.labels.created, self.labels.create_failed),
            Mode::Edit(id) => (self.repo.update(id, draft).await, self.labels.updated, self.labels.update_failed),
        };

        match result {
            Ok(refreshed) => {
                self.editor = None;
                self.notifier.success(done);
                // a failed refresh notifies on its own and leaves the save standing
                self.store(refreshed);
                SubmitOutcome::Saved
            }
            Err(e) => {
                warn!(error = %e, ?mode, "Submit failed");
                self.notifier.error(&e.user_message(failed));
                SubmitOutcome::Failed
            }
        }
    }

    pub fn pending_delete(&self) -> Option<Id> {
        self.pending_delete
    }

    pub fn request_delete(&mut self, id: Id) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the pending item. The confirmation closes whatever the outcome.
    pub async fn confirm_delete(&mut self) -> bool
    where
        R::Item: Identified,
    {
        let Some(id) = self.pending_delete else {
            return false;
        };
        let result = self.repo.delete(id).await;
        self.pending_delete = None;
        match result {
            Ok(refreshed) => {
                self.items.retain(|item| item.id() != Some(id));
                self.notifier.success(self.labels.deleted);
                self.store(refreshed);
                true
            }
            Err(e) => {
                warn!(error = %e, id, "Delete failed");
                self.notifier.error(&e.user_message(self.labels.delete_failed));
                false
            }
        }
    }
}
