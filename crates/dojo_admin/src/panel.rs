//! Side panel session shared by the client and instructor screens.

use dojo_core::forms::ResourceForm;
use dojo_core::models::PhotoUpload;
use dojo_core::{INVALID_FORM_MESSAGE, MISSING_PHOTO_MESSAGE};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelMode {
    #[default]
    Create,
    View,
    Edit,
}

impl PanelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::View => "view",
            Self::Edit => "edit",
        }
    }
}

impl fmt::Display for PanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blocked locally; nothing was sent.
    Rejected,
    /// Sent and refused by the server, or never reached it.
    Failed,
    Succeeded,
}

/// State of one open (or closed) side panel.
///
/// The draft survives a failed submit so the operator can retry.
#[derive(Debug, Clone)]
pub struct PanelSession<F, R> {
    open: bool,
    mode: PanelMode,
    selected: Option<R>,
    form: F,
    photo: Option<PhotoUpload>,
    preview_url: Option<String>,
    submitting: bool,
    error: Option<String>,
    success: Option<String>,
}

impl<F: ResourceForm, R> PanelSession<F, R> {
    pub fn new(form: F) -> Self {
        Self {
            open: false,
            mode: PanelMode::Create,
            selected: None,
            form,
            photo: None,
            preview_url: None,
            submitting: false,
            error: None,
            success: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn selected(&self) -> Option<&R> {
        self.selected.as_ref()
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn photo(&self) -> Option<&PhotoUpload> {
        self.photo.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview_url.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Blank the draft, photo, preview and messages.
    pub fn reset(&mut self) {
        self.form.reset();
        self.photo = None;
        self.preview_url = None;
        self.error = None;
        self.success = None;
    }

    pub fn open_create(&mut self) {
        self.mode = PanelMode::Create;
        self.selected = None;
        self.reset();
        self.open = true;
    }

    /// Show `record` read-only. The draft is left as it was.
    pub fn open_view(&mut self, record: R) {
        self.mode = PanelMode::View;
        self.selected = Some(record);
        self.open = true;
    }

    /// Edit `record`. The caller patches the form before opening.
    pub fn open_edit(&mut self, record: R, preview_url: Option<String>) {
        self.mode = PanelMode::Edit;
        self.selected = Some(record);
        self.photo = None;
        self.preview_url = preview_url;
        self.error = None;
        self.success = None;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.reset();
    }

    /// Attach a photo and preview it as a data URL.
    pub fn select_photo(&mut self, photo: PhotoUpload) {
        self.preview_url = Some(photo.data_url());
        self.photo = Some(photo);
    }

    /// Gate a submit on form validity and, when creating, on a chosen photo.
    ///
    /// On success the session is marked submitting with messages cleared.
    /// A view-mode panel never submits, and neither does one that is already
    /// submitting or showing the success of its last submit.
    pub fn begin_submit(&mut self) -> bool {
        if self.mode == PanelMode::View || self.submitting || self.success.is_some() {
            return false;
        }
        if !self.form.is_valid() {
            self.error = Some(INVALID_FORM_MESSAGE.to_string());
            self.form.mark_all_touched();
            return false;
        }
        if self.mode == PanelMode::Create && self.photo.is_none() {
            self.error = Some(MISSING_PHOTO_MESSAGE.to_string());
            return false;
        }
        self.submitting = true;
        self.error = None;
        self.success = None;
        true
    }

    pub fn finish_failure(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }

    pub fn finish_success(&mut self, message: Option<String>) {
        self.submitting = false;
        self.success = message;
    }
}
