//! Instructors screen: list, search, create/view/edit panel and the
//! publish and status toggles.
//!
//! Toggles are applied to the local collection only after the server
//! confirmed them.

use crate::notify::{Confirmation, Notice, Notifier};
use crate::panel::{PanelMode, PanelSession, SubmitOutcome};
use crate::sync::ListSynchronizer;
use dojo_client::{ApiError, InstructorService};
use dojo_core::forms::{InstructorField, InstructorForm};
use dojo_core::models::{InstructorRecord, InstructorStatus, PhotoUpload, Resource, ResourceId};
use dojo_core::{Config, UNKNOWN_ERROR_MESSAGE};
use std::sync::Arc;
use tracing::{info, warn};

pub const LOAD_ERROR_MESSAGE: &str = "Error al cargar los instructores";
pub const CREATE_ERROR_MESSAGE: &str = "Error al crear el instructor";
pub const UPDATE_ERROR_MESSAGE: &str = "Error al actualizar el instructor";

/// What happened to a publish or status toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// No record with that id in the current collection.
    NotFound,
    /// The operator declined the confirmation; nothing was sent.
    Declined,
    Failed,
    Succeeded,
}

/// A lifecycle toggle together with its Spanish wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    Publish,
    Unpublish,
    Activate,
    Deactivate,
}

impl Toggle {
    fn for_publish(record: &InstructorRecord) -> Self {
        if record.is_published {
            Self::Unpublish
        } else {
            Self::Publish
        }
    }

    fn for_status(record: &InstructorRecord) -> Self {
        if record.status.is_active() {
            Self::Deactivate
        } else {
            Self::Activate
        }
    }

    /// Infinitive used in prompts and error text.
    fn verb(self) -> &'static str {
        match self {
            Self::Publish => "publicar",
            Self::Unpublish => "despublicar",
            Self::Activate => "activar",
            Self::Deactivate => "desactivar",
        }
    }

    fn participle(self) -> &'static str {
        match self {
            Self::Publish => "publicado",
            Self::Unpublish => "despublicado",
            Self::Activate => "activado",
            Self::Deactivate => "desactivado",
        }
    }

    fn confirmation(self, record: &InstructorRecord) -> Confirmation {
        let name = record.full_name();
        let title = format!("¿{} instructor?", capitalize(self.verb()));
        match self {
            Self::Publish | Self::Unpublish => Confirmation::new(
                title,
                format!("¿Está seguro de {} a {} de la web?", self.verb(), name),
                "Sí, continuar",
            ),
            Self::Activate | Self::Deactivate => Confirmation::new(
                title,
                format!("{} será {}.", name, self.participle()),
                format!("Sí, {}", self.verb()),
            ),
        }
    }

    fn success_notice(self, record: &InstructorRecord) -> Notice {
        let title = match self {
            Self::Publish => "Publicado",
            Self::Unpublish => "Despublicado",
            Self::Activate => "Instructor activado",
            Self::Deactivate => "Instructor desactivado",
        };
        Notice::success(
            title,
            format!("{} fue {} exitosamente.", record.full_name(), self.participle()),
        )
    }

    fn error_notice(self, err: &ApiError) -> Notice {
        Notice::error(
            "Error",
            format!(
                "Error al {} el instructor: {}",
                self.verb(),
                err.message_or(UNKNOWN_ERROR_MESSAGE)
            ),
        )
    }

    fn apply(self, record: &mut InstructorRecord) {
        match self {
            Self::Publish => record.is_published = true,
            Self::Unpublish => record.is_published = false,
            Self::Activate => record.status = InstructorStatus::Active,
            Self::Deactivate => record.status = InstructorStatus::Inactive,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct InstructorsScreen<S, N> {
    service: Arc<S>,
    list: ListSynchronizer<InstructorRecord, S>,
    panel: PanelSession<InstructorForm, InstructorRecord>,
    notifier: N,
    config: Config,
}

impl<S: InstructorService, N: Notifier> InstructorsScreen<S, N> {
    pub fn new(service: Arc<S>, notifier: N, config: &Config) -> Self {
        Self {
            list: ListSynchronizer::new(Arc::clone(&service), LOAD_ERROR_MESSAGE),
            service,
            panel: PanelSession::new(InstructorForm::new()),
            notifier,
            config: config.clone(),
        }
    }

    pub fn list(&self) -> &ListSynchronizer<InstructorRecord, S> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListSynchronizer<InstructorRecord, S> {
        &mut self.list
    }

    pub fn panel(&self) -> &PanelSession<InstructorForm, InstructorRecord> {
        &self.panel
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn panel_title(&self) -> &'static str {
        match self.panel.mode() {
            PanelMode::Create => "Nuevo Instructor",
            PanelMode::Edit => "Editar Instructor",
            PanelMode::View => "Detalle del Instructor",
        }
    }

    pub async fn load(&mut self) {
        self.list.load().await;
    }

    pub fn search(&mut self, term: &str) {
        self.list.set_search_term(term);
    }

    pub fn open_create(&mut self) {
        self.panel.open_create();
    }

    /// # Returns
    /// `false` when `id` is not in the current collection.
    pub fn open_view(&mut self, id: ResourceId) -> bool {
        let Some(record) = self.list.find(id).cloned() else {
            return false;
        };
        self.panel.open_view(record);
        true
    }

    /// Load `id` into the draft for editing, previewing its stored photo.
    ///
    /// # Returns
    /// `false` when `id` is not in the current collection.
    pub fn open_edit(&mut self, id: ResourceId) -> bool {
        let Some(record) = self.list.find(id).cloned() else {
            return false;
        };
        self.panel.form_mut().patch_from(&record);
        let preview = (!record.photo.is_empty()).then(|| self.config.photo_url(&record.photo));
        self.panel.open_edit(record, preview);
        true
    }

    pub fn close_panel(&mut self) {
        self.panel.close();
    }

    pub fn set_field(&mut self, field: InstructorField, value: &str) {
        self.panel.form_mut().set(field, value);
    }

    pub fn select_photo(&mut self, photo: PhotoUpload) {
        self.panel.select_photo(photo);
    }

    /// Submit the draft as a create or an update, depending on the panel mode.
    ///
    /// On success the list reloads, the panel closes and a success notice is
    /// presented. On failure the panel stays open with the draft intact.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.panel.begin_submit() {
            return SubmitOutcome::Rejected;
        }
        let request = match self.panel.form().to_request(self.panel.photo().cloned()) {
            Ok(request) => request,
            Err(err) => {
                self.panel.finish_failure(err.to_string());
                return SubmitOutcome::Failed;
            }
        };
        let editing = match (self.panel.mode(), self.panel.selected()) {
            (PanelMode::Edit, Some(record)) => Some((record.id, record.full_name())),
            _ => None,
        };

        let (result, fallback, notice) = match editing {
            Some((id, name)) => (
                self.service.update(id, &request).await.map(|ack| ack.message),
                UPDATE_ERROR_MESSAGE,
                Notice::success(
                    "Instructor actualizado",
                    format!("{} fue actualizado exitosamente.", name),
                ),
            ),
            None => (
                self.service.create(&request).await.map(|ack| ack.succes),
                CREATE_ERROR_MESSAGE,
                Notice::success(
                    "Instructor creado",
                    "El nuevo instructor fue agregado exitosamente.",
                ),
            ),
        };

        match result {
            Ok(ack) => {
                info!(mode = %self.panel.mode(), ack = ?ack, "instructor saved");
                self.panel.finish_success(None);
                self.list.load().await;
                self.panel.close();
                self.notifier.notify(notice);
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                warn!(mode = %self.panel.mode(), error = %err, "instructor save failed");
                self.panel.finish_failure(err.message_or(fallback));
                SubmitOutcome::Failed
            }
        }
    }

    /// Publish an unpublished instructor or unpublish a published one.
    pub async fn toggle_publish(&mut self, id: ResourceId) -> ActionOutcome {
        let Some(record) = self.list.find(id).cloned() else {
            return ActionOutcome::NotFound;
        };
        self.run_toggle(Toggle::for_publish(&record), record).await
    }

    /// Deactivate an active instructor or re-activate an inactive one.
    pub async fn toggle_status(&mut self, id: ResourceId) -> ActionOutcome {
        let Some(record) = self.list.find(id).cloned() else {
            return ActionOutcome::NotFound;
        };
        self.run_toggle(Toggle::for_status(&record), record).await
    }

    async fn run_toggle(&mut self, toggle: Toggle, record: InstructorRecord) -> ActionOutcome {
        if !self.notifier.confirm(&toggle.confirmation(&record)) {
            return ActionOutcome::Declined;
        }
        let result = match toggle {
            Toggle::Publish => self.service.publish(record.id).await,
            Toggle::Unpublish => self.service.unpublish(record.id).await,
            Toggle::Activate => self.service.activate(&record).await,
            Toggle::Deactivate => self.service.deactivate(record.id).await,
        };
        match result {
            Ok(_) => {
                info!(id = record.id, action = toggle.verb(), "instructor toggled");
                self.list.update_record(record.id, |stored| toggle.apply(stored));
                self.notifier.notify(toggle.success_notice(&record));
                ActionOutcome::Succeeded
            }
            Err(err) => {
                warn!(
                    id = record.id,
                    action = toggle.verb(),
                    error = %err,
                    "instructor toggle failed"
                );
                self.notifier.notify(toggle.error_notice(&err));
                ActionOutcome::Failed
            }
        }
    }
}
