//! Clients screen: list, search, read-only detail and create panel.

use crate::notify::{Notice, Notifier};
use crate::panel::{PanelMode, PanelSession, SubmitOutcome};
use crate::sync::ListSynchronizer;
use dojo_client::ClientService;
use dojo_core::forms::{ClientField, ClientForm};
use dojo_core::models::{ClientRecord, PhotoUpload, ResourceId};
use dojo_core::{CoreError, CLIENT_PANEL_CLOSE_DELAY};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub const LOAD_ERROR_MESSAGE: &str = "Error al cargar los clientes";
pub const CREATE_SUCCESS_MESSAGE: &str = "Cliente creado exitosamente";
pub const CREATE_ERROR_MESSAGE: &str = "Error al crear el cliente";
const CREATE_SUCCESS_TITLE: &str = "Cliente creado";

pub struct ClientsScreen<S, N> {
    service: Arc<S>,
    list: ListSynchronizer<ClientRecord, S>,
    panel: PanelSession<ClientForm, ClientRecord>,
    notifier: N,
    close_at: Option<Instant>,
}

impl<S: ClientService, N: Notifier> ClientsScreen<S, N> {
    pub fn new(service: Arc<S>, notifier: N) -> Self {
        Self {
            list: ListSynchronizer::new(Arc::clone(&service), LOAD_ERROR_MESSAGE),
            service,
            panel: PanelSession::new(ClientForm::new()),
            notifier,
            close_at: None,
        }
    }

    pub fn list(&self) -> &ListSynchronizer<ClientRecord, S> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListSynchronizer<ClientRecord, S> {
        &mut self.list
    }

    pub fn panel(&self) -> &PanelSession<ClientForm, ClientRecord> {
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
            PanelMode::View => "Detalle del Cliente",
            PanelMode::Create | PanelMode::Edit => "Nuevo Cliente",
        }
    }

    /// Pending delayed close of the panel after a successful create.
    pub fn close_deadline(&self) -> Option<Instant> {
        self.close_at
    }

    pub async fn load(&mut self) {
        self.list.load().await;
    }

    pub fn search(&mut self, term: &str) {
        self.list.set_search_term(term);
    }

    pub fn open_create(&mut self) {
        self.close_at = None;
        self.panel.open_create();
    }

    /// Show a record read-only.
    ///
    /// # Returns
    /// `false` when `id` is not in the current collection.
    pub fn open_view(&mut self, id: ResourceId) -> bool {
        let Some(record) = self.list.find(id).cloned() else {
            return false;
        };
        self.close_at = None;
        self.panel.open_view(record);
        true
    }

    pub fn close_panel(&mut self) {
        self.close_at = None;
        self.panel.close();
    }

    /// Set a draft field from operator input.
    ///
    /// # Errors
    /// Returns [`CoreError::BadRequest`] for an unknown document type.
    pub fn set_field(&mut self, field: ClientField, value: &str) -> Result<(), CoreError> {
        self.panel.form_mut().set(field, value)
    }

    pub fn select_photo(&mut self, photo: PhotoUpload) {
        self.panel.select_photo(photo);
    }

    /// Submit the create draft.
    ///
    /// On success the inline success message is shown and mirrored as a
    /// notice, the list reloads and the panel is scheduled to close after
    /// [`CLIENT_PANEL_CLOSE_DELAY`].
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.panel.begin_submit() {
            return SubmitOutcome::Rejected;
        }
        let Some(photo) = self.panel.photo().cloned() else {
            self.panel.finish_failure(dojo_core::MISSING_PHOTO_MESSAGE);
            return SubmitOutcome::Rejected;
        };
        let request = match self.panel.form().to_request(photo) {
            Ok(request) => request,
            Err(err) => {
                self.panel.finish_failure(err.to_string());
                return SubmitOutcome::Failed;
            }
        };
        match self.service.create(&request).await {
            Ok(ack) => {
                info!(
                    document = %request.document,
                    ack = ?ack.succes,
                    "client created"
                );
                self.panel
                    .finish_success(Some(CREATE_SUCCESS_MESSAGE.to_string()));
                self.notifier.notify(Notice {
                    auto_dismiss: Some(CLIENT_PANEL_CLOSE_DELAY),
                    ..Notice::success(CREATE_SUCCESS_TITLE, CREATE_SUCCESS_MESSAGE)
                });
                self.list.load().await;
                self.close_at = Some(Instant::now() + CLIENT_PANEL_CLOSE_DELAY);
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                warn!(error = %err, "client create failed");
                self.panel
                    .finish_failure(err.message_or(CREATE_ERROR_MESSAGE));
                SubmitOutcome::Failed
            }
        }
    }

    /// Close the panel once its delayed close is due.
    ///
    /// # Returns
    /// `true` when the panel was closed by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.close_at {
            Some(deadline) if now >= deadline => {
                self.close_panel();
                true
            }
            _ => false,
        }
    }
}
