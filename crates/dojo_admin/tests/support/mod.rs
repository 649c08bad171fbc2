//! In-memory fakes for the service traits and a recording notifier.

#![allow(dead_code)]

use async_trait::async_trait;
use dojo_admin::{Confirmation, Notice, NoticeLevel, Notifier};
use dojo_client::{
    ApiError, ClientService, CreateAck, InstructorService, ListSource, MessageAck, StatusCode,
};
use dojo_core::models::{
    ClientRecord, ClientRequest, DocumentType, InstructorRecord, InstructorRequest,
    InstructorStatus, ResourceId,
};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListClients,
    ListInstructors,
    CreateClient(ClientRequest),
    CreateInstructor(InstructorRequest),
    Update(ResourceId, InstructorRequest),
    Activate(ResourceId),
    Deactivate(ResourceId),
    Publish(ResourceId),
    Unpublish(ResourceId),
}

#[derive(Default)]
struct Inner {
    clients: Vec<ClientRecord>,
    instructors: Vec<InstructorRecord>,
    calls: Vec<Call>,
    fail_lists: bool,
    fail_next: Option<(StatusCode, String)>,
}

/// Backend double serving both collections.
#[derive(Default)]
pub struct FakeBackend {
    inner: Mutex<Inner>,
}

impl FakeBackend {
    pub fn with_clients(records: Vec<ClientRecord>) -> Self {
        let backend = Self::default();
        backend.set_clients(records);
        backend
    }

    pub fn with_instructors(records: Vec<InstructorRecord>) -> Self {
        let backend = Self::default();
        backend.set_instructors(records);
        backend
    }

    pub fn set_clients(&self, records: Vec<ClientRecord>) {
        self.inner.lock().expect("fake lock").clients = records;
    }

    pub fn set_instructors(&self, records: Vec<InstructorRecord>) {
        self.inner.lock().expect("fake lock").instructors = records;
    }

    pub fn fail_lists(&self, fail: bool) {
        self.inner.lock().expect("fake lock").fail_lists = fail;
    }

    /// Fail the next mutating call with `status` and a raw JSON `body`.
    pub fn fail_next(&self, status: StatusCode, body: &str) {
        self.inner.lock().expect("fake lock").fail_next = Some((status, body.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().expect("fake lock").calls.clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    fn list_of<R>(&self, call: Call, pick: fn(&Inner) -> Vec<R>) -> Result<Vec<R>, ApiError> {
        let mut inner = self.inner.lock().expect("fake lock");
        inner.calls.push(call);
        if inner.fail_lists {
            return Err(ApiError::from_response(StatusCode::SERVICE_UNAVAILABLE, ""));
        }
        Ok(pick(&inner))
    }

    fn mutate(&self, call: Call) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().expect("fake lock");
        inner.calls.push(call);
        match inner.fail_next.take() {
            Some((status, body)) => Err(ApiError::from_response(status, &body)),
            None => Ok(()),
        }
    }
}

fn message_ack() -> MessageAck {
    MessageAck {
        message: Some("ok".to_string()),
    }
}

fn create_ack() -> CreateAck {
    CreateAck {
        succes: Some("Registro creado".to_string()),
    }
}

#[async_trait]
impl ListSource<ClientRecord> for FakeBackend {
    async fn list(&self) -> Result<Vec<ClientRecord>, ApiError> {
        self.list_of(Call::ListClients, |inner| inner.clients.clone())
    }
}

#[async_trait]
impl ListSource<InstructorRecord> for FakeBackend {
    async fn list(&self) -> Result<Vec<InstructorRecord>, ApiError> {
        self.list_of(Call::ListInstructors, |inner| inner.instructors.clone())
    }
}

#[async_trait]
impl ClientService for FakeBackend {
    async fn create(&self, request: &ClientRequest) -> Result<CreateAck, ApiError> {
        self.mutate(Call::CreateClient(request.clone()))
            .map(|()| create_ack())
    }
}

#[async_trait]
impl InstructorService for FakeBackend {
    async fn create(&self, request: &InstructorRequest) -> Result<CreateAck, ApiError> {
        self.mutate(Call::CreateInstructor(request.clone()))
            .map(|()| create_ack())
    }

    async fn update(
        &self,
        id: ResourceId,
        request: &InstructorRequest,
    ) -> Result<MessageAck, ApiError> {
        self.mutate(Call::Update(id, request.clone()))
            .map(|()| message_ack())
    }

    async fn activate(&self, record: &InstructorRecord) -> Result<MessageAck, ApiError> {
        self.mutate(Call::Activate(record.id)).map(|()| message_ack())
    }

    async fn deactivate(&self, id: ResourceId) -> Result<MessageAck, ApiError> {
        self.mutate(Call::Deactivate(id)).map(|()| message_ack())
    }

    async fn publish(&self, id: ResourceId) -> Result<MessageAck, ApiError> {
        self.mutate(Call::Publish(id)).map(|()| message_ack())
    }

    async fn unpublish(&self, id: ResourceId) -> Result<MessageAck, ApiError> {
        self.mutate(Call::Unpublish(id)).map(|()| message_ack())
    }
}

/// Notifier that records everything and answers confirmations with `answer`.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notices: Vec<Notice>,
    pub confirmations: Vec<Confirmation>,
    pub answer: bool,
}

impl RecordingNotifier {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notices.iter().map(|notice| notice.level).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn confirm(&mut self, request: &Confirmation) -> bool {
        self.confirmations.push(request.clone());
        self.answer
    }
}

pub fn client(id: ResourceId, name: &str, document: &str) -> ClientRecord {
    ClientRecord {
        id,
        name: name.to_string(),
        last_name: "Quispe".to_string(),
        document_type: if document.len() == 11 {
            DocumentType::Ruc
        } else {
            DocumentType::Dni
        },
        document: document.to_string(),
        address: "Av. Sol 123".to_string(),
        cellphome: "987654321".to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        gender: "Femenino".to_string(),
        birthday: "1990-04-12".to_string(),
        photo: format!("{}.png", name.to_lowercase()),
    }
}

pub fn instructor(id: ResourceId, name: &str, specialty: &str) -> InstructorRecord {
    InstructorRecord {
        id,
        name: name.to_string(),
        last_name: "Sato".to_string(),
        specialty: specialty.to_string(),
        belt_level: "Negra".to_string(),
        bio: None,
        email: format!("{}@dojo.pe", name.to_lowercase()),
        phone: "912345678".to_string(),
        experience_years: 8,
        certifications: None,
        social_media_facebook: None,
        social_media_instagram: None,
        social_media_twitter: None,
        status: InstructorStatus::Active,
        photo: format!("{}.png", name.to_lowercase()),
        is_published: false,
    }
}
