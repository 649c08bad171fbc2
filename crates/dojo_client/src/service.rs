//! Service seams between the admin layer and the HTTP client.
//!
//! Controllers depend on these traits rather than on [`ResourceApi`] so they
//! can run against in-memory fakes.

use crate::{ApiError, CreateAck, MessageAck, ResourceApi};
use async_trait::async_trait;
use dojo_core::models::{
    ClientRecord, ClientRequest, InstructorRecord, InstructorRequest, Resource, ResourceId,
};

/// Anything that can fetch a whole collection.
#[async_trait]
pub trait ListSource<R: Resource>: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<R>, ApiError>;
}

/// Remote operations available on clients.
#[async_trait]
pub trait ClientService: ListSource<ClientRecord> {
    async fn create(&self, request: &ClientRequest) -> Result<CreateAck, ApiError>;
}

/// Remote operations available on instructors.
#[async_trait]
pub trait InstructorService: ListSource<InstructorRecord> {
    async fn create(&self, request: &InstructorRequest) -> Result<CreateAck, ApiError>;

    async fn update(
        &self,
        id: ResourceId,
        request: &InstructorRequest,
    ) -> Result<MessageAck, ApiError>;

    /// Full re-submission of `record` with status `active`.
    async fn activate(&self, record: &InstructorRecord) -> Result<MessageAck, ApiError>;

    async fn deactivate(&self, id: ResourceId) -> Result<MessageAck, ApiError>;

    async fn publish(&self, id: ResourceId) -> Result<MessageAck, ApiError>;

    async fn unpublish(&self, id: ResourceId) -> Result<MessageAck, ApiError>;
}

#[async_trait]
impl<R: Resource> ListSource<R> for ResourceApi<R> {
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        ResourceApi::<R>::list(self).await
    }
}

#[async_trait]
impl ClientService for ResourceApi<ClientRecord> {
    async fn create(&self, request: &ClientRequest) -> Result<CreateAck, ApiError> {
        ResourceApi::<ClientRecord>::create(self, request).await
    }
}

#[async_trait]
impl InstructorService for ResourceApi<InstructorRecord> {
    async fn create(&self, request: &InstructorRequest) -> Result<CreateAck, ApiError> {
        ResourceApi::<InstructorRecord>::create(self, request).await
    }

    async fn update(
        &self,
        id: ResourceId,
        request: &InstructorRequest,
    ) -> Result<MessageAck, ApiError> {
        ResourceApi::<InstructorRecord>::update(self, id, request).await
    }

    async fn activate(&self, record: &InstructorRecord) -> Result<MessageAck, ApiError> {
        ResourceApi::<InstructorRecord>::activate(self, record).await
    }

    async fn deactivate(&self, id: ResourceId) -> Result<MessageAck, ApiError> {
        ResourceApi::<InstructorRecord>::deactivate(self, id).await
    }

    async fn publish(&self, id: ResourceId) -> Result<MessageAck, ApiError> {
        ResourceApi::<InstructorRecord>::publish(self, id).await
    }

    async fn unpublish(&self, id: ResourceId) -> Result<MessageAck, ApiError> {
        ResourceApi::<InstructorRecord>::unpublish(self, id).await
    }
}
