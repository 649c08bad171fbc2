//! HTTP client wiring and per-collection endpoints.

use crate::multipart::{client_fields, instructor_fields, into_form};
use crate::{ApiError, CreateAck, MessageAck};
use dojo_core::models::{
    ClientRecord, ClientRequest, InstructorRecord, InstructorRequest, Resource, ResourceId,
};
use dojo_core::Config;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::time::Instant;
use tracing::debug;

/// Shared HTTP client bound to the API base URL.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

fn parse_base(base_url: &str) -> Result<Url, ApiError> {
    let url = Url::parse(base_url.trim()).map_err(|err| ApiError::InvalidUrl {
        url: base_url.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: "URL cannot be used as an API base".to_string(),
        });
    }
    Ok(url)
}

impl ApiClient {
    /// Client with default HTTP settings (no request timeout).
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidUrl`] when `base_url` is not an absolute base URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Client over a preconfigured `reqwest::Client`.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidUrl`] when `base_url` is not an absolute base URL.
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http,
            base: parse_base(base_url)?,
        })
    }

    /// Client for `config.api_url`, applying the configured request timeout.
    ///
    /// # Errors
    /// Returns an error when the URL is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_http(builder.build()?, &config.api_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn clients(&self) -> ClientsApi {
        ResourceApi::new(self.clone())
    }

    pub fn instructors(&self) -> InstructorsApi {
        ResourceApi::new(self.clone())
    }

    /// Base URL extended by percent-encoded path segments.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        let mut path = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
            url: self.base.to_string(),
            reason: "URL cannot be used as an API base".to_string(),
        })?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
        drop(path);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Send a request and return the body of a successful response.
    async fn execute(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let started = Instant::now();
        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(
            %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api call"
        );
        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::from_response(status, &body))
        }
    }

    /// Strict decode: the body must be the expected JSON document.
    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Lenient decode for acknowledgments: an empty body is the default value.
    async fn fetch_ack<T: DeserializeOwned + Default>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        if body.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Endpoints of one REST collection.
pub struct ResourceApi<R> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

/// `/clients` endpoints.
pub type ClientsApi = ResourceApi<ClientRecord>;
/// `/instructors` endpoints.
pub type InstructorsApi = ResourceApi<InstructorRecord>;

impl<R> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceApi<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceApi")
            .field("collection", &R::COLLECTION)
            .field("base", &self.client.base.as_str())
            .finish()
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        self.client.endpoint(&[R::COLLECTION])
    }

    fn record_url(&self, id: ResourceId, action: Option<&str>) -> Result<Url, ApiError> {
        let id = id.to_string();
        match action {
            Some(action) => self.client.endpoint(&[R::COLLECTION, &id, action]),
            None => self.client.endpoint(&[R::COLLECTION, &id]),
        }
    }

    /// `GET /{collection}`: the whole collection in server order.
    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        let url = self.collection_url()?;
        self.client
            .fetch_json(self.client.request(Method::GET, url))
            .await
    }

    /// `PATCH /{collection}/{id}/{action}` with an empty JSON object body.
    async fn patch_action(&self, id: ResourceId, action: &str) -> Result<MessageAck, ApiError> {
        let url = self.record_url(id, Some(action))?;
        let request = self
            .client
            .request(Method::PATCH, url)
            .json(&serde_json::Map::new());
        self.client.fetch_ack(request).await
    }
}

impl ResourceApi<ClientRecord> {
    /// `POST /clients` as multipart form data.
    pub async fn create(&self, request: &ClientRequest) -> Result<CreateAck, ApiError> {
        let url = self.collection_url()?;
        let form = into_form(client_fields(request))?;
        self.client
            .fetch_ack(self.client.request(Method::POST, url).multipart(form))
            .await
    }
}

impl ResourceApi<InstructorRecord> {
    /// `POST /instructors` as multipart form data.
    pub async fn create(&self, request: &InstructorRequest) -> Result<CreateAck, ApiError> {
        let url = self.collection_url()?;
        let form = into_form(instructor_fields(request))?;
        self.client
            .fetch_ack(self.client.request(Method::POST, url).multipart(form))
            .await
    }

    /// `PUT /instructors/{id}` as multipart form data.
    pub async fn update(
        &self,
        id: ResourceId,
        request: &InstructorRequest,
    ) -> Result<MessageAck, ApiError> {
        let url = self.record_url(id, None)?;
        let form = into_form(instructor_fields(request))?;
        self.client
            .fetch_ack(self.client.request(Method::PUT, url).multipart(form))
            .await
    }

    /// Re-submit the stored record with its status forced to `active`.
    pub async fn activate(&self, record: &InstructorRecord) -> Result<MessageAck, ApiError> {
        self.update(record.id, &InstructorRequest::activation_of(record))
            .await
    }

    pub async fn deactivate(&self, id: ResourceId) -> Result<MessageAck, ApiError> {
        self.patch_action(id, "inactivar").await
    }

    pub async fn publish(&self, id: ResourceId) -> Result<MessageAck, ApiError> {
        self.patch_action(id, "publish").await
    }

    pub async fn unpublish(&self, id: ResourceId) -> Result<MessageAck, ApiError> {
        self.patch_action(id, "unpublish").await
    }
}
