//! Resource client
//!
//! Maps the five resource operations onto HTTP calls against a fixed
//! endpoint. The client is a pure transport mapping: it never inspects
//! statuses, never retries, and never translates errors.

use std::sync::Arc;

use restcheck_domain::{
    Operation, Payload, RequestSpec, Resource, ResourceId, ResponseEnvelope, ServiceEndpoint,
};

use crate::ports::{HttpClient, HttpClientError};

/// Typed CRUD client for one service.
///
/// # Example
///
/// ```ignore
/// let endpoint = ServiceEndpoint::parse("https://jsonplaceholder.typicode.com")?;
/// let client = ResourceClient::new(Arc::new(ReqwestHttpClient::new()?), endpoint);
///
/// let response = client.get(&Resource::users(), &ResourceId::from(1_u64)).await?;
/// ```
pub struct ResourceClient<C: HttpClient> {
    http: Arc<C>,
    endpoint: ServiceEndpoint,
}

impl<C: HttpClient> ResourceClient<C> {
    /// Creates a client bound to `endpoint`.
    pub const fn new(http: Arc<C>, endpoint: ServiceEndpoint) -> Self {
        Self { http, endpoint }
    }

    /// Returns the endpoint all paths are resolved against.
    pub const fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// `GET /{resource}`.
    ///
    /// # Errors
    /// Returns `HttpClientError` on transport failure.
    pub async fn list(&self, resource: &Resource) -> Result<ResponseEnvelope, HttpClientError> {
        let request = RequestSpec::get(self.endpoint.collection_url(resource));
        self.send(Operation::List, &request).await
    }

    /// `GET /{resource}/{id}`. A missing entity comes back as its raw status.
    ///
    /// # Errors
    /// Returns `HttpClientError` on transport failure.
    pub async fn get(
        &self,
        resource: &Resource,
        id: &ResourceId,
    ) -> Result<ResponseEnvelope, HttpClientError> {
        let request = RequestSpec::get(self.endpoint.item_url(resource, id));
        self.send(Operation::Get, &request).await
    }

    /// `POST /{resource}` with `payload` as JSON.
    ///
    /// # Errors
    /// Returns `HttpClientError` on transport failure.
    pub async fn create(
        &self,
        resource: &Resource,
        payload: &Payload,
    ) -> Result<ResponseEnvelope, HttpClientError> {
        let request = RequestSpec::post(self.endpoint.collection_url(resource), payload.clone());
        self.send(Operation::Create, &request).await
    }

    /// `PUT /{resource}/{id}` with `payload` as JSON (full replace).
    ///
    /// # Errors
    /// Returns `HttpClientError` on transport failure.
    pub async fn update(
        &self,
        resource: &Resource,
        id: &ResourceId,
        payload: &Payload,
    ) -> Result<ResponseEnvelope, HttpClientError> {
        let request = RequestSpec::put(self.endpoint.item_url(resource, id), payload.clone());
        self.send(Operation::Update, &request).await
    }

    /// `DELETE /{resource}/{id}`.
    ///
    /// # Errors
    /// Returns `HttpClientError` on transport failure.
    pub async fn delete(
        &self,
        resource: &Resource,
        id: &ResourceId,
    ) -> Result<ResponseEnvelope, HttpClientError> {
        let request = RequestSpec::delete(self.endpoint.item_url(resource, id));
        self.send(Operation::Delete, &request).await
    }

    async fn send(
        &self,
        operation: Operation,
        request: &RequestSpec,
    ) -> Result<ResponseEnvelope, HttpClientError> {
        tracing::debug!(%operation, method = %request.method, url = %request.url, "sending request");
        match self.http.execute(request).await {
            Ok(response) => {
                tracing::debug!(
                    %operation,
                    status = response.status,
                    elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
                    "response received"
                );
                Ok(response)
            }
            Err(error) => {
                tracing::warn!(%operation, url = %request.url, %error, "request failed");
                Err(error)
            }
        }
    }
}
