use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::domain::context::scope;
use crate::domain::platform::endpoint::ApiEndpoint;
use crate::domain::platform::transport::{ApiRequest, HttpTransport, Transport};
use crate::error::{Error, Result};

/// Typed access to the remote platform.
///
/// Every failure is attributed to the [`OperationContext`](crate::domain::context::OperationContext)
/// visible when the request settles. No retries are made here.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    transport: Arc<dyn Transport>,
}

impl PlatformClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        PlatformClient { transport }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(PlatformClient::new(Arc::new(HttpTransport::new(config)?)))
    }

    pub async fn call<T: DeserializeOwned>(&self, endpoint: &ApiEndpoint, query: Vec<(String, String)>, body: Option<Value>) -> Result<T> {
        self.call_with(endpoint, query, body, |value| serde_json::from_value::<T>(value).map_err(Error::from)).await
    }

    /// Sends one request and turns the answer into `T` with `decode`.
    ///
    /// Transport and decode failures both leave through here, attributed to the context active
    /// when the request settled.
    pub async fn call_with<T, F>(&self, endpoint: &ApiEndpoint, query: Vec<(String, String)>, body: Option<Value>, decode: F) -> Result<T>
    where
        F: FnOnce(Value) -> Result<T>,
    {
        let request = ApiRequest::new(endpoint, query, body);
        let started = Instant::now();

        let result = self.transport.send(&request).await.and_then(decode);

        let context = scope::current();
        tracing::info!(
            RequestId = %request.request_id,
            Endpoint = %endpoint,
            Action = context.action.as_deref().unwrap_or("-"),
            ElapsedMs = started.elapsed().as_millis() as u64,
            Success = result.is_ok(),
            "Platform request finished"
        );

        result.map_err(|e| {
            log::warn!("Request {} failed: {}", endpoint, e);
            e.with_context(context)
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &ApiEndpoint, query: Vec<(String, String)>) -> Result<T> {
        self.call(endpoint, query, None).await
    }

    pub async fn post<T: DeserializeOwned>(&self, endpoint: &ApiEndpoint, body: Value) -> Result<T> {
        self.call(endpoint, Vec::new(), Some(body)).await
    }
}
