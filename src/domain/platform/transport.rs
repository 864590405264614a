use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::domain::platform::endpoint::ApiEndpoint;
use crate::error::{Error, Result};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub request_id: String,
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(endpoint: &ApiEndpoint, query: Vec<(String, String)>, body: Option<Value>) -> Self {
        ApiRequest { request_id: Uuid::new_v4().to_string(), method: endpoint.method(), path: endpoint.path(), query, body }
    }
}

/// Sends one request to the remote platform and returns the decoded JSON body.
///
/// Non-success statuses must surface as [`Error::RemoteError`].
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<HttpTransport> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder().default_headers(headers).timeout(config.request_timeout).build()?;

        Ok(HttpTransport { client, api_url: config.api_url.clone() })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<Value> {
        let url = format!("{}/{}", self.api_url, request.path);

        let mut builder =
            self.client.request(request.method.clone(), &url).query(&request.query).header(REQUEST_ID_HEADER, request.request_id.as_str());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            log::error!(
                "Request {} {} failed. The following request was unsuccessful:\nRequest-Id: <<{}>>\nResponse-Status-Code: <<{}>>\nResponse-Body: <<{}>>",
                request.method,
                url,
                request.request_id,
                status,
                body_text
            );
            return Err(Error::RemoteError { status: status.as_u16(), body: body_text });
        }

        if body_text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body_text)?)
    }
}
