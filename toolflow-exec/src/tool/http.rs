use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::{HandlerError, ToolContext, ToolHandler};

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    #[error("timeout")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("response too large (>{max_bytes} bytes)")]
    ResponseTooLarge { max_bytes: usize },
    #[error("http error: {0}")]
    Other(String),
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(
        &self,
        req: HttpRequest,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> Result<HttpResponse, HttpError>;
}

pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("toolflow-exec/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Other(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(
        &self,
        req: HttpRequest,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> Result<HttpResponse, HttpError> {
        let method = reqwest::Method::from_bytes(req.method.as_bytes())
            .map_err(|e| HttpError::Other(e.to_string()))?;
        let mut rb = self.client.request(method, req.url).timeout(timeout);

        for (k, v) in req.headers {
            rb = rb.header(k, v);
        }

        rb = rb.body(req.body);

        let resp = rb.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();

        let mut headers = BTreeMap::new();
        for (k, v) in resp.headers().iter() {
            if let Ok(s) = v.to_str() {
                headers.insert(k.to_string(), s.to_string());
            }
        }

        let body = resp.bytes().await.map_err(map_reqwest_error)?;
        if body.len() > max_response_bytes {
            return Err(HttpError::ResponseTooLarge {
                max_bytes: max_response_bytes,
            });
        }

        Ok(HttpResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        return HttpError::Timeout;
    }
    if e.is_connect() || e.is_request() {
        return HttpError::Network(e.to_string());
    }
    HttpError::Other(e.to_string())
}

/// POSTs the tool arguments as JSON and returns the decoded JSON response.
pub struct HttpToolHandler {
    client: Arc<dyn HttpClient>,
    url: String,
    headers: BTreeMap<String, String>,
    timeout: Duration,
}

impl HttpToolHandler {
    pub fn new(
        client: Arc<dyn HttpClient>,
        url: String,
        headers: BTreeMap<String, String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            url,
            headers,
            timeout,
        }
    }
}

#[async_trait]
impl ToolHandler for HttpToolHandler {
    async fn call(&self, ctx: ToolContext) -> Result<JsonValue, HandlerError> {
        let body = serde_json::to_vec(&ctx.args)
            .map_err(|e| HandlerError::new(format!("failed to encode arguments: {e}")))?;

        let mut headers = self.headers.clone();
        headers
            .entry("content-type".to_string())
            .or_insert_with(|| "application/json".to_string());
        headers
            .entry("accept".to_string())
            .or_insert_with(|| "application/json".to_string());

        let resp = self
            .client
            .send(
                HttpRequest {
                    method: "POST".to_string(),
                    url: self.url.clone(),
                    headers,
                    body,
                },
                self.timeout,
                DEFAULT_MAX_RESPONSE_BYTES,
            )
            .await
            .map_err(|e| HandlerError::new(e.to_string()))?;

        if !(200..300).contains(&resp.status) {
            return Err(HandlerError::new(format!(
                "{} returned HTTP {}",
                self.url, resp.status
            )));
        }
        if resp.body.is_empty() {
            return Ok(JsonValue::Null);
        }
        serde_json::from_slice(&resp.body)
            .map_err(|e| HandlerError::new(format!("response is not valid JSON: {e}")))
    }
}
