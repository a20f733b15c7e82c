use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use toolflow_core::HandlerSpec;

use super::http::{HttpClient, HttpToolHandler, DEFAULT_HTTP_TIMEOUT};
use super::{HandlerError, ToolContext, ToolHandler};

/// Always returns the same value.
pub struct StaticHandler {
    value: JsonValue,
}

impl StaticHandler {
    pub fn new(value: JsonValue) -> Self {
        Self { value }
    }
}

#[async_trait]
impl ToolHandler for StaticHandler {
    async fn call(&self, _ctx: ToolContext) -> Result<JsonValue, HandlerError> {
        Ok(self.value.clone())
    }
}

/// Returns its arguments unchanged.
pub struct EchoHandler;

#[async_trait]
impl ToolHandler for EchoHandler {
    async fn call(&self, ctx: ToolContext) -> Result<JsonValue, HandlerError> {
        Ok(ctx.args)
    }
}

pub fn handler_from_spec(spec: &HandlerSpec, http: &Arc<dyn HttpClient>) -> Arc<dyn ToolHandler> {
    match spec {
        HandlerSpec::Static { value } => Arc::new(StaticHandler::new(value.clone())),
        HandlerSpec::Echo => Arc::new(EchoHandler),
        HandlerSpec::Http {
            url,
            headers,
            timeout_ms,
        } => Arc::new(HttpToolHandler::new(
            http.clone(),
            url.clone(),
            headers.clone(),
            timeout_ms.map(Duration::from_millis).unwrap_or(DEFAULT_HTTP_TIMEOUT),
        )),
    }
}
