//! Tools: schema-bracketed units of work and the handlers that back them.

mod builtin;
mod executor;
mod http;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use toolflow_core::{Schema, ToolSpec};

pub use builtin::{handler_from_spec, EchoHandler, StaticHandler};
pub use executor::ToolExecutor;
pub use http::{
    HttpClient, HttpError, HttpRequest, HttpResponse, HttpToolHandler, ReqwestHttpClient,
    DEFAULT_HTTP_TIMEOUT, DEFAULT_MAX_RESPONSE_BYTES,
};

/// What a handler receives: the tool being invoked and its already-validated arguments.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub tool_name: String,
    pub args: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, ctx: ToolContext) -> Result<JsonValue, HandlerError>;
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(ToolContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<JsonValue, HandlerError>> + Send,
{
    async fn call(&self, ctx: ToolContext) -> Result<JsonValue, HandlerError> {
        (self.0)(ctx).await
    }
}

/// Wrap an async closure as a handler.
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn ToolHandler>
where
    F: Fn(ToolContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<JsonValue, HandlerError>> + Send + 'static,
{
    Arc::new(FnHandler(f))
}

/// A registered tool. Immutable once built; re-registering the name replaces it wholesale.
#[derive(Clone)]
pub struct Tool {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Schema,
    pub output_schema: Schema,
    pub handler: Arc<dyn ToolHandler>,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        input_schema: Schema,
        output_schema: Schema,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema,
            output_schema,
            handler,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build a tool from its catalog declaration. HTTP handlers send through `http`.
    pub fn from_spec(spec: &ToolSpec, http: &Arc<dyn HttpClient>) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            input_schema: spec.input_schema.clone(),
            output_schema: spec.output_schema.clone(),
            handler: handler_from_spec(&spec.handler, http),
        }
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .field("output_schema", &self.output_schema)
            .finish_non_exhaustive()
    }
}
