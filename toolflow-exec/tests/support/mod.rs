// Shared by the integration tests in this directory.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value as JsonValue};
use toolflow_core::Schema;
use toolflow_exec::events::{Event, EventSink};
use toolflow_exec::{handler_fn, HandlerError, Tool, ToolContext, ToolHandler};

/// Records every call and answers with `respond(args)`.
pub struct RecordingHandler {
    pub calls: Mutex<Vec<JsonValue>>,
    respond: Box<dyn Fn(&JsonValue) -> Result<JsonValue, HandlerError> + Send + Sync>,
}

impl RecordingHandler {
    pub fn new(
        respond: impl Fn(&JsonValue) -> Result<JsonValue, HandlerError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    pub fn calls(&self) -> Vec<JsonValue> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ToolHandler for RecordingHandler {
    async fn call(&self, ctx: ToolContext) -> Result<JsonValue, HandlerError> {
        self.calls.lock().push(ctx.args.clone());
        (self.respond)(&ctx.args)
    }
}

#[derive(Default)]
pub struct CollectingSink {
    pub events: Mutex<Vec<Event>>,
}

impl CollectingSink {
    pub fn kinds(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|e| e.to_json()["type"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

#[async_trait]
impl EventSink for CollectingSink {
    async fn emit(&self, event: Event) {
        self.events.lock().push(event);
    }
}

pub fn idea_input_schema() -> Schema {
    Schema::object()
        .required_property("topic", Schema::string())
        .required_property("keywords", Schema::string())
}

pub fn ideas_output_schema() -> Schema {
    Schema::object().required_property(
        "ideas",
        Schema::array(Schema::object().required_property("idea", Schema::string())),
    )
}

pub fn note_input_schema() -> Schema {
    Schema::object()
        .required_property("title", Schema::string())
        .property("label", Schema::string())
}

/// `generate_ideas`: always returns ideas "A" and "B".
pub fn generate_ideas_tool() -> Tool {
    Tool::new(
        "generate_ideas",
        idea_input_schema(),
        ideas_output_schema(),
        handler_fn(|_ctx| async {
            Ok(json!({"ideas": [{"idea": "A"}, {"idea": "B"}]}))
        }),
    )
}

/// `write_note` backed by `handler`.
pub fn write_note_tool(handler: Arc<dyn ToolHandler>) -> Tool {
    Tool::new(
        "write_note",
        note_input_schema(),
        Schema::object().required_property("id", Schema::string()),
        handler,
    )
}
