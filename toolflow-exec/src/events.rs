use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::registry::WorkflowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Succeeded,
    Failed,
    Cancelled,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Succeeded => "succeeded",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
        }
    }
}

/// Lifecycle notifications for one workflow run. `run_id` is fresh per execution.
#[derive(Debug, Clone)]
pub enum Event {
    RunStarted {
        run_id: Uuid,
        workflow_id: WorkflowId,
        workflow_name: String,
    },
    RunFinished {
        run_id: Uuid,
        status: RunStatus,
    },
    StepStarted {
        run_id: Uuid,
        index: usize,
        tool: String,
    },
    StepSucceeded {
        run_id: Uuid,
        index: usize,
        tool: String,
    },
    StepFailed {
        run_id: Uuid,
        index: usize,
        tool: String,
        error: String,
    },
    FanOutStarted {
        run_id: Uuid,
        index: usize,
        tool: String,
        elements: usize,
    },
    ToolFinished {
        run_id: Uuid,
        index: usize,
        tool: String,
        element: Option<usize>,
        succeeded: bool,
    },
}

impl Event {
    pub fn run_id(&self) -> Uuid {
        match self {
            Event::RunStarted { run_id, .. }
            | Event::RunFinished { run_id, .. }
            | Event::StepStarted { run_id, .. }
            | Event::StepSucceeded { run_id, .. }
            | Event::StepFailed { run_id, .. }
            | Event::FanOutStarted { run_id, .. }
            | Event::ToolFinished { run_id, .. } => *run_id,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Event::RunStarted {
                run_id,
                workflow_id,
                workflow_name,
            } => {
                json!({ "type": "run.started", "run_id": run_id.to_string(), "workflow_id": workflow_id.to_string(), "workflow": workflow_name })
            }
            Event::RunFinished { run_id, status } => {
                json!({ "type": "run.finished", "run_id": run_id.to_string(), "status": status.as_str() })
            }
            Event::StepStarted {
                run_id,
                index,
                tool,
            } => {
                json!({ "type": "step.started", "run_id": run_id.to_string(), "step": index, "tool": tool })
            }
            Event::StepSucceeded {
                run_id,
                index,
                tool,
            } => {
                json!({ "type": "step.succeeded", "run_id": run_id.to_string(), "step": index, "tool": tool })
            }
            Event::StepFailed {
                run_id,
                index,
                tool,
                error,
            } => {
                json!({ "type": "step.failed", "run_id": run_id.to_string(), "step": index, "tool": tool, "error": error })
            }
            Event::FanOutStarted {
                run_id,
                index,
                tool,
                elements,
            } => {
                json!({ "type": "fanout.started", "run_id": run_id.to_string(), "step": index, "tool": tool, "elements": elements })
            }
            Event::ToolFinished {
                run_id,
                index,
                tool,
                element,
                succeeded,
            } => {
                json!({ "type": "tool.finished", "run_id": run_id.to_string(), "step": index, "tool": tool, "element": element, "succeeded": succeeded })
            }
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// One JSON object per line on stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!(
            "{}",
            serde_json::to_string(&event.to_json()).unwrap_or_default()
        );
    }
}

/// One JSON object per line on stderr, leaving stdout to results.
pub struct StderrEventSink;

#[async_trait]
impl EventSink for StderrEventSink {
    async fn emit(&self, event: Event) {
        eprintln!(
            "{}",
            serde_json::to_string(&event.to_json()).unwrap_or_default()
        );
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
