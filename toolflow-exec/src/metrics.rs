use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::events::{Event, EventSink, RunStatus};

#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    pub run_id: Option<Uuid>,
    pub workflow_name: String,
    pub status: Option<RunStatus>,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    pub total_duration: Option<Duration>,
    pub steps_total: usize,
    pub steps_succeeded: usize,
    pub steps_failed: usize,
    pub fan_outs: usize,
    pub tool_calls: usize,
    pub tool_failures: usize,
}

impl RunMetrics {
    /// Begin a new run; counters from any earlier run are discarded.
    pub fn start(&mut self, run_id: Uuid, workflow_name: String) {
        *self = RunMetrics {
            run_id: Some(run_id),
            workflow_name,
            started_at: Some(Instant::now()),
            ..Default::default()
        };
    }

    pub fn record_step_success(&mut self) {
        self.steps_succeeded += 1;
        self.steps_total += 1;
    }

    pub fn record_step_failure(&mut self) {
        self.steps_failed += 1;
        self.steps_total += 1;
    }

    pub fn record_fan_out(&mut self) {
        self.fan_outs += 1;
    }

    pub fn record_tool_call(&mut self, succeeded: bool) {
        self.tool_calls += 1;
        if !succeeded {
            self.tool_failures += 1;
        }
    }

    pub fn finish(&mut self, status: RunStatus) {
        self.status = Some(status);
        self.finished_at = Some(Instant::now());
        if let (Some(started), Some(finished)) = (self.started_at, self.finished_at) {
            self.total_duration = Some(finished.duration_since(started));
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "run_id": self.run_id.map(|id| id.to_string()),
            "workflow": self.workflow_name,
            "status": self.status.map(|s| s.as_str()),
            "duration_ms": self.total_duration.map(|d| d.as_millis() as u64),
            "steps": {
                "total": self.steps_total,
                "succeeded": self.steps_succeeded,
                "failed": self.steps_failed,
                "fan_outs": self.fan_outs,
            },
            "tools": {
                "calls": self.tool_calls,
                "failures": self.tool_failures,
            },
        })
    }
}

#[derive(Default)]
pub struct MetricsCollector {
    metrics: Mutex<RunMetrics>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_metrics(&self) -> RunMetrics {
        self.metrics.lock().await.clone()
    }

    async fn record(&self, event: &Event) {
        let mut m = self.metrics.lock().await;
        match event {
            Event::RunStarted {
                run_id,
                workflow_name,
                ..
            } => m.start(*run_id, workflow_name.clone()),
            Event::StepSucceeded { .. } => m.record_step_success(),
            Event::StepFailed { .. } => m.record_step_failure(),
            Event::FanOutStarted { .. } => m.record_fan_out(),
            Event::ToolFinished { succeeded, .. } => m.record_tool_call(*succeeded),
            Event::RunFinished { status, .. } => m.finish(*status),
            Event::StepStarted { .. } => {}
        }
    }
}

/// Records per-run counters, then forwards every event to `base`.
pub struct MetricsEventSink {
    collector: Arc<MetricsCollector>,
    base: Arc<dyn EventSink>,
}

impl MetricsEventSink {
    pub fn new(collector: Arc<MetricsCollector>, base: Arc<dyn EventSink>) -> Self {
        Self { collector, base }
    }
}

#[async_trait]
impl EventSink for MetricsEventSink {
    async fn emit(&self, event: Event) {
        self.collector.record(&event).await;
        self.base.emit(event).await;
    }
}
