mod support;

use std::sync::Arc;

use serde_json::json;
use toolflow_core::{StepDef, WorkflowDef};
use toolflow_exec::events::{CompositeEventSink, Event, EventSink, RunStatus};
use toolflow_exec::metrics::{MetricsCollector, MetricsEventSink};
use toolflow_exec::{
    EngineConfig, HandlerError, ToolExecutor, ToolRegistry, WorkflowManager,
};

use support::{generate_ideas_tool, write_note_tool, CollectingSink, RecordingHandler};

fn manager(sink: Arc<dyn EventSink>, fail_on: Option<&'static str>) -> WorkflowManager {
    let registry = Arc::new(ToolRegistry::new());
    registry.register_tool(generate_ideas_tool());
    registry.register_tool(write_note_tool(RecordingHandler::new(move |args| {
        let title = args["title"].as_str().unwrap_or_default();
        if Some(title) == fail_on {
            return Err(HandlerError::new("refused"));
        }
        Ok(json!({"id": title}))
    })));
    let executor = Arc::new(ToolExecutor::new(registry.clone()));
    WorkflowManager::new(registry, executor, EngineConfig::default(), sink)
}

fn workflow() -> WorkflowDef {
    WorkflowDef::new("ideas_to_notes", "")
        .step(
            StepDef::new("generate_ideas")
                .map("topic", "input.topic")
                .map("keywords", "input.keywords"),
        )
        .step(StepDef::new("write_note").map("title", "output.ideas[$index].idea"))
}

#[tokio::test]
async fn metrics_count_steps_and_tool_calls() {
    let collector = Arc::new(MetricsCollector::new());
    let sink = Arc::new(MetricsEventSink::new(
        collector.clone(),
        Arc::new(toolflow_exec::NoOpEventSink),
    ));
    let manager = manager(sink, None);
    let id = manager.create_workflow(workflow()).unwrap();

    manager
        .execute_workflow(&id, json!({"topic": "t", "keywords": "k"}))
        .await
        .unwrap();

    let m = collector.get_metrics().await;
    assert_eq!(m.workflow_name, "ideas_to_notes");
    assert_eq!(m.status, Some(RunStatus::Succeeded));
    assert_eq!(m.steps_succeeded, 2);
    assert_eq!(m.steps_failed, 0);
    assert_eq!(m.fan_outs, 1);
    assert_eq!(m.tool_calls, 3);
    assert!(m.total_duration.is_some());

    let summary = m.to_json();
    assert_eq!(summary["status"], "succeeded");
    assert_eq!(summary["tools"]["calls"], 3);
}

#[tokio::test]
async fn reused_collector_reports_only_the_latest_run() {
    let collector = Arc::new(MetricsCollector::new());
    let recorded = Arc::new(CollectingSink::default());
    let sink = Arc::new(MetricsEventSink::new(collector.clone(), recorded.clone()));
    let manager = manager(sink, None);
    let id = manager.create_workflow(workflow()).unwrap();

    for _ in 0..2 {
        manager
            .execute_workflow(&id, json!({"topic": "t", "keywords": "k"}))
            .await
            .unwrap();
    }

    let last_run = recorded
        .events
        .lock()
        .iter()
        .rev()
        .find_map(|e| match e {
            Event::RunStarted { run_id, .. } => Some(*run_id),
            _ => None,
        })
        .unwrap();

    let m = collector.get_metrics().await;
    assert_eq!(m.run_id, Some(last_run));
    assert_eq!(m.steps_total, 2);
    assert_eq!(m.steps_succeeded, 2);
    assert_eq!(m.fan_outs, 1);
    assert_eq!(m.tool_calls, 3);
    assert_eq!(m.status, Some(RunStatus::Succeeded));
}

#[tokio::test]
async fn failed_runs_record_failure() {
    let collector = Arc::new(MetricsCollector::new());
    let recorded = Arc::new(CollectingSink::default());
    let sink = Arc::new(MetricsEventSink::new(collector.clone(), recorded.clone()));
    let manager = manager(sink, Some("B"));
    let id = manager.create_workflow(workflow()).unwrap();

    manager
        .execute_workflow(&id, json!({"topic": "t", "keywords": "k"}))
        .await
        .unwrap_err();

    let m = collector.get_metrics().await;
    assert_eq!(m.status, Some(RunStatus::Failed));
    assert_eq!(m.steps_failed, 1);
    assert_eq!(m.tool_calls, 3);
    assert_eq!(m.tool_failures, 1);

    let events = recorded.events.lock();
    let failed = events
        .iter()
        .find_map(|e| match e {
            Event::StepFailed { index, error, .. } => Some((*index, error.clone())),
            _ => None,
        })
        .unwrap();
    assert_eq!(failed.0, 1);
    assert!(failed.1.contains("refused"));
}

#[tokio::test]
async fn composite_sink_fans_events_out() {
    let a = Arc::new(CollectingSink::default());
    let b = Arc::new(CollectingSink::default());
    let mut composite = CompositeEventSink::new();
    composite.add(a.clone());
    composite.add(b.clone());
    let manager = manager(Arc::new(composite), None);
    let id = manager.create_workflow(workflow()).unwrap();

    manager
        .execute_workflow(&id, json!({"topic": "t", "keywords": "k"}))
        .await
        .unwrap();

    assert_eq!(a.kinds(), b.kinds());
    assert_eq!(a.kinds().first().map(String::as_str), Some("run.started"));
}

#[test]
fn events_serialize_as_typed_json() {
    let run_id = uuid::Uuid::new_v4();
    let value = Event::StepFailed {
        run_id,
        index: 2,
        tool: "write_note".to_string(),
        error: "boom".to_string(),
    }
    .to_json();
    assert_eq!(
        value,
        json!({
            "type": "step.failed",
            "run_id": run_id.to_string(),
            "step": 2,
            "tool": "write_note",
            "error": "boom",
        })
    );
}
