use std::path::Path;
use std::sync::Arc;

use futures_util::StreamExt;
use serde::Serialize;
use serde_json::Value as JsonValue;
use toolflow_core::CatalogDocument;
use toolflow_exec::events::{CompositeEventSink, EventSink, StderrEventSink, StdoutEventSink};
use toolflow_exec::metrics::{MetricsCollector, MetricsEventSink};
use toolflow_exec::{WorkflowError, WorkflowManager};

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ConcurrencyArgs, EventsTarget, InputArgs, OutputArgs};

use super::catalog::{build_manager, read_valid_catalog};
use super::config::{build_engine_config, resolve_inputs};
use super::progress::ProgressEventSink;

#[derive(Serialize)]
struct RunResult {
    workflow: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_step: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<JsonValue>,
}

/// Pick the workflow to run: the named one, or the catalog's only workflow.
fn select_workflow<'a>(
    catalog: &'a CatalogDocument,
    requested: Option<&str>,
    output: &OutputArgs,
) -> Option<&'a str> {
    match requested {
        Some(name) => {
            let found = catalog.workflow(name).map(|w| w.name.as_str());
            if found.is_none() {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("workflow not found: {name}"),
                );
            }
            found
        }
        None => match catalog.workflows.as_slice() {
            [only] => Some(only.name.as_str()),
            _ => {
                print_error(
                    output.format,
                    output.quiet,
                    &format!(
                        "catalog declares {} workflows; choose one with --workflow",
                        catalog.workflows.len()
                    ),
                );
                None
            }
        },
    }
}

fn event_sink(
    target: EventsTarget,
    progress: bool,
    total_steps: usize,
    metrics: Option<Arc<MetricsCollector>>,
    output: &OutputArgs,
) -> Arc<dyn EventSink> {
    let mut sinks = CompositeEventSink::new();
    match target {
        EventsTarget::Stdout => sinks.add(Arc::new(StdoutEventSink)),
        EventsTarget::Stderr => sinks.add(Arc::new(StderrEventSink)),
        EventsTarget::None => {}
    }
    let interactive = output.format == OutputFormat::Text && !output.quiet;
    if progress && interactive && target == EventsTarget::None {
        sinks.add(Arc::new(ProgressEventSink::new(total_steps)));
    }
    let base: Arc<dyn EventSink> = Arc::new(sinks);
    match metrics {
        Some(collector) => Arc::new(MetricsEventSink::new(collector, base)),
        None => base,
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn run_cmd(
    path: &Path,
    workflow: Option<&str>,
    inputs: InputArgs,
    stream: bool,
    events: EventsTarget,
    metrics: bool,
    concurrency: ConcurrencyArgs,
    output: OutputArgs,
) -> i32 {
    let catalog = match read_valid_catalog(path, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let Some(name) = select_workflow(&catalog, workflow, &output) else {
        return exit_codes::VALIDATION_FAILED;
    };
    let Some(input) = resolve_inputs(&inputs, &output) else {
        return exit_codes::RUNTIME_ERROR;
    };
    let Some(config) = build_engine_config(&concurrency, &output) else {
        return exit_codes::RUNTIME_ERROR;
    };

    let total_steps = catalog.workflow(name).map(|w| w.steps.len()).unwrap_or(0);
    let collector = metrics.then(|| Arc::new(MetricsCollector::new()));
    let sink = event_sink(events, !stream, total_steps, collector.clone(), &output);
    let manager = match build_manager(&catalog, config, sink, &output) {
        Ok(m) => m,
        Err(code) => return code,
    };

    let code = if stream {
        stream_workflow(&manager, name, input, &output).await
    } else {
        run_workflow(&manager, name, input, collector.as_deref(), &output).await
    };

    if stream {
        if let Some(collector) = &collector {
            report_metrics(collector, &output).await;
        }
    }
    code
}

async fn run_workflow(
    manager: &WorkflowManager,
    name: &str,
    input: JsonValue,
    collector: Option<&MetricsCollector>,
    output: &OutputArgs,
) -> i32 {
    let result = manager.execute_workflow_by_name(name, input).await;
    let metrics = match collector {
        Some(c) => Some(c.get_metrics().await.to_json()),
        None => None,
    };

    match result {
        Ok(value) => {
            if output.format == OutputFormat::Text {
                print_result(output.format, output.quiet, &value);
                if let (Some(m), false) = (&metrics, output.quiet) {
                    eprintln!("metrics: {m}");
                }
            } else {
                print_result(
                    output.format,
                    output.quiet,
                    &RunResult {
                        workflow: name.to_string(),
                        status: "succeeded",
                        output: Some(value),
                        error: None,
                        failed_step: None,
                        metrics,
                    },
                );
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            if output.format == OutputFormat::Json {
                print_result(
                    output.format,
                    output.quiet,
                    &RunResult {
                        workflow: name.to_string(),
                        status: status_of(&e),
                        output: None,
                        error: Some(e.to_string()),
                        failed_step: e.step_index(),
                        metrics,
                    },
                );
            } else {
                print_error(output.format, output.quiet, &e.to_string());
                if let (Some(m), false) = (&metrics, output.quiet) {
                    eprintln!("metrics: {m}");
                }
            }
            exit_code_of(&e)
        }
    }
}

/// One compact JSON line per fragment.
async fn stream_workflow(
    manager: &WorkflowManager,
    name: &str,
    input: JsonValue,
    output: &OutputArgs,
) -> i32 {
    let Some(workflow) = manager.registry().workflow_by_name(name) else {
        print_error(output.format, output.quiet, &format!("workflow not found: {name}"));
        return exit_codes::VALIDATION_FAILED;
    };

    let mut fragments = manager.execute_workflow_stream(&workflow.id, input);
    while let Some(fragment) = fragments.next().await {
        match fragment {
            Ok(value) => {
                if !output.quiet {
                    println!("{}", serde_json::to_string(&value).unwrap_or_default());
                }
            }
            Err(e) => {
                print_error(output.format, output.quiet, &e.to_string());
                return exit_code_of(&e);
            }
        }
    }
    exit_codes::SUCCESS
}

async fn report_metrics(collector: &MetricsCollector, output: &OutputArgs) {
    if output.quiet {
        return;
    }
    let m = collector.get_metrics().await.to_json();
    match output.format {
        OutputFormat::Text => eprintln!("metrics: {m}"),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "metrics": m })),
    }
}

fn status_of(e: &WorkflowError) -> &'static str {
    match e {
        WorkflowError::Cancelled { .. } => "cancelled",
        _ => "failed",
    }
}

fn exit_code_of(e: &WorkflowError) -> i32 {
    match e {
        WorkflowError::WorkflowNotFound(_) => exit_codes::VALIDATION_FAILED,
        _ => exit_codes::RUN_FAILED,
    }
}
