use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use toolflow_core::Violation;
use toolflow_exec::NoOpEventSink;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ConcurrencyArgs, InputArgs, OutputArgs};

use super::catalog::{build_manager, read_valid_catalog};
use super::config::{build_engine_config, resolve_inputs};

#[derive(Serialize)]
struct ToolResult {
    tool: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<Violation>,
}

pub async fn tool_cmd(
    path: &Path,
    name: &str,
    inputs: InputArgs,
    concurrency: ConcurrencyArgs,
    output: OutputArgs,
) -> i32 {
    let catalog = match read_valid_catalog(path, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let Some(input) = resolve_inputs(&inputs, &output) else {
        return exit_codes::RUNTIME_ERROR;
    };
    let Some(config) = build_engine_config(&concurrency, &output) else {
        return exit_codes::RUNTIME_ERROR;
    };
    let manager = match build_manager(&catalog, config, Arc::new(NoOpEventSink), &output) {
        Ok(m) => m,
        Err(code) => return code,
    };

    match manager.executor().execute_tool(name, input).await {
        Ok(value) => {
            if output.format == OutputFormat::Text {
                print_result(output.format, output.quiet, &value);
            } else {
                print_result(
                    output.format,
                    output.quiet,
                    &ToolResult {
                        tool: name.to_string(),
                        status: "succeeded",
                        output: Some(value),
                        error: None,
                        violations: vec![],
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
                    &ToolResult {
                        tool: name.to_string(),
                        status: "failed",
                        output: None,
                        error: Some(e.to_string()),
                        violations: e.violations().to_vec(),
                    },
                );
            } else {
                print_error(output.format, output.quiet, &e.to_string());
            }
            exit_codes::RUN_FAILED
        }
    }
}
