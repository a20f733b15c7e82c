use std::path::Path;

use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

use super::catalog::read_catalog;

#[derive(Serialize)]
struct WorkflowInfo {
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    step_count: usize,
    tools: Vec<String>,
    fans_out: bool,
}

#[derive(Serialize)]
struct WorkflowsResult {
    workflows: Vec<WorkflowInfo>,
}

pub async fn workflows_cmd(path: &Path, output: OutputArgs) -> i32 {
    let parsed = match read_catalog(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let workflows: Vec<WorkflowInfo> = parsed
        .catalog
        .workflows
        .iter()
        .map(|w| WorkflowInfo {
            name: w.name.clone(),
            description: w.description.clone(),
            step_count: w.steps.len(),
            tools: w.steps.iter().map(|s| s.tool_name.clone()).collect(),
            fans_out: w.steps.iter().any(|s| {
                s.input_mapping
                    .values()
                    .any(toolflow_core::path::contains_index_placeholder)
            }),
        })
        .collect();

    let result = WorkflowsResult { workflows };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Workflows in {}:", path.display());
        for w in &result.workflows {
            println!("  - {} ({} steps: {})", w.name, w.step_count, w.tools.join(" -> "));
            if !w.description.is_empty() {
                println!("    {}", w.description);
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}
