use std::path::Path;

use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

use super::catalog::read_catalog;

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    handler: &'static str,
    inputs: Vec<String>,
    required: Vec<String>,
}

#[derive(Serialize)]
struct ToolsResult {
    tools: Vec<ToolInfo>,
}

pub async fn tools_cmd(path: &Path, output: OutputArgs) -> i32 {
    let parsed = match read_catalog(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let tools = parsed
        .catalog
        .tools
        .iter()
        .map(|t| ToolInfo {
            name: t.name.clone(),
            description: t.description.clone(),
            handler: t.handler.kind(),
            inputs: t.input_schema.properties.keys().cloned().collect(),
            required: t.input_schema.required.clone(),
        })
        .collect();
    let result = ToolsResult { tools };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Tools in {}:", path.display());
        for t in &result.tools {
            println!("  - {} [{}] inputs: {}", t.name, t.handler, t.inputs.join(", "));
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}
