use std::path::Path;

use serde::Serialize;
use toolflow_core::Validate;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

use super::catalog::{check_references, read_catalog};

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    format: String,
    tools: usize,
    workflows: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(path: &Path, output: OutputArgs) -> i32 {
    let parsed = match read_catalog(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let errors: Vec<String> = match parsed.catalog.validate() {
        Ok(()) => check_references(&parsed.catalog).err().into_iter().collect(),
        Err(err) => err.violations.iter().map(|v| v.to_string()).collect(),
    };
    let result = ValidateResult {
        valid: errors.is_empty(),
        format: format!("{:?}", parsed.format),
        tools: parsed.catalog.tools.len(),
        workflows: parsed.catalog.workflows.len(),
        errors,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        if result.valid {
            println!(
                "ok: valid catalog ({:?}, {} tools, {} workflows)",
                parsed.format, result.tools, result.workflows
            );
        } else {
            eprintln!("error: validation failed");
            for e in &result.errors {
                eprintln!("- {e}");
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if result.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    }
}
