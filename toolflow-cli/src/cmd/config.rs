use std::path::Path;

use serde_json::Value as JsonValue;
use toolflow_exec::EngineConfig;

use crate::output::print_error;
use crate::{ConcurrencyArgs, InputArgs, OutputArgs};

pub fn load_inputs(path: Option<&Path>, output: &OutputArgs) -> Option<JsonValue> {
    let path = path?;
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("failed to read inputs: {e}"));
            return None;
        }
    };
    if let Ok(v) = serde_json::from_str(&content) {
        return Some(v);
    }
    if let Ok(v) = serde_yaml::from_str(&content) {
        return Some(v);
    }
    print_error(output.format, output.quiet, "inputs file is neither valid JSON nor YAML");
    None
}

/// Apply `KEY=VALUE` overrides. Values that parse as JSON keep their type; the rest are strings.
pub fn merge_set_inputs(inputs: &mut Option<JsonValue>, set_inputs: &[String]) {
    if set_inputs.is_empty() {
        return;
    }
    let obj = inputs.get_or_insert(serde_json::json!({}));
    if let Some(map) = obj.as_object_mut() {
        for s in set_inputs {
            if let Some((k, v)) = s.split_once('=') {
                let value = serde_json::from_str(v)
                    .unwrap_or_else(|_| JsonValue::String(v.to_string()));
                map.insert(k.to_string(), value);
            }
        }
    }
}

/// Resolve `--inputs` and `--set` into the input object, `{}` when neither is given.
pub fn resolve_inputs(args: &InputArgs, output: &OutputArgs) -> Option<JsonValue> {
    let mut inputs = load_inputs(args.inputs.as_deref(), output);
    if inputs.is_none() && args.inputs.is_some() {
        return None;
    }
    merge_set_inputs(&mut inputs, &args.set_inputs);
    Some(inputs.unwrap_or_else(|| serde_json::json!({})))
}

pub fn build_engine_config(
    concurrency: &ConcurrencyArgs,
    output: &OutputArgs,
) -> Option<EngineConfig> {
    let mut config = EngineConfig {
        fan_out_concurrency: concurrency.fan_out_concurrency as usize,
        global_tool_concurrency: concurrency.max_concurrency as usize,
        ..EngineConfig::default()
    };
    for s in &concurrency.max_concurrency_tool {
        match s.split_once('=').map(|(name, n)| (name, n.parse::<usize>())) {
            Some((name, Ok(n))) if n > 0 => {
                config.per_tool_concurrency.insert(name.to_string(), n);
            }
            _ => {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("invalid --max-concurrency-tool '{s}', expected NAME=N with N >= 1"),
                );
                return None;
            }
        }
    }
    Some(config)
}
