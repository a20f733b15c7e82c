use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

/// Maps a tool input field to its source: a path expression or a literal.
pub type InputMapping = BTreeMap<String, JsonValue>;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorkflowDef {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub steps: Vec<StepDef>,
}

impl WorkflowDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, step: StepDef) -> Self {
        self.steps.push(step);
        self
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepDef {
    #[serde(rename = "toolName")]
    pub tool_name: String,

    #[serde(rename = "inputMapping", default)]
    pub input_mapping: InputMapping,
}

impl StepDef {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            input_mapping: InputMapping::new(),
        }
    }

    /// Maps `field` to `source`; strings are read as path expressions, anything else is a literal.
    pub fn map(mut self, field: impl Into<String>, source: impl Into<JsonValue>) -> Self {
        self.input_mapping.insert(field.into(), source.into());
        self
    }
}
