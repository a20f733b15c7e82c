use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::types::Schema;

/// A tool as declared in a catalog document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "inputSchema", default)]
    pub input_schema: Schema,

    #[serde(rename = "outputSchema", default)]
    pub output_schema: Schema,

    #[serde(default)]
    pub handler: HandlerSpec,
}

/// Declarative handler backing a catalog tool.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HandlerSpec {
    /// Returns `value` regardless of input.
    Static { value: JsonValue },
    /// Returns the validated input unchanged.
    #[default]
    Echo,
    /// POSTs the validated input as JSON and returns the JSON response body.
    Http {
        url: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
        #[serde(rename = "timeoutMs", default, skip_serializing_if = "Option::is_none")]
        timeout_ms: Option<u64>,
    },
}

impl HandlerSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerSpec::Static { .. } => "static",
            HandlerSpec::Echo => "echo",
            HandlerSpec::Http { .. } => "http",
        }
    }
}
