use crate::types::{ToolSpec, WorkflowDef};

/// A catalog of tools and the workflows chaining them.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub tools: Vec<ToolSpec>,

    #[serde(default)]
    pub workflows: Vec<WorkflowDef>,
}

impl CatalogDocument {
    pub fn tool(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().rev().find(|t| t.name == name)
    }

    pub fn workflow(&self, name: &str) -> Option<&WorkflowDef> {
        self.workflows.iter().find(|w| w.name == name)
    }
}
