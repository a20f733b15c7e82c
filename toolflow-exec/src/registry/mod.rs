//! In-memory catalog of tools and workflow definitions.

mod id;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use toolflow_core::WorkflowDef;

pub use id::WorkflowId;

use crate::error::PlanError;
use crate::tool::Tool;
use crate::workflow::plan::StepPlan;

/// A stored workflow: the definition, the identifier generated at creation, and one compiled
/// plan per step.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    pub id: WorkflowId,
    pub definition: WorkflowDef,
    pub(crate) plans: Vec<Result<StepPlan, PlanError>>,
}

impl Workflow {
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Explicitly constructed, shared by `Arc`. Lookups hand out `Arc`s so readers never hold
/// the lock across an await.
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<Tool>>>,
    workflows: RwLock<Vec<Arc<Workflow>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the tool registered under `tool.name`.
    pub fn register_tool(&self, tool: Tool) {
        let name = tool.name.clone();
        if self.tools.write().insert(name.clone(), Arc::new(tool)).is_some() {
            tracing::debug!(tool = %name, "replaced existing tool registration");
        }
    }

    pub fn tool(&self, name: &str) -> Option<Arc<Tool>> {
        self.tools.read().get(name).cloned()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.read().contains_key(name)
    }

    /// Registered tool names, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Store `definition` under a fresh id. No consistency checks happen here; a step whose
    /// mapping does not compile fails when the workflow runs.
    pub fn create_workflow(&self, definition: WorkflowDef) -> WorkflowId {
        let plans = definition.steps.iter().map(StepPlan::compile).collect();
        self.insert_workflow(definition, plans)
    }

    /// Store a definition whose plans are already compiled.
    pub(crate) fn insert_workflow(
        &self,
        definition: WorkflowDef,
        plans: Vec<Result<StepPlan, PlanError>>,
    ) -> WorkflowId {
        let id = WorkflowId::new();
        self.workflows.write().push(Arc::new(Workflow {
            id,
            definition,
            plans,
        }));
        id
    }

    pub fn workflow(&self, id: &WorkflowId) -> Option<Arc<Workflow>> {
        self.workflows.read().iter().find(|w| w.id == *id).cloned()
    }

    /// First workflow registered under `name`.
    pub fn workflow_by_name(&self, name: &str) -> Option<Arc<Workflow>> {
        self.workflows
            .read()
            .iter()
            .find(|w| w.name() == name)
            .cloned()
    }

    /// All workflows in registration order.
    pub fn workflows(&self) -> Vec<Arc<Workflow>> {
        self.workflows.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolflow_core::StepDef;

    #[test]
    fn plans_are_compiled_once_at_storage() {
        let registry = ToolRegistry::new();
        let def = WorkflowDef::new("w", "")
            .step(StepDef::new("a").map("x", "input.x"))
            .step(StepDef::new("b").map("y", "output.bad[oops]"));
        let id = registry.create_workflow(def);

        let stored = registry.workflow(&id).unwrap();
        assert_eq!(stored.plans.len(), 2);
        assert!(stored.plans[0].is_ok());
        assert!(matches!(stored.plans[1], Err(PlanError::Path { ref field, .. }) if field == "y"));
    }
}
