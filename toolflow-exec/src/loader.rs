use std::sync::Arc;

use toolflow_core::CatalogDocument;

use crate::error::LoadError;
use crate::registry::WorkflowId;
use crate::tool::{HttpClient, Tool};
use crate::workflow::WorkflowManager;

/// Register every tool in `catalog`, then create its workflows in document order.
///
/// Tools go in first so workflows may reference tools declared after them.
pub fn load_catalog(
    manager: &WorkflowManager,
    catalog: &CatalogDocument,
    http: &Arc<dyn HttpClient>,
) -> Result<Vec<WorkflowId>, LoadError> {
    for spec in &catalog.tools {
        manager.registry().register_tool(Tool::from_spec(spec, http));
    }

    catalog
        .workflows
        .iter()
        .map(|wf| {
            manager
                .create_workflow(wf.clone())
                .map_err(|source| LoadError::Workflow {
                    name: wf.name.clone(),
                    source,
                })
        })
        .collect()
}
