use crate::types::CatalogDocument;
use crate::validate::rules::{tool, workflow};
use crate::validate::validator::Validator;

pub(crate) fn validate_catalog(v: &mut Validator, doc: &CatalogDocument) {
    if doc.tools.is_empty() && doc.workflows.is_empty() {
        v.push("$", "catalog must declare at least one tool or workflow");
    }

    // Repeated tool names are allowed: the later definition replaces the earlier one.
    for (idx, t) in doc.tools.iter().enumerate() {
        tool::validate_tool(v, t, &format!("$.tools[{idx}]"));
    }

    for (idx, wf) in doc.workflows.iter().enumerate() {
        workflow::validate_workflow(v, wf, &format!("$.workflows[{idx}]"));
    }
}
