use crate::types::WorkflowDef;
use crate::validate::rules::mapping;
use crate::validate::validator::Validator;

pub(crate) fn validate_workflow(v: &mut Validator, wf: &WorkflowDef, path: &str) {
    v.validate_name(&format!("{path}.name"), &wf.name);

    if wf.steps.is_empty() {
        v.push(format!("{path}.steps"), "must have at least one entry");
    }

    for (idx, step) in wf.steps.iter().enumerate() {
        let spath = format!("{path}.steps[{idx}]");
        if step.tool_name.trim().is_empty() {
            v.push(format!("{spath}.toolName"), "must not be empty");
        }
        mapping::validate_mapping(v, &step.input_mapping, &format!("{spath}.inputMapping"));
    }
}
