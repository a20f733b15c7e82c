use std::borrow::Cow;

use serde_json::{Map, Value as JsonValue};
use toolflow_core::path::{
    contains_index_placeholder, fan_out_base, substitute_index, INDEX_PLACEHOLDER,
};
use toolflow_core::{PathError, PathRef, StepDef};

use super::state::ExecutionState;
use crate::error::{PlanError, StepError};

/// How one input field is produced.
#[derive(Debug, Clone, PartialEq)]
enum FieldSource {
    Fixed(PathRef),
    /// Carries `$index`; bound to the element position before parsing.
    PerElement(JsonValue),
}

/// The array a fan-out step iterates over.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FanOut {
    pub(crate) base: String,
    pub(crate) base_ref: PathRef,
}

/// A step's mapping with every path parsed up front.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StepPlan {
    pub(crate) tool: String,
    fields: Vec<(String, FieldSource)>,
    pub(crate) fan_out: Option<FanOut>,
}

impl StepPlan {
    pub(crate) fn compile(step: &StepDef) -> Result<Self, PlanError> {
        let fans_out = step.input_mapping.values().any(contains_index_placeholder);
        let mut fields = Vec::with_capacity(step.input_mapping.len());
        let mut fan_out = None;

        for (field, source) in &step.input_mapping {
            let path_err = |source: PathError| PlanError::Path {
                field: field.clone(),
                source,
            };

            if !contains_index_placeholder(source) {
                let r = PathRef::parse(source).map_err(path_err)?;
                fields.push((field.clone(), FieldSource::Fixed(r)));
                continue;
            }

            if let (JsonValue::String(expr), true) = (source, PathRef::is_reference(source)) {
                if expr.replace("[$index]", "").contains(INDEX_PLACEHOLDER) {
                    return Err(path_err(PathError::Malformed {
                        segment: expr.clone(),
                    }));
                }
                if fan_out.is_none() {
                    if let Some(base) = fan_out_base(expr) {
                        fan_out = Some(FanOut {
                            base: base.to_string(),
                            base_ref: PathRef::parse_base(base).map_err(path_err)?,
                        });
                    }
                }
            }

            PathRef::parse(&substitute_index(source, 0)).map_err(path_err)?;
            fields.push((field.clone(), FieldSource::PerElement(source.clone())));
        }

        if fans_out && fan_out.is_none() {
            return Err(PlanError::MissingFanOutBase);
        }

        Ok(Self {
            tool: step.tool_name.clone(),
            fields,
            fan_out,
        })
    }

    /// Resolve every field against `state`. Fields whose path ends on a missing property are
    /// left out, so the tool's schema decides whether they were required.
    pub(crate) fn mapped_input(
        &self,
        state: &ExecutionState,
        element: Option<usize>,
    ) -> Result<JsonValue, StepError> {
        let mut args = Map::new();
        for (field, source) in &self.fields {
            let r = match (source, element) {
                (FieldSource::Fixed(r), _) => Cow::Borrowed(r),
                (FieldSource::PerElement(template), Some(j)) => {
                    Cow::Owned(PathRef::parse(&substitute_index(template, j))?)
                }
                (FieldSource::PerElement(template), None) => Cow::Owned(PathRef::parse(template)?),
            };
            if let Some(value) = state.resolve(&r)? {
                args.insert(field.clone(), value);
            }
        }
        Ok(JsonValue::Object(args))
    }
}
