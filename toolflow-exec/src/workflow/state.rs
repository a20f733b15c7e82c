use serde_json::{Map, Value as JsonValue};
use toolflow_core::{PathError, PathRef};

/// Per-execution state. Owned by a single run and discarded when it ends.
#[derive(Debug)]
pub(crate) struct ExecutionState {
    initial: JsonValue,
    input: JsonValue,
    output: JsonValue,
    context: JsonValue,
}

impl ExecutionState {
    pub(crate) fn new(initial: JsonValue) -> Self {
        Self {
            input: initial.clone(),
            initial,
            output: JsonValue::Null,
            context: JsonValue::Object(Map::new()),
        }
    }

    pub(crate) fn input(&self) -> &JsonValue {
        &self.input
    }

    pub(crate) fn resolve(&self, r: &PathRef) -> Result<Option<JsonValue>, PathError> {
        match r {
            PathRef::Literal(v) => Ok(Some(v.clone())),
            PathRef::Input(p) => p.resolve(&self.input),
            PathRef::Output(p) => p.resolve(&self.output),
            PathRef::Context(p) => p.resolve(&self.context),
        }
    }

    /// Record `context.step_<index> = {input, output}`.
    pub(crate) fn record_step(&mut self, index: usize, input: JsonValue, output: JsonValue) {
        if let JsonValue::Object(ctx) = &mut self.context {
            let mut entry = Map::new();
            entry.insert("input".to_string(), input);
            entry.insert("output".to_string(), output);
            ctx.insert(format!("step_{index}"), JsonValue::Object(entry));
        }
    }

    /// After a plain step: fold its output into the accumulated input.
    pub(crate) fn advance(&mut self, output: JsonValue) {
        self.input = merge(&[&self.initial, &self.input, &output]);
        self.output = output;
    }

    /// After a fan-out step the results replace `output` but leave the accumulated input alone.
    pub(crate) fn advance_fan_out(&mut self, results: Vec<JsonValue>) {
        self.output = JsonValue::Array(results);
    }

    pub(crate) fn into_output(self) -> JsonValue {
        self.output
    }
}

/// Shallow left-to-right object merge; later keys win and non-object values contribute nothing.
pub(crate) fn merge(values: &[&JsonValue]) -> JsonValue {
    let mut merged = Map::new();
    for value in values {
        if let JsonValue::Object(map) = value {
            for (k, v) in map {
                merged.insert(k.clone(), v.clone());
            }
        }
    }
    JsonValue::Object(merged)
}
