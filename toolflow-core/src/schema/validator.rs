use serde_json::{Map, Value as JsonValue};

use crate::error::{ValidationError, Violation};
use crate::types::Schema;

pub(crate) struct SchemaValidator {
    violations: Vec<Violation>,
}

impl SchemaValidator {
    pub(crate) fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    pub(crate) fn check(&mut self, schema: &Schema, value: &JsonValue, path: &str) {
        if let Some(types) = &schema.schema_type {
            if !types.matches(value) {
                // Nested checks on a value of the wrong shape only add noise.
                self.push(
                    path,
                    format!("expected {types}, got {}", json_type_name(value)),
                );
                return;
            }
        }

        if let Some(allowed) = &schema.enum_values {
            if !allowed.contains(value) {
                let listed: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
                self.push(path, format!("must be one of [{}]", listed.join(", ")));
            }
        }

        match value {
            JsonValue::Object(map) => self.check_object(schema, map, path),
            JsonValue::Array(items) => {
                if let Some(item_schema) = &schema.items {
                    for (idx, item) in items.iter().enumerate() {
                        self.check(item_schema, item, &format!("{path}[{idx}]"));
                    }
                }
            }
            _ => {}
        }
    }

    fn check_object(&mut self, schema: &Schema, map: &Map<String, JsonValue>, path: &str) {
        for name in &schema.required {
            if !map.contains_key(name) {
                self.push(format!("{path}.{name}"), "required property is missing");
            }
        }

        for (name, prop_schema) in &schema.properties {
            if let Some(prop) = map.get(name) {
                self.check(prop_schema, prop, &format!("{path}.{name}"));
            }
        }

        if schema.additional_properties == Some(false) {
            for key in map.keys() {
                if !schema.properties.contains_key(key) {
                    self.push(format!("{path}.{key}"), "property is not declared in the schema");
                }
            }
        }
    }
}

/// Human-readable JSON type of `value`, distinguishing integers from other numbers.
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
