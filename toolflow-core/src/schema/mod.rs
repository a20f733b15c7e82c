//! Structural validation of JSON values against a [`Schema`].

mod validator;

use serde_json::Value as JsonValue;

use crate::error::ValidationError;
use crate::types::Schema;
use validator::SchemaValidator;

pub use validator::json_type_name;

/// Path reported for violations of the value itself.
pub const ROOT_PATH: &str = "$";

/// Validate `value` against `schema`, collecting every violation rather than stopping at the first.
pub fn validate_value(schema: &Schema, value: &JsonValue) -> Result<(), ValidationError> {
    let mut v = SchemaValidator::new();
    v.check(schema, value, ROOT_PATH);
    v.finish()
}
