use serde_json::Value as JsonValue;

use super::expr::{PathError, PathExpr};

/// Placeholder bound to the element position when a step fans out over an array.
pub const INDEX_PLACEHOLDER: &str = "$index";

const INDEXED_PLACEHOLDER: &str = "[$index]";

/// Where a mapped input value comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PathRef {
    /// Copied verbatim.
    Literal(JsonValue),
    /// Resolved against the accumulated workflow input.
    Input(PathExpr),
    /// Resolved against the previous step's output.
    Output(PathExpr),
    /// Resolved against the per-step execution context (`step_<n>.input|output`).
    Context(PathExpr),
}

const SCOPES: [&str; 3] = ["input", "output", "context"];

/// Split `output.ideas[0]` into (`output`, `ideas[0]`). `output[0]` keeps its bracket.
fn split_scope(s: &str) -> Option<(&'static str, &str)> {
    SCOPES.iter().find_map(|scope| {
        let rest = s.strip_prefix(scope)?;
        if let Some(path) = rest.strip_prefix('.') {
            Some((*scope, path))
        } else if rest.starts_with('[') {
            Some((*scope, rest))
        } else {
            None
        }
    })
}

impl PathRef {
    /// Classify a mapping value. Only strings carrying an `input.`, `output.` or `context.`
    /// prefix (or `scope[n]`) are references; everything else is a literal.
    pub fn parse(value: &JsonValue) -> Result<Self, PathError> {
        let JsonValue::String(s) = value else {
            return Ok(PathRef::Literal(value.clone()));
        };
        match split_scope(s) {
            Some((scope, path)) => Self::scoped(scope, PathExpr::parse(path)?),
            None => Ok(PathRef::Literal(value.clone())),
        }
    }

    /// Parse a reference that may name a bare scope, as the base of `output[$index]` does.
    pub fn parse_base(expr: &str) -> Result<Self, PathError> {
        if let Some(scope) = SCOPES.iter().find(|s| **s == expr) {
            return Self::scoped(scope, PathExpr::parse("")?);
        }
        match split_scope(expr) {
            Some((scope, path)) => Self::scoped(scope, PathExpr::parse(path)?),
            None => Err(PathError::Malformed {
                segment: expr.to_string(),
            }),
        }
    }

    fn scoped(scope: &str, path: PathExpr) -> Result<Self, PathError> {
        Ok(match scope {
            "input" => PathRef::Input(path),
            "output" => PathRef::Output(path),
            _ => PathRef::Context(path),
        })
    }

    pub fn is_reference(value: &JsonValue) -> bool {
        matches!(value, JsonValue::String(s) if split_scope(s).is_some())
    }
}

pub fn contains_index_placeholder(value: &JsonValue) -> bool {
    matches!(value, JsonValue::String(s) if s.contains(INDEX_PLACEHOLDER))
}

/// Replace every `$index` in a string value with `index`; other values are returned as-is.
pub fn substitute_index(value: &JsonValue, index: usize) -> JsonValue {
    match value {
        JsonValue::String(s) => JsonValue::String(s.replace(INDEX_PLACEHOLDER, &index.to_string())),
        other => other.clone(),
    }
}

/// The expression up to the first `[$index]`, e.g. `output.ideas` for `output.ideas[$index].idea`.
pub fn fan_out_base(expr: &str) -> Option<&str> {
    expr.find(INDEXED_PLACEHOLDER).map(|pos| &expr[..pos])
}
