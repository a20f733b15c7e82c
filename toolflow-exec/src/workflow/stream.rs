use futures_util::stream::BoxStream;
use serde_json::Value as JsonValue;

use crate::error::WorkflowError;

/// Lazy, single-pass sequence of result fragments.
pub type WorkflowStream<'a> = BoxStream<'a, Result<JsonValue, WorkflowError>>;

/// Split a terminal result into fragments: one per element of an array result, otherwise the
/// value (or error) itself.
pub(crate) fn fragments(
    result: Result<JsonValue, WorkflowError>,
) -> Vec<Result<JsonValue, WorkflowError>> {
    match result {
        Ok(JsonValue::Array(items)) => items.into_iter().map(Ok).collect(),
        other => vec![other],
    }
}
