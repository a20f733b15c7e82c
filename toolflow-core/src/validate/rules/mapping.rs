use serde_json::Value as JsonValue;

use crate::path::{contains_index_placeholder, substitute_index, PathRef, INDEX_PLACEHOLDER};
use crate::types::InputMapping;
use crate::validate::validator::Validator;

pub(crate) fn validate_mapping(v: &mut Validator, mapping: &InputMapping, path: &str) {
    let mut fans_out = false;
    let mut has_indexed_reference = false;

    for (field, source) in mapping {
        let fpath = format!("{path}.{field}");
        if field.is_empty() {
            v.push(&fpath, "mapping key must not be empty");
        }

        let indexed = contains_index_placeholder(source);
        fans_out |= indexed;

        if !PathRef::is_reference(source) {
            continue;
        }

        if let JsonValue::String(expr) = source {
            if expr.replace("[$index]", "").contains(INDEX_PLACEHOLDER) {
                v.push(&fpath, "$index may only appear as a bracketed index ([$index])");
                continue;
            }
            has_indexed_reference |= indexed;
        }

        // Bind the placeholder so the expression can be parsed as a concrete path.
        if let Err(e) = PathRef::parse(&substitute_index(source, 0)) {
            v.push(fpath, format!("invalid path expression: {e}"));
        }
    }

    if fans_out && !has_indexed_reference {
        v.push(
            path,
            "$index is used but no input./output./context. reference carries a [$index] segment",
        );
    }
}
