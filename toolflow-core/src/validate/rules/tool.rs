use crate::types::{HandlerSpec, Schema, ToolSpec};
use crate::validate::validator::Validator;

pub(crate) fn validate_tool(v: &mut Validator, tool: &ToolSpec, path: &str) {
    v.validate_name(&format!("{path}.name"), &tool.name);

    validate_schema_shape(v, &tool.input_schema, &format!("{path}.inputSchema"));
    validate_schema_shape(v, &tool.output_schema, &format!("{path}.outputSchema"));

    if let HandlerSpec::Http { url, timeout_ms, .. } = &tool.handler {
        let url_path = format!("{path}.handler.url");
        match url::Url::parse(url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    v.push(url_path, "scheme must be http or https");
                }
            }
            Err(e) => v.push(url_path, format!("invalid url: {e}")),
        }
        if *timeout_ms == Some(0) {
            v.push(format!("{path}.handler.timeoutMs"), "must be greater than zero");
        }
    }
}

fn validate_schema_shape(v: &mut Validator, schema: &Schema, path: &str) {
    for name in &schema.required {
        if !schema.properties.is_empty() && !schema.declares_property(name) {
            v.push(
                format!("{path}.required"),
                format!("required property '{name}' is not declared in properties"),
            );
        }
    }
    for (name, prop) in &schema.properties {
        validate_schema_shape(v, prop, &format!("{path}.properties.{name}"));
    }
    if let Some(items) = &schema.items {
        validate_schema_shape(v, items, &format!("{path}.items"));
    }
}
