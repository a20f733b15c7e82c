use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value as JsonValue;

/// Declarative shape of a tool's input or output.
///
/// This is the structural subset of JSON Schema the engine enforces: primitive types,
/// object properties and required keys, array items, and enumerations. A schema with no
/// constraints (`{}`) accepts every value.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaTypes>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<JsonValue>>,

    #[serde(rename = "additionalProperties", default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
}

impl Schema {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn of(ty: SchemaType) -> Self {
        Self {
            schema_type: Some(SchemaTypes::Single(ty)),
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    pub fn integer() -> Self {
        Self::of(SchemaType::Integer)
    }

    pub fn boolean() -> Self {
        Self::of(SchemaType::Boolean)
    }

    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    /// Adds an optional property.
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Adds a property and marks it required.
    pub fn required_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }

    pub fn closed(mut self) -> Self {
        self.additional_properties = Some(false);
        self
    }

    pub fn declares_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum SchemaTypes {
    Single(SchemaType),
    Union(Vec<SchemaType>),
}

impl SchemaTypes {
    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            SchemaTypes::Single(t) => t.matches(value),
            SchemaTypes::Union(ts) => ts.iter().any(|t| t.matches(value)),
        }
    }
}

impl fmt::Display for SchemaTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaTypes::Single(t) => write!(f, "{t}"),
            SchemaTypes::Union(ts) => {
                let names: Vec<&str> = ts.iter().map(|t| t.as_str()).collect();
                write!(f, "{}", names.join(" | "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::Null => "null",
        }
    }

    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            SchemaType::String => value.is_string(),
            SchemaType::Number => value.is_number(),
            SchemaType::Integer => match value {
                JsonValue::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
                }
                _ => false,
            },
            SchemaType::Boolean => value.is_boolean(),
            SchemaType::Object => value.is_object(),
            SchemaType::Array => value.is_array(),
            SchemaType::Null => value.is_null(),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
