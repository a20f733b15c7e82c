#![forbid(unsafe_code)]

pub mod error;
pub mod parser;
pub mod path;
pub mod schema;
pub mod types;
pub mod validate;

pub use crate::error::{ParseError, ValidationError, Violation};
pub use crate::parser::{parse_catalog_str, CatalogFormat, ParsedCatalog};
pub use crate::path::{resolve, PathError, PathExpr, PathRef};
pub use crate::schema::validate_value;
pub use crate::types::{
    CatalogDocument, HandlerSpec, InputMapping, Schema, SchemaType, StepDef, ToolSpec, WorkflowDef,
};
pub use crate::validate::{validate_catalog, Validate};
