mod document;
mod schema;
mod tool;
mod workflow;

pub use document::CatalogDocument;
pub use schema::{Schema, SchemaType, SchemaTypes};
pub use tool::{HandlerSpec, ToolSpec};
pub use workflow::{InputMapping, StepDef, WorkflowDef};
