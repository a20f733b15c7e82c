#![forbid(unsafe_code)]

//! Runtime engine for toolflow: the tool registry, schema-bracketed tool execution, and the
//! workflow manager that chains tools together.
//!
//! Catalog parsing and structural validation live in `toolflow-core`.

pub mod concurrency;
pub mod config;
pub mod error;
pub mod events;
pub mod loader;
pub mod metrics;
pub mod registry;
pub mod tool;
pub mod workflow;

pub use crate::config::EngineConfig;
pub use crate::error::{CreateError, LoadError, PlanError, StepError, ToolError, WorkflowError};
pub use crate::events::{Event, EventSink, NoOpEventSink, RunStatus};
pub use crate::loader::load_catalog;
pub use crate::registry::{ToolRegistry, Workflow, WorkflowId};
pub use crate::tool::{handler_fn, HandlerError, Tool, ToolContext, ToolExecutor, ToolHandler};
pub use crate::workflow::{WorkflowManager, WorkflowStream};
