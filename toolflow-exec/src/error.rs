use thiserror::Error;
use toolflow_core::{PathError, Violation};

fn joined(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures of a single tool invocation.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),
    #[error("invalid input for tool '{tool}': {}", joined(.violations))]
    InvalidInput {
        tool: String,
        violations: Vec<Violation>,
    },
    #[error("invalid output from tool '{tool}': {}", joined(.violations))]
    InvalidOutput {
        tool: String,
        violations: Vec<Violation>,
    },
    #[error("tool '{tool}' failed: {message}")]
    Handler { tool: String, message: String },
}

impl ToolError {
    pub fn tool(&self) -> &str {
        match self {
            ToolError::ToolNotFound(tool)
            | ToolError::InvalidInput { tool, .. }
            | ToolError::InvalidOutput { tool, .. }
            | ToolError::Handler { tool, .. } => tool,
        }
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            ToolError::InvalidInput { violations, .. }
            | ToolError::InvalidOutput { violations, .. } => violations,
            _ => &[],
        }
    }
}

/// A step's input mapping could not be turned into an execution plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("mapping '{field}': {source}")]
    Path {
        field: String,
        #[source]
        source: PathError,
    },
    #[error("$index is used but no mapping reference carries a [$index] segment")]
    MissingFanOutBase,
}

/// Rejections raised while creating a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateError {
    #[error("step {index} references unknown tool '{tool}'")]
    UnknownTool { index: usize, tool: String },
    #[error("step {index} maps '{field}', which is not an input property of tool '{tool}'")]
    InvalidMapping {
        index: usize,
        tool: String,
        field: String,
    },
    #[error("step {index}: {source}")]
    InvalidPlan {
        index: usize,
        #[source]
        source: PlanError,
    },
}

/// Why a single workflow step failed.
#[derive(Debug, Clone, Error)]
pub enum StepError {
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("expected an array at '{0}'")]
    ExpectedArray(String),
    #[error(transparent)]
    Plan(#[from] PlanError),
}

#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    #[error("workflow not found: {0}")]
    WorkflowNotFound(String),
    #[error("step {index} ({tool}) failed: {source}")]
    StepFailed {
        index: usize,
        tool: String,
        #[source]
        source: StepError,
    },
    #[error("workflow cancelled before step {next_step}")]
    Cancelled { next_step: usize },
}

impl WorkflowError {
    /// Index of the failing step, if the failure belongs to one.
    pub fn step_index(&self) -> Option<usize> {
        match self {
            WorkflowError::StepFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Failures while loading a catalog document into an engine.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("workflow '{name}': {source}")]
    Workflow {
        name: String,
        #[source]
        source: CreateError,
    },
}
