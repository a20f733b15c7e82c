use std::sync::Arc;

use serde_json::Value as JsonValue;
use toolflow_core::validate_value;
use tracing::{debug, instrument, warn};

use crate::concurrency::ConcurrencyLimits;
use crate::config::EngineConfig;
use crate::error::ToolError;
use crate::registry::ToolRegistry;

use super::ToolContext;

/// Runs one tool invocation, bracketed by input and output validation.
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    limits: ConcurrencyLimits,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self::with_config(registry, &EngineConfig::default())
    }

    pub fn with_config(registry: Arc<ToolRegistry>, config: &EngineConfig) -> Self {
        Self {
            registry,
            limits: ConcurrencyLimits::new(
                config.global_tool_concurrency,
                &config.per_tool_concurrency,
            ),
        }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn limits(&self) -> &ConcurrencyLimits {
        &self.limits
    }

    #[instrument(skip(self, input))]
    pub async fn execute_tool(&self, name: &str, input: JsonValue) -> Result<JsonValue, ToolError> {
        let tool = self
            .registry
            .tool(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;

        validate_value(&tool.input_schema, &input).map_err(|e| ToolError::InvalidInput {
            tool: tool.name.clone(),
            violations: e.violations,
        })?;

        let output = {
            let _permit = self.limits.acquire(&tool.name).await;
            debug!("invoking handler");
            tool.handler
                .call(ToolContext {
                    tool_name: tool.name.clone(),
                    args: input,
                })
                .await
                .map_err(|e| {
                    warn!(error = %e, "handler failed");
                    ToolError::Handler {
                        tool: tool.name.clone(),
                        message: e.message().to_string(),
                    }
                })?
        };

        validate_value(&tool.output_schema, &output).map_err(|e| ToolError::InvalidOutput {
            tool: tool.name.clone(),
            violations: e.violations,
        })?;

        Ok(output)
    }
}
