//! The workflow manager: validates workflow definitions against the registry and runs them
//! step by step, fanning out over array results where a mapping asks for `$index`.

pub(crate) mod plan;
mod state;
mod stream;

use std::sync::Arc;

use futures_util::{stream as fstream, StreamExt, TryStreamExt};
use serde_json::Value as JsonValue;
use tokio_util::sync::CancellationToken;
use toolflow_core::WorkflowDef;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{CreateError, StepError, ToolError, WorkflowError};
use crate::events::{Event, EventSink, NoOpEventSink, RunStatus};
use crate::registry::{ToolRegistry, Workflow, WorkflowId};
use crate::tool::ToolExecutor;

use plan::{FanOut, StepPlan};
use state::ExecutionState;

pub use stream::WorkflowStream;

pub struct WorkflowManager {
    registry: Arc<ToolRegistry>,
    executor: Arc<ToolExecutor>,
    config: EngineConfig,
    events: Arc<dyn EventSink>,
}

impl WorkflowManager {
    pub fn new(
        registry: Arc<ToolRegistry>,
        executor: Arc<ToolExecutor>,
        config: EngineConfig,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            registry,
            executor,
            config,
            events,
        }
    }

    /// Default configuration and no event sink; the executor shares `registry`.
    pub fn with_registry(registry: Arc<ToolRegistry>) -> Self {
        let config = EngineConfig::default();
        let executor = Arc::new(ToolExecutor::with_config(registry.clone(), &config));
        Self::new(registry, executor, config, Arc::new(NoOpEventSink))
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn executor(&self) -> &Arc<ToolExecutor> {
        &self.executor
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check every step against the registry, then store the definition.
    ///
    /// Each step's tool must be registered and every mapped field must be a declared input
    /// property of that tool. Path expressions are parsed here so malformed ones are rejected
    /// before anything runs.
    pub fn create_workflow(&self, definition: WorkflowDef) -> Result<WorkflowId, CreateError> {
        let mut plans = Vec::with_capacity(definition.steps.len());
        for (index, step) in definition.steps.iter().enumerate() {
            let tool = self
                .registry
                .tool(&step.tool_name)
                .ok_or_else(|| CreateError::UnknownTool {
                    index,
                    tool: step.tool_name.clone(),
                })?;

            if let Some(field) = step
                .input_mapping
                .keys()
                .find(|f| !tool.input_schema.declares_property(f))
            {
                return Err(CreateError::InvalidMapping {
                    index,
                    tool: tool.name.clone(),
                    field: field.clone(),
                });
            }

            let plan = StepPlan::compile(step)
                .map_err(|source| CreateError::InvalidPlan { index, source })?;
            plans.push(Ok(plan));
        }

        let name = definition.name.clone();
        let id = self.registry.insert_workflow(definition, plans);
        info!(workflow = %name, workflow_id = %id, "workflow created");
        Ok(id)
    }

    pub async fn execute_workflow(
        &self,
        id: &WorkflowId,
        input: JsonValue,
    ) -> Result<JsonValue, WorkflowError> {
        self.execute_workflow_with_cancel(id, input, CancellationToken::new())
            .await
    }

    /// Run the first workflow registered under `name`.
    pub async fn execute_workflow_by_name(
        &self,
        name: &str,
        input: JsonValue,
    ) -> Result<JsonValue, WorkflowError> {
        let workflow = self
            .registry
            .workflow_by_name(name)
            .ok_or_else(|| WorkflowError::WorkflowNotFound(name.to_string()))?;
        self.run(&workflow, input, &CancellationToken::new()).await
    }

    /// Like [`execute_workflow`](Self::execute_workflow), checking `cancel` before each step.
    pub async fn execute_workflow_with_cancel(
        &self,
        id: &WorkflowId,
        input: JsonValue,
        cancel: CancellationToken,
    ) -> Result<JsonValue, WorkflowError> {
        let workflow = self
            .registry
            .workflow(id)
            .ok_or_else(|| WorkflowError::WorkflowNotFound(id.to_string()))?;
        self.run(&workflow, input, &cancel).await
    }

    /// Nothing runs until the stream is first polled. An array result is yielded one element
    /// at a time; anything else, including an error, arrives as a single item.
    pub fn execute_workflow_stream(&self, id: &WorkflowId, input: JsonValue) -> WorkflowStream<'_> {
        let id = *id;
        fstream::once(async move { self.execute_workflow(&id, input).await })
            .flat_map(|result| fstream::iter(stream::fragments(result)))
            .boxed()
    }

    #[instrument(skip_all, fields(workflow = %workflow.name(), workflow_id = %workflow.id))]
    async fn run(
        &self,
        workflow: &Workflow,
        input: JsonValue,
        cancel: &CancellationToken,
    ) -> Result<JsonValue, WorkflowError> {
        let run_id = Uuid::new_v4();
        self.events
            .emit(Event::RunStarted {
                run_id,
                workflow_id: workflow.id,
                workflow_name: workflow.name().to_string(),
            })
            .await;
        info!(%run_id, steps = workflow.definition.steps.len(), "workflow started");

        let result = self.run_steps(run_id, workflow, input, cancel).await;

        let status = match &result {
            Ok(_) => RunStatus::Succeeded,
            Err(WorkflowError::Cancelled { .. }) => RunStatus::Cancelled,
            Err(_) => RunStatus::Failed,
        };
        match &result {
            Ok(_) => info!(%run_id, "workflow succeeded"),
            Err(e) => warn!(%run_id, error = %e, "workflow did not complete"),
        }
        self.events
            .emit(Event::RunFinished { run_id, status })
            .await;

        result
    }

    async fn run_steps(
        &self,
        run_id: Uuid,
        workflow: &Workflow,
        input: JsonValue,
        cancel: &CancellationToken,
    ) -> Result<JsonValue, WorkflowError> {
        let mut state = ExecutionState::new(input);

        let steps = workflow.definition.steps.iter().zip(&workflow.plans);
        for (index, (step, plan)) in steps.enumerate() {
            if cancel.is_cancelled() {
                return Err(WorkflowError::Cancelled { next_step: index });
            }

            let tool = step.tool_name.clone();
            self.events
                .emit(Event::StepStarted {
                    run_id,
                    index,
                    tool: tool.clone(),
                })
                .await;

            // Only workflows stored straight into the registry can carry a plan error.
            let outcome = match plan {
                Ok(plan) => self.run_step(run_id, index, plan, &mut state).await,
                Err(e) => Err(StepError::from(e.clone())),
            };

            match outcome {
                Ok(()) => {
                    debug!(step = index, tool = %tool, "step succeeded");
                    self.events
                        .emit(Event::StepSucceeded {
                            run_id,
                            index,
                            tool,
                        })
                        .await;
                }
                Err(source) => {
                    self.events
                        .emit(Event::StepFailed {
                            run_id,
                            index,
                            tool: tool.clone(),
                            error: source.to_string(),
                        })
                        .await;
                    return Err(WorkflowError::StepFailed {
                        index,
                        tool,
                        source,
                    });
                }
            }
        }

        Ok(state.into_output())
    }

    async fn run_step(
        &self,
        run_id: Uuid,
        index: usize,
        plan: &StepPlan,
        state: &mut ExecutionState,
    ) -> Result<(), StepError> {
        match &plan.fan_out {
            None => {
                let args = plan.mapped_input(state, None)?;
                let output = self
                    .invoke(run_id, index, &plan.tool, args.clone(), None)
                    .await?;
                state.record_step(index, args, output.clone());
                state.advance(output);
            }
            Some(fan_out) => {
                let results = self.fan_out(run_id, index, plan, fan_out, state).await?;
                let accumulated = state.input().clone();
                state.record_step(index, accumulated, JsonValue::Array(results.clone()));
                state.advance_fan_out(results);
            }
        }
        Ok(())
    }

    /// Invoke the step's tool once per element of the base array. Results come back in array
    /// order; with several elements in flight the lowest failing index is reported.
    async fn fan_out(
        &self,
        run_id: Uuid,
        index: usize,
        plan: &StepPlan,
        fan_out: &FanOut,
        state: &ExecutionState,
    ) -> Result<Vec<JsonValue>, StepError> {
        let len = match state.resolve(&fan_out.base_ref)? {
            Some(JsonValue::Array(items)) => items.len(),
            _ => return Err(StepError::ExpectedArray(fan_out.base.clone())),
        };

        self.events
            .emit(Event::FanOutStarted {
                run_id,
                index,
                tool: plan.tool.clone(),
                elements: len,
            })
            .await;
        debug!(step = index, elements = len, base = %fan_out.base, "fanning out");

        fstream::iter(0..len)
            .map(|element| async move {
                let args = plan.mapped_input(state, Some(element))?;
                let output = self
                    .invoke(run_id, index, &plan.tool, args, Some(element))
                    .await?;
                Ok::<_, StepError>(output)
            })
            .buffered(self.config.fan_out_concurrency.max(1))
            .try_collect()
            .await
    }

    async fn invoke(
        &self,
        run_id: Uuid,
        index: usize,
        tool: &str,
        args: JsonValue,
        element: Option<usize>,
    ) -> Result<JsonValue, ToolError> {
        let result = self.executor.execute_tool(tool, args).await;
        self.events
            .emit(Event::ToolFinished {
                run_id,
                index,
                tool: tool.to_string(),
                element,
                succeeded: result.is_ok(),
            })
            .await;
        result
    }
}
