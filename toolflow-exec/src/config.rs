use std::collections::BTreeMap;

/// Engine-wide knobs shared by the tool executor and the workflow manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Elements of a fan-out step that may run at once. `1` runs them strictly in order.
    pub fan_out_concurrency: usize,
    /// Tool invocations in flight across the whole engine.
    pub global_tool_concurrency: usize,
    /// Optional per-tool caps, keyed by tool name.
    pub per_tool_concurrency: BTreeMap<String, usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fan_out_concurrency: 1,
            global_tool_concurrency: 64,
            per_tool_concurrency: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn with_fan_out_concurrency(mut self, n: usize) -> Self {
        self.fan_out_concurrency = n;
        self
    }

    pub fn with_tool_limit(mut self, tool: impl Into<String>, n: usize) -> Self {
        self.per_tool_concurrency.insert(tool.into(), n);
        self
    }
}
