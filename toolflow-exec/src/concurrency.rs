use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Caps on concurrent tool invocations: one global semaphore plus optional per-tool ones.
///
/// A limit of zero is treated as one so a misconfigured cap cannot stall every caller.
#[derive(Clone)]
pub struct ConcurrencyLimits {
    global: Arc<Semaphore>,
    per_tool: Arc<HashMap<String, Arc<Semaphore>>>,
}

impl ConcurrencyLimits {
    pub fn new(global_limit: usize, per_tool_limits: &BTreeMap<String, usize>) -> Self {
        Self {
            global: Arc::new(Semaphore::new(global_limit.max(1))),
            per_tool: Arc::new(
                per_tool_limits
                    .iter()
                    .map(|(k, v)| (k.clone(), Arc::new(Semaphore::new((*v).max(1)))))
                    .collect(),
            ),
        }
    }

    pub async fn acquire(&self, tool_name: &str) -> ConcurrencyPermit {
        // The semaphores are owned here and never closed, so acquisition cannot fail.
        let global = self.global.clone().acquire_owned().await.ok();
        let tool = match self.per_tool.get(tool_name) {
            Some(sem) => sem.clone().acquire_owned().await.ok(),
            None => None,
        };
        ConcurrencyPermit {
            _global: global,
            _tool: tool,
        }
    }

    pub fn available_global(&self) -> usize {
        self.global.available_permits()
    }

    pub fn available_for(&self, tool_name: &str) -> Option<usize> {
        self.per_tool.get(tool_name).map(|s| s.available_permits())
    }
}

pub struct ConcurrencyPermit {
    _global: Option<OwnedSemaphorePermit>,
    _tool: Option<OwnedSemaphorePermit>,
}
