use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use toolflow_exec::events::{Event, EventSink};

/// Step progress on stderr for interactive text output.
pub struct ProgressEventSink {
    total_steps: usize,
    completed: AtomicUsize,
    failed: AtomicUsize,
    tool_calls: AtomicUsize,
}

impl ProgressEventSink {
    pub fn new(total_steps: usize) -> Self {
        Self {
            total_steps,
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            tool_calls: AtomicUsize::new(0),
        }
    }

    fn update_progress(&self) {
        let completed = self.completed.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let calls = self.tool_calls.load(Ordering::Relaxed);
        let total = self.total_steps;
        let done = completed + failed;
        let percent = if total > 0 { (done * 100) / total } else { 100 };
        eprint!(
            "\rProgress: [{}/{}] {}% (✓{} ✗{} calls {})",
            done, total, percent, completed, failed, calls
        );
        if done == total || failed > 0 {
            eprintln!();
        }
    }
}

#[async_trait]
impl EventSink for ProgressEventSink {
    async fn emit(&self, event: Event) {
        match event {
            Event::StepSucceeded { .. } => {
                self.completed.fetch_add(1, Ordering::Relaxed);
                self.update_progress();
            }
            Event::StepFailed { .. } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                self.update_progress();
            }
            Event::ToolFinished { .. } => {
                self.tool_calls.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }
}
