//! Progress reporting for pipeline stages
//!
//! Stages report through a `ProgressSink` handed to them in the pipeline
//! context. `NoopProgress` discards events; `TerminalProgress` renders one
//! indicatif bar per task label.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;

/// A progress event for a labelled task.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// A task started with a known number of steps
    Started { task: String, total: u64 },
    /// A task completed `delta` more steps
    Advanced { task: String, delta: u64 },
    /// A task finished
    Finished { task: String },
}

/// Receives progress events from stages.
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Renders progress bars on the terminal, one per task.
pub struct TerminalProgress {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl TerminalProgress {
    /// Bars drawn on stderr.
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Bars tracked but never drawn (`--quiet`).
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{msg:>12} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn report(&self, event: ProgressEvent) {
        // A poisoned map only loses display state
        let Ok(mut bars) = self.bars.lock() else {
            return;
        };
        match event {
            ProgressEvent::Started { task, total } => {
                let bar = self.multi.add(ProgressBar::new(total));
                bar.set_style(Self::style());
                bar.set_message(task.clone());
                bars.insert(task, bar);
            }
            ProgressEvent::Advanced { task, delta } => {
                if let Some(bar) = bars.get(&task) {
                    bar.inc(delta);
                }
            }
            ProgressEvent::Finished { task } => {
                if let Some(bar) = bars.remove(&task) {
                    bar.finish();
                }
            }
        }
    }
}

/// Convenience handle for reporting one task's progress.
pub struct ProgressTask<'a> {
    sink: &'a dyn ProgressSink,
    task: String,
}

impl<'a> ProgressTask<'a> {
    /// Report `Started` and return a handle for the rest of the task.
    pub fn start(sink: &'a dyn ProgressSink, task: impl Into<String>, total: u64) -> Self {
        let task = task.into();
        sink.report(ProgressEvent::Started {
            task: task.clone(),
            total,
        });
        Self { sink, task }
    }

    pub fn advance(&self) {
        self.sink.report(ProgressEvent::Advanced {
            task: self.task.clone(),
            delta: 1,
        });
    }

    pub fn finish(self) {
        self.sink.report(ProgressEvent::Finished { task: self.task });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording(Mutex<Vec<ProgressEvent>>);

    impl ProgressSink for Recording {
        fn report(&self, event: ProgressEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    #[test]
    fn task_reports_start_advance_finish() {
        let sink = Recording::default();
        let task = ProgressTask::start(&sink, "analyze", 2);
        task.advance();
        task.advance();
        task.finish();

        let events = sink.0.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                ProgressEvent::Started { task: "analyze".into(), total: 2 },
                ProgressEvent::Advanced { task: "analyze".into(), delta: 1 },
                ProgressEvent::Advanced { task: "analyze".into(), delta: 1 },
                ProgressEvent::Finished { task: "analyze".into() },
            ]
        );
    }

    #[test]
    fn hidden_terminal_tracks_bars() {
        let progress = TerminalProgress::hidden();
        progress.report(ProgressEvent::Started { task: "gather".into(), total: 3 });
        progress.report(ProgressEvent::Advanced { task: "gather".into(), delta: 2 });
        {
            let bars = progress.bars.lock().unwrap();
            assert_eq!(bars["gather"].position(), 2);
        }
        progress.report(ProgressEvent::Finished { task: "gather".into() });
        assert!(progress.bars.lock().unwrap().is_empty());

        // Events for unknown tasks are ignored
        progress.report(ProgressEvent::Advanced { task: "missing".into(), delta: 1 });
    }
}
