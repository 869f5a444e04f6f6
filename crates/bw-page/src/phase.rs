//! Load phases and the assembly timeline.

use std::fmt;
use std::time::Duration;

use bw_blocks::Outcome;
use bw_fetch::ImageLoad;
use bw_theme::{ResolvedTheme, ThemeSource};
use tokio::time::Instant;

use crate::placeholders::Placeholders;

/// Page load priority tier. Phases start strictly in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Everything needed for the largest contentful paint.
    Eager,
    /// Remaining sections, fragments and non-critical styles.
    Lazy,
    /// Work with no user-visible urgency.
    Delayed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eager => "eager",
            Self::Lazy => "lazy",
            Self::Delayed => "delayed",
        })
    }
}

/// Something that happened while assembling a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhaseEvent {
    PhaseStarted(Phase),
    PhaseFinished(Phase),
    ThemeApplied { path: String, source: ThemeSource },
    ThemeSkipped,
    BlockDecorated { phase: Phase, name: String, outcome: Outcome },
    /// The largest-contentful-paint candidate finished loading or failed.
    FirstImageSettled { src: String, outcome: ImageLoad },
    SectionLoaded { phase: Phase },
    SectionImages { count: usize },
    ScrollTarget { id: String },
    FragmentLoaded { name: &'static str, path: String },
    StylesheetAdded { href: String },
    DelayedScheduled { delay: Duration },
    DataLayerRendered,
    /// A step failed; the phase carried on.
    StepFailed { phase: Phase, step: &'static str, error: String },
}

/// A [`PhaseEvent`] with its offset from the start of assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedEvent {
    pub elapsed: Duration,
    pub event: PhaseEvent,
}

/// Outcome of assembling one page.
#[derive(Clone, Debug, Default)]
pub struct PageReport {
    pub language: String,
    pub theme: Option<ResolvedTheme>,
    pub placeholders: Placeholders,
    pub events: Vec<TimedEvent>,
}

impl PageReport {
    /// Index of the first event matching `pred`.
    pub fn position(&self, pred: impl Fn(&PhaseEvent) -> bool) -> Option<usize> {
        self.events.iter().position(|e| pred(&e.event))
    }

    /// Elapsed time of the first event matching `pred`.
    pub fn elapsed(&self, pred: impl Fn(&PhaseEvent) -> bool) -> Option<Duration> {
        self.events.iter().find(|e| pred(&e.event)).map(|e| e.elapsed)
    }

    /// Decorated blocks with their outcomes, in order.
    #[must_use]
    pub fn block_outcomes(&self) -> Vec<(Phase, &str, Outcome)> {
        self.events
            .iter()
            .filter_map(|e| match &e.event {
                PhaseEvent::BlockDecorated {
                    phase,
                    name,
                    outcome,
                } => Some((*phase, name.as_str(), *outcome)),
                _ => None,
            })
            .collect()
    }

    /// Failed steps as `(phase, step)`.
    #[must_use]
    pub fn failed_steps(&self) -> Vec<(Phase, &'static str)> {
        self.events
            .iter()
            .filter_map(|e| match e.event {
                PhaseEvent::StepFailed { phase, step, .. } => Some((phase, step)),
                _ => None,
            })
            .collect()
    }
}

/// Timer for the delayed phase, armed when scheduled.
#[derive(Clone, Copy, Debug)]
pub struct DelayedTask {
    due: Instant,
    delay: Duration,
}

impl DelayedTask {
    #[must_use]
    pub fn schedule(delay: Duration) -> Self {
        Self {
            due: Instant::now() + delay,
            delay,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn due(&self) -> Instant {
        self.due
    }

    /// Sleep until the task is due. Returns at once when it is overdue.
    pub async fn wait(self) {
        tokio::time::sleep_until(self.due).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        assert!(Phase::Eager < Phase::Lazy);
        assert!(Phase::Lazy < Phase::Delayed);
        assert_eq!(Phase::Delayed.to_string(), "delayed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_task_waits() {
        let start = Instant::now();
        let task = DelayedTask::schedule(Duration::from_millis(3000));
        task.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }
}
