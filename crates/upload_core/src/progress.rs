use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rand::Rng;
use tokio::{task::AbortHandle, time::MissedTickBehavior};
use tracing::{debug, trace};

use crate::{config::UiSettings, page::Page, timers::TimerSet};

/// Source of per-tick increments in `[0, max_step)`.
pub trait StepSource: Send {
    fn next_step(&mut self, max_step: f64) -> f64;
}

pub struct RandomSteps;

impl StepSource for RandomSteps {
    fn next_step(&mut self, max_step: f64) -> f64 {
        if !(max_step.is_finite() && max_step > 0.0) {
            return 0.0;
        }
        rand::rng().random_range(0.0..max_step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Advanced(f64),
    ReachedCeiling(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressState {
    value: f64,
    ceiling: f64,
}

impl ProgressState {
    pub fn new(ceiling: f64) -> Self {
        Self {
            value: 0.0,
            ceiling,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Adds a step (negative steps count as zero) and clamps at the ceiling.
    pub fn advance(&mut self, step: f64) -> TickOutcome {
        self.value += step.max(0.0);
        if self.value > self.ceiling {
            self.value = self.ceiling;
        }
        if self.value >= self.ceiling {
            TickOutcome::ReachedCeiling(self.value)
        } else {
            TickOutcome::Advanced(self.value)
        }
    }
}

/// Animates the page's progress bar towards the ceiling. There is no
/// completion signal; the bar stays busy until the host leaves the page.
pub struct ProgressSimulator {
    page: Page,
    timers: TimerSet,
    steps: Arc<Mutex<Box<dyn StepSource>>>,
    tick: Duration,
    ceiling: f64,
    max_step: f64,
    running: Option<AbortHandle>,
}

impl ProgressSimulator {
    pub fn new(page: Page, timers: TimerSet, settings: &UiSettings) -> Self {
        Self {
            page,
            timers,
            steps: Arc::new(Mutex::new(Box::new(RandomSteps))),
            tick: settings.progress_tick(),
            ceiling: settings.progress_ceiling,
            max_step: settings.progress_max_step,
            running: None,
        }
    }

    pub fn set_step_source(&mut self, steps: Box<dyn StepSource>) {
        self.steps = Arc::new(Mutex::new(steps));
    }

    pub fn is_started(&self) -> bool {
        self.running.is_some()
    }

    pub fn is_ticking(&self) -> bool {
        self.running.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Reveals the bar and starts ticking. A second call while a simulation
    /// exists is ignored.
    pub fn start(&mut self) -> bool {
        if self.running.is_some() {
            return false;
        }

        self.page.update(|model| {
            model.progress.visible = true;
            model.progress.percent = 0.0;
            model.progress.striped = false;
        });

        let page = self.page.clone();
        let steps = Arc::clone(&self.steps);
        let period = self.tick;
        let ceiling = self.ceiling;
        let max_step = self.max_step;
        let handle = self.timers.spawn(async move {
            let mut state = ProgressState::new(ceiling);
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let step = steps
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .next_step(max_step);
                match state.advance(step) {
                    TickOutcome::Advanced(value) => {
                        trace!(value, "progress tick");
                        page.update(|model| model.progress.percent = value);
                    }
                    TickOutcome::ReachedCeiling(value) => {
                        debug!(value, "progress reached ceiling; switching to busy style");
                        page.update(|model| {
                            model.progress.percent = value;
                            model.progress.striped = true;
                        });
                        break;
                    }
                }
            }
        });
        self.running = Some(handle);
        true
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.running.take() {
            handle.abort();
        }
    }
}
