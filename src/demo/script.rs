//! The scripted value driver, without timing.
//!
//! Each step adds a fixed amount to the progress value and reports
//! whether another step should be scheduled.

/// Outcome of one scripted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    /// Progress moved and is still below the plan.
    Continue { from: f64, to: f64 },
    /// Progress moved and reached or passed the plan; nothing is rescheduled.
    Finished { from: f64, to: f64 },
}

impl ScriptStep {
    /// Progress value after the step.
    pub fn value(&self) -> f64 {
        match self {
            Self::Continue { to, .. } | Self::Finished { to, .. } => *to,
        }
    }

    /// Whether the script stops after this step.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

/// Adds `step` to `progress` until it reaches `planned`.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoScript {
    planned: f64,
    progress: f64,
    step: f64,
    steps_taken: u32,
    finished: bool,
}

impl DemoScript {
    /// Create a script. A non-positive `step` could never finish, so the
    /// script ends after its first step in that case.
    pub fn new(planned: f64, progress: f64, step: f64) -> Self {
        Self {
            planned,
            progress,
            step,
            steps_taken: 0,
            finished: false,
        }
    }

    /// Current progress.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Target value.
    pub fn planned(&self) -> f64 {
        self.planned
    }

    /// Number of steps applied so far.
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Whether no further step will be applied.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply one step. Returns `None` once the script has finished.
    pub fn advance(&mut self) -> Option<ScriptStep> {
        if self.finished {
            return None;
        }
        let from = self.progress;
        self.progress += self.step;
        self.steps_taken += 1;

        if self.progress < self.planned && self.step > 0.0 {
            Some(ScriptStep::Continue {
                from,
                to: self.progress,
            })
        } else {
            self.finished = true;
            Some(ScriptStep::Finished {
                from,
                to: self.progress,
            })
        }
    }
}

impl Iterator for DemoScript {
    type Item = ScriptStep;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}
