//! Step observer trait for monitoring cloth simulation progress.

/// Hooks invoked while a cloth step runs.
///
/// All methods default to no-ops, so implementors only override what they
/// need (debug overlays, profiling, test probes).
pub trait StepObserver {
    /// Called once gravity, wind and air friction have been accumulated.
    fn on_forces_applied(&mut self) {}

    /// Called after each relaxation sweep over all constraints.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after all particles have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}

    /// Called when a constraint is removed; `index` is its position before removal.
    fn on_constraint_torn(&mut self, _index: usize) {}
}

/// A no-op observer. Use when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards every hook to the `log` facade at trace level.
#[derive(Default)]
pub struct LogStepObserver {
    steps: u64,
}

impl LogStepObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed steps seen so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl StepObserver for LogStepObserver {
    fn on_forces_applied(&mut self) {
        log::trace!("step {}: forces applied", self.steps);
    }

    fn on_constraint_iteration(&mut self, iteration: usize) {
        log::trace!("step {}: relaxation sweep {}", self.steps, iteration);
    }

    fn on_integrate(&mut self) {
        log::trace!("step {}: integrated", self.steps);
    }

    fn on_step_complete(&mut self) {
        log::trace!("step {} complete", self.steps);
        self.steps += 1;
    }

    fn on_constraint_torn(&mut self, index: usize) {
        log::trace!("step {}: constraint {} torn", self.steps, index);
    }
}
