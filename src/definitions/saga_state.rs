/// Phase of a single saga run.
///
/// `Running` and `Compensating` carry the index of the step being executed
/// or undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SagaPhase {
    #[default]
    Pending,
    Running(usize),
    Compensating(usize),
    Completed,
    Failed,
}

impl SagaPhase {
    /// Phase a run enters before its first step.
    pub fn start(total_steps: usize) -> Self {
        if total_steps == 0 {
            Self::Completed
        } else {
            Self::Running(0)
        }
    }

    pub fn next_after_success(current_step: usize, total_steps: usize) -> Self {
        let next = current_step + 1;
        if next >= total_steps {
            Self::Completed
        } else {
            Self::Running(next)
        }
    }

    /// Compensation starts at the step before the one that failed.
    pub fn next_after_failure(failed_step: usize) -> Self {
        match failed_step.checked_sub(1) {
            Some(previous) => Self::Compensating(previous),
            None => Self::Failed,
        }
    }

    /// Compensation errors do not halt the sweep.
    pub fn next_after_compensation(compensated_step: usize) -> Self {
        match compensated_step.checked_sub(1) {
            Some(previous) => Self::Compensating(previous),
            None => Self::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}
