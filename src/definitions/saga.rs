use std::fmt;

use uuid::Uuid;

use super::saga_state::SagaPhase;

/// Outcome of a saga run.
///
/// `compensated_steps` lists every compensation that was attempted, in undo
/// order. The ones that failed are also listed in `compensation_errors`.
#[derive(Debug)]
pub struct SagaResult<E> {
    pub id: Uuid,
    pub name: String,
    pub success: bool,
    pub completed_steps: Vec<String>,
    pub compensated_steps: Vec<String>,
    pub error: Option<E>,
    pub compensation_errors: Vec<CompensationError<E>>,
    pub phase: SagaPhase,
}

impl<E> SagaResult<E> {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// True when a rollback ran but at least one compensation failed.
    pub fn is_partially_rolled_back(&self) -> bool {
        !self.compensation_errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), E> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
pub struct CompensationError<E> {
    pub step: String,
    pub error: E,
}

impl<E: fmt::Display> fmt::Display for CompensationError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "compensation failed for step '{}': {}", self.step, self.error)
    }
}

impl<E: std::error::Error + 'static> std::error::Error for CompensationError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
