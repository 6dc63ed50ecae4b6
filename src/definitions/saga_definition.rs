use std::{collections::HashSet, fmt::Display, future::Future};

use serde_json::{json, Value};
use thiserror::Error;

use crate::loggers::logger::SagaLogger;

use super::{
    saga::{CompensationError, SagaResult},
    saga_state::SagaPhase,
    scope::SagaScope,
    step::{Compensation, SagaStep, Step},
};

/// Raised for a saga that was put together incorrectly. No step runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("step at position {index} has an empty name")]
    EmptyStepName { index: usize },
    #[error("step '{name}' is defined more than once")]
    DuplicateStep { name: String },
}

/// Ordered list of compensable steps sharing one error type.
pub struct SagaDefinition<E, L> {
    scope: SagaScope,
    steps: Vec<Step<E>>,
    logger: L,
}

impl<E, L> SagaDefinition<E, L>
where
    E: Display + Send + 'static,
    L: SagaLogger,
{
    pub fn new(scope: SagaScope, logger: L) -> Self {
        Self {
            scope,
            steps: Vec::new(),
            logger,
        }
    }

    pub fn step(mut self, step: Step<E>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn add_step<Execute, ExecuteFuture, Compensate, CompensateFuture, Out, ExecuteError, CompensateError>(
        self,
        name: impl Into<String>,
        execute: Execute,
        compensate: Compensate,
    ) -> Self
    where
        Execute: FnOnce() -> ExecuteFuture + Send + 'static,
        ExecuteFuture: Future<Output = Result<Out, ExecuteError>> + Send + 'static,
        Compensate: FnOnce(Out) -> CompensateFuture + Send + 'static,
        CompensateFuture: Future<Output = Result<(), CompensateError>> + Send + 'static,
        Out: Send + 'static,
        E: From<ExecuteError> + From<CompensateError>,
    {
        self.step(Step::new(name, execute, compensate))
    }

    pub fn then<S>(self, step: S) -> Self
    where
        S: SagaStep,
        E: From<S::Error>,
    {
        self.step(Step::from_saga_step(step))
    }

    pub fn scope(&self) -> &SagaScope {
        &self.scope
    }

    pub fn steps(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Completed and compensated steps are reported by name and every log
    /// line carries the step name, so names must be non-empty and unique.
    fn validate(&self) -> Result<(), DefinitionError> {
        let mut seen = HashSet::new();
        for (index, step) in self.steps.iter().enumerate() {
            if step.name().trim().is_empty() {
                return Err(DefinitionError::EmptyStepName { index });
            }
            if !seen.insert(step.name()) {
                return Err(DefinitionError::DuplicateStep {
                    name: step.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Runs every step in order, compensating completed steps in reverse
    /// order when one fails.
    ///
    /// Step and compensation failures are reported in the returned
    /// [`SagaResult`]. `Err` is only returned for a malformed definition.
    pub async fn run(self) -> Result<SagaResult<E>, DefinitionError> {
        self.validate()?;

        let Self {
            scope,
            steps,
            logger,
        } = self;
        let total = steps.len();
        let mut phase = SagaPhase::start(total);
        let mut completed_steps = Vec::with_capacity(total);
        let mut pending: Vec<(String, Compensation<E>)> = Vec::with_capacity(total);

        logger.debug(
            "saga started",
            &json!({ "saga_id": scope.id.to_string(), "saga": scope.name, "steps": total }),
        );

        for (index, step) in steps.into_iter().enumerate() {
            let (name, operation) = step.into_parts();
            logger.debug("executing step", &step_fields(&scope, &name, index, None));

            match operation().await {
                Ok(compensation) => {
                    logger.debug("step completed", &step_fields(&scope, &name, index, None));
                    phase = SagaPhase::next_after_success(index, total);
                    completed_steps.push(name.clone());
                    pending.push((name, compensation));
                }
                Err(error) => {
                    let cause = error.to_string();
                    logger.error(
                        "step failed",
                        &step_fields(&scope, &name, index, Some(cause.clone())),
                    );
                    phase = SagaPhase::next_after_failure(index);
                    let (compensated_steps, compensation_errors) =
                        compensate(&scope, &logger, &name, &cause, pending, &mut phase).await;

                    let result = SagaResult {
                        id: scope.id,
                        name: scope.name,
                        success: false,
                        completed_steps,
                        compensated_steps,
                        error: Some(error),
                        compensation_errors,
                        phase,
                    };
                    logger.warn("saga failed", &outcome_fields(&result));
                    return Ok(result);
                }
            }
        }

        let result = SagaResult {
            id: scope.id,
            name: scope.name,
            success: true,
            completed_steps,
            compensated_steps: Vec::new(),
            error: None,
            compensation_errors: Vec::new(),
            phase,
        };
        logger.log("saga completed", &outcome_fields(&result));
        Ok(result)
    }
}

/// Runs `steps` as a single saga, the non-builder form of [`SagaDefinition`].
pub async fn execute_steps<E, L>(
    scope: SagaScope,
    steps: Vec<Step<E>>,
    logger: L,
) -> Result<SagaResult<E>, DefinitionError>
where
    E: Display + Send + 'static,
    L: SagaLogger,
{
    steps
        .into_iter()
        .fold(SagaDefinition::new(scope, logger), SagaDefinition::step)
        .run()
        .await
}

async fn compensate<E, L>(
    scope: &SagaScope,
    logger: &L,
    failed_step: &str,
    cause: &str,
    mut pending: Vec<(String, Compensation<E>)>,
    phase: &mut SagaPhase,
) -> (Vec<String>, Vec<CompensationError<E>>)
where
    E: Display,
    L: SagaLogger,
{
    let mut compensated = Vec::with_capacity(pending.len());
    let mut errors = Vec::new();

    while let Some((name, compensation)) = pending.pop() {
        let index = pending.len();
        logger.debug(
            "compensating step",
            &step_fields(scope, &name, index, None),
        );

        match compensation().await {
            Ok(()) => {
                logger.debug("step compensated", &step_fields(scope, &name, index, None));
            }
            Err(error) => {
                let mut fields = step_fields(scope, &name, index, Some(error.to_string()));
                fields["failed_step"] = json!(failed_step);
                fields["cause"] = json!(cause);
                logger.error("compensation failed", &fields);
                errors.push(CompensationError {
                    step: name.clone(),
                    error,
                });
            }
        }

        compensated.push(name);
        *phase = SagaPhase::next_after_compensation(index);
    }

    (compensated, errors)
}

fn step_fields(scope: &SagaScope, step: &str, index: usize, error: Option<String>) -> Value {
    let mut fields = json!({
        "saga_id": scope.id.to_string(),
        "saga": scope.name,
        "step": step,
        "index": index,
    });
    if let Some(error) = error {
        fields["error"] = json!(error);
    }
    fields
}

fn outcome_fields<E: Display>(result: &SagaResult<E>) -> Value {
    json!({
        "saga_id": result.id.to_string(),
        "saga": result.name,
        "success": result.success,
        "completed_steps": result.completed_steps,
        "compensated_steps": result.compensated_steps,
        "failed_compensations": result.compensation_errors.len(),
        "error": result.error.as_ref().map(ToString::to_string),
    })
}
