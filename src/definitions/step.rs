use std::{future::Future, pin::Pin, sync::Arc};

use async_trait::async_trait;

pub(crate) type BoxedFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// Undo action holding the output of the execution it reverses.
pub(crate) type Compensation<E> = Box<dyn FnOnce() -> BoxedFuture<(), E> + Send>;

pub(crate) type Operation<E> = Box<dyn FnOnce() -> BoxedFuture<Compensation<E>, E> + Send>;

/// One unit of work in a saga: a forward action and the action undoing it.
///
/// The output of `execute` is moved into the compensation, so the step's own
/// `compensate` receives exactly the value `execute` produced while other
/// steps never see it.
pub struct Step<E> {
    name: String,
    operation: Operation<E>,
}

impl<E> Step<E>
where
    E: Send + 'static,
{
    pub fn new<Execute, ExecuteFuture, Compensate, CompensateFuture, Out, ExecuteError, CompensateError>(
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
        Self {
            name: name.into(),
            operation: Box::new(move || {
                Box::pin(async move {
                    let output = execute().await.map_err(E::from)?;
                    let compensation: Compensation<E> = Box::new(move || {
                        Box::pin(async move { compensate(output).await.map_err(E::from) })
                    });
                    Ok(compensation)
                })
            }),
        }
    }

    /// A step whose effect is not undone when a later step fails.
    pub fn irreversible<Execute, ExecuteFuture, Out, ExecuteError>(
        name: impl Into<String>,
        execute: Execute,
    ) -> Self
    where
        Execute: FnOnce() -> ExecuteFuture + Send + 'static,
        ExecuteFuture: Future<Output = Result<Out, ExecuteError>> + Send + 'static,
        Out: Send + 'static,
        ExecuteError: Send + 'static,
        E: From<ExecuteError>,
    {
        Self::new(name, execute, |_: Out| async { Ok::<(), ExecuteError>(()) })
    }

    pub fn from_saga_step<S>(step: S) -> Self
    where
        S: SagaStep,
        E: From<S::Error>,
    {
        let name = step.name().to_string();
        let step = Arc::new(step);
        let compensating = step.clone();
        Self::new(
            name,
            move || async move { step.execute().await },
            move |output| async move { compensating.compensate(output).await },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, Operation<E>) {
        (self.name, self.operation)
    }
}

/// Reusable step implemented on a type instead of a pair of closures.
#[async_trait]
pub trait SagaStep: Send + Sync + 'static {
    type Output: Send + 'static;
    type Error: Send + 'static;

    fn name(&self) -> &str;

    async fn execute(&self) -> Result<Self::Output, Self::Error>;

    /// Receives the output of this step's own `execute`. No-op by default.
    async fn compensate(&self, output: Self::Output) -> Result<(), Self::Error> {
        let _ = output;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct StepError(String);

    struct Reserve {
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl SagaStep for Reserve {
        type Output = u32;
        type Error = StepError;

        fn name(&self) -> &str {
            "reserve"
        }

        async fn execute(&self) -> Result<u32, StepError> {
            self.log.lock().unwrap().push("execute".to_string());
            Ok(7)
        }

        async fn compensate(&self, output: u32) -> Result<(), StepError> {
            self.log.lock().unwrap().push(format!("compensate {output}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_compensation_receives_execute_output() {
        let step: Step<StepError> = Step::new(
            "create",
            || async { Ok::<_, StepError>(vec![1, 2, 3]) },
            |output: Vec<u8>| async move {
                assert_eq!(vec![1, 2, 3], output);
                Ok::<_, StepError>(())
            },
        );
        assert_eq!("create", step.name());

        let (name, operation) = step.into_parts();
        assert_eq!("create", name);
        let compensation = operation().await.unwrap();
        compensation().await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_error_is_wrapped() {
        let step: Step<StepError> = Step::irreversible("fail", || async {
            Err::<(), _>(StepError("nope".to_string()))
        });
        let (_, operation) = step.into_parts();
        assert_eq!(Some(StepError("nope".to_string())), operation().await.err());
    }

    #[tokio::test]
    async fn test_saga_step_conversion() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let step: Step<StepError> = Step::from_saga_step(Reserve { log: log.clone() });
        assert_eq!("reserve", step.name());

        let (_, operation) = step.into_parts();
        let compensation = operation().await.unwrap();
        compensation().await.unwrap();
        assert_eq!(
            vec!["execute".to_string(), "compensate 7".to_string()],
            *log.lock().unwrap()
        );
    }
}
