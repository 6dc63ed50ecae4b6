//! Compensating sagas for multi-step operations over remote services.
//!
//! A saga runs an ordered list of steps. When a step fails, every step that
//! already completed is compensated in reverse order and the original error
//! is reported back as data in a [`SagaResult`].

pub mod definitions;
mod helpers;
pub mod loggers;

pub use definitions::{
    saga::{CompensationError, SagaResult},
    saga_definition::{execute_steps, DefinitionError, SagaDefinition},
    saga_state::SagaPhase,
    scope::SagaScope,
    step::{SagaStep, Step},
};
pub use loggers::{
    blackhole::Blackhole,
    facade::LogFacade,
    in_memory::InMemoryLogger,
    logger::{LogEntry, LogLevel, SagaLogger},
};
