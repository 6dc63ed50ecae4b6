pub mod saga;
pub mod saga_definition;
pub mod saga_state;
pub mod scope;
pub mod step;
