pub mod error;
pub mod property;
