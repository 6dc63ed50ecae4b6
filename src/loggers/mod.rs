pub mod blackhole;
pub mod facade;
pub mod in_memory;
pub mod logger;
