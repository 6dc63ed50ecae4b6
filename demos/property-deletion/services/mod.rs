pub mod file_storage;
pub mod property_store;
