pub mod dto;
pub mod project_store;
pub mod query;
