pub mod config;
pub mod error;
pub mod handlers;
pub mod mock;
pub mod model;
pub mod openapi;
pub mod policy;
pub mod reports_memory;
pub mod version;
