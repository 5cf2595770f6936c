pub mod error;
pub mod models;
pub mod policy;
pub mod repositories;
pub mod services;
