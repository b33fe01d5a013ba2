pub mod config;
pub mod error;
pub mod response;
pub mod validation;
pub mod extractors;
pub mod middleware;
pub mod handlers;
