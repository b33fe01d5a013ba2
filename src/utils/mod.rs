pub mod app_config;
pub mod commons;
pub mod db;
pub mod period;
pub mod traits;
