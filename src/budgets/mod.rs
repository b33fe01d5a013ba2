pub mod db_types;
pub mod error;
pub mod operations;
pub mod processor;
pub mod processor_enums;
