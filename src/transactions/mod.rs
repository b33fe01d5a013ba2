pub mod db_types;
pub mod sql_queries;
