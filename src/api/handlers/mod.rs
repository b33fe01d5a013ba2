pub mod budget;
pub mod health;
