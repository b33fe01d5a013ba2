// Public library interface for budget-back-end
pub mod api;
pub mod budgets;
pub mod cli_utils;
pub mod schema;
pub mod sockets;
pub mod store;
pub mod transactions;
pub mod users;
pub mod utils;
