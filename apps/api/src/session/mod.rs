// Per-user session state, held in memory for the life of the process.

pub mod handlers;
pub mod state;
pub mod store;
