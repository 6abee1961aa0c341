//! Adapters implementing the driven ports.

pub mod analyzer;
pub mod gateway;
pub mod memory_store;
pub mod time;

pub use analyzer::*;
pub use gateway::*;
pub use memory_store::*;
pub use time::*;
