//! Persistence adapters.

pub mod state_json;

pub use state_json::StateJson;
