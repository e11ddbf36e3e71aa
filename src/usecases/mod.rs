//! Application use cases. Orchestrate domain logic via ports.

pub mod command_processor;
pub mod commands;
pub mod group_service;
pub mod rotation;

pub use command_processor::{CommandProcessor, DEFAULT_DAY_TYPES};
pub use commands::Command;
pub use group_service::GroupService;
pub use rotation::{RotationScheduler, ShuffleOutcome, check_order, fisher_yates};
