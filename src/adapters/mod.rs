//! Infrastructure adapters. Implement ports.
//!
//! JSON snapshot file, random sources, terminal UI. Map errors to DomainError.

pub mod persistence;
pub mod random;
pub mod ui;
