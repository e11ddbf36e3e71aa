//! gold-day: rotating gold-day groups with a random draw, monthly hosting schedule and
//! a history ledger. Hexagonal layout: domain, ports, use cases, adapters.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
