//! hrms-core: headcount rollups and restricted-holiday proration for the
//! HR dashboard.
//!
//! Everything here is a pure function over an in-memory snapshot. Fetching
//! and persisting employee or holiday records belongs to the data layer.

pub mod breakdown;
pub mod config;
pub mod employee;
pub mod error;
pub mod grouping;
pub mod hierarchy;
pub mod proration;
pub mod report;
pub mod rng;
pub mod roster;
pub mod types;
