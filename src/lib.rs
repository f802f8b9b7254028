//! Shift slot engine for community pharmacies.
//!
//! This crate proposes shift slots from an employee's availability, validates
//! candidate slots against French labour limits as they are edited, advises
//! breaks, and aggregates a week of shifts into a compliance report.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
