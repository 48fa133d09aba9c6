//! Weekly staff scheduling and labor accounting for banquet kitchens.
//!
//! This crate stores shifts per week, estimates staffing needs from event
//! guest counts, evaluates conditional formatting rules for the schedule
//! grid, and aggregates hours, overtime and pay per day and per employee.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
