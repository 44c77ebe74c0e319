//! Attendance and Payroll Approval Engine
//!
//! This crate provides the backend core for a multi-location tutoring
//! organization: staff clock-in/clock-out with weekly hours accounting,
//! student check-in/check-out, and a per-location payroll approval
//! workflow that notifies the administrator once every location has
//! approved.

#![warn(missing_docs)]

pub mod access;
pub mod api;
pub mod attendance;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod payroll;
