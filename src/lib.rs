//! Vacuo Pro - client core for a 28-day core-training program.
//!
//! The crate drives one user session from sign-in through the intake
//! questionnaire, payment and the daily progress dashboard, over pluggable
//! auth, profile store and payment services.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
