//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, auth types, errors)
//! - `program` - The 28-day curriculum: questionnaire scoring, checklist, exercises
//! - `user` - The user's program profile and its progress rules
//! - `session` - Screen navigation state and the contact form

pub mod foundation;
pub mod program;
pub mod session;
pub mod user;
