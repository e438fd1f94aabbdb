//! Profile persistence adapters.
//!
//! - `in_memory` - process-local store for tests and offline runs
//! - `postgrest` - hosted database over its REST API

mod in_memory;
mod postgrest;

pub use in_memory::InMemoryProfileStore;
pub use postgrest::PostgrestProfileStore;
