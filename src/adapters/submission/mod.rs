//! Submission adapters - Persistence of submitted intake records.
//!
//! - `PostgresSubmissionGateway` - Primary store (JSONB payload)
//! - `InMemorySubmissionGateway` - Tests and local runs
//! - `JsonlFallbackQueue` - Append-only JSON-lines backup file
//! - `InMemoryFallbackQueue` - Tests

mod in_memory;
mod jsonl_queue;
mod postgres_gateway;

pub use in_memory::{InMemoryFallbackQueue, InMemorySubmissionGateway};
pub use jsonl_queue::JsonlFallbackQueue;
pub use postgres_gateway::PostgresSubmissionGateway;
