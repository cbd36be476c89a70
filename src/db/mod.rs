//! SQLite persistence: the interaction log and per-session preferences

pub mod interactions;
pub mod preferences;
pub mod sqlite;

pub use interactions::{InteractionStore, InteractionWriterHandle};
pub use preferences::PreferenceStore;
pub use sqlite::{create_pool, init_schema, memory_pool};
