//! PostgreSQL persistence for Curator draft metadata.
//!
//! This crate provides the Diesel schema, row models, serialization guard,
//! and repository implementations behind the [`DraftStore`] and
//! [`ConversationStore`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use curator_database::{establish_pool, PgDraftStore};
//! use curator_interface::DraftStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = establish_pool()?;
//! let store = PgDraftStore::new(pool);
//! let current = store.get_current("session-1").await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`DraftStore`]: curator_interface::DraftStore
//! [`ConversationStore`]: curator_interface::ConversationStore

#![forbid(unsafe_code)]

pub mod codec;
mod connection;
mod conversation_repository;
mod draft_repository;
mod models;
pub mod schema;

pub use connection::{establish_pool, establish_pool_with, run_migrations, PgPool, MIGRATIONS};
pub use conversation_repository::PgConversationStore;
pub use draft_repository::PgDraftStore;
pub use models::{ConversationRow, DraftRow, NewConversationRow, NewDraftRow};

use curator_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
