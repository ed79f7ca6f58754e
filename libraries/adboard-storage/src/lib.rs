//! Adboard Storage
//!
//! `SQLite` persistence layer for the Adboard backend.
//!
//! Each feature owns its own queries and logic as a vertical slice
//! (`users`, `ads`, `displays`, `playlist`). Every mutation is a single
//! transaction: read, validate, write — validation failures return before
//! anything is written.
//!
//! # Example
//!
//! ```rust,no_run
//! use adboard_storage::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("sqlite://adboard.db").await?;
//! let displays = adboard_storage::displays::get_all(db.pool()).await?;
//! # Ok(())
//! # }
//! ```

mod database;
mod error;

// Vertical slices
pub mod ads;
pub mod displays;
pub mod playlist;
pub mod users;

pub use database::Database;
pub use error::StorageError;
