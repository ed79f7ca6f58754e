//! Adboard Core
//!
//! Platform-agnostic domain types and error handling for the Adboard
//! digital out-of-home advertising backend.
//!
//! This crate defines:
//! - **Domain Types**: `Ad`, `Display`, `AdOverride`, id newtypes
//! - **Error Handling**: Unified `AdboardError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use adboard_core::types::{Ad, CreateAd, DisplayKind, UserId};
//!
//! let owner = UserId::new("alice@example.com");
//! let ad = Ad::new(CreateAd {
//!     title: "Summer Sale".to_string(),
//!     kind: "video".to_string(),
//!     duration_seconds: 15,
//!     media_ref: None,
//!     owner,
//! });
//! assert_eq!(ad.duration_seconds, 15);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{AdboardError, Result};
pub use types::{
    Ad, AdId, AdOverride, CreateAd, CreateDisplay, Display, DisplayId, DisplayKind, OverridePatch,
    PlaylistLink, UpdateAd, UpdateDisplay, User, UserId,
};
