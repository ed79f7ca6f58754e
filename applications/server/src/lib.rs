//! Adboard Server Library
//!
//! Multi-user backend for digital out-of-home displays: ad registration,
//! display playlists with per-display overrides, and live refresh
//! notifications over WebSocket.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod hub;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use hub::{HubEvent, NotificationHub};
pub use services::{auth::AuthService, media_storage::MediaStorage};
pub use state::AppState;
