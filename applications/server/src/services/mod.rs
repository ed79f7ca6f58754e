pub mod auth;
pub mod media_storage;

pub use auth::AuthService;
pub use media_storage::MediaStorage;
