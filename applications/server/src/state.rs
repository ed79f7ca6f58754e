/// Shared application state
use crate::hub::NotificationHub;
use crate::services::{AuthService, MediaStorage};
use adboard_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    pub media_storage: Arc<MediaStorage>,
    pub hub: Arc<NotificationHub>,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        auth_service: Arc<AuthService>,
        media_storage: Arc<MediaStorage>,
        hub: Arc<NotificationHub>,
    ) -> Self {
        Self {
            db,
            auth_service,
            media_storage,
            hub,
        }
    }
}
