/// API route modules
pub mod ads;
pub mod auth;
pub mod displays;
pub mod health;
pub mod playlist;
pub mod realtime;
