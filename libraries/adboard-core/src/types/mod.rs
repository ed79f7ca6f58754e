//! Domain types for Adboard entities

mod ad;
mod display;
mod ids;
mod playlist;
mod user;

pub use ad::{Ad, CreateAd, UpdateAd};
pub use display::{CreateDisplay, Display, DisplayKind, UpdateDisplay};
pub use ids::{AdId, DisplayId, UserId};
pub use playlist::{AdOverride, OverridePatch, PlaylistLink};
pub use user::User;
