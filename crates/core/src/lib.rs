pub mod booking;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod shop;

pub use booking::{RandomSource, ReservationStore, ThreadRngSource};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions};
pub use domain::{AgentReply, ConversationMessage, ReservationDraft, Role};
pub use errors::BookingError;
pub use fixtures::{FixtureError, FixtureStore};
pub use shop::ShopCatalog;
