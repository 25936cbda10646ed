//! Core engine types: players, resources, farms, configuration, errors and
//! the game session.
//!
//! The farm is the player-side collaborator of the card engine; the
//! session owns one farm per seat plus the trigger registry.

pub mod config;
pub mod error;
pub mod farm;
pub mod player;
pub mod resource;
pub mod session;

pub use config::{EngineConfig, PaymentPolicy};
pub use error::{EngineError, Result};
pub use farm::{BonusKey, Farm, FarmState};
pub use player::{PlayerId, PlayerMap};
pub use resource::{ResourceBundle, ResourceType};
pub use session::GameSession;
