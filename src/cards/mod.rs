//! Card system: definitions, instances, the play contract and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: identifier for card definitions
//! - `CardDefinition`: static card data; `CardKind` is Occupation or Improvement
//! - `CardInstanceId` / `CardInstance`: a player's copy with its usage counters
//! - `CardCatalog`: definition lookup
//!
//! `builtin` holds the base card set.

pub mod builtin;
pub mod catalog;
pub mod definition;
pub mod instance;
pub mod play;

pub use catalog::CardCatalog;
pub use definition::{
    CardDefinition, CardId, CardKind, ImprovementCategory, ImprovementInfo, OccupationInfo,
    OccupationType,
};
pub use instance::{CardInstance, CardInstanceId};
pub use play::play_card;
