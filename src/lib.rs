//! # farmyard-engine
//!
//! Card effect and trigger resolution for a worker-placement farming game.
//!
//! ## Design Principles
//!
//! 1. **Static data, per-copy state**: card and effect definitions never
//!    change after creation. Usage counters live on each owned copy, so
//!    two players owning the same card never share them.
//!
//! 2. **Explicit ownership**: a `GameSession` owns every farm and the
//!    trigger registry. There is no global state; tests build a session
//!    and throw it away.
//!
//! 3. **Deterministic dispatch**: cards fire in registration order per
//!    player, effects in declaration order per card, players in the order
//!    the caller supplies.
//!
//! ## Modules
//!
//! - `core`: players, resources, farms, configuration, errors, session
//! - `cards`: card definitions and instances, the play contract, catalog
//! - `effects`: effects and usage policies, play conditions and costs
//! - `triggers`: trigger kinds, contexts, conditions and the registry
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use farmyard_engine::{builtin, EngineConfig, GameSession, PlayerId, ResourceType};
//!
//! let mut session = GameSession::new(EngineConfig::new(2));
//! let player = PlayerId::new(1);
//! session
//!     .farm_mut(player)
//!     .unwrap()
//!     .state
//!     .add_resource(ResourceType::Food, 1);
//!
//! // The Carpenter grants 2 Wood when played.
//! session.play_card(player, &Arc::new(builtin::carpenter())).unwrap();
//! assert_eq!(session.farm(player).unwrap().state.resource(ResourceType::Wood), 2);
//! assert_eq!(session.registry().registered_count(player), 1);
//! ```

pub mod cards;
pub mod core;
pub mod effects;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    BonusKey, EngineConfig, EngineError, Farm, FarmState, GameSession, PaymentPolicy, PlayerId,
    PlayerMap, ResourceBundle, ResourceType, Result,
};

pub use crate::cards::{
    builtin, CardCatalog, CardDefinition, CardId, CardInstance, CardInstanceId, CardKind,
};

pub use crate::effects::{
    BehaviorTag, EffectDefinition, EffectId, EffectResolver, EffectUsage, PlayCondition, PlayCost,
    SpecialBehavior, UsagePolicy,
};

pub use crate::triggers::{
    ActionCategory, ActionContext, EffectCondition, RegistryStats, TriggerContext, TriggerKind,
    TriggerMatch, TriggerPayload, TriggerRegistry,
};
