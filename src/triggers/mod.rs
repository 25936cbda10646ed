//! Trigger system: kinds, contexts, conditions and the registry.
//!
//! ## Key Components
//!
//! - [`TriggerKind`]: when an effect is eligible to fire
//! - [`TriggerContext`]: a fired trigger with its payload
//! - [`EffectCondition`]: a structured requirement on the payload
//! - [`TriggerRegistry`]: live cards per player, matching and execution
//!
//! ## Dispatch
//!
//! A phase driver fires a kind with a context. The registry walks each
//! player's registered cards in registration order, collects the effects
//! that match, then applies them to the owners' farms. A card whose effect
//! fails is logged and skipped without aborting the batch.
//!
//! ```
//! use std::sync::Arc;
//! use farmyard_engine::cards::{CardDefinition, CardId, CardInstance, CardInstanceId};
//! use farmyard_engine::core::{Farm, PlayerId, PlayerMap, ResourceType};
//! use farmyard_engine::effects::{EffectDefinition, EffectId};
//! use farmyard_engine::triggers::{
//!     ActionCategory, ActionContext, EffectCondition, TriggerContext, TriggerKind, TriggerRegistry,
//! };
//!
//! let player = PlayerId::new(0);
//! let mut farms = PlayerMap::new(1, Farm::new);
//!
//! // "Each time you use a Forest space, gain 1 additional wood."
//! let woodsman = CardDefinition::occupation(CardId::new(1), "Woodsman").with_effect(
//!     EffectDefinition::new(EffectId::new(1), TriggerKind::OnAction)
//!         .gain(ResourceType::Wood, 1)
//!         .with_condition(EffectCondition::legacy("Forest")),
//! );
//! let id = CardInstanceId::new(1);
//! farms[player].add_card(CardInstance::new(id, Arc::new(woodsman)));
//!
//! let mut registry = TriggerRegistry::new();
//! registry.register(&farms, player, id);
//!
//! let clay = TriggerContext::action(player, ActionContext::new("Clay Pit", ActionCategory::Gathering));
//! assert_eq!(registry.trigger_for_player(&mut farms, player, &clay), 0);
//!
//! let forest = TriggerContext::action(player, ActionContext::new("Forest", ActionCategory::Gathering));
//! assert_eq!(registry.trigger_for_player(&mut farms, player, &forest), 1);
//! assert_eq!(farms[player].state.resource(ResourceType::Wood), 1);
//! ```

mod condition;
mod event;
mod registry;

pub use condition::{fuzzy_match, ConditionOp, ContextField, EffectCondition};
pub use event::{
    ActionCategory, ActionContext, HarvestContext, ResourceEvent, TriggerContext, TriggerKind,
    TriggerPayload, HARVEST_SEQUENCE,
};
pub use registry::{RegistryStats, TriggerMatch, TriggerRegistry};
