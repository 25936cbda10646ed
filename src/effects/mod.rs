//! Effect system: what a card does and what it takes to play it.
//!
//! - `EffectDefinition`: one atomic effect bound to one trigger kind
//! - `EffectUsage`: per-instance usage counter checked against a `UsagePolicy`
//! - `PlayCondition` / `PlayCost`: gates on acquiring a card
//! - `BehaviorTag` / `SpecialBehavior`: card-specific bonuses from a fixed table
//! - `EffectResolver`: applies an effect to a farm
//!
//! Definitions are static data shared between every instance of a card.
//! Nothing in this module mutates a definition.

mod behavior;
mod condition;
mod cost;
mod effect;
mod resolver;

pub use behavior::{BehaviorTag, SpecialBehavior};
pub use condition::PlayCondition;
pub use cost::PlayCost;
pub use effect::{EffectDefinition, EffectId, EffectUsage, UsagePolicy};
pub use resolver::EffectResolver;
