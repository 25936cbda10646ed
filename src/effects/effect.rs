//! Effect definitions and usage tracking.
//!
//! An `EffectDefinition` is static card data: when it fires, what it
//! gains and costs, and how often it may fire. The mutable side lives in
//! `EffectUsage`, held per card instance, so two players owning the same
//! card never share counters.

use serde::{Deserialize, Serialize};

use super::behavior::BehaviorTag;
use crate::core::{ResourceBundle, ResourceType};
use crate::triggers::{EffectCondition, TriggerKind};

/// Identifier of an effect within its card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

impl EffectId {
    /// Create a new effect ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

/// How often an effect may fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsagePolicy {
    /// No limit.
    #[default]
    Unlimited,
    /// At most N times between usage resets (round boundaries).
    PerRound(u32),
    /// Once for the lifetime of the card instance. Never reset.
    Once,
}

/// Per-instance usage counter for one effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectUsage {
    uses: u32,
}

impl EffectUsage {
    /// Times the effect fired since the last reset (lifetime for `Once`).
    #[must_use]
    pub fn uses(self) -> u32 {
        self.uses
    }

    /// Can the effect fire again under `policy`?
    #[must_use]
    pub fn can_activate(self, policy: UsagePolicy) -> bool {
        match policy {
            UsagePolicy::Unlimited => true,
            UsagePolicy::PerRound(limit) => self.uses < limit,
            UsagePolicy::Once => self.uses == 0,
        }
    }

    /// Count one activation.
    ///
    /// Returns `false` without counting if the policy forbids another use.
    pub fn record_use(&mut self, policy: UsagePolicy) -> bool {
        if !self.can_activate(policy) {
            return false;
        }
        self.uses = self.uses.saturating_add(1);
        true
    }

    /// Clear the counter. `Once` effects keep theirs.
    pub fn reset(&mut self, policy: UsagePolicy) {
        if policy != UsagePolicy::Once {
            self.uses = 0;
        }
    }
}

/// One atomic card effect.
///
/// ## Example
///
/// ```
/// use farmyard_engine::core::ResourceType;
/// use farmyard_engine::effects::{EffectDefinition, EffectId, UsagePolicy};
/// use farmyard_engine::triggers::{EffectCondition, TriggerKind};
///
/// // "Each time you use a Forest space, gain 1 additional wood."
/// let effect = EffectDefinition::new(EffectId::new(1), TriggerKind::OnAction)
///     .gain(ResourceType::Wood, 1)
///     .with_condition(EffectCondition::legacy("Forest"))
///     .with_usage(UsagePolicy::PerRound(1));
///
/// assert_eq!(effect.gains.amount_of(ResourceType::Wood), 1);
/// assert_eq!(effect.condition_text(), "Forest");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDefinition {
    /// Identifier within the owning card.
    pub id: EffectId,

    /// The only trigger kind this effect responds to.
    pub trigger: TriggerKind,

    /// Resources added when the effect fires.
    pub gains: ResourceBundle,

    /// Resources removed when the effect fires.
    pub costs: ResourceBundle,

    /// Victory point delta.
    pub victory_points: i32,

    /// Extra requirement on the trigger context.
    pub condition: Option<EffectCondition>,

    /// Card-specific behavior resolved through the behavior table.
    pub special: Option<BehaviorTag>,

    /// How often the effect may fire.
    pub usage: UsagePolicy,
}

impl EffectDefinition {
    /// Create an effect with no payload.
    #[must_use]
    pub fn new(id: EffectId, trigger: TriggerKind) -> Self {
        Self {
            id,
            trigger,
            gains: ResourceBundle::new(),
            costs: ResourceBundle::new(),
            victory_points: 0,
            condition: None,
            special: None,
            usage: UsagePolicy::Unlimited,
        }
    }

    /// Add a resource gain (builder pattern).
    #[must_use]
    pub fn gain(mut self, resource: ResourceType, amount: i32) -> Self {
        self.gains.push(resource, amount);
        self
    }

    /// Add a resource cost (builder pattern).
    #[must_use]
    pub fn cost(mut self, resource: ResourceType, amount: i32) -> Self {
        self.costs.push(resource, amount);
        self
    }

    /// Set the victory point delta (builder pattern).
    #[must_use]
    pub fn with_victory_points(mut self, points: i32) -> Self {
        self.victory_points = points;
        self
    }

    /// Set the context condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: EffectCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set the special behavior tag (builder pattern).
    #[must_use]
    pub fn with_special(mut self, tag: BehaviorTag) -> Self {
        self.special = Some(tag);
        self
    }

    /// Set the usage policy (builder pattern).
    #[must_use]
    pub fn with_usage(mut self, usage: UsagePolicy) -> Self {
        self.usage = usage;
        self
    }

    /// The declared condition value, or `""` when there is none.
    #[must_use]
    pub fn condition_text(&self) -> &str {
        self.condition.as_ref().map_or("", |c| c.value.as_str())
    }
}
