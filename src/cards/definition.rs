//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its name,
//! tags, effects, play gates and variant payload. Usage counters live on
//! `CardInstance`, never here.

use serde::{Deserialize, Serialize};

use crate::core::{ResourceBundle, ResourceType};
use crate::effects::{EffectDefinition, PlayCondition, PlayCost};
use crate::triggers::{TriggerContext, TriggerKind};

/// Unique identifier for a card definition.
///
/// This identifies the card (e.g. "Clay Oven"), not a copy owned by a
/// player; see [`CardInstanceId`](super::CardInstanceId) for that.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Trade of an occupation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupationType {
    #[default]
    Farmer,
    Gatherer,
    Craftsman,
    Herder,
    Cook,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImprovementCategory {
    Major,
    #[default]
    Minor,
}

/// Occupation payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationInfo {
    pub occupation_type: OccupationType,
    /// Resources paid on top of any `PlayCost` (older card data).
    pub flat_cost: ResourceBundle,
}

/// Improvement payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementInfo {
    pub category: ImprovementCategory,
    /// At most one copy per farm.
    pub unique: bool,
    /// Points granted when played.
    pub victory_points: i32,
    /// Resource-to-food conversion ratios installed when played.
    pub cooking: Vec<(ResourceType, u32)>,
    /// Storage capacity installed when played.
    pub storage: Vec<(ResourceType, u32)>,
}

/// Card variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Occupation(OccupationInfo),
    Improvement(ImprovementInfo),
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use farmyard_engine::cards::{CardDefinition, CardId};
/// use farmyard_engine::core::ResourceType;
/// use farmyard_engine::effects::{EffectDefinition, EffectId, PlayCost};
/// use farmyard_engine::triggers::TriggerKind;
///
/// let oven = CardDefinition::major_improvement(CardId::new(2002), "Clay Oven")
///     .with_cost(PlayCost::new().resource(ResourceType::Clay, 3).resource(ResourceType::Stone, 1))
///     .with_victory_points(2)
///     .with_cooking(ResourceType::Grain, 5)
///     .with_tag("baking");
///
/// assert!(oven.is_improvement());
/// assert!(oven.is_unique());
/// assert_eq!(oven.victory_points(), 2);
/// assert!(oven.has_tag("baking"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name. Duplicate checks compare names.
    pub name: String,

    pub tags: Vec<String>,

    /// Effects in declaration order. Instances index into this list.
    pub effects: Vec<EffectDefinition>,

    /// Every condition must hold to play the card.
    pub conditions: Vec<PlayCondition>,

    /// Every cost is paid when the card is played.
    pub costs: Vec<PlayCost>,

    pub kind: CardKind,
}

impl CardDefinition {
    fn with_kind(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            tags: Vec::new(),
            effects: Vec::new(),
            conditions: Vec::new(),
            costs: Vec::new(),
            kind,
        }
    }

    /// Create an occupation.
    #[must_use]
    pub fn occupation(id: CardId, name: impl Into<String>) -> Self {
        Self::with_kind(id, name, CardKind::Occupation(OccupationInfo::default()))
    }

    /// Create a minor, non-unique improvement.
    #[must_use]
    pub fn improvement(id: CardId, name: impl Into<String>) -> Self {
        Self::with_kind(id, name, CardKind::Improvement(ImprovementInfo::default()))
    }

    /// Create a unique major improvement.
    #[must_use]
    pub fn major_improvement(id: CardId, name: impl Into<String>) -> Self {
        Self::with_kind(
            id,
            name,
            CardKind::Improvement(ImprovementInfo {
                category: ImprovementCategory::Major,
                unique: true,
                ..ImprovementInfo::default()
            }),
        )
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: EffectDefinition) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: PlayCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: PlayCost) -> Self {
        self.costs.push(cost);
        self
    }

    // Variant builders leave the other variant untouched.

    /// Set the trade. Occupations only.
    #[must_use]
    pub fn with_occupation_type(mut self, occupation_type: OccupationType) -> Self {
        if let CardKind::Occupation(info) = &mut self.kind {
            info.occupation_type = occupation_type;
        }
        self
    }

    /// Add to the flat cost. Occupations only.
    #[must_use]
    pub fn with_flat_cost(mut self, resource: ResourceType, amount: i32) -> Self {
        if let CardKind::Occupation(info) = &mut self.kind {
            info.flat_cost.push(resource, amount);
        }
        self
    }

    /// Improvements only.
    #[must_use]
    pub fn with_victory_points(mut self, points: i32) -> Self {
        if let CardKind::Improvement(info) = &mut self.kind {
            info.victory_points = points;
        }
        self
    }

    /// Install a cooking ratio when played. Improvements only.
    #[must_use]
    pub fn with_cooking(mut self, resource: ResourceType, ratio: u32) -> Self {
        if let CardKind::Improvement(info) = &mut self.kind {
            info.cooking.push((resource, ratio));
        }
        self
    }

    /// Install storage capacity when played. Improvements only.
    #[must_use]
    pub fn with_storage(mut self, resource: ResourceType, capacity: u32) -> Self {
        if let CardKind::Improvement(info) = &mut self.kind {
            info.storage.push((resource, capacity));
        }
        self
    }

    // === Queries ===

    #[must_use]
    pub fn is_occupation(&self) -> bool {
        matches!(self.kind, CardKind::Occupation(_))
    }

    #[must_use]
    pub fn is_improvement(&self) -> bool {
        matches!(self.kind, CardKind::Improvement(_))
    }

    #[must_use]
    pub fn is_unique(&self) -> bool {
        matches!(&self.kind, CardKind::Improvement(info) if info.unique)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Points granted when played.
    #[must_use]
    pub fn victory_points(&self) -> i32 {
        match &self.kind {
            CardKind::Improvement(info) => info.victory_points,
            CardKind::Occupation(_) => 0,
        }
    }

    /// Indices of effects declared for `kind`.
    pub fn effects_for(&self, kind: TriggerKind) -> impl Iterator<Item = usize> + '_ {
        self.effects
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.trigger == kind)
            .map(|(i, _)| i)
    }

    /// Does the effect's own condition accept `ctx`?
    ///
    /// An effect without a condition always passes. When the payload lacks
    /// the field the condition reads, action-timed effects fail and every
    /// other kind passes.
    #[must_use]
    pub fn condition_holds(&self, effect: &EffectDefinition, ctx: &TriggerContext) -> bool {
        let Some(condition) = &effect.condition else {
            return true;
        };
        let action_timed = effect.trigger == TriggerKind::OnAction;
        match &self.kind {
            CardKind::Occupation(_) | CardKind::Improvement(_) => {
                condition.evaluate(&ctx.payload).unwrap_or(!action_timed)
            }
        }
    }
}
