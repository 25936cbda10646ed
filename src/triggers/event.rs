//! Trigger kinds and dispatch contexts.
//!
//! A phase driver fires a `TriggerKind` at a fixed point of the game and
//! hands the registry a `TriggerContext` describing what happened. The
//! payload is a closed set of shapes so conditions can inspect it by
//! matching instead of guessing at its type.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, ResourceType};

/// When an effect is eligible to fire.
///
/// An effect fires only for the exact kind it declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    /// When the card is played.
    Immediate,
    /// When the owner takes an action.
    OnAction,
    /// During the harvest, after the harvest starts.
    OnHarvest,
    /// After animals breed.
    OnBreeding,
    /// At the end of the owner's turn.
    OnTurnEnd,
    /// At the start of each round.
    OnRoundStart,
    /// Never dispatched; marks always-on effects.
    Passive,
    BeforeHarvest,
    HarvestStart,
    FieldPhase,
    FeedingPhase,
    BreedingPhase,
    HarvestEnd,
}

impl TriggerKind {
    /// All trigger kinds.
    pub const ALL: [TriggerKind; 13] = [
        TriggerKind::Immediate,
        TriggerKind::OnAction,
        TriggerKind::OnHarvest,
        TriggerKind::OnBreeding,
        TriggerKind::OnTurnEnd,
        TriggerKind::OnRoundStart,
        TriggerKind::Passive,
        TriggerKind::BeforeHarvest,
        TriggerKind::HarvestStart,
        TriggerKind::FieldPhase,
        TriggerKind::FeedingPhase,
        TriggerKind::BreedingPhase,
        TriggerKind::HarvestEnd,
    ];

    /// Is this kind dispatched during the harvest?
    #[must_use]
    pub fn is_harvest(self) -> bool {
        HARVEST_SEQUENCE.contains(&self)
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Kinds fired by a full harvest, in firing order.
pub const HARVEST_SEQUENCE: [TriggerKind; 8] = [
    TriggerKind::BeforeHarvest,
    TriggerKind::HarvestStart,
    TriggerKind::OnHarvest,
    TriggerKind::FieldPhase,
    TriggerKind::FeedingPhase,
    TriggerKind::BreedingPhase,
    TriggerKind::OnBreeding,
    TriggerKind::HarvestEnd,
];

/// Category of an action space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    /// Take accumulated building resources.
    Gathering,
    /// Plow, sow, take grain or vegetables.
    Farming,
    /// Rooms, stables, fences, renovation.
    Building,
    /// Family growth.
    Family,
    /// Take animals.
    Animals,
    /// Play an improvement.
    Improvement,
    /// Play an occupation.
    Occupation,
    /// Starting player, traveling players, and the rest.
    Special,
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// The action space a player just used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionContext {
    pub name: String,
    pub category: ActionCategory,
}

impl ActionContext {
    #[must_use]
    pub fn new(name: impl Into<String>, category: ActionCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Resources moving into a farm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEvent {
    pub resource: ResourceType,
    pub amount: i32,
    /// Where the resources came from (action space or card name).
    pub source: String,
}

impl ResourceEvent {
    #[must_use]
    pub fn new(resource: ResourceType, amount: i32, source: impl Into<String>) -> Self {
        Self {
            resource,
            amount,
            source: source.into(),
        }
    }
}

/// Harvest bookkeeping passed to harvest-phase triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestContext {
    pub round: u32,
}

/// What a trigger carries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerPayload {
    #[default]
    None,
    /// An action space was used.
    Action(ActionContext),
    /// Resources were taken from an action space.
    Take(ResourceEvent),
    /// Resources were received from any source.
    Receive(ResourceEvent),
    /// A harvest phase.
    Harvest(HarvestContext),
}

/// A fired trigger: kind, triggering player, payload and an optional
/// free-text filter applied to effect conditions.
///
/// ```
/// use farmyard_engine::core::PlayerId;
/// use farmyard_engine::triggers::{ActionCategory, ActionContext, TriggerContext, TriggerKind};
///
/// let ctx = TriggerContext::action(
///     PlayerId::new(1),
///     ActionContext::new("Forest", ActionCategory::Gathering),
/// );
/// assert_eq!(ctx.kind, TriggerKind::OnAction);
/// assert_eq!(ctx.condition_filter(), "");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerContext {
    pub kind: TriggerKind,
    pub player: PlayerId,
    pub payload: TriggerPayload,
    pub condition: Option<String>,
}

impl TriggerContext {
    /// A context with no payload.
    #[must_use]
    pub fn new(kind: TriggerKind, player: PlayerId) -> Self {
        Self {
            kind,
            player,
            payload: TriggerPayload::None,
            condition: None,
        }
    }

    /// An `OnAction` context.
    #[must_use]
    pub fn action(player: PlayerId, action: ActionContext) -> Self {
        Self::new(TriggerKind::OnAction, player).with_payload(TriggerPayload::Action(action))
    }

    /// A harvest-phase context.
    #[must_use]
    pub fn harvest(kind: TriggerKind, player: PlayerId, round: u32) -> Self {
        Self::new(kind, player).with_payload(TriggerPayload::Harvest(HarvestContext { round }))
    }

    /// The same event, triggered by `player`.
    #[must_use]
    pub fn for_player(&self, player: PlayerId) -> Self {
        Self {
            player,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: TriggerPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Set the free-text filter (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// The free-text filter, or `""`.
    #[must_use]
    pub fn condition_filter(&self) -> &str {
        self.condition.as_deref().unwrap_or("")
    }

    /// The action payload, if any.
    #[must_use]
    pub fn action_context(&self) -> Option<&ActionContext> {
        match &self.payload {
            TriggerPayload::Action(action) => Some(action),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harvest_sequence() {
        assert_eq!(HARVEST_SEQUENCE.first(), Some(&TriggerKind::BeforeHarvest));
        assert_eq!(HARVEST_SEQUENCE.last(), Some(&TriggerKind::HarvestEnd));
        assert!(TriggerKind::FeedingPhase.is_harvest());
        assert!(TriggerKind::OnHarvest.is_harvest());
        assert!(!TriggerKind::OnAction.is_harvest());
        assert!(!TriggerKind::Passive.is_harvest());
    }

    #[test]
    fn test_display() {
        assert_eq!(TriggerKind::HarvestStart.to_string(), "HarvestStart");
        assert_eq!(ActionCategory::Farming.to_string(), "Farming");
    }

    #[test]
    fn test_context_builders() {
        let ctx = TriggerContext::harvest(TriggerKind::FieldPhase, PlayerId::new(0), 4)
            .with_condition("Grain");

        assert_eq!(ctx.kind, TriggerKind::FieldPhase);
        assert_eq!(ctx.payload, TriggerPayload::Harvest(HarvestContext { round: 4 }));
        assert_eq!(ctx.condition_filter(), "Grain");
        assert!(ctx.action_context().is_none());
    }

    #[test]
    fn test_for_player_keeps_event() {
        let ctx = TriggerContext::harvest(TriggerKind::HarvestEnd, PlayerId::new(0), 7).with_condition("Food");
        let seat = ctx.for_player(PlayerId::new(2));

        assert_eq!(seat.player, PlayerId::new(2));
        assert_eq!(seat.kind, ctx.kind);
        assert_eq!(seat.payload, ctx.payload);
        assert_eq!(seat.condition_filter(), "Food");
    }

    #[test]
    fn test_context_serialization() {
        let ctx = TriggerContext::action(
            PlayerId::new(2),
            ActionContext::new("Grain Seeds", ActionCategory::Farming),
        );

        let json = serde_json::to_string(&ctx).unwrap();
        let deserialized: TriggerContext = serde_json::from_str(&json).unwrap();
        assert_eq!(ctx, deserialized);
    }
}
