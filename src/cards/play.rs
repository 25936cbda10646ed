//! The play contract: checking and acquiring a card.
//!
//! Playing a card runs these steps in order:
//! 1. pay every declared cost (and the occupation flat cost)
//! 2. add the card to the owner's collection
//! 3. apply every `Immediate` effect
//! 4. register the card for trigger dispatch
//! 5. grant the card's victory points
//! 6. install cooking and storage capabilities

use std::sync::Arc;

use tracing::{debug, warn};

use super::definition::{CardDefinition, CardKind};
use super::instance::{CardInstance, CardInstanceId};
use crate::core::{EngineError, Farm, PlayerId, PlayerMap, Result};
use crate::triggers::{TriggerContext, TriggerKind, TriggerRegistry};

impl CardDefinition {
    /// Check whether `farm` may play this card.
    ///
    /// Occupations fail when the farm already owns one with the same name.
    /// Unique improvements fail when the farm already owns one with the
    /// same name. Then every condition must hold and every cost be
    /// payable; costs are checked cumulatively, so two costs of 2 Wood
    /// need 4 Wood.
    pub fn check_playable(&self, farm: &Farm) -> Result<()> {
        match &self.kind {
            CardKind::Occupation(_) if farm.has_occupation_named(&self.name) => {
                return Err(EngineError::precondition(&self.name, "occupation already owned"));
            }
            CardKind::Improvement(info) if info.unique && farm.has_improvement_named(&self.name) => {
                return Err(EngineError::precondition(&self.name, "unique improvement already owned"));
            }
            _ => {}
        }

        for condition in &self.conditions {
            if let Some(reason) = condition.unmet(farm) {
                return Err(EngineError::precondition(&self.name, reason));
            }
        }

        let mut scratch = farm.state.clone();
        for cost in &self.costs {
            if !cost.can_pay(&scratch) {
                return Err(EngineError::precondition(&self.name, "cannot pay play cost"));
            }
            cost.pay(&mut scratch);
        }
        if let CardKind::Occupation(info) = &self.kind {
            if !scratch.covers(&info.flat_cost) {
                return Err(EngineError::precondition(&self.name, "cannot pay flat cost"));
            }
        }
        Ok(())
    }

    /// Can `farm` play this card?
    #[must_use]
    pub fn can_play(&self, farm: &Farm) -> bool {
        self.check_playable(farm).is_ok()
    }
}

/// Play `definition` for `player` as instance `id`.
///
/// Fails fast with `PreconditionFailed` when the card cannot be played,
/// and with `InvalidInput` when `player` is unknown or already owns an
/// instance `id`; either way nothing changes. A failing `Immediate` effect
/// is logged and does not undo the play.
pub fn play_card(
    definition: &Arc<CardDefinition>,
    id: CardInstanceId,
    player: PlayerId,
    farms: &mut PlayerMap<Farm>,
    registry: &mut TriggerRegistry,
) -> Result<CardInstanceId> {
    let policy = registry.policy();
    let farm = farms
        .try_get_mut(player)
        .ok_or_else(|| EngineError::invalid_input(format!("no farm for {}", player)))?;
    if farm.card(id).is_some() {
        return Err(EngineError::invalid_input(format!("{} already owns {}", player, id)));
    }
    definition.check_playable(farm)?;

    for cost in &definition.costs {
        cost.pay(&mut farm.state);
    }
    if let CardKind::Occupation(info) = &definition.kind {
        for (resource, amount) in info.flat_cost.iter() {
            farm.state.withdraw(resource, amount);
        }
    }

    farm.add_card(CardInstance::new(id, Arc::clone(definition)));

    let ctx = TriggerContext::new(TriggerKind::Immediate, player);
    if let Some((card, state)) = farm.card_and_state_mut(id) {
        if let Err(err) = card.trigger_effect(state, &ctx, policy) {
            warn!(target: "farmyard::cards", %player, card = %definition.name, error = %err, "immediate effect failed");
        }
    }

    registry.register(farms, player, id);

    let state = &mut farms[player].state;
    let points = definition.victory_points();
    if points != 0 {
        state.add_victory_points(points);
    }
    if let CardKind::Improvement(info) = &definition.kind {
        if !info.cooking.is_empty() {
            state.add_cooking_facility(definition.id);
        }
        for &(resource, ratio) in &info.cooking {
            state.add_cooking_ability(resource, ratio);
        }
        for &(resource, capacity) in &info.storage {
            state.add_storage_capacity(resource, capacity);
        }
    }

    debug!(target: "farmyard::cards", %player, card = %definition.name, instance = %id, "card.played");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::ResourceType;
    use crate::effects::{EffectDefinition, EffectId, PlayCondition, PlayCost, UsagePolicy};

    const P0: PlayerId = PlayerId::new(0);

    fn farms() -> PlayerMap<Farm> {
        PlayerMap::new(2, Farm::new)
    }

    #[test]
    fn test_duplicate_occupation_rejected() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let card = Arc::new(CardDefinition::occupation(CardId::new(1), "Carpenter"));

        play_card(&card, CardInstanceId::new(1), P0, &mut farms, &mut registry).unwrap();
        let err = play_card(&card, CardInstanceId::new(2), P0, &mut farms, &mut registry).unwrap_err();
        assert!(matches!(err, EngineError::PreconditionFailed { .. }));
        assert_eq!(farms[P0].card_count(), 1);
    }

    #[test]
    fn test_reused_instance_id_rejected() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let lumberjack = Arc::new(
            CardDefinition::occupation(CardId::new(1), "Lumberjack").with_effect(
                EffectDefinition::new(EffectId::new(1), TriggerKind::Immediate)
                    .gain(ResourceType::Wood, 2)
                    .with_usage(UsagePolicy::Once),
            ),
        );
        let cook = Arc::new(
            CardDefinition::occupation(CardId::new(2), "Cook").with_effect(
                EffectDefinition::new(EffectId::new(1), TriggerKind::Immediate).gain(ResourceType::Food, 3),
            ),
        );
        let id = CardInstanceId::new(1);

        play_card(&lumberjack, id, P0, &mut farms, &mut registry).unwrap();
        let before = farms[P0].state.clone();

        let err = play_card(&cook, id, P0, &mut farms, &mut registry).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
        assert_eq!(farms[P0].state, before);
        assert_eq!(farms[P0].card_count(), 1);
        assert_eq!(farms[P0].card(id).unwrap().name(), "Lumberjack");
        assert_eq!(registry.registered_count(P0), 1);

        // The same id is free on another farm.
        play_card(&cook, id, PlayerId::new(1), &mut farms, &mut registry).unwrap();
        assert_eq!(farms[PlayerId::new(1)].state.resource(ResourceType::Food), 3);
    }

    #[test]
    fn test_unique_improvement() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let well = Arc::new(CardDefinition::major_improvement(CardId::new(1), "Well"));
        let pot = Arc::new(CardDefinition::improvement(CardId::new(2), "Pot"));

        play_card(&well, CardInstanceId::new(1), P0, &mut farms, &mut registry).unwrap();
        assert!(!well.can_play(&farms[P0]));

        play_card(&pot, CardInstanceId::new(2), P0, &mut farms, &mut registry).unwrap();
        assert!(pot.can_play(&farms[P0]));
    }

    #[test]
    fn test_costs_checked_cumulatively() {
        let mut farm = Farm::new(P0);
        farm.state.add_resource(ResourceType::Wood, 3);
        let card = CardDefinition::improvement(CardId::new(1), "Double")
            .with_cost(PlayCost::new().resource(ResourceType::Wood, 2))
            .with_cost(PlayCost::new().resource(ResourceType::Wood, 2));

        assert!(!card.can_play(&farm));
        farm.state.add_resource(ResourceType::Wood, 1);
        assert!(card.can_play(&farm));
    }

    #[test]
    fn test_flat_cost() {
        let mut farm = Farm::new(P0);
        let card = CardDefinition::occupation(CardId::new(1), "Tutor").with_flat_cost(ResourceType::Food, 1);
        assert_eq!(
            card.check_playable(&farm),
            Err(EngineError::precondition("Tutor", "cannot pay flat cost"))
        );
        farm.state.add_resource(ResourceType::Food, 1);
        assert!(card.can_play(&farm));
    }

    #[test]
    fn test_condition_reason() {
        let farm = Farm::new(P0);
        let card = CardDefinition::occupation(CardId::new(1), "Shepherd")
            .with_condition(PlayCondition::new().min_pastures(1));
        assert_eq!(
            card.check_playable(&farm),
            Err(EngineError::precondition("Shepherd", "needs 1 pastures"))
        );
    }

    #[test]
    fn test_play_steps() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        farms[P0].state.add_resource(ResourceType::Clay, 2);
        let fireplace = Arc::new(
            CardDefinition::major_improvement(CardId::new(2001), "Fireplace")
                .with_cost(PlayCost::new().resource(ResourceType::Clay, 2))
                .with_victory_points(1)
                .with_cooking(ResourceType::Vegetable, 2)
                .with_storage(ResourceType::Grain, 4)
                .with_effect(
                    EffectDefinition::new(EffectId::new(1), TriggerKind::Immediate).gain(ResourceType::Food, 2),
                ),
        );

        let id = play_card(&fireplace, CardInstanceId::new(9), P0, &mut farms, &mut registry).unwrap();
        let state = &farms[P0].state;
        assert_eq!(state.resource(ResourceType::Clay), 0);
        assert_eq!(state.resource(ResourceType::Food), 2);
        assert_eq!(state.victory_points(), 1);
        assert_eq!(state.cooking_ratio(ResourceType::Vegetable), 2);
        assert_eq!(state.cooking_facilities(), &[CardId::new(2001)]);
        assert_eq!(state.storage_capacity(ResourceType::Grain), 4);
        assert!(registry.is_registered(P0, id));
    }

    #[test]
    fn test_unknown_player() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let card = Arc::new(CardDefinition::occupation(CardId::new(1), "Anyone"));
        let err = play_card(&card, CardInstanceId::new(1), PlayerId::new(5), &mut farms, &mut registry)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }
}
