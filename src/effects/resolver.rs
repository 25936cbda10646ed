//! Effect resolution - applying one effect to a farm.
//!
//! The resolver is the only place an effect's payload touches farm state.
//! Usage counters are not its concern; `CardInstance` records uses after a
//! successful resolution.

use tracing::trace;

use super::behavior::SpecialBehavior;
use super::effect::EffectDefinition;
use crate::cards::CardDefinition;
use crate::core::{EngineError, FarmState, PaymentPolicy, Result};

/// Applies effects to farm state.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply `effect` of `card` to `state`.
    ///
    /// Order: costs, gains, victory points, special behavior. Every check
    /// runs before the first mutation, so a failed effect leaves `state`
    /// untouched. Costs are checked only under [`PaymentPolicy::Strict`].
    pub fn resolve(
        card: &CardDefinition,
        effect: &EffectDefinition,
        state: &mut FarmState,
        policy: PaymentPolicy,
    ) -> Result<()> {
        let special = match effect.special {
            Some(tag) => Some(SpecialBehavior::lookup(card.id, tag).ok_or_else(|| {
                Self::failure(card, effect, format!("no behavior for {:?} on this card", tag))
            })?),
            None => None,
        };

        if !policy.allows_negative() {
            if let Some((resource, _)) = effect
                .costs
                .iter()
                .find(|(r, _)| state.resource(*r) < effect.costs.amount_of(*r))
            {
                return Err(Self::failure(card, effect, format!("not enough {}", resource)));
            }
        }

        for (resource, amount) in effect.costs.iter() {
            state.withdraw(resource, amount);
        }
        state.add_resources(&effect.gains);
        if effect.victory_points != 0 {
            state.add_victory_points(effect.victory_points);
        }
        if let Some(behavior) = special {
            behavior.apply(state);
        }

        trace!(
            target: "farmyard::effects",
            card = %card.name,
            effect = %effect.id,
            trigger = ?effect.trigger,
            "effect.resolved"
        );
        Ok(())
    }

    fn failure(card: &CardDefinition, effect: &EffectDefinition, reason: String) -> EngineError {
        EngineError::EffectExecutionFailed {
            card: card.name.clone(),
            card_id: card.id,
            effect: effect.id,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{builtin, CardDefinition, CardId};
    use crate::core::{BonusKey, ResourceType};
    use crate::effects::{BehaviorTag, EffectId};
    use crate::triggers::TriggerKind;

    fn workshop_effect() -> EffectDefinition {
        EffectDefinition::new(EffectId::new(1), TriggerKind::HarvestStart)
            .cost(ResourceType::Reed, 1)
            .gain(ResourceType::Food, 3)
    }

    fn plain_card() -> CardDefinition {
        CardDefinition::improvement(CardId::new(50), "Workshop")
    }

    #[test]
    fn test_gains_costs_and_points() {
        let mut state = FarmState::default();
        state.add_resource(ResourceType::Reed, 1);
        let effect = workshop_effect().with_victory_points(1);

        EffectResolver::resolve(&plain_card(), &effect, &mut state, PaymentPolicy::Strict).unwrap();
        assert_eq!(state.resource(ResourceType::Reed), 0);
        assert_eq!(state.resource(ResourceType::Food), 3);
        assert_eq!(state.victory_points(), 1);
    }

    #[test]
    fn test_strict_cost_fails_without_mutation() {
        let mut state = FarmState::default();
        let err = EffectResolver::resolve(&plain_card(), &workshop_effect(), &mut state, PaymentPolicy::Strict)
            .unwrap_err();

        assert!(matches!(err, EngineError::EffectExecutionFailed { .. }));
        assert_eq!(state, FarmState::default());
    }

    #[test]
    fn test_permissive_cost_goes_negative() {
        let mut state = FarmState::default();
        EffectResolver::resolve(&plain_card(), &workshop_effect(), &mut state, PaymentPolicy::AllowNegative)
            .unwrap();

        assert_eq!(state.resource(ResourceType::Reed), -1);
        assert_eq!(state.resource(ResourceType::Food), 3);
    }

    #[test]
    fn test_special_behavior() {
        let card = CardDefinition::occupation(builtin::HEDGE_KEEPER, "Hedge Keeper");
        let effect = EffectDefinition::new(EffectId::new(1), TriggerKind::OnAction)
            .with_special(BehaviorTag::FenceDiscount);
        let mut state = FarmState::default();

        EffectResolver::resolve(&card, &effect, &mut state, PaymentPolicy::Strict).unwrap();
        assert_eq!(state.temp_bonus(BonusKey::FreeFences), 3);
    }

    #[test]
    fn test_unmapped_special_fails_before_gains() {
        let effect = EffectDefinition::new(EffectId::new(4), TriggerKind::OnAction)
            .gain(ResourceType::Wood, 2)
            .with_special(BehaviorTag::BakingBonus);
        let mut state = FarmState::default();

        let err = EffectResolver::resolve(&plain_card(), &effect, &mut state, PaymentPolicy::Strict)
            .unwrap_err();
        match err {
            EngineError::EffectExecutionFailed { effect, card_id, .. } => {
                assert_eq!(effect, EffectId::new(4));
                assert_eq!(card_id, CardId::new(50));
            }
            other => panic!("Expected EffectExecutionFailed, got {:?}", other),
        }
        assert_eq!(state.resource(ResourceType::Wood), 0);
    }
}
