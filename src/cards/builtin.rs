//! Built-in card set.
//!
//! A small base deck of occupations and improvements. The IDs are public
//! because the special behavior table is keyed by them.

use crate::core::ResourceType;
use crate::effects::{BehaviorTag, EffectDefinition, EffectId, PlayCondition, PlayCost, UsagePolicy};
use crate::triggers::{ActionCategory, EffectCondition, TriggerKind};

use super::catalog::CardCatalog;
use super::definition::{CardDefinition, CardId, OccupationType};

// Occupations
pub const WOOD_CUTTER: CardId = CardId::new(1001);
pub const SEASONAL_WORKER: CardId = CardId::new(1002);
pub const FIREWOOD_COLLECTOR: CardId = CardId::new(1003);
pub const HEDGE_KEEPER: CardId = CardId::new(1004);
pub const CARPENTER: CardId = CardId::new(1005);
pub const ANIMAL_TAMER: CardId = CardId::new(1006);
pub const FIELD_WATCHMAN: CardId = CardId::new(1007);
pub const STABLEHAND: CardId = CardId::new(1008);

// Improvements
pub const FIREPLACE: CardId = CardId::new(2001);
pub const CLAY_OVEN: CardId = CardId::new(2002);
pub const WELL: CardId = CardId::new(2003);
pub const GRANARY: CardId = CardId::new(2004);
pub const BASKETMAKERS_WORKSHOP: CardId = CardId::new(2005);
pub const JOINERY: CardId = CardId::new(2006);
pub const CORN_SCOOP: CardId = CardId::new(2007);

fn effect(id: u32, trigger: TriggerKind) -> EffectDefinition {
    EffectDefinition::new(EffectId::new(id), trigger)
}

/// +1 Wood on every Forest action.
#[must_use]
pub fn wood_cutter() -> CardDefinition {
    CardDefinition::occupation(WOOD_CUTTER, "Wood Cutter")
        .with_occupation_type(OccupationType::Gatherer)
        .with_tag("wood")
        .with_effect(
            effect(1, TriggerKind::OnAction)
                .gain(ResourceType::Wood, 1)
                .with_condition(EffectCondition::legacy("Forest")),
        )
}

/// +1 Grain on the Day Laborer space, once per round.
#[must_use]
pub fn seasonal_worker() -> CardDefinition {
    CardDefinition::occupation(SEASONAL_WORKER, "Seasonal Worker")
        .with_effect(
            effect(1, TriggerKind::OnAction)
                .gain(ResourceType::Grain, 1)
                .with_condition(EffectCondition::action_named("Day Laborer"))
                .with_usage(UsagePolicy::PerRound(1)),
        )
}

/// Extra wood whenever a farming action is taken.
#[must_use]
pub fn firewood_collector() -> CardDefinition {
    CardDefinition::occupation(FIREWOOD_COLLECTOR, "Firewood Collector")
        .with_occupation_type(OccupationType::Gatherer)
        .with_tag("wood")
        .with_effect(
            effect(1, TriggerKind::OnAction)
                .with_condition(EffectCondition::action_category(ActionCategory::Farming))
                .with_special(BehaviorTag::ExtraWood),
        )
}

/// Free fences when building fences, once per round.
#[must_use]
pub fn hedge_keeper() -> CardDefinition {
    CardDefinition::occupation(HEDGE_KEEPER, "Hedge Keeper")
        .with_occupation_type(OccupationType::Herder)
        .with_effect(
            effect(1, TriggerKind::OnAction)
                .with_condition(EffectCondition::action_named("Fences"))
                .with_special(BehaviorTag::FenceDiscount)
                .with_usage(UsagePolicy::PerRound(1)),
        )
}

/// 2 Wood once on play; a room discount on every building action.
#[must_use]
pub fn carpenter() -> CardDefinition {
    CardDefinition::occupation(CARPENTER, "Carpenter")
        .with_occupation_type(OccupationType::Craftsman)
        .with_flat_cost(ResourceType::Food, 1)
        .with_effect(
            effect(1, TriggerKind::Immediate)
                .gain(ResourceType::Wood, 2)
                .with_usage(UsagePolicy::Once),
        )
        .with_effect(
            effect(2, TriggerKind::OnAction)
                .with_condition(EffectCondition::action_category(ActionCategory::Building))
                .with_special(BehaviorTag::RoomDiscount),
        )
}

#[must_use]
pub fn animal_tamer() -> CardDefinition {
    CardDefinition::occupation(ANIMAL_TAMER, "Animal Tamer")
        .with_occupation_type(OccupationType::Herder)
        .with_condition(PlayCondition::new().min_pastures(1))
        .with_effect(
            effect(1, TriggerKind::BreedingPhase)
                .with_special(BehaviorTag::AnimalCapacity)
                .with_usage(UsagePolicy::PerRound(1)),
        )
}

#[must_use]
pub fn field_watchman() -> CardDefinition {
    CardDefinition::occupation(FIELD_WATCHMAN, "Field Watchman")
        .with_condition(PlayCondition::new().min_fields(1))
        .with_effect(
            effect(1, TriggerKind::FieldPhase)
                .with_special(BehaviorTag::ExtraGrain)
                .with_usage(UsagePolicy::PerRound(1)),
        )
}

#[must_use]
pub fn stablehand() -> CardDefinition {
    CardDefinition::occupation(STABLEHAND, "Stablehand")
        .with_occupation_type(OccupationType::Herder)
        .with_effect(effect(1, TriggerKind::OnBreeding).gain(ResourceType::Food, 1))
}

#[must_use]
pub fn fireplace() -> CardDefinition {
    CardDefinition::major_improvement(FIREPLACE, "Fireplace")
        .with_tag("cooking")
        .with_cost(PlayCost::new().resource(ResourceType::Clay, 2))
        .with_victory_points(1)
        .with_cooking(ResourceType::Vegetable, 2)
        .with_cooking(ResourceType::Sheep, 2)
        .with_cooking(ResourceType::Boar, 2)
        .with_cooking(ResourceType::Cattle, 3)
}

#[must_use]
pub fn clay_oven() -> CardDefinition {
    CardDefinition::major_improvement(CLAY_OVEN, "Clay Oven")
        .with_tag("baking")
        .with_cost(
            PlayCost::new()
                .resource(ResourceType::Clay, 3)
                .resource(ResourceType::Stone, 1),
        )
        .with_victory_points(2)
        .with_cooking(ResourceType::Grain, 5)
        .with_effect(
            effect(1, TriggerKind::Immediate)
                .with_special(BehaviorTag::BakingBonus)
                .with_usage(UsagePolicy::Once),
        )
}

/// 1 Food at the start of every round.
#[must_use]
pub fn well() -> CardDefinition {
    CardDefinition::major_improvement(WELL, "Well")
        .with_cost(
            PlayCost::new()
                .resource(ResourceType::Wood, 1)
                .resource(ResourceType::Stone, 3),
        )
        .with_victory_points(4)
        .with_effect(effect(1, TriggerKind::OnRoundStart).gain(ResourceType::Food, 1))
}

#[must_use]
pub fn granary() -> CardDefinition {
    CardDefinition::improvement(GRANARY, "Granary")
        .with_cost(PlayCost::new().resource(ResourceType::Wood, 3))
        .with_victory_points(1)
        .with_storage(ResourceType::Grain, 8)
        .with_effect(
            effect(1, TriggerKind::HarvestEnd)
                .gain(ResourceType::Grain, 1)
                .with_usage(UsagePolicy::PerRound(1)),
        )
}

/// Turns 1 Reed into 3 Food at the start of each harvest.
#[must_use]
pub fn basketmakers_workshop() -> CardDefinition {
    CardDefinition::major_improvement(BASKETMAKERS_WORKSHOP, "Basketmaker's Workshop")
        .with_cost(
            PlayCost::new()
                .resource(ResourceType::Reed, 2)
                .resource(ResourceType::Stone, 2),
        )
        .with_victory_points(2)
        .with_effect(
            effect(1, TriggerKind::HarvestStart)
                .cost(ResourceType::Reed, 1)
                .gain(ResourceType::Food, 3)
                .with_usage(UsagePolicy::PerRound(1)),
        )
}

/// Turns 1 Wood into 2 Food while feeding.
#[must_use]
pub fn joinery() -> CardDefinition {
    CardDefinition::major_improvement(JOINERY, "Joinery")
        .with_cost(
            PlayCost::new()
                .resource(ResourceType::Wood, 2)
                .resource(ResourceType::Stone, 2),
        )
        .with_victory_points(2)
        .with_effect(
            effect(1, TriggerKind::FeedingPhase)
                .cost(ResourceType::Wood, 1)
                .gain(ResourceType::Food, 2)
                .with_usage(UsagePolicy::PerRound(1)),
        )
}

#[must_use]
pub fn corn_scoop() -> CardDefinition {
    CardDefinition::improvement(CORN_SCOOP, "Corn Scoop")
        .with_cost(PlayCost::new().resource(ResourceType::Wood, 1))
        .with_effect(
            effect(1, TriggerKind::OnAction)
                .gain(ResourceType::Grain, 1)
                .with_condition(EffectCondition::action_named("Grain Seeds")),
        )
}

/// Every built-in occupation.
#[must_use]
pub fn occupations() -> Vec<CardDefinition> {
    vec![
        wood_cutter(),
        seasonal_worker(),
        firewood_collector(),
        hedge_keeper(),
        carpenter(),
        animal_tamer(),
        field_watchman(),
        stablehand(),
    ]
}

/// Every built-in improvement.
#[must_use]
pub fn improvements() -> Vec<CardDefinition> {
    vec![
        fireplace(),
        clay_oven(),
        well(),
        granary(),
        basketmakers_workshop(),
        joinery(),
        corn_scoop(),
    ]
}

/// A catalog holding the whole built-in set.
#[must_use]
pub fn catalog() -> CardCatalog {
    occupations().into_iter().chain(improvements()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::SpecialBehavior;

    #[test]
    fn test_catalog_complete() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.occupations().count(), 8);
        assert!(catalog.by_name("Joinery").is_some());
    }

    #[test]
    fn test_every_special_is_mapped() {
        for card in occupations().into_iter().chain(improvements()) {
            for effect in &card.effects {
                if let Some(tag) = effect.special {
                    assert!(
                        SpecialBehavior::lookup(card.id, tag).is_some(),
                        "{} has unmapped {:?}",
                        card.name,
                        tag
                    );
                }
            }
        }
    }

    #[test]
    fn test_effect_ids_unique_per_card() {
        for card in occupations().into_iter().chain(improvements()) {
            let mut ids: Vec<_> = card.effects.iter().map(|e| e.id.raw()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), card.effects.len(), "{}", card.name);
        }
    }
}
