//! Card-specific special behaviors.
//!
//! Some effects do something no generic field expresses. Such an effect
//! carries a `BehaviorTag`; what the tag does depends on which card
//! carries it, and is looked up in a fixed table keyed by
//! `(CardId, BehaviorTag)`. A pair missing from the table is an error.

use serde::{Deserialize, Serialize};

use crate::cards::builtin;
use crate::cards::CardId;
use crate::core::{BonusKey, FarmState, ResourceType};

/// Opaque behavior label declared on an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorTag {
    ExtraWood,
    ExtraGrain,
    FenceDiscount,
    RoomDiscount,
    BakingBonus,
    AnimalCapacity,
}

/// What a special behavior does to the owner's farm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialBehavior {
    /// Add resources.
    GainResource(ResourceType, i32),
    /// Install a temporary bonus.
    TempBonus(BonusKey, i32),
}

impl SpecialBehavior {
    /// Look up the behavior for a card and tag.
    #[must_use]
    pub fn lookup(card: CardId, tag: BehaviorTag) -> Option<Self> {
        use BehaviorTag as T;
        use SpecialBehavior as B;

        let behavior = match (card, tag) {
            (builtin::FIREWOOD_COLLECTOR, T::ExtraWood) => B::GainResource(ResourceType::Wood, 1),
            (builtin::FIELD_WATCHMAN, T::ExtraGrain) => B::GainResource(ResourceType::Grain, 1),
            (builtin::HEDGE_KEEPER, T::FenceDiscount) => B::TempBonus(BonusKey::FreeFences, 3),
            (builtin::CARPENTER, T::RoomDiscount) => B::TempBonus(BonusKey::RoomDiscount, 1),
            (builtin::ANIMAL_TAMER, T::AnimalCapacity) => B::TempBonus(BonusKey::AnimalCapacity, 2),
            (builtin::CLAY_OVEN, T::BakingBonus) => B::TempBonus(BonusKey::BakingBonus, 1),
            _ => return None,
        };
        Some(behavior)
    }

    /// Apply the behavior to a farm.
    pub fn apply(self, state: &mut FarmState) {
        match self {
            SpecialBehavior::GainResource(resource, amount) => state.add_resource(resource, amount),
            SpecialBehavior::TempBonus(key, amount) => state.add_temp_bonus(key, amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries() {
        assert_eq!(
            SpecialBehavior::lookup(builtin::FIREWOOD_COLLECTOR, BehaviorTag::ExtraWood),
            Some(SpecialBehavior::GainResource(ResourceType::Wood, 1))
        );
        assert_eq!(
            SpecialBehavior::lookup(builtin::HEDGE_KEEPER, BehaviorTag::FenceDiscount),
            Some(SpecialBehavior::TempBonus(BonusKey::FreeFences, 3))
        );
        assert_eq!(
            SpecialBehavior::lookup(builtin::CLAY_OVEN, BehaviorTag::BakingBonus),
            Some(SpecialBehavior::TempBonus(BonusKey::BakingBonus, 1))
        );
    }

    #[test]
    fn test_tag_is_card_specific() {
        // Same tag, wrong card.
        assert_eq!(SpecialBehavior::lookup(builtin::WOOD_CUTTER, BehaviorTag::ExtraWood), None);
        assert_eq!(SpecialBehavior::lookup(CardId::new(9999), BehaviorTag::ExtraGrain), None);
    }

    #[test]
    fn test_apply() {
        let mut state = FarmState::default();
        SpecialBehavior::GainResource(ResourceType::Grain, 1).apply(&mut state);
        SpecialBehavior::TempBonus(BonusKey::AnimalCapacity, 2).apply(&mut state);

        assert_eq!(state.resource(ResourceType::Grain), 1);
        assert_eq!(state.temp_bonus(BonusKey::AnimalCapacity), 2);
    }
}
