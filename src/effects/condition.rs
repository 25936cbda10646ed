//! Play conditions: read-only gates on acquiring a card.

use serde::{Deserialize, Serialize};

use crate::core::{Farm, ResourceBundle, ResourceType};

/// A conjunction of requirements a farm must meet to play a card.
///
/// Every declared requirement must hold. Unset numeric thresholds are 0
/// and always pass.
///
/// ```
/// use farmyard_engine::core::{Farm, PlayerId, ResourceType};
/// use farmyard_engine::effects::PlayCondition;
///
/// let condition = PlayCondition::new()
///     .min_resource(ResourceType::Grain, 1)
///     .min_fields(1);
///
/// let mut farm = Farm::new(PlayerId::new(0));
/// assert!(!condition.can_meet(&farm));
///
/// farm.state.add_resource(ResourceType::Grain, 1);
/// farm.state.add_fields(1);
/// assert!(condition.can_meet(&farm));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayCondition {
    /// Minimum resource balances (not spent).
    pub resources: ResourceBundle,
    pub min_family_members: u32,
    pub min_rooms: u32,
    pub min_fields: u32,
    pub min_pastures: u32,
    /// Cards (either kind) the farm must already own, by name.
    pub required_cards: Vec<String>,
    /// Tags at least one owned card must carry, each.
    pub required_tags: Vec<String>,
}

impl PlayCondition {
    /// Create an empty (always satisfied) condition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min_resource(mut self, resource: ResourceType, amount: i32) -> Self {
        self.resources.push(resource, amount);
        self
    }

    #[must_use]
    pub fn min_family_members(mut self, count: u32) -> Self {
        self.min_family_members = count;
        self
    }

    #[must_use]
    pub fn min_rooms(mut self, count: u32) -> Self {
        self.min_rooms = count;
        self
    }

    #[must_use]
    pub fn min_fields(mut self, count: u32) -> Self {
        self.min_fields = count;
        self
    }

    #[must_use]
    pub fn min_pastures(mut self, count: u32) -> Self {
        self.min_pastures = count;
        self
    }

    #[must_use]
    pub fn requires_card(mut self, name: impl Into<String>) -> Self {
        self.required_cards.push(name.into());
        self
    }

    #[must_use]
    pub fn requires_tag(mut self, tag: impl Into<String>) -> Self {
        self.required_tags.push(tag.into());
        self
    }

    /// Does `farm` satisfy every requirement?
    #[must_use]
    pub fn can_meet(&self, farm: &Farm) -> bool {
        self.unmet(farm).is_none()
    }

    /// Describe the first requirement `farm` fails, checked in declaration
    /// order: resources, family, rooms, fields, pastures, cards, tags.
    #[must_use]
    pub fn unmet(&self, farm: &Farm) -> Option<String> {
        let state = &farm.state;

        if let Some((resource, _)) = self
            .resources
            .iter()
            .find(|(r, _)| state.resource(*r) < self.resources.amount_of(*r))
        {
            return Some(format!(
                "needs {} {}",
                self.resources.amount_of(resource),
                resource
            ));
        }

        let thresholds = [
            ("family members", state.family_members(), self.min_family_members),
            ("rooms", state.rooms(), self.min_rooms),
            ("fields", state.fields(), self.min_fields),
            ("pastures", state.pastures(), self.min_pastures),
        ];
        if let Some((label, _, min)) = thresholds.iter().find(|(_, have, min)| have < min) {
            return Some(format!("needs {} {}", min, label));
        }

        if let Some(name) = self.required_cards.iter().find(|n| !farm.has_card_named(n)) {
            return Some(format!("needs card {}", name));
        }

        self.required_tags
            .iter()
            .find(|t| !farm.has_card_with_tag(t))
            .map(|tag| format!("needs a card tagged {}", tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardInstance, CardInstanceId};
    use crate::core::PlayerId;
    use std::sync::Arc;

    fn farm() -> Farm {
        Farm::new(PlayerId::new(0))
    }

    #[test]
    fn test_empty_condition_passes() {
        assert!(PlayCondition::new().can_meet(&farm()));
    }

    #[test]
    fn test_resource_threshold() {
        let condition = PlayCondition::new().min_resource(ResourceType::Clay, 2);
        let mut farm = farm();
        farm.state.add_resource(ResourceType::Clay, 1);

        assert_eq!(condition.unmet(&farm), Some("needs 2 Clay".to_string()));
        farm.state.add_resource(ResourceType::Clay, 1);
        assert!(condition.can_meet(&farm));
        // Thresholds are not spent.
        assert_eq!(farm.state.resource(ResourceType::Clay), 2);
    }

    #[test]
    fn test_structure_thresholds() {
        let condition = PlayCondition::new().min_rooms(3).min_pastures(1);
        let mut farm = farm();
        farm.state.add_rooms(2);
        farm.state.add_pastures(1);

        assert_eq!(condition.unmet(&farm), Some("needs 3 rooms".to_string()));
        farm.state.add_rooms(1);
        assert!(condition.can_meet(&farm));
    }

    #[test]
    fn test_required_card_and_tag() {
        let condition = PlayCondition::new()
            .requires_card("Fireplace")
            .requires_tag("cooking");
        let mut farm = farm();
        assert_eq!(condition.unmet(&farm), Some("needs card Fireplace".to_string()));

        let fireplace = CardDefinition::improvement(CardId::new(1), "Fireplace").with_tag("cooking");
        farm.add_card(CardInstance::new(CardInstanceId::new(1), Arc::new(fireplace)));
        assert!(condition.can_meet(&farm));
    }
}
