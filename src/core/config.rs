//! Engine configuration.
//!
//! Sessions are configured at startup with an `EngineConfig`:
//! - seat count
//! - how payments behave when a balance would go negative
//! - the starting farm (resources, family members, rooms)

use serde::{Deserialize, Serialize};

use super::resource::ResourceBundle;

/// How resource payments treat insufficient balances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentPolicy {
    /// A payment that cannot be covered fails without mutating anything.
    #[default]
    Strict,
    /// Payments subtract unconditionally; balances may go negative.
    AllowNegative,
}

impl PaymentPolicy {
    /// Does this policy allow a balance to drop below zero?
    #[must_use]
    pub const fn allows_negative(self) -> bool {
        matches!(self, PaymentPolicy::AllowNegative)
    }
}

/// Complete engine configuration.
///
/// ```
/// use farmyard_engine::core::{EngineConfig, PaymentPolicy, ResourceBundle, ResourceType};
///
/// let config = EngineConfig::new(3)
///     .with_payment_policy(PaymentPolicy::AllowNegative)
///     .with_starting_resources(ResourceBundle::single(ResourceType::Food, 2));
///
/// assert_eq!(config.player_count, 3);
/// assert_eq!(config.starting_family_members, 2);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of seats (1-255).
    pub player_count: usize,

    /// Payment behavior for play costs and effect costs.
    pub payment_policy: PaymentPolicy,

    /// Resources every farm starts with.
    pub starting_resources: ResourceBundle,

    /// Family members every farm starts with.
    pub starting_family_members: u32,

    /// Rooms every farm starts with.
    pub starting_rooms: u32,
}

impl EngineConfig {
    /// Create a configuration for `player_count` seats with defaults.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            payment_policy: PaymentPolicy::default(),
            starting_resources: ResourceBundle::new(),
            starting_family_members: 2,
            starting_rooms: 2,
        }
    }

    /// Set the payment policy.
    #[must_use]
    pub fn with_payment_policy(mut self, policy: PaymentPolicy) -> Self {
        self.payment_policy = policy;
        self
    }

    /// Set the starting resources.
    #[must_use]
    pub fn with_starting_resources(mut self, resources: ResourceBundle) -> Self {
        self.starting_resources = resources;
        self
    }

    /// Set the starting family size.
    #[must_use]
    pub fn with_family_members(mut self, members: u32) -> Self {
        self.starting_family_members = members;
        self
    }

    /// Set the starting room count.
    #[must_use]
    pub fn with_rooms(mut self, rooms: u32) -> Self {
        self.starting_rooms = rooms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResourceType;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::new(2);
        assert_eq!(config.payment_policy, PaymentPolicy::Strict);
        assert!(config.starting_resources.is_empty());
        assert_eq!(config.starting_rooms, 2);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new(4)
            .with_family_members(3)
            .with_rooms(3)
            .with_starting_resources(ResourceBundle::single(ResourceType::Wood, 1));

        assert_eq!(config.starting_family_members, 3);
        assert_eq!(config.starting_rooms, 3);
        assert_eq!(config.starting_resources.amount_of(ResourceType::Wood), 1);
    }

    #[test]
    fn test_policy() {
        assert!(!PaymentPolicy::Strict.allows_negative());
        assert!(PaymentPolicy::AllowNegative.allows_negative());
    }

    #[test]
    #[should_panic(expected = "At most 255 players supported")]
    fn test_too_many_players() {
        EngineConfig::new(256);
    }
}
