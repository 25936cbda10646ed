//! Play costs: what a farm pays to acquire a card.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, FarmState, ResourceBundle, ResourceType, Result};

/// A conjunction of costs paid when a card is played.
///
/// `can_pay` is the pure check; `pay` applies every mutation without
/// checking. [`try_pay`](PlayCost::try_pay) does both atomically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayCost {
    /// Resources spent.
    pub resources: ResourceBundle,
    /// Workers taken from the available supply.
    pub workers: u32,
    /// Victory points given up.
    pub victory_points: i32,
    /// Food spent, in addition to any food in `resources`.
    pub food: i32,
}

impl PlayCost {
    /// Create a free cost.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resource(mut self, resource: ResourceType, amount: i32) -> Self {
        self.resources.push(resource, amount);
        self
    }

    #[must_use]
    pub fn workers(mut self, count: u32) -> Self {
        self.workers = count;
        self
    }

    #[must_use]
    pub fn victory_points(mut self, points: i32) -> Self {
        self.victory_points = points;
        self
    }

    #[must_use]
    pub fn food(mut self, amount: i32) -> Self {
        self.food = amount;
        self
    }

    /// Resource bundle including the separate food cost.
    fn total_resources(&self) -> ResourceBundle {
        self.resources.clone().with(ResourceType::Food, self.food)
    }

    /// Can `state` cover every part of this cost?
    #[must_use]
    pub fn can_pay(&self, state: &FarmState) -> bool {
        state.covers(&self.total_resources())
            && state.available_workers() >= self.workers
            && state.victory_points() >= self.victory_points
    }

    /// Apply every cost mutation.
    ///
    /// Performs no check: call [`can_pay`](PlayCost::can_pay) first. An
    /// unchecked payment can leave resource or victory point balances
    /// negative.
    pub fn pay(&self, state: &mut FarmState) {
        for (resource, amount) in self.total_resources().iter() {
            state.withdraw(resource, amount);
        }
        state.withdraw_workers(self.workers);
        state.add_victory_points(-self.victory_points);
    }

    /// Check and pay in one step. Nothing is mutated on failure.
    pub fn try_pay(&self, state: &mut FarmState, card: &str) -> Result<()> {
        if !self.can_pay(state) {
            return Err(EngineError::precondition(card, "cannot pay play cost"));
        }
        self.pay(state);
        Ok(())
    }
}
