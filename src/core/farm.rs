//! A player's farm: resource store and owned-card collection.
//!
//! `Farm` is the player-side collaborator of the card engine. Cards read it
//! to check play conditions and write to it when effects fire.
//!
//! The farm is split in two so a card can mutate its own usage counters and
//! its owner's store in one call:
//! - `FarmState`: resources, victory points, structures, bonuses, capabilities
//! - the owned occupations and improvements, each a `CardInstance`

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::EngineConfig;
use super::player::PlayerId;
use super::resource::{ResourceBundle, ResourceType};
use crate::cards::{CardId, CardInstance, CardInstanceId};

/// Key for a temporary bonus installed by a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKey {
    /// Fences that can be built without paying wood.
    FreeFences,
    /// Reduction on the next room's building cost.
    RoomDiscount,
    /// Extra fields that may be sown this round.
    ExtraSowing,
    /// Extra food gained when baking bread.
    BakingBonus,
    /// Extra animals the farm can hold this round.
    AnimalCapacity,
}

impl std::fmt::Display for BonusKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BonusKey::FreeFences => "free_fences",
            BonusKey::RoomDiscount => "room_discount",
            BonusKey::ExtraSowing => "extra_sowing",
            BonusKey::BakingBonus => "baking_bonus",
            BonusKey::AnimalCapacity => "animal_capacity",
        };
        f.write_str(name)
    }
}

/// Everything a farm holds apart from its cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmState {
    balances: [i32; ResourceType::COUNT],
    victory_points: i32,
    family_members: u32,
    available_workers: u32,
    rooms: u32,
    fields: u32,
    pastures: u32,
    temp_bonuses: FxHashMap<BonusKey, i32>,
    cooking_facilities: SmallVec<[CardId; 2]>,
    cooking_ratios: FxHashMap<ResourceType, u32>,
    storage: FxHashMap<ResourceType, u32>,
}

impl Default for FarmState {
    fn default() -> Self {
        Self {
            balances: [0; ResourceType::COUNT],
            victory_points: 0,
            family_members: 0,
            available_workers: 0,
            rooms: 0,
            fields: 0,
            pastures: 0,
            temp_bonuses: FxHashMap::default(),
            cooking_facilities: SmallVec::new(),
            cooking_ratios: FxHashMap::default(),
            storage: FxHashMap::default(),
        }
    }
}

impl FarmState {
    /// Create the starting state described by `config`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut state = Self {
            family_members: config.starting_family_members,
            available_workers: config.starting_family_members,
            rooms: config.starting_rooms,
            ..Self::default()
        };
        state.add_resources(&config.starting_resources);
        state
    }

    // === Resources ===

    /// Current balance of a resource. May be negative under
    /// [`PaymentPolicy::AllowNegative`](super::PaymentPolicy::AllowNegative).
    #[must_use]
    pub fn resource(&self, resource: ResourceType) -> i32 {
        self.balances[resource.index()]
    }

    /// Add `amount` of a resource (negative amounts subtract).
    pub fn add_resource(&mut self, resource: ResourceType, amount: i32) {
        self.balances[resource.index()] += amount;
    }

    /// Add every entry of a bundle.
    pub fn add_resources(&mut self, bundle: &ResourceBundle) {
        for (resource, amount) in bundle.iter() {
            self.add_resource(resource, amount);
        }
    }

    /// Spend `amount` of a resource if the balance covers it.
    ///
    /// Returns `false` and leaves the balance untouched otherwise.
    pub fn spend_resource(&mut self, resource: ResourceType, amount: i32) -> bool {
        if self.resource(resource) < amount {
            return false;
        }
        self.balances[resource.index()] -= amount;
        true
    }

    /// Subtract `amount` without checking the balance.
    pub fn withdraw(&mut self, resource: ResourceType, amount: i32) {
        self.balances[resource.index()] -= amount;
    }

    /// Does the store cover every entry of `bundle`?
    ///
    /// Repeated entries for one resource are summed before comparing.
    #[must_use]
    pub fn covers(&self, bundle: &ResourceBundle) -> bool {
        bundle
            .iter()
            .all(|(resource, _)| self.resource(resource) >= bundle.amount_of(resource))
    }

    // === Victory points ===

    /// Current victory point total.
    #[must_use]
    pub fn victory_points(&self) -> i32 {
        self.victory_points
    }

    /// Add (or with a negative amount, remove) victory points.
    pub fn add_victory_points(&mut self, amount: i32) {
        self.victory_points += amount;
    }

    // === Family and structures ===

    #[must_use]
    pub fn family_members(&self) -> u32 {
        self.family_members
    }

    #[must_use]
    pub fn rooms(&self) -> u32 {
        self.rooms
    }

    #[must_use]
    pub fn fields(&self) -> u32 {
        self.fields
    }

    #[must_use]
    pub fn pastures(&self) -> u32 {
        self.pastures
    }

    pub fn add_rooms(&mut self, count: u32) {
        self.rooms += count;
    }

    pub fn add_fields(&mut self, count: u32) {
        self.fields += count;
    }

    pub fn add_pastures(&mut self, count: u32) {
        self.pastures += count;
    }

    // === Workers ===

    /// Family members not yet placed this round.
    #[must_use]
    pub fn available_workers(&self) -> u32 {
        self.available_workers
    }

    /// Take `count` workers off the board supply. Returns `false` and
    /// changes nothing if fewer are available.
    pub fn use_workers(&mut self, count: u32) -> bool {
        if self.available_workers < count {
            return false;
        }
        self.available_workers -= count;
        true
    }

    /// Take `count` workers without checking; the supply bottoms out at zero.
    pub fn withdraw_workers(&mut self, count: u32) {
        self.available_workers = self.available_workers.saturating_sub(count);
    }

    /// Return every family member to the supply (start of round).
    pub fn return_workers(&mut self) {
        self.available_workers = self.family_members;
    }

    // === Temporary bonuses ===

    pub fn add_temp_bonus(&mut self, key: BonusKey, amount: i32) {
        *self.temp_bonuses.entry(key).or_insert(0) += amount;
    }

    #[must_use]
    pub fn temp_bonus(&self, key: BonusKey) -> i32 {
        self.temp_bonuses.get(&key).copied().unwrap_or(0)
    }

    /// Drop every temporary bonus (round boundary).
    pub fn clear_temp_bonuses(&mut self) {
        self.temp_bonuses.clear();
    }

    // === Cooking ===

    /// Record a card as a cooking facility. Adding the same card twice is a no-op.
    pub fn add_cooking_facility(&mut self, card: CardId) {
        if !self.cooking_facilities.contains(&card) {
            self.cooking_facilities.push(card);
        }
    }

    #[must_use]
    pub fn cooking_facilities(&self) -> &[CardId] {
        &self.cooking_facilities
    }

    /// Install a conversion ratio (food per unit). The best ratio is kept.
    pub fn add_cooking_ability(&mut self, resource: ResourceType, ratio: u32) {
        let entry = self.cooking_ratios.entry(resource).or_insert(0);
        *entry = (*entry).max(ratio);
    }

    /// Food per unit of `resource`, or 0 without an ability.
    #[must_use]
    pub fn cooking_ratio(&self, resource: ResourceType) -> u32 {
        self.cooking_ratios.get(&resource).copied().unwrap_or(0)
    }

    /// Convert `amount` units of `resource` to food.
    ///
    /// Returns the food gained. Converting zero units, more than the farm
    /// holds, a resource without a cooking ability, or a batch whose food
    /// would overflow the balance gains nothing and changes nothing.
    pub fn convert_to_food(&mut self, resource: ResourceType, amount: u32) -> i32 {
        let ratio = self.cooking_ratio(resource);
        let Ok(amount) = i32::try_from(amount) else {
            return 0;
        };
        if amount == 0 || ratio == 0 || resource == ResourceType::Food {
            return 0;
        }
        let Some(food) = i32::try_from(ratio).ok().and_then(|ratio| amount.checked_mul(ratio)) else {
            return 0;
        };
        let Some(total) = self.resource(ResourceType::Food).checked_add(food) else {
            return 0;
        };
        if !self.spend_resource(resource, amount) {
            return 0;
        }
        self.balances[ResourceType::Food.index()] = total;
        food
    }

    // === Storage ===

    /// Increase storage capacity for a resource.
    pub fn add_storage_capacity(&mut self, resource: ResourceType, capacity: u32) {
        *self.storage.entry(resource).or_insert(0) += capacity;
    }

    /// Installed storage capacity for a resource.
    #[must_use]
    pub fn storage_capacity(&self, resource: ResourceType) -> u32 {
        self.storage.get(&resource).copied().unwrap_or(0)
    }
}

/// A player's farm.
#[derive(Clone, Debug)]
pub struct Farm {
    player: PlayerId,

    /// Resource and capability store.
    pub state: FarmState,

    occupations: Vec<CardInstance>,
    improvements: Vec<CardInstance>,
}

impl Farm {
    /// Create an empty farm for `player`.
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self::with_state(player, FarmState::default())
    }

    /// Create a farm with a prepared state.
    #[must_use]
    pub fn with_state(player: PlayerId, state: FarmState) -> Self {
        Self {
            player,
            state,
            occupations: Vec::new(),
            improvements: Vec::new(),
        }
    }

    /// The seat owning this farm.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    // === Owned cards ===

    #[must_use]
    pub fn has_occupation_named(&self, name: &str) -> bool {
        self.occupations.iter().any(|c| c.name() == name)
    }

    #[must_use]
    pub fn has_improvement_named(&self, name: &str) -> bool {
        self.improvements.iter().any(|c| c.name() == name)
    }

    /// Does the farm own any card (either kind) with this name?
    #[must_use]
    pub fn has_card_named(&self, name: &str) -> bool {
        self.has_occupation_named(name) || self.has_improvement_named(name)
    }

    /// Does the farm own any card carrying `tag`?
    #[must_use]
    pub fn has_card_with_tag(&self, tag: &str) -> bool {
        self.cards().any(|c| c.has_tag(tag))
    }

    pub fn add_occupation_card(&mut self, card: CardInstance) {
        self.occupations.push(card);
    }

    pub fn add_improvement_card(&mut self, card: CardInstance) {
        self.improvements.push(card);
    }

    /// Add a card to the collection matching its variant.
    pub fn add_card(&mut self, card: CardInstance) {
        if card.is_occupation() {
            self.add_occupation_card(card);
        } else {
            self.add_improvement_card(card);
        }
    }

    #[must_use]
    pub fn occupations(&self) -> &[CardInstance] {
        &self.occupations
    }

    #[must_use]
    pub fn improvements(&self) -> &[CardInstance] {
        &self.improvements
    }

    /// Iterate every owned card: occupations first, then improvements.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.occupations.iter().chain(self.improvements.iter())
    }

    /// Number of owned cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.occupations.len() + self.improvements.len()
    }

    /// Look up an owned card.
    #[must_use]
    pub fn card(&self, id: CardInstanceId) -> Option<&CardInstance> {
        self.cards().find(|c| c.id() == id)
    }

    /// Borrow an owned card and the farm store at the same time.
    pub fn card_and_state_mut(
        &mut self,
        id: CardInstanceId,
    ) -> Option<(&mut CardInstance, &mut FarmState)> {
        let Self {
            state,
            occupations,
            improvements,
            ..
        } = self;
        occupations
            .iter_mut()
            .chain(improvements.iter_mut())
            .find(|c| c.id() == id)
            .map(|card| (card, state))
    }

    /// Remove a card from the collection. Outside the crate cards leave a
    /// farm only through [`GameSession::remove_card`](super::GameSession::remove_card),
    /// which also drops the registration.
    pub(crate) fn remove_card(&mut self, id: CardInstanceId) -> Option<CardInstance> {
        if let Some(pos) = self.occupations.iter().position(|c| c.id() == id) {
            return Some(self.occupations.remove(pos));
        }
        let pos = self.improvements.iter().position(|c| c.id() == id)?;
        Some(self.improvements.remove(pos))
    }

    /// Remove every owned card, returning them in collection order.
    pub(crate) fn remove_all_cards(&mut self) -> Vec<CardInstance> {
        let mut removed = std::mem::take(&mut self.occupations);
        removed.append(&mut self.improvements);
        removed
    }

    /// Reset per-round usage counters on every owned card.
    pub fn reset_card_uses(&mut self) {
        for card in self.occupations.iter_mut().chain(self.improvements.iter_mut()) {
            card.reset_uses();
        }
    }

    /// See [`FarmState::convert_to_food`].
    pub fn convert_to_food(&mut self, resource: ResourceType, amount: u32) -> i32 {
        self.state.convert_to_food(resource, amount)
    }
}
