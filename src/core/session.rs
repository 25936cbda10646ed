//! Game session: the owner of every farm and the trigger registry.
//!
//! A session is constructed explicitly and passed to whatever drives the
//! game. It offers the phase driver one call per dispatch point and keeps
//! the registry consistent with each farm's owned cards.

use std::sync::Arc;

use tracing::debug;

use super::config::EngineConfig;
use super::error::{EngineError, Result};
use super::farm::{Farm, FarmState};
use super::player::{PlayerId, PlayerMap};
use super::resource::ResourceType;
use crate::cards::{self, CardDefinition, CardInstance, CardInstanceId};
use crate::triggers::{
    ActionContext, RegistryStats, TriggerContext, TriggerKind, TriggerRegistry, HARVEST_SEQUENCE,
};

/// One game in progress.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use farmyard_engine::cards::builtin;
/// use farmyard_engine::core::{EngineConfig, GameSession, PlayerId, ResourceType};
/// use farmyard_engine::triggers::{ActionCategory, ActionContext};
///
/// let mut session = GameSession::new(EngineConfig::new(2));
/// let player = PlayerId::new(0);
///
/// session.play_card(player, &Arc::new(builtin::wood_cutter())).unwrap();
/// session.take_action(player, ActionContext::new("Forest", ActionCategory::Gathering));
///
/// assert_eq!(session.farm(player).unwrap().state.resource(ResourceType::Wood), 1);
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    config: EngineConfig,
    farms: PlayerMap<Farm>,
    registry: TriggerRegistry,
    round: u32,
    next_instance: u32,
}

impl GameSession {
    /// Create a session with one starting farm per seat.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let farms = PlayerMap::new(config.player_count, |player| {
            Farm::with_state(player, FarmState::from_config(&config))
        });
        let registry = TriggerRegistry::with_policy(config.payment_policy);
        Self {
            config,
            farms,
            registry,
            round: 0,
            next_instance: 1,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rounds started so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Every seat, in seat order.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerId> {
        self.farms.player_ids().collect()
    }

    #[must_use]
    pub fn farm(&self, player: PlayerId) -> Option<&Farm> {
        self.farms.try_get(player)
    }

    /// Mutable farm access for collaborators outside the card engine.
    ///
    /// Cards leave a farm only through [`remove_card`](Self::remove_card)
    /// and [`remove_all_cards`](Self::remove_all_cards).
    pub fn farm_mut(&mut self, player: PlayerId) -> Option<&mut Farm> {
        self.farms.try_get_mut(player)
    }

    #[must_use]
    pub fn farms(&self) -> &PlayerMap<Farm> {
        &self.farms
    }

    #[must_use]
    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    fn farm_mut_or_err(&mut self, player: PlayerId) -> Result<&mut Farm> {
        self.farms
            .try_get_mut(player)
            .ok_or_else(|| EngineError::invalid_input(format!("no farm for {}", player)))
    }

    // === Cards ===

    /// Can `player` play `definition`? `false` for an unknown player.
    #[must_use]
    pub fn can_play(&self, player: PlayerId, definition: &CardDefinition) -> bool {
        self.farms
            .try_get(player)
            .is_some_and(|farm| definition.can_play(farm))
    }

    /// Play a card for `player`, returning the new instance's ID.
    pub fn play_card(&mut self, player: PlayerId, definition: &Arc<CardDefinition>) -> Result<CardInstanceId> {
        let id = CardInstanceId::new(self.next_instance);
        cards::play_card(definition, id, player, &mut self.farms, &mut self.registry)?;
        self.next_instance += 1;
        Ok(id)
    }

    /// Remove one owned card and its registration.
    pub fn remove_card(&mut self, player: PlayerId, id: CardInstanceId) -> Result<CardInstance> {
        let card = self
            .farm_mut_or_err(player)?
            .remove_card(id)
            .ok_or_else(|| EngineError::invalid_input(format!("{} does not own {}", player, id)))?;
        self.registry.unregister(player, id);
        Ok(card)
    }

    /// Remove every card `player` owns, and their registrations.
    pub fn remove_all_cards(&mut self, player: PlayerId) -> Result<Vec<CardInstance>> {
        let cards = self.farm_mut_or_err(player)?.remove_all_cards();
        self.registry.unregister_player(player);
        Ok(cards)
    }

    /// Cook `amount` of `resource` on `player`'s farm. Returns food gained.
    pub fn convert_to_food(&mut self, player: PlayerId, resource: ResourceType, amount: u32) -> Result<i32> {
        Ok(self.farm_mut_or_err(player)?.convert_to_food(resource, amount))
    }

    // === Dispatch ===

    /// Dispatch `ctx` to `player`'s cards only.
    pub fn trigger(&mut self, player: PlayerId, ctx: &TriggerContext) -> usize {
        self.registry.trigger_for_player(&mut self.farms, player, ctx)
    }

    /// Dispatch `ctx` to every player's cards, in seat order. Each seat
    /// sees the context with itself as the triggering player.
    pub fn trigger_all(&mut self, ctx: &TriggerContext) -> usize {
        self.trigger_each(|player| ctx.for_player(player))
    }

    fn trigger_each(&mut self, context: impl Fn(PlayerId) -> TriggerContext) -> usize {
        self.players()
            .into_iter()
            .map(|player| {
                let ctx = context(player);
                self.trigger(player, &ctx)
            })
            .sum()
    }

    /// `player` used an action space.
    pub fn take_action(&mut self, player: PlayerId, action: ActionContext) -> usize {
        let ctx = TriggerContext::action(player, action);
        self.trigger(player, &ctx)
    }

    /// `player` finished a turn.
    pub fn end_turn(&mut self, player: PlayerId) -> usize {
        self.trigger(player, &TriggerContext::new(TriggerKind::OnTurnEnd, player))
    }

    /// Start a new round.
    ///
    /// Resets per-round usage on every card, clears temporary bonuses,
    /// returns workers, then fires `OnRoundStart` for every player.
    pub fn begin_round(&mut self) -> usize {
        self.round += 1;
        for (_, farm) in self.farms.iter_mut() {
            farm.reset_card_uses();
            farm.state.clear_temp_bonuses();
            farm.state.return_workers();
        }
        debug!(target: "farmyard::session", round = self.round, "round.started");

        self.trigger_each(|player| TriggerContext::new(TriggerKind::OnRoundStart, player))
    }

    /// Run a full harvest: every harvest kind, in order, for every player.
    pub fn run_harvest(&mut self) -> usize {
        let round = self.round;
        let executed: usize = HARVEST_SEQUENCE
            .iter()
            .map(|&kind| self.trigger_each(|player| TriggerContext::harvest(kind, player, round)))
            .sum();
        debug!(target: "farmyard::session", round, executed, "harvest.finished");
        executed
    }

    /// Clear every registration and counter. Owned cards stay on the farms.
    pub fn reset_registry(&mut self) {
        self.registry.reset();
    }

    /// Re-register every card every farm owns, in collection order.
    ///
    /// Pairs with [`reset_registry`](Self::reset_registry) to rebuild the
    /// index from the farms.
    pub fn rebuild_registry(&mut self) -> usize {
        let owned: Vec<(PlayerId, CardInstanceId)> = self
            .farms
            .iter()
            .flat_map(|(player, farm)| farm.cards().map(move |card| (player, card.id())))
            .collect();
        owned
            .into_iter()
            .filter(|&(player, id)| self.registry.register(&self.farms, player, id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::builtin;
    use crate::core::{PaymentPolicy, ResourceBundle};
    use crate::triggers::ActionCategory;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn session() -> GameSession {
        GameSession::new(EngineConfig::new(2))
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(
            EngineConfig::new(3).with_starting_resources(ResourceBundle::single(ResourceType::Food, 2)),
        );
        assert_eq!(session.players().len(), 3);
        assert_eq!(session.round(), 0);
        let farm = session.farm(PlayerId::new(2)).unwrap();
        assert_eq!(farm.state.resource(ResourceType::Food), 2);
        assert_eq!(farm.state.family_members(), 2);
        assert!(session.farm(PlayerId::new(3)).is_none());
    }

    #[test]
    fn test_instance_ids_allocated_on_success() {
        let mut session = session();
        let well = Arc::new(builtin::well());
        assert!(session.play_card(P0, &well).is_err());

        let a = session.play_card(P0, &Arc::new(builtin::wood_cutter())).unwrap();
        let b = session.play_card(P1, &Arc::new(builtin::wood_cutter())).unwrap();
        assert_eq!(a, CardInstanceId::new(1));
        assert_eq!(b, CardInstanceId::new(2));
    }

    #[test]
    fn test_remove_card() {
        let mut session = session();
        let id = session.play_card(P0, &Arc::new(builtin::stablehand())).unwrap();

        let removed = session.remove_card(P0, id).unwrap();
        assert_eq!(removed.name(), "Stablehand");
        assert_eq!(session.registry().registered_count(P0), 0);
        assert!(matches!(session.remove_card(P0, id), Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_begin_round_resets() {
        let mut session = session();
        session.play_card(P0, &Arc::new(builtin::seasonal_worker())).unwrap();
        let day_laborer = ActionContext::new("Day Laborer", ActionCategory::Special);

        assert_eq!(session.take_action(P0, day_laborer.clone()), 1);
        assert_eq!(session.take_action(P0, day_laborer.clone()), 0);

        session.farm_mut(P0).unwrap().state.use_workers(2);
        session.begin_round();
        assert_eq!(session.round(), 1);
        assert_eq!(session.farm(P0).unwrap().state.available_workers(), 2);
        assert_eq!(session.take_action(P0, day_laborer), 1);
        assert_eq!(session.farm(P0).unwrap().state.resource(ResourceType::Grain), 2);
    }

    #[test]
    fn test_end_turn_only_for_player() {
        let mut session = session();
        assert_eq!(session.end_turn(P1), 0);
        assert_eq!(session.stats().triggers_processed, 1);
    }

    #[test]
    fn test_round_dispatch_per_seat() {
        let mut session = GameSession::new(EngineConfig::new(3));
        session.begin_round();
        assert_eq!(session.stats().triggers_processed, 3);

        session.run_harvest();
        assert_eq!(session.stats().triggers_processed, 3 + 3 * HARVEST_SEQUENCE.len() as u64);
    }

    #[test]
    fn test_reset_and_rebuild_registry() {
        let mut session = session();
        session.play_card(P0, &Arc::new(builtin::wood_cutter())).unwrap();
        session.play_card(P1, &Arc::new(builtin::stablehand())).unwrap();

        session.reset_registry();
        assert_eq!(session.stats(), RegistryStats::default());
        assert_eq!(session.farm(P0).unwrap().card_count(), 1);

        assert_eq!(session.rebuild_registry(), 2);
        assert_eq!(session.registry().len(), 2);
    }

    #[test]
    fn test_policy_flows_to_registry() {
        let session = GameSession::new(EngineConfig::new(1).with_payment_policy(PaymentPolicy::AllowNegative));
        assert_eq!(session.registry().policy(), PaymentPolicy::AllowNegative);
    }
}
