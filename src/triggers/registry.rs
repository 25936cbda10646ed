//! Trigger registry.
//!
//! The registry records which cards each player owns that are live for
//! trigger dispatch. When a phase driver fires a trigger, the registry
//! finds every matching effect across the registered cards and applies
//! them to their owners' farms.
//!
//! Cards themselves live in each player's [`Farm`]; the registry holds
//! only instance IDs, in registration order per player.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::cards::CardInstanceId;
use crate::core::{Farm, PaymentPolicy, PlayerId, PlayerMap};

use super::condition::fuzzy_match;
use super::event::TriggerContext;

/// One card's matched effects, attributed to its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMatch {
    /// Owner of the card.
    pub player: PlayerId,
    pub card: CardInstanceId,
    /// Indices into the card's effect list, in declaration order.
    pub effects: SmallVec<[usize; 4]>,
}

/// Snapshot of the registry counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Registrations across all players.
    pub registered_cards: usize,
    /// Calls to [`TriggerRegistry::execute_triggerable_cards`].
    pub triggers_processed: u64,
    /// Effects actually applied.
    pub effects_executed: u64,
    /// Cards whose effect application failed during a batch.
    pub failures: u64,
}

/// Registry of live cards per player.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use farmyard_engine::cards::{CardDefinition, CardId, CardInstance, CardInstanceId};
/// use farmyard_engine::core::{Farm, PlayerId, PlayerMap, ResourceType};
/// use farmyard_engine::effects::{EffectDefinition, EffectId};
/// use farmyard_engine::triggers::{TriggerContext, TriggerKind, TriggerRegistry};
///
/// let mut farms = PlayerMap::new(2, Farm::new);
/// let card = CardDefinition::occupation(CardId::new(1), "Harvester").with_effect(
///     EffectDefinition::new(EffectId::new(1), TriggerKind::OnHarvest).gain(ResourceType::Food, 1),
/// );
/// let id = CardInstanceId::new(1);
/// farms[PlayerId::new(0)].add_card(CardInstance::new(id, Arc::new(card)));
///
/// let mut registry = TriggerRegistry::new();
/// assert!(registry.register(&farms, PlayerId::new(0), id));
///
/// let ctx = TriggerContext::new(TriggerKind::OnHarvest, PlayerId::new(0));
/// let executed = registry.trigger_for_player(&mut farms, PlayerId::new(0), &ctx);
///
/// assert_eq!(executed, 1);
/// assert_eq!(farms[PlayerId::new(0)].state.resource(ResourceType::Food), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    /// Registered instances per player, in registration order.
    by_player: FxHashMap<PlayerId, Vec<CardInstanceId>>,

    policy: PaymentPolicy,

    triggers_processed: u64,
    effects_executed: u64,
    failures: u64,
}

impl TriggerRegistry {
    /// Create an empty registry with strict payment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given payment policy.
    #[must_use]
    pub fn with_policy(policy: PaymentPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The payment policy applied to effect costs.
    #[must_use]
    pub fn policy(&self) -> PaymentPolicy {
        self.policy
    }

    // === Registration ===

    /// Register a card owned by `player`.
    ///
    /// Returns `false` without changing anything when the player has no
    /// farm, the farm does not own the card, or the pair is already
    /// registered.
    pub fn register(&mut self, farms: &PlayerMap<Farm>, player: PlayerId, card: CardInstanceId) -> bool {
        let Some(farm) = farms.try_get(player) else {
            debug!(target: "farmyard::registry", %player, %card, "register.ignored: unknown player");
            return false;
        };
        if farm.card(card).is_none() {
            debug!(target: "farmyard::registry", %player, %card, "register.ignored: card not owned");
            return false;
        }

        let cards = self.by_player.entry(player).or_default();
        if cards.contains(&card) {
            return false;
        }
        cards.push(card);
        debug!(target: "farmyard::registry", %player, %card, count = cards.len(), "card.registered");
        true
    }

    /// Remove a registration. Returns whether it was present.
    pub fn unregister(&mut self, player: PlayerId, card: CardInstanceId) -> bool {
        let Some(cards) = self.by_player.get_mut(&player) else {
            return false;
        };
        let Some(pos) = cards.iter().position(|&c| c == card) else {
            return false;
        };
        cards.remove(pos);
        if cards.is_empty() {
            self.by_player.remove(&player);
        }
        debug!(target: "farmyard::registry", %player, %card, "card.unregistered");
        true
    }

    /// Remove every registration of `player`. Returns how many were removed.
    pub fn unregister_player(&mut self, player: PlayerId) -> usize {
        let removed = self.by_player.remove(&player).map_or(0, |cards| cards.len());
        if removed > 0 {
            debug!(target: "farmyard::registry", %player, removed, "player.unregistered");
        }
        removed
    }

    #[must_use]
    pub fn is_registered(&self, player: PlayerId, card: CardInstanceId) -> bool {
        self.by_player
            .get(&player)
            .is_some_and(|cards| cards.contains(&card))
    }

    /// Registered instances of `player`, in registration order.
    #[must_use]
    pub fn registered_cards(&self, player: PlayerId) -> &[CardInstanceId] {
        self.by_player.get(&player).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn registered_count(&self, player: PlayerId) -> usize {
        self.registered_cards(player).len()
    }

    /// Total registrations across all players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_player.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_player.is_empty()
    }

    // === Dispatch ===

    /// Find every effect of `player`'s registered cards that fires for `ctx`.
    ///
    /// An effect matches when its trigger kind equals `ctx.kind`, it can
    /// still activate, its own condition holds, and, if `ctx` carries a
    /// non-empty condition filter, the filter and the effect's condition
    /// text contain one another. Cards without a matching effect are left
    /// out.
    #[must_use]
    pub fn find_triggerable_cards(
        &self,
        farms: &PlayerMap<Farm>,
        player: PlayerId,
        ctx: &TriggerContext,
    ) -> Vec<TriggerMatch> {
        let Some(farm) = farms.try_get(player) else {
            return Vec::new();
        };
        let filter = ctx.condition_filter();

        self.registered_cards(player)
            .iter()
            .filter_map(|&id| {
                let card = farm.card(id)?;
                let mut effects = card.matching_effects(ctx);
                if !filter.is_empty() {
                    let definition = card.definition();
                    effects.retain(|idx| fuzzy_match(definition.effects[*idx].condition_text(), filter));
                }
                (!effects.is_empty()).then_some(TriggerMatch {
                    player,
                    card: id,
                    effects,
                })
            })
            .collect()
    }

    /// [`find_triggerable_cards`](Self::find_triggerable_cards) for each
    /// player in `players`, concatenated in that order.
    #[must_use]
    pub fn find_triggerable_cards_all_players(
        &self,
        farms: &PlayerMap<Farm>,
        players: &[PlayerId],
        ctx: &TriggerContext,
    ) -> Vec<TriggerMatch> {
        players
            .iter()
            .flat_map(|&player| self.find_triggerable_cards(farms, player, ctx))
            .collect()
    }

    /// Apply matched effects to their owners' farms, in list order.
    ///
    /// Each effect is re-checked before it fires, so a stale match list
    /// never exceeds a usage limit. A failing card is logged and skipped;
    /// the rest of the batch still runs. Returns the number of effects
    /// applied.
    pub fn execute_triggerable_cards(
        &mut self,
        farms: &mut PlayerMap<Farm>,
        matches: &[TriggerMatch],
        ctx: &TriggerContext,
    ) -> usize {
        self.triggers_processed += 1;
        let policy = self.policy;
        let mut executed = 0;

        for m in matches {
            let Some((card, state)) = farms
                .try_get_mut(m.player)
                .and_then(|farm| farm.card_and_state_mut(m.card))
            else {
                debug!(target: "farmyard::registry", player = %m.player, card = %m.card, "match.skipped: card gone");
                continue;
            };

            for &idx in &m.effects {
                match card.apply_effect(idx, state, policy) {
                    Ok(true) => executed += 1,
                    Ok(false) => {}
                    Err(err) => {
                        warn!(
                            target: "farmyard::registry",
                            player = %m.player,
                            card = %card.name(),
                            kind = %ctx.kind,
                            error = %err,
                            "effect application failed"
                        );
                        self.failures += 1;
                        break;
                    }
                }
            }
        }

        self.effects_executed += executed as u64;
        debug!(
            target: "farmyard::registry",
            kind = %ctx.kind,
            matched = matches.len(),
            executed,
            "trigger.executed"
        );
        executed
    }

    /// Find and execute for one player.
    pub fn trigger_for_player(
        &mut self,
        farms: &mut PlayerMap<Farm>,
        player: PlayerId,
        ctx: &TriggerContext,
    ) -> usize {
        let matches = self.find_triggerable_cards(farms, player, ctx);
        self.execute_triggerable_cards(farms, &matches, ctx)
    }

    /// Find and execute for every player in `players`, in that order.
    pub fn trigger_for_all_players(
        &mut self,
        farms: &mut PlayerMap<Farm>,
        players: &[PlayerId],
        ctx: &TriggerContext,
    ) -> usize {
        let matches = self.find_triggerable_cards_all_players(farms, players, ctx);
        self.execute_triggerable_cards(farms, &matches, ctx)
    }

    // === Maintenance ===

    /// Clear every registration and zero every counter.
    pub fn reset(&mut self) {
        self.by_player.clear();
        self.triggers_processed = 0;
        self.effects_executed = 0;
        self.failures = 0;
        debug!(target: "farmyard::registry", "registry.reset");
    }

    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            registered_cards: self.len(),
            triggers_processed: self.triggers_processed,
            effects_executed: self.effects_executed,
            failures: self.failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardInstance};
    use crate::core::ResourceType;
    use crate::effects::{EffectDefinition, EffectId, UsagePolicy};
    use crate::triggers::{ActionCategory, ActionContext, EffectCondition, TriggerKind};
    use std::sync::Arc;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn farms() -> PlayerMap<Farm> {
        PlayerMap::new(2, Farm::new)
    }

    fn give(farms: &mut PlayerMap<Farm>, player: PlayerId, id: u32, card: CardDefinition) -> CardInstanceId {
        let id = CardInstanceId::new(id);
        farms[player].add_card(CardInstance::new(id, Arc::new(card)));
        id
    }

    fn harvester(id: u32) -> CardDefinition {
        CardDefinition::occupation(CardId::new(id), format!("Harvester {}", id)).with_effect(
            EffectDefinition::new(EffectId::new(1), TriggerKind::OnHarvest).gain(ResourceType::Food, 1),
        )
    }

    #[test]
    fn test_register_requires_ownership() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let id = give(&mut farms, P0, 1, harvester(1));

        assert!(!registry.register(&farms, P1, id));
        assert!(!registry.register(&farms, PlayerId::new(7), id));
        assert!(registry.register(&farms, P0, id));
        assert!(!registry.register(&farms, P0, id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let a = give(&mut farms, P0, 1, harvester(1));
        let b = give(&mut farms, P0, 2, harvester(2));
        registry.register(&farms, P0, a);
        registry.register(&farms, P0, b);

        assert!(registry.unregister(P0, a));
        assert!(!registry.unregister(P0, a));
        assert_eq!(registry.registered_cards(P0), &[b]);
        assert!(!registry.is_registered(P0, a));
    }

    #[test]
    fn test_registration_order() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let ids: Vec<_> = (1..=4).map(|i| give(&mut farms, P0, i, harvester(i))).collect();
        for &id in ids.iter().rev() {
            registry.register(&farms, P0, id);
        }

        let ctx = TriggerContext::new(TriggerKind::OnHarvest, P0);
        let found: Vec<_> = registry
            .find_triggerable_cards(&farms, P0, &ctx)
            .into_iter()
            .map(|m| m.card)
            .collect();
        let expected: Vec<_> = ids.into_iter().rev().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_unregistered_cards_never_fire() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        give(&mut farms, P0, 1, harvester(1));

        let ctx = TriggerContext::new(TriggerKind::OnHarvest, P0);
        assert_eq!(registry.trigger_for_player(&mut farms, P0, &ctx), 0);
        assert_eq!(farms[P0].state.resource(ResourceType::Food), 0);
    }

    #[test]
    fn test_condition_filter() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let card = CardDefinition::occupation(CardId::new(1), "Woodsman")
            .with_effect(
                EffectDefinition::new(EffectId::new(1), TriggerKind::OnAction)
                    .gain(ResourceType::Wood, 1)
                    .with_condition(EffectCondition::legacy("Forest")),
            )
            .with_effect(
                EffectDefinition::new(EffectId::new(2), TriggerKind::OnAction).gain(ResourceType::Food, 1),
            );
        let id = give(&mut farms, P0, 1, card);
        registry.register(&farms, P0, id);

        let forest = ActionContext::new("Forest", ActionCategory::Gathering);
        let ctx = TriggerContext::action(P0, forest.clone()).with_condition("Forest");
        let found = registry.find_triggerable_cards(&farms, P0, &ctx);
        // The unconditioned effect matches any filter.
        assert_eq!(found[0].effects.as_slice(), &[0, 1]);

        let ctx = TriggerContext::action(P0, forest).with_condition("Reed");
        let found = registry.find_triggerable_cards(&farms, P0, &ctx);
        assert_eq!(found[0].effects.as_slice(), &[1]);
    }

    #[test]
    fn test_stale_matches_respect_usage() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let card = CardDefinition::occupation(CardId::new(1), "Once").with_effect(
            EffectDefinition::new(EffectId::new(1), TriggerKind::OnHarvest)
                .gain(ResourceType::Food, 2)
                .with_usage(UsagePolicy::Once),
        );
        let id = give(&mut farms, P0, 1, card);
        registry.register(&farms, P0, id);

        let ctx = TriggerContext::new(TriggerKind::OnHarvest, P0);
        let matches = registry.find_triggerable_cards(&farms, P0, &ctx);
        assert_eq!(registry.execute_triggerable_cards(&mut farms, &matches, &ctx), 1);
        assert_eq!(registry.execute_triggerable_cards(&mut farms, &matches, &ctx), 0);
        assert_eq!(farms[P0].state.resource(ResourceType::Food), 2);
    }

    #[test]
    fn test_failure_isolation() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let costly = CardDefinition::improvement(CardId::new(1), "Costly").with_effect(
            EffectDefinition::new(EffectId::new(1), TriggerKind::OnHarvest)
                .cost(ResourceType::Stone, 5)
                .gain(ResourceType::Food, 5),
        );
        let a = give(&mut farms, P0, 1, costly);
        let b = give(&mut farms, P0, 2, harvester(2));
        registry.register(&farms, P0, a);
        registry.register(&farms, P0, b);

        let ctx = TriggerContext::new(TriggerKind::OnHarvest, P0);
        assert_eq!(registry.trigger_for_player(&mut farms, P0, &ctx), 1);
        assert_eq!(farms[P0].state.resource(ResourceType::Food), 1);
        assert_eq!(farms[P0].state.resource(ResourceType::Stone), 0);

        let stats = registry.stats();
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.effects_executed, 1);
        assert_eq!(stats.triggers_processed, 1);
    }

    #[test]
    fn test_reset() {
        let mut farms = farms();
        let mut registry = TriggerRegistry::new();
        let id = give(&mut farms, P1, 1, harvester(1));
        registry.register(&farms, P1, id);
        registry.trigger_for_player(&mut farms, P1, &TriggerContext::new(TriggerKind::OnHarvest, P1));

        registry.reset();
        assert_eq!(registry.stats(), RegistryStats::default());
        assert!(registry.is_empty());
    }
}
