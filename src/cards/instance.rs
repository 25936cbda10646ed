//! Card instances - a player's copy of a card.
//!
//! `CardInstance` pairs a shared definition with the usage counters of
//! this copy. Two players owning the same card never share counters.

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::trace;

use super::definition::{CardDefinition, CardId};
use crate::core::{FarmState, PaymentPolicy, Result};
use crate::effects::{EffectResolver, EffectUsage};
use crate::triggers::TriggerContext;

/// Identifier of one owned copy of a card, unique within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CardInstanceId(pub u32);

impl CardInstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// A card owned by a player.
#[derive(Clone, Debug)]
pub struct CardInstance {
    id: CardInstanceId,
    definition: Arc<CardDefinition>,
    /// One counter per effect, parallel to `definition.effects`.
    usage: SmallVec<[EffectUsage; 4]>,
}

impl CardInstance {
    /// Create an instance with fresh usage counters.
    #[must_use]
    pub fn new(id: CardInstanceId, definition: Arc<CardDefinition>) -> Self {
        let usage = definition.effects.iter().map(|_| EffectUsage::default()).collect();
        Self {
            id,
            definition,
            usage,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardInstanceId {
        self.id
    }

    #[must_use]
    pub fn definition(&self) -> &CardDefinition {
        &self.definition
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.definition.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.definition.has_tag(tag)
    }

    #[must_use]
    pub fn is_occupation(&self) -> bool {
        self.definition.is_occupation()
    }

    // === Usage ===

    /// Usage counter of effect `index`.
    #[must_use]
    pub fn usage(&self, index: usize) -> Option<EffectUsage> {
        self.usage.get(index).copied()
    }

    /// Can effect `index` fire again? `false` for an unknown index.
    #[must_use]
    pub fn can_activate(&self, index: usize) -> bool {
        match (self.definition.effects.get(index), self.usage.get(index)) {
            (Some(effect), Some(usage)) => usage.can_activate(effect.usage),
            _ => false,
        }
    }

    /// Reset every counter. One-time effects stay spent.
    pub fn reset_uses(&mut self) {
        for (usage, effect) in self.usage.iter_mut().zip(&self.definition.effects) {
            usage.reset(effect.usage);
        }
    }

    // === Triggering ===

    /// Indices of effects that fire for `ctx`, in declaration order.
    ///
    /// An effect matches when it declares exactly `ctx.kind`, can still
    /// activate, and its condition accepts the context.
    #[must_use]
    pub fn matching_effects(&self, ctx: &TriggerContext) -> SmallVec<[usize; 4]> {
        self.definition
            .effects_for(ctx.kind)
            .filter(|&idx| self.can_activate(idx))
            .filter(|&idx| {
                self.definition
                    .condition_holds(&self.definition.effects[idx], ctx)
            })
            .collect()
    }

    /// Apply effect `index` to `state` and count the use.
    ///
    /// Returns `Ok(false)` without touching anything when the index is
    /// unknown or the effect cannot activate any more.
    pub fn apply_effect(
        &mut self,
        index: usize,
        state: &mut FarmState,
        policy: PaymentPolicy,
    ) -> Result<bool> {
        if !self.can_activate(index) {
            return Ok(false);
        }
        let effect = &self.definition.effects[index];
        EffectResolver::resolve(&self.definition, effect, state, policy)?;
        self.usage[index].record_use(effect.usage);
        Ok(true)
    }

    /// Apply several effects in order. Stops at the first failure; effects
    /// applied before it stay applied.
    pub fn apply_effects(
        &mut self,
        indices: &[usize],
        state: &mut FarmState,
        policy: PaymentPolicy,
    ) -> Result<usize> {
        let mut applied = 0;
        for &index in indices {
            if self.apply_effect(index, state, policy)? {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Apply every effect that matches `ctx`. Returns how many fired.
    pub fn trigger_effect(
        &mut self,
        state: &mut FarmState,
        ctx: &TriggerContext,
        policy: PaymentPolicy,
    ) -> Result<usize> {
        let indices = self.matching_effects(ctx);
        let applied = self.apply_effects(&indices, state, policy)?;
        trace!(
            target: "farmyard::cards",
            card = %self.name(),
            kind = %ctx.kind,
            applied,
            "card.triggered"
        );
        Ok(applied)
    }
}
