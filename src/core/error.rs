//! Engine error type.

use thiserror::Error;

use crate::cards::CardId;
use crate::effects::EffectId;

/// Errors raised by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The caller referenced a player or card the engine does not know.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A mutating operation was invoked while its gate was not satisfied.
    #[error("cannot play {card}: {reason}")]
    PreconditionFailed { card: String, reason: String },

    /// Applying one effect of a card failed.
    #[error("effect {effect} of {card} ({card_id}) failed: {reason}")]
    EffectExecutionFailed {
        card: String,
        card_id: CardId,
        effect: EffectId,
        reason: String,
    },
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }

    /// Shorthand for [`EngineError::PreconditionFailed`].
    pub fn precondition(card: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            card: card.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
