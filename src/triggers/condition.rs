//! Effect conditions.
//!
//! An effect may require something of the trigger that fired it: "when
//! you use a Forest space", "when you take Grain". A condition is a
//! `(field, operator, value)` triple read from the trigger payload.
//!
//! Free-text conditions from older card data go through
//! [`EffectCondition::legacy`], which keeps their fuzzy substring semantics.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::event::TriggerPayload;

/// Payload field a condition reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextField {
    /// Action space name.
    ActionName,
    /// Action space category name.
    ActionCategory,
    /// Name or category of the action; either may match.
    ActionDescriptor,
    /// Resource of a take or receive event.
    Resource,
    /// Source of a take or receive event.
    Source,
}

/// How the field is compared with the condition value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionOp {
    /// Exact equality.
    Equals,
    /// The field contains the value.
    Contains,
    /// Either string contains the other.
    Fuzzy,
}

impl ConditionOp {
    /// Compare a field value against the expected value.
    #[must_use]
    pub fn matches(self, actual: &str, expected: &str) -> bool {
        match self {
            ConditionOp::Equals => actual == expected,
            ConditionOp::Contains => actual.contains(expected),
            ConditionOp::Fuzzy => fuzzy_match(actual, expected),
        }
    }
}

/// Bidirectional substring test: either string containing the other counts.
///
/// The empty string matches everything.
///
/// ```
/// use farmyard_engine::triggers::fuzzy_match;
///
/// assert!(fuzzy_match("Forest", "Fore"));
/// assert!(fuzzy_match("Fore", "Forest"));
/// assert!(!fuzzy_match("Forest", "Clay Pit"));
/// ```
#[must_use]
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// A structured requirement on the trigger payload.
///
/// ```
/// use farmyard_engine::triggers::{
///     ActionCategory, ActionContext, ConditionOp, ContextField, EffectCondition, TriggerPayload,
/// };
///
/// let condition = EffectCondition::new(ContextField::ActionName, ConditionOp::Contains, "Seeds");
/// let payload = TriggerPayload::Action(ActionContext::new("Grain Seeds", ActionCategory::Farming));
///
/// assert_eq!(condition.evaluate(&payload), Some(true));
/// assert_eq!(condition.evaluate(&TriggerPayload::None), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectCondition {
    pub field: ContextField,
    pub op: ConditionOp,
    pub value: String,
}

impl EffectCondition {
    #[must_use]
    pub fn new(field: ContextField, op: ConditionOp, value: impl Into<String>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }

    /// Free-text condition: fuzzy match against the action name or category.
    #[must_use]
    pub fn legacy(text: impl Into<String>) -> Self {
        Self::new(ContextField::ActionDescriptor, ConditionOp::Fuzzy, text)
    }

    /// Action name contains `name`.
    #[must_use]
    pub fn action_named(name: impl Into<String>) -> Self {
        Self::new(ContextField::ActionName, ConditionOp::Contains, name)
    }

    /// Action category equals `category`.
    #[must_use]
    pub fn action_category(category: super::event::ActionCategory) -> Self {
        Self::new(ContextField::ActionCategory, ConditionOp::Equals, category.to_string())
    }

    /// Evaluate against a payload.
    ///
    /// Returns `None` when the payload does not carry the field; callers
    /// decide what an absent field means for their trigger kind.
    #[must_use]
    pub fn evaluate(&self, payload: &TriggerPayload) -> Option<bool> {
        let values = field_values(self.field, payload);
        if values.is_empty() {
            return None;
        }
        Some(values.iter().any(|v| self.op.matches(v, &self.value)))
    }
}

fn field_values(field: ContextField, payload: &TriggerPayload) -> SmallVec<[String; 2]> {
    let mut values = SmallVec::new();
    match (field, payload) {
        (ContextField::ActionName, TriggerPayload::Action(action)) => {
            values.push(action.name.clone());
        }
        (ContextField::ActionCategory, TriggerPayload::Action(action)) => {
            values.push(action.category.to_string());
        }
        (ContextField::ActionDescriptor, TriggerPayload::Action(action)) => {
            values.push(action.name.clone());
            values.push(action.category.to_string());
        }
        (ContextField::Resource, TriggerPayload::Take(event) | TriggerPayload::Receive(event)) => {
            values.push(event.resource.to_string());
        }
        (ContextField::Source, TriggerPayload::Take(event) | TriggerPayload::Receive(event)) => {
            values.push(event.source.clone());
        }
        _ => {}
    }
    values
}
