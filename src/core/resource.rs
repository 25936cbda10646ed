//! Resource types and resource bundles.
//!
//! `ResourceType` enumerates every good a farm can hold. Building
//! materials, crops, animals and food all live in the same store.
//!
//! `ResourceBundle` is an ordered list of `(resource, amount)` pairs used
//! for declared gains, costs and thresholds. Declaration order is kept so
//! effects apply and log in the order they were written.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A good held in a farm's supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Wood,
    Clay,
    Reed,
    Stone,
    Grain,
    Vegetable,
    Sheep,
    Boar,
    Cattle,
    Food,
}

impl ResourceType {
    /// Number of resource types.
    pub const COUNT: usize = 10;

    /// Every resource type, in declaration order.
    pub const ALL: [ResourceType; Self::COUNT] = [
        ResourceType::Wood,
        ResourceType::Clay,
        ResourceType::Reed,
        ResourceType::Stone,
        ResourceType::Grain,
        ResourceType::Vegetable,
        ResourceType::Sheep,
        ResourceType::Boar,
        ResourceType::Cattle,
        ResourceType::Food,
    ];

    /// Dense index for array-backed storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name, also used for text condition matching.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ResourceType::Wood => "Wood",
            ResourceType::Clay => "Clay",
            ResourceType::Reed => "Reed",
            ResourceType::Stone => "Stone",
            ResourceType::Grain => "Grain",
            ResourceType::Vegetable => "Vegetable",
            ResourceType::Sheep => "Sheep",
            ResourceType::Boar => "Boar",
            ResourceType::Cattle => "Cattle",
            ResourceType::Food => "Food",
        }
    }

    /// Is this an animal (kept in pastures and rooms, bred at harvest)?
    #[must_use]
    pub const fn is_animal(self) -> bool {
        matches!(self, ResourceType::Sheep | ResourceType::Boar | ResourceType::Cattle)
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered `(resource, amount)` list.
///
/// Repeated entries for the same resource are allowed; [`amount_of`]
/// sums them.
///
/// [`amount_of`]: ResourceBundle::amount_of
///
/// ```
/// use farmyard_engine::core::{ResourceBundle, ResourceType};
///
/// let cost = ResourceBundle::new()
///     .with(ResourceType::Clay, 2)
///     .with(ResourceType::Stone, 1);
///
/// assert_eq!(cost.amount_of(ResourceType::Clay), 2);
/// assert_eq!(cost.amount_of(ResourceType::Wood), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBundle(SmallVec<[(ResourceType, i32); 4]>);

impl ResourceBundle {
    /// Create an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bundle holding a single entry.
    #[must_use]
    pub fn single(resource: ResourceType, amount: i32) -> Self {
        Self::new().with(resource, amount)
    }

    /// Add an entry (builder pattern). Zero amounts are dropped.
    #[must_use]
    pub fn with(mut self, resource: ResourceType, amount: i32) -> Self {
        self.push(resource, amount);
        self
    }

    /// Add an entry in place. Zero amounts are dropped.
    pub fn push(&mut self, resource: ResourceType, amount: i32) {
        if amount != 0 {
            self.0.push((resource, amount));
        }
    }

    /// Total amount declared for `resource`.
    #[must_use]
    pub fn amount_of(&self, resource: ResourceType) -> i32 {
        self.0
            .iter()
            .filter(|(r, _)| *r == resource)
            .map(|(_, a)| *a)
            .sum()
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, i32)> + '_ {
        self.0.iter().copied()
    }

    /// Check if the bundle has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(ResourceType, i32)> for ResourceBundle {
    fn from_iter<I: IntoIterator<Item = (ResourceType, i32)>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for (resource, amount) in iter {
            bundle.push(resource, amount);
        }
        bundle
    }
}
