//! Component lookup used to resolve sibling-relative positions

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU64;

use crate::geometry::types::PixelRect;

/// Identifier of a component in the surrounding layout.
///
/// The raw value 0 is reserved for "no component" and has no `ComponentId`;
/// an unset reference is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(NonZeroU64);

impl ComponentId {
    /// `None` for the reserved value 0
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Lowercase hexadecimal without prefix, as stored in attributes
    pub fn to_hex(self) -> String {
        format!("{:x}", self.get())
    }

    /// Best-effort hexadecimal decode.
    ///
    /// Characters that are not hex digits are skipped and excess high digits
    /// shift out, so any input yields a value; a result of 0 is `None`.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let raw = text
            .chars()
            .filter_map(|c| c.to_digit(16))
            .fold(0u64, |acc, digit| (acc << 4) | u64::from(digit));
        Self::new(raw)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.get())
    }
}

/// Hex form of an optional id, `"0"` when unset
pub fn id_to_hex(id: Option<ComponentId>) -> String {
    id.map_or_else(|| "0".to_string(), ComponentId::to_hex)
}

/// Capability to look up the live bounds of a component by id.
///
/// Bounds are relative to the component's parent. Implementations should be
/// cheap and free of side effects; they are queried on every resolution.
pub trait BoundsLookup {
    fn bounds_of(&self, id: ComponentId) -> Option<PixelRect>;
}

impl<T: BoundsLookup + ?Sized> BoundsLookup for &T {
    fn bounds_of(&self, id: ComponentId) -> Option<PixelRect> {
        (**self).bounds_of(id)
    }
}

impl BoundsLookup for HashMap<ComponentId, PixelRect> {
    fn bounds_of(&self, id: ComponentId) -> Option<PixelRect> {
        self.get(&id).copied()
    }
}

/// In-memory registry of component bounds
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: HashMap<ComponentId, PixelRect>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or move a component. Returns the previous bounds, if any.
    pub fn insert(&mut self, id: ComponentId, bounds: PixelRect) -> Option<PixelRect> {
        self.components.insert(id, bounds)
    }

    /// Remove a component
    pub fn remove(&mut self, id: ComponentId) -> Option<PixelRect> {
        self.components.remove(&id)
    }

    /// Check if a component is registered
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl BoundsLookup for ComponentRegistry {
    fn bounds_of(&self, id: ComponentId) -> Option<PixelRect> {
        self.components.get(&id).copied()
    }
}

impl FromIterator<(ComponentId, PixelRect)> for ComponentRegistry {
    fn from_iter<I: IntoIterator<Item = (ComponentId, PixelRect)>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}
