//! Sibling-relative positioning
//!
//! Resolving a [`RelativeCoordinateResolver`] needs the live bounds of other
//! components, supplied through the [`BoundsLookup`] capability, and it
//! persists itself onto any [`AttributeStore`].

pub mod attributes;
pub mod registry;
pub mod resolver;

pub use attributes::{AttributeStore, ElementAttributes};
pub use registry::{BoundsLookup, ComponentId, ComponentRegistry};
pub use resolver::{ReferenceBounds, RelativeCoordinateResolver};
