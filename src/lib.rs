//! Positioned Rect - relative and proportional rectangles for layout editors
//!
//! A position is stored as four values `x y w h`, each of which may be an
//! absolute distance, a distance from the parent's far edge or centre, or a
//! proportion of the parent's size. The same position then resolves to new
//! pixel bounds whenever the parent is resized.
//!
//! # Example
//!
//! ```rust
//! use positioned_rect::{CoordinateTransform, PixelRect};
//!
//! let pos = CoordinateTransform::parse("50% 50% 100 100");
//! let bounds = pos.resolve(PixelRect::new(0, 0, 200, 200));
//! assert_eq!(bounds, PixelRect::new(100, 100, 100, 100));
//! ```

pub mod geometry;
pub mod lint;
pub mod parser;
pub mod relative;
pub mod settings;

pub use geometry::{
    Anchor, AxisMode, BoundingBox, CoordinateTransform, EncodingConfig, ModeError, PixelRect,
    Point, PositionBasis, RectParseError, SizeMode,
};
pub use lint::{LintCategory, LintWarning};
pub use relative::{
    AttributeStore, BoundsLookup, ComponentId, ComponentRegistry, ElementAttributes,
    ReferenceBounds, RelativeCoordinateResolver,
};
pub use settings::{Settings, SettingsError};

/// Resolve a position string against a parent area
///
/// # Example
///
/// ```rust
/// use positioned_rect::{resolve, PixelRect};
///
/// // inset by 10 pixels on every side
/// let bounds = resolve("10 10 20M 20M", PixelRect::new(0, 0, 300, 200));
/// assert_eq!(bounds, PixelRect::new(10, 10, 280, 180));
/// ```
pub fn resolve(position: &str, parent: PixelRect) -> PixelRect {
    CoordinateTransform::parse(position).resolve(parent)
}

/// Re-express a position string with the modes of another.
///
/// Only the suffixes of `modes` matter; its numbers are ignored. The result
/// resolves to the same bounds within `parent` as `position` did.
///
/// # Example
///
/// ```rust
/// use positioned_rect::{convert, PixelRect};
///
/// let converted = convert("50 20 100 40", "0% 0Rr 0% 0M", PixelRect::new(0, 0, 200, 100));
/// assert_eq!(converted, "25% 40Rr 50% 60M");
/// ```
pub fn convert(position: &str, modes: &str, parent: PixelRect) -> String {
    convert_with(position, modes, parent, &EncodingConfig::default())
}

/// [`convert`] with a custom output precision
pub fn convert_with(
    position: &str,
    modes: &str,
    parent: PixelRect,
    config: &EncodingConfig,
) -> String {
    let target = CoordinateTransform::parse(modes);
    let mut pos = CoordinateTransform::parse(position);
    pos.change_modes(
        target.x_mode(),
        target.y_mode(),
        target.width_mode(),
        target.height_mode(),
        parent,
    );
    pos.to_string_with(config)
}
