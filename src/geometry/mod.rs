//! Positioned rectangles and the geometry they resolve to
//!
//! This module holds the rectangle primitives, the per-axis modes and the
//! [`CoordinateTransform`] that converts between stored positions and
//! absolute pixel rectangles.

pub mod config;
pub mod mode;
pub mod transform;
pub mod types;

pub use config::EncodingConfig;
pub use mode::{Anchor, AxisMode, ModeError, PositionBasis, SizeMode};
pub use transform::CoordinateTransform;
pub use types::{BoundingBox, PixelRect, Point, RectParseError};
