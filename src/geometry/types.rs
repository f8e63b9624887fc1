//! Rectangle and point primitives shared by the transform and the resolver

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2D point in double precision
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An integer pixel rectangle, used for reference areas and resolved bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin with the given size
    pub fn with_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// True when either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Widen to a double-precision box
    pub fn to_bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.width),
            f64::from(self.height),
        )
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

/// Error returned when a `X,Y,W,H` rectangle string cannot be read
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RectParseError {
    #[error("expected 4 comma-separated integers, found {found}")]
    WrongArity { found: usize },

    #[error("invalid integer '{value}'")]
    InvalidNumber { value: String },
}

impl FromStr for PixelRect {
    type Err = RectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(RectParseError::WrongArity { found: parts.len() });
        }

        let mut values = [0i32; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| RectParseError::InvalidNumber {
                    value: (*part).to_string(),
                })?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

/// A rectangle in double precision, the unrounded counterpart of [`PixelRect`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Round each field independently to the nearest pixel
    pub fn round(&self) -> PixelRect {
        PixelRect::new(
            round_to_pixel(self.x),
            round_to_pixel(self.y),
            round_to_pixel(self.width),
            round_to_pixel(self.height),
        )
    }
}

/// Round half away from zero, saturating at the `i32` range
pub(crate) fn round_to_pixel(value: f64) -> i32 {
    value.round() as i32
}
