//! Per-axis coordinate modes
//!
//! An x or y coordinate is described by two independent choices:
//!
//! - the [`Anchor`]: which point of the rectangle itself the coordinate names
//!   (its left/top edge, right/bottom edge, or centre);
//! - the [`PositionBasis`]: which point of the reference rectangle the
//!   coordinate is measured from, or whether it is a proportion of the
//!   reference size.
//!
//! Widths and heights use a single [`SizeMode`].
//!
//! Older saved layouts pack a position mode into one byte of bit flags. The
//! enums here make an invalid combination unrepresentable; [`AxisMode::from_bits`]
//! is the checked way in from the packed form.

use thiserror::Error;

const ANCHOR_NEAR: u8 = 1 << 0;
const ANCHOR_FAR: u8 = 1 << 1;
const ANCHOR_CENTRE: u8 = 1 << 2;
const ANCHOR_MASK: u8 = ANCHOR_NEAR | ANCHOR_FAR | ANCHOR_CENTRE;

const BASIS_NEAR: u8 = 1 << 3;
const BASIS_FAR: u8 = 1 << 4;
const BASIS_CENTRE: u8 = 1 << 5;
const BASIS_PROPORTIONAL: u8 = 1 << 6;
const BASIS_MASK: u8 = BASIS_NEAR | BASIS_FAR | BASIS_CENTRE | BASIS_PROPORTIONAL;

const SIZE_ABSOLUTE: u8 = 1 << 0;
const SIZE_PARENT_MINUS: u8 = 1 << 1;
const SIZE_PROPORTIONAL: u8 = 1 << 2;

/// Errors from converting packed mode bytes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("mode byte {bits:#04x} must set exactly one anchor flag")]
    Anchor { bits: u8 },

    #[error("mode byte {bits:#04x} must set exactly one position basis flag")]
    Basis { bits: u8 },

    #[error("mode byte {bits:#04x} has bits outside the anchor and basis flags")]
    UnknownBits { bits: u8 },

    #[error("size mode byte {bits:#04x} is not a single size flag")]
    Size { bits: u8 },
}

/// Which point of the rectangle an x or y coordinate refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    /// The left or top edge
    #[default]
    NearEdge,
    /// The right or bottom edge
    FarEdge,
    Centre,
}

impl Anchor {
    fn bits(self) -> u8 {
        match self {
            Anchor::NearEdge => ANCHOR_NEAR,
            Anchor::FarEdge => ANCHOR_FAR,
            Anchor::Centre => ANCHOR_CENTRE,
        }
    }

    /// Distance from the rectangle's near edge to the anchored point
    pub(crate) fn offset(self, size: f64) -> f64 {
        match self {
            Anchor::NearEdge => 0.0,
            Anchor::FarEdge => size,
            Anchor::Centre => size / 2.0,
        }
    }
}

/// How an x or y coordinate is measured against the reference rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PositionBasis {
    /// Absolute distance from the reference's left or top edge
    #[default]
    FromNearEdge,
    /// Absolute distance back from the reference's right or bottom edge
    FromFarEdge,
    /// Absolute distance from the reference's centre
    FromCentre,
    /// Fraction of the reference size, measured from its left or top edge
    Proportional,
}

impl PositionBasis {
    fn bits(self) -> u8 {
        match self {
            PositionBasis::FromNearEdge => BASIS_NEAR,
            PositionBasis::FromFarEdge => BASIS_FAR,
            PositionBasis::FromCentre => BASIS_CENTRE,
            PositionBasis::Proportional => BASIS_PROPORTIONAL,
        }
    }
}

/// Full mode of one position axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AxisMode {
    pub anchor: Anchor,
    pub basis: PositionBasis,
}

impl AxisMode {
    pub fn new(anchor: Anchor, basis: PositionBasis) -> Self {
        Self { anchor, basis }
    }

    /// Near-edge anchor measured from the reference's near edge
    pub fn absolute() -> Self {
        Self::default()
    }

    pub fn is_absolute(&self) -> bool {
        *self == Self::absolute()
    }

    /// Pack into the legacy one-byte form
    pub fn bits(&self) -> u8 {
        self.anchor.bits() | self.basis.bits()
    }

    /// Unpack the legacy one-byte form, rejecting ambiguous or unknown flags
    pub fn from_bits(bits: u8) -> Result<Self, ModeError> {
        if bits & !(ANCHOR_MASK | BASIS_MASK) != 0 {
            return Err(ModeError::UnknownBits { bits });
        }

        let anchor = match bits & ANCHOR_MASK {
            ANCHOR_NEAR => Anchor::NearEdge,
            ANCHOR_FAR => Anchor::FarEdge,
            ANCHOR_CENTRE => Anchor::Centre,
            _ => return Err(ModeError::Anchor { bits }),
        };

        let basis = match bits & BASIS_MASK {
            BASIS_NEAR => PositionBasis::FromNearEdge,
            BASIS_FAR => PositionBasis::FromFarEdge,
            BASIS_CENTRE => PositionBasis::FromCentre,
            BASIS_PROPORTIONAL => PositionBasis::Proportional,
            _ => return Err(ModeError::Basis { bits }),
        };

        Ok(Self { anchor, basis })
    }
}

/// How a width or height is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeMode {
    #[default]
    Absolute,
    /// Amount subtracted from the reference size
    ParentMinus,
    /// Fraction of the reference size
    Proportional,
}

impl SizeMode {
    pub fn bits(self) -> u8 {
        match self {
            SizeMode::Absolute => SIZE_ABSOLUTE,
            SizeMode::ParentMinus => SIZE_PARENT_MINUS,
            SizeMode::Proportional => SIZE_PROPORTIONAL,
        }
    }

    pub fn from_bits(bits: u8) -> Result<Self, ModeError> {
        match bits {
            SIZE_ABSOLUTE => Ok(SizeMode::Absolute),
            SIZE_PARENT_MINUS => Ok(SizeMode::ParentMinus),
            SIZE_PROPORTIONAL => Ok(SizeMode::Proportional),
            _ => Err(ModeError::Size { bits }),
        }
    }
}
