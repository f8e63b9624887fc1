//! Coordinate transform between stored positions and absolute rectangles.
//!
//! A [`CoordinateTransform`] stores `x, y, w, h` together with a mode per
//! value. Depending on the mode a value is a pixel distance or a fraction of a
//! reference rectangle, so the same stored position can follow a parent as it
//! is resized.
//!
//! ## Forward transform (resolve)
//!
//! Each axis is handled independently, x with the width and y with the height:
//!
//! 1. The size is resolved first: a fraction of the reference size, the
//!    reference size minus the stored amount (never below zero), or the stored
//!    amount as-is.
//! 2. The coordinate is measured from the basis point of the reference:
//!    its near edge, its far edge, its centre, or as a fraction of its size.
//! 3. The anchor then moves the result from the anchored point of the
//!    rectangle back to its near edge, by the full or half resolved size.
//!
//! ## Inverse transform (rebase)
//!
//! Rebasing runs the same steps backwards under the current modes. A
//! proportional value cannot be recovered against a reference with no extent,
//! so such values are left unchanged.
//!
//! ## Text form
//!
//! `Display` writes the four tokens `"x y w h"`, see [`crate::parser::codec`].

use std::fmt;

use crate::parser::codec::{
    decode_position, decode_size, encode_position, encode_size, split_tokens,
};

use super::config::EncodingConfig;
use super::mode::{AxisMode, PositionBasis, SizeMode};
use super::types::{BoundingBox, PixelRect, Point};

/// A rectangle whose coordinates may be absolute or relative to a reference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateTransform {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    x_mode: AxisMode,
    y_mode: AxisMode,
    w_mode: SizeMode,
    h_mode: SizeMode,
}

impl CoordinateTransform {
    /// An absolute rectangle at `(x, y)` with the given size
    pub fn absolute(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            ..Self::default()
        }
    }

    /// Best-effort decode of the `"x y w h"` text form.
    ///
    /// Missing or malformed tokens become zero with an absolute mode.
    pub fn parse(text: &str) -> Self {
        let [xt, yt, wt, ht] = split_tokens(text);
        let (x, x_mode) = decode_position(xt);
        let (y, y_mode) = decode_position(yt);
        let (w, w_mode) = decode_size(wt);
        let (h, h_mode) = decode_size(ht);

        Self {
            x,
            y,
            w,
            h,
            x_mode,
            y_mode,
            w_mode,
            h_mode,
        }
    }

    /// Encode with a custom precision; `to_string()` uses the defaults
    pub fn to_string_with(&self, config: &EncodingConfig) -> String {
        format!(
            "{} {} {} {}",
            encode_position(self.x, self.x_mode, config),
            encode_position(self.y, self.y_mode, config),
            encode_size(self.w, self.w_mode, config),
            encode_size(self.h, self.h_mode, config),
        )
    }

    /// Resolve to whole pixels within `reference`
    pub fn resolve(&self, reference: PixelRect) -> PixelRect {
        self.resolve_f64(reference).round()
    }

    /// Resolve within `reference` without rounding
    pub fn resolve_f64(&self, reference: PixelRect) -> BoundingBox {
        if reference.is_empty() {
            tracing::debug!(%reference, "resolving against a reference with no area");
        }

        let (x, w) = resolve_axis(
            self.x,
            self.w,
            self.x_mode,
            self.w_mode,
            reference.x,
            reference.width,
        );
        let (y, h) = resolve_axis(
            self.y,
            self.h,
            self.y_mode,
            self.h_mode,
            reference.y,
            reference.height,
        );

        BoundingBox::new(x, y, w, h)
    }

    /// Resolve against a parent area of the given size at the origin
    pub fn resolve_within(&self, width: i32, height: i32) -> PixelRect {
        self.resolve(PixelRect::with_size(width, height))
    }

    /// Resolved position of the rectangle's top-left corner, unrounded
    pub fn resolve_origin(&self, reference: PixelRect) -> Point {
        self.resolve_f64(reference).origin()
    }

    /// Recompute the stored values so that resolving against `reference`
    /// gives `bounds`, keeping the current modes.
    pub fn rebase(&mut self, bounds: PixelRect, reference: PixelRect) {
        self.rebase_f64(bounds.to_bounding_box(), reference);
    }

    /// Same as [`rebase`](Self::rebase) with a double-precision target
    pub fn rebase_f64(&mut self, bounds: BoundingBox, reference: PixelRect) {
        rebase_axis(
            &mut self.x,
            &mut self.w,
            bounds.x,
            bounds.width,
            self.x_mode,
            self.w_mode,
            reference.x,
            reference.width,
        );
        rebase_axis(
            &mut self.y,
            &mut self.h,
            bounds.y,
            bounds.height,
            self.y_mode,
            self.h_mode,
            reference.y,
            reference.height,
        );
    }

    /// Switch modes while keeping the resolved rectangle where it is.
    ///
    /// An axis whose position and size modes are both unchanged is left
    /// exactly as stored.
    pub fn change_modes(
        &mut self,
        x_mode: AxisMode,
        y_mode: AxisMode,
        w_mode: SizeMode,
        h_mode: SizeMode,
        reference: PixelRect,
    ) {
        if self.x_mode != x_mode || self.w_mode != w_mode {
            tracing::debug!(
                from = ?(self.x_mode, self.w_mode),
                to = ?(x_mode, w_mode),
                "converting x axis"
            );
            let (x, w) = resolve_axis(
                self.x,
                self.w,
                self.x_mode,
                self.w_mode,
                reference.x,
                reference.width,
            );
            self.x_mode = x_mode;
            self.w_mode = w_mode;
            rebase_axis(
                &mut self.x,
                &mut self.w,
                x,
                w,
                x_mode,
                w_mode,
                reference.x,
                reference.width,
            );
        }

        if self.y_mode != y_mode || self.h_mode != h_mode {
            tracing::debug!(
                from = ?(self.y_mode, self.h_mode),
                to = ?(y_mode, h_mode),
                "converting y axis"
            );
            let (y, h) = resolve_axis(
                self.y,
                self.h,
                self.y_mode,
                self.h_mode,
                reference.y,
                reference.height,
            );
            self.y_mode = y_mode;
            self.h_mode = h_mode;
            rebase_axis(
                &mut self.y,
                &mut self.h,
                y,
                h,
                y_mode,
                h_mode,
                reference.y,
                reference.height,
            );
        }
    }

    /// True when the resolved rectangle does not depend on the reference
    pub fn is_fully_absolute(&self) -> bool {
        self.x_mode.is_absolute()
            && self.y_mode.is_absolute()
            && self.w_mode == SizeMode::Absolute
            && self.h_mode == SizeMode::Absolute
    }

    /// Raw x value: pixels, or a fraction when the x basis is proportional
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Raw y value: pixels, or a fraction when the y basis is proportional
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Raw width value, interpreted according to [`width_mode`](Self::width_mode)
    pub fn width(&self) -> f64 {
        self.w
    }

    pub fn set_width(&mut self, w: f64) {
        self.w = w;
    }

    /// Raw height value, interpreted according to [`height_mode`](Self::height_mode)
    pub fn height(&self) -> f64 {
        self.h
    }

    pub fn set_height(&mut self, h: f64) {
        self.h = h;
    }

    pub fn x_mode(&self) -> AxisMode {
        self.x_mode
    }

    pub fn y_mode(&self) -> AxisMode {
        self.y_mode
    }

    pub fn width_mode(&self) -> SizeMode {
        self.w_mode
    }

    pub fn height_mode(&self) -> SizeMode {
        self.h_mode
    }
}

impl fmt::Display for CoordinateTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&EncodingConfig::default()))
    }
}

impl From<&str> for CoordinateTransform {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Half of an integer reference size, rounded toward zero like the saved
/// layouts expect for centre-based coordinates
fn half(size: i32) -> f64 {
    f64::from(size / 2)
}

/// Forward transform of one axis, returning `(position, size)`
fn resolve_axis(
    pos: f64,
    size: f64,
    mode: AxisMode,
    size_mode: SizeMode,
    ref_pos: i32,
    ref_size: i32,
) -> (f64, f64) {
    let origin = f64::from(ref_pos);
    let extent = f64::from(ref_size);

    let size_out = match size_mode {
        SizeMode::Proportional => size * extent,
        SizeMode::ParentMinus => (extent - size).max(0.0),
        SizeMode::Absolute => size,
    };

    let pos_out = match mode.basis {
        PositionBasis::Proportional => origin + pos * extent,
        PositionBasis::FromFarEdge => (origin + extent) - pos,
        PositionBasis::FromCentre => pos + origin + half(ref_size),
        PositionBasis::FromNearEdge => pos + origin,
    };

    (pos_out - mode.anchor.offset(size_out), size_out)
}

/// Inverse transform of one axis, writing into the stored values
#[allow(clippy::too_many_arguments)]
fn rebase_axis(
    pos_out: &mut f64,
    size_out: &mut f64,
    pos: f64,
    size: f64,
    mode: AxisMode,
    size_mode: SizeMode,
    ref_pos: i32,
    ref_size: i32,
) {
    let origin = f64::from(ref_pos);
    let extent = f64::from(ref_size);

    match size_mode {
        SizeMode::Proportional => {
            if ref_size > 0 {
                *size_out = size / extent;
            }
        }
        SizeMode::ParentMinus => *size_out = extent - size,
        SizeMode::Absolute => *size_out = size,
    }

    let anchored = pos + mode.anchor.offset(size);

    match mode.basis {
        PositionBasis::Proportional => {
            if ref_size > 0 {
                *pos_out = (anchored - origin) / extent;
            }
        }
        PositionBasis::FromFarEdge => *pos_out = (origin + extent) - anchored,
        PositionBasis::FromCentre => *pos_out = anchored - (origin + half(ref_size)),
        PositionBasis::FromNearEdge => *pos_out = anchored - origin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mode::Anchor;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn mode(anchor: Anchor, basis: PositionBasis) -> AxisMode {
        AxisMode::new(anchor, basis)
    }

    #[test]
    fn test_default_is_empty_absolute() {
        let t = CoordinateTransform::default();
        assert!(t.is_fully_absolute());
        assert_eq!(t.to_string(), "0 0 0 0");
        assert_eq!(t.resolve(PixelRect::with_size(100, 100)), PixelRect::default());
    }

    #[test]
    fn test_absolute_resolve_adds_reference_origin() {
        let t = CoordinateTransform::absolute(10.0, 20.0, 30.0, 40.0);
        assert_eq!(
            t.resolve(PixelRect::new(5, 6, 100, 100)),
            PixelRect::new(15, 26, 30, 40)
        );
    }

    #[test]
    fn test_percentages_resolve_against_reference() {
        let t = CoordinateTransform::parse("50% 50% 100 100");
        assert_eq!(
            t.resolve(PixelRect::with_size(200, 200)),
            PixelRect::new(100, 100, 100, 100)
        );
    }

    #[test]
    fn test_far_anchor_subtracts_resolved_width() {
        let t = CoordinateTransform::parse("10r 0 20 10");
        let r = t.resolve(PixelRect::with_size(100, 50));
        assert_eq!(r.x, -10);
        assert_eq!(r.width, 20);
    }

    #[test]
    fn test_centre_anchor_subtracts_half_width() {
        let t = CoordinateTransform::parse("50c 0 20 10");
        assert_eq!(t.resolve(PixelRect::with_size(100, 50)).x, 40);
    }

    #[test]
    fn test_far_edge_basis() {
        let t = CoordinateTransform::parse("10Rr 5Rr 20 10");
        assert_eq!(
            t.resolve(PixelRect::new(0, 0, 100, 50)),
            PixelRect::new(70, 35, 20, 10)
        );
    }

    #[test]
    fn test_centre_basis_halves_reference_as_integer() {
        let t = CoordinateTransform::parse("10C 0 5 5");
        assert_eq!(t.resolve_f64(PixelRect::with_size(101, 10)).x, 60.0);
    }

    #[test]
    fn test_parent_minus_size() {
        let t = CoordinateTransform::parse("0 0 20M 20M");
        assert_eq!(t.resolve(PixelRect::with_size(200, 100)).width, 180);
        assert_eq!(t.resolve(PixelRect::with_size(200, 100)).height, 80);
        assert_eq!(t.resolve(PixelRect::with_size(10, 10)).width, 0);
    }

    #[test]
    fn test_resolve_rounds_each_field() {
        let t = CoordinateTransform::parse("33.333% 0 33.333% 10");
        let exact = t.resolve_f64(PixelRect::with_size(100, 100));
        assert!(approx_eq(exact.x, 33.333));
        assert_eq!(t.resolve(PixelRect::with_size(100, 100)).x, 33);
    }

    #[test]
    fn test_resolve_within_uses_origin() {
        let t = CoordinateTransform::parse("10R 10R 20 20");
        assert_eq!(t.resolve_within(100, 80), PixelRect::new(90, 70, 20, 20));
    }

    #[test]
    fn test_resolve_zero_reference_does_not_produce_nan() {
        let t = CoordinateTransform::parse("50%c 10Cr 25% 5M");
        let r = t.resolve_f64(PixelRect::default());
        assert!(r.x.is_finite() && r.y.is_finite());
        assert!(r.width.is_finite() && r.height.is_finite());
    }

    #[test]
    fn test_rebase_inverts_resolve_for_each_basis() {
        let reference = PixelRect::new(10, 20, 300, 200);
        for text in [
            "15 25 40 30",
            "15R 25R 40 30",
            "-15C 25C 40 30",
            "25% 10% 40 30",
            "15r 25c 30% 10M",
            "40%c 60%r 10% 25%",
        ] {
            let original = CoordinateTransform::parse(text);
            let bounds = original.resolve_f64(reference);

            let mut rebased = original;
            rebased.set_x(-999.0);
            rebased.set_y(-999.0);
            rebased.set_width(-999.0);
            rebased.set_height(-999.0);
            rebased.rebase_f64(bounds, reference);

            assert!(approx_eq(rebased.x(), original.x()), "{text}: x");
            assert!(approx_eq(rebased.y(), original.y()), "{text}: y");
            assert!(approx_eq(rebased.width(), original.width()), "{text}: w");
            assert!(approx_eq(rebased.height(), original.height()), "{text}: h");
        }
    }

    #[test]
    fn test_rebase_proportional_with_empty_reference_is_unchanged() {
        let mut t = CoordinateTransform::parse("25% 10 50% 10");
        t.rebase(PixelRect::new(1, 2, 3, 4), PixelRect::new(0, 0, 0, 100));
        assert_eq!(t.x(), 0.25);
        assert_eq!(t.width(), 0.5);
        assert_eq!(t.y(), 2.0);
        assert_eq!(t.height(), 4.0);
    }

    #[test]
    fn test_rebase_parent_minus_is_not_floored() {
        let mut t = CoordinateTransform::parse("0 0 0M 0");
        t.rebase(PixelRect::new(0, 0, 150, 10), PixelRect::with_size(100, 100));
        assert_eq!(t.width(), -50.0);
    }

    #[test]
    fn test_change_modes_preserves_bounds() {
        let reference = PixelRect::new(0, 0, 400, 300);
        let mut t = CoordinateTransform::absolute(50.0, 60.0, 100.0, 80.0);
        let before = t.resolve(reference);

        t.change_modes(
            mode(Anchor::Centre, PositionBasis::Proportional),
            mode(Anchor::FarEdge, PositionBasis::FromFarEdge),
            SizeMode::ParentMinus,
            SizeMode::Proportional,
            reference,
        );

        assert_eq!(t.resolve(reference), before);
        assert_eq!(t.x(), 0.25);
        assert_eq!(t.y(), 160.0);
        assert_eq!(t.width(), 300.0);
        assert!(!t.is_fully_absolute());
    }

    #[test]
    fn test_change_modes_skips_unchanged_axis() {
        let mut t = CoordinateTransform::parse("12.5 33.333% 10 10");
        let y_before = t.y();

        t.change_modes(
            mode(Anchor::NearEdge, PositionBasis::FromFarEdge),
            t.y_mode(),
            SizeMode::Absolute,
            t.height_mode(),
            PixelRect::with_size(0, 0),
        );

        assert_eq!(t.y(), y_before);
        assert_eq!(t.x_mode().basis, PositionBasis::FromFarEdge);
    }

    #[test]
    fn test_is_fully_absolute() {
        assert!(CoordinateTransform::parse("1 2 3 4").is_fully_absolute());
        assert!(!CoordinateTransform::parse("1r 2 3 4").is_fully_absolute());
        assert!(!CoordinateTransform::parse("1 2C 3 4").is_fully_absolute());
        assert!(!CoordinateTransform::parse("1 2 3M 4").is_fully_absolute());
        assert!(!CoordinateTransform::parse("1 2 3 4%").is_fully_absolute());
    }

    #[test]
    fn test_equality_is_exact() {
        let a = CoordinateTransform::absolute(1.0, 2.0, 3.0, 4.0);
        let mut b = a;
        assert_eq!(a, b);
        b.set_x(1.0 + 1e-12);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_and_from_str() {
        let t = CoordinateTransform::from("20% 30 150 50%");
        assert_eq!(t.to_string(), "20% 30 150 50%");
        assert_eq!(t.resolve_origin(PixelRect::with_size(500, 10)), Point::new(100.0, 30.0));
    }
}
