//! Positions measured against sibling components instead of the parent.
//!
//! A [`RelativeCoordinateResolver`] pairs a [`CoordinateTransform`] with up to
//! four sibling ids, one per value. Each id replaces the parent area for its
//! own axis only, so the x coordinate can follow one sibling while the width
//! follows another.
//!
//! Because of that split there are two reference rectangles: one for the
//! position (x and y references with their sizes) and one for the size (the
//! same origin with the w and h references' sizes). The final rectangle takes
//! its origin from the first and its size from the second.

use crate::geometry::transform::CoordinateTransform;
use crate::geometry::types::{BoundingBox, PixelRect, Point};

use super::attributes::{
    AttributeStore, POS_ATTRIBUTE, RELATIVE_H_ATTRIBUTE, RELATIVE_W_ATTRIBUTE,
    RELATIVE_X_ATTRIBUTE, RELATIVE_Y_ATTRIBUTE,
};
use super::registry::{id_to_hex, BoundsLookup, ComponentId};

/// Reference values for each axis after looking up the relative components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReferenceBounds {
    pub x: i32,
    /// Width of the x reference
    pub x_width: i32,
    pub y: i32,
    /// Height of the y reference
    pub y_height: i32,
    /// Width of the w reference
    pub width: i32,
    /// Height of the h reference
    pub height: i32,
}

impl ReferenceBounds {
    /// Reference for resolving x and y
    pub fn position_rect(&self) -> PixelRect {
        PixelRect::new(self.x, self.y, self.x_width, self.y_height)
    }

    /// Reference for resolving width and height
    pub fn size_rect(&self) -> PixelRect {
        PixelRect::new(self.x, self.y, self.width, self.height)
    }
}

/// A coordinate transform whose reference may be a sibling component
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelativeCoordinateResolver {
    pub rect: CoordinateTransform,
    pub relative_to_x: Option<ComponentId>,
    pub relative_to_y: Option<ComponentId>,
    pub relative_to_w: Option<ComponentId>,
    pub relative_to_h: Option<ComponentId>,
}

impl RelativeCoordinateResolver {
    /// A resolver with no relative components
    pub fn new(rect: CoordinateTransform) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    /// Set the component both x and width are measured against
    pub fn with_relative_x(mut self, id: Option<ComponentId>) -> Self {
        self.relative_to_x = id;
        self
    }

    pub fn with_relative_y(mut self, id: Option<ComponentId>) -> Self {
        self.relative_to_y = id;
        self
    }

    pub fn with_relative_w(mut self, id: Option<ComponentId>) -> Self {
        self.relative_to_w = id;
        self
    }

    pub fn with_relative_h(mut self, id: Option<ComponentId>) -> Self {
        self.relative_to_h = id;
        self
    }

    /// True when no axis refers to a sibling
    pub fn is_parent_relative(&self) -> bool {
        self.relative_to_x.is_none()
            && self.relative_to_y.is_none()
            && self.relative_to_w.is_none()
            && self.relative_to_h.is_none()
    }

    /// Look up the relative components, falling back to `parent_area` for
    /// unset ids and ids the registry does not know.
    pub fn reference_bounds(
        &self,
        parent_area: PixelRect,
        registry: &impl BoundsLookup,
    ) -> ReferenceBounds {
        let rx = lookup(registry, self.relative_to_x);
        let ry = lookup(registry, self.relative_to_y);
        let rw = lookup(registry, self.relative_to_w);
        let rh = lookup(registry, self.relative_to_h);

        ReferenceBounds {
            x: parent_area.x.saturating_add(rx.map_or(0, |r| r.x)),
            x_width: rx.map_or(parent_area.width, |r| r.width),
            y: parent_area.y.saturating_add(ry.map_or(0, |r| r.y)),
            y_height: ry.map_or(parent_area.height, |r| r.height),
            width: rw.map_or(parent_area.width, |r| r.width),
            height: rh.map_or(parent_area.height, |r| r.height),
        }
    }

    /// Absolute bounds in whole pixels
    #[tracing::instrument(level = "trace", skip(registry))]
    pub fn resolve_absolute(
        &self,
        parent_area: PixelRect,
        registry: &impl BoundsLookup,
    ) -> PixelRect {
        let refs = self.reference_bounds(parent_area, registry);

        let xy = resolve_or_empty(refs.position_rect(), |r| self.rect.resolve(r));
        let wh = resolve_or_empty(refs.size_rect(), |r| self.rect.resolve(r));

        PixelRect::new(xy.x, xy.y, wh.width, wh.height)
    }

    /// Absolute bounds without rounding
    #[tracing::instrument(level = "trace", skip(registry))]
    pub fn resolve_absolute_f64(
        &self,
        parent_area: PixelRect,
        registry: &impl BoundsLookup,
    ) -> BoundingBox {
        let refs = self.reference_bounds(parent_area, registry);

        let xy = resolve_or_empty(refs.position_rect(), |r| self.rect.resolve_f64(r));
        let wh = resolve_or_empty(refs.size_rect(), |r| self.rect.resolve_f64(r));

        BoundingBox::new(xy.x, xy.y, wh.width, wh.height)
    }

    /// Just the unrounded top-left corner
    pub fn resolve_point(&self, parent_area: PixelRect, registry: &impl BoundsLookup) -> Point {
        self.resolve_absolute_f64(parent_area, registry).origin()
    }

    /// Update the stored values from a component's current bounds.
    ///
    /// `parent_area` is the component's parent area; pass an empty rectangle
    /// when the component has no parent, which leaves proportional values
    /// unchanged.
    #[tracing::instrument(level = "trace", skip(registry))]
    pub fn rebase_from_bounds(
        &mut self,
        observed: PixelRect,
        parent_area: PixelRect,
        registry: &impl BoundsLookup,
    ) {
        let refs = self.reference_bounds(parent_area, registry);

        let mut xy = self.rect;
        let mut wh = self.rect;
        xy.rebase(observed, refs.position_rect());
        wh.rebase(observed, refs.size_rect());

        self.take_rebased(&xy, &wh);
    }

    /// Update the stored values from explicit target bounds
    #[tracing::instrument(level = "trace", skip(registry))]
    pub fn rebase_from_values(
        &mut self,
        target: BoundingBox,
        parent_area: PixelRect,
        registry: &impl BoundsLookup,
    ) {
        let refs = self.reference_bounds(parent_area, registry);

        let mut xy = self.rect;
        let mut wh = self.rect;
        xy.rebase_f64(target, refs.position_rect());
        wh.rebase_f64(target, refs.size_rect());

        self.take_rebased(&xy, &wh);
    }

    fn take_rebased(&mut self, xy: &CoordinateTransform, wh: &CoordinateTransform) {
        self.rect.set_x(xy.x());
        self.rect.set_y(xy.y());
        self.rect.set_width(wh.width());
        self.rect.set_height(wh.height());
    }

    /// Write `pos` and the relative ids onto a document node.
    ///
    /// Unset ids are written as absent attributes.
    pub fn serialize_to_attributes(&self, node: &mut impl AttributeStore) {
        node.set_attribute(POS_ATTRIBUTE, self.rect.to_string());

        for (name, id) in [
            (RELATIVE_X_ATTRIBUTE, self.relative_to_x),
            (RELATIVE_Y_ATTRIBUTE, self.relative_to_y),
            (RELATIVE_W_ATTRIBUTE, self.relative_to_w),
            (RELATIVE_H_ATTRIBUTE, self.relative_to_h),
        ] {
            match id {
                Some(id) => node.set_attribute(name, id.to_hex()),
                None => node.remove_attribute(name),
            }
        }
    }

    /// Read a resolver from a document node, taking anything missing from
    /// `defaults`.
    pub fn deserialize_from_attributes(node: &impl AttributeStore, defaults: &Self) -> Self {
        let rect = match node.attribute(POS_ATTRIBUTE) {
            Some(text) => CoordinateTransform::parse(text),
            None => CoordinateTransform::parse(&defaults.rect.to_string()),
        };

        let read_id = |name: &str, default: Option<ComponentId>| match node.attribute(name) {
            Some(text) => ComponentId::parse_hex(text),
            None => ComponentId::parse_hex(&id_to_hex(default)),
        };

        Self {
            rect,
            relative_to_x: read_id(RELATIVE_X_ATTRIBUTE, defaults.relative_to_x),
            relative_to_y: read_id(RELATIVE_Y_ATTRIBUTE, defaults.relative_to_y),
            relative_to_w: read_id(RELATIVE_W_ATTRIBUTE, defaults.relative_to_w),
            relative_to_h: read_id(RELATIVE_H_ATTRIBUTE, defaults.relative_to_h),
        }
    }

    /// Text form of the position alone, the first two tokens of `rect`
    pub fn position_only(&self) -> String {
        let encoded = self.rect.to_string();
        let mut tokens = encoded.split(' ');
        match (tokens.next(), tokens.next()) {
            (Some(x), Some(y)) => format!("{x} {y}"),
            _ => encoded,
        }
    }
}

fn lookup(registry: &impl BoundsLookup, id: Option<ComponentId>) -> Option<PixelRect> {
    let id = id?;
    let found = registry.bounds_of(id);
    if found.is_none() {
        tracing::trace!(%id, "relative component not found, using parent area");
    }
    found
}

/// Resolve against `reference`, or return an empty box when it has no area
fn resolve_or_empty<T: Default>(reference: PixelRect, resolve: impl FnOnce(PixelRect) -> T) -> T {
    if reference.is_empty() {
        T::default()
    } else {
        resolve(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relative::attributes::ElementAttributes;
    use crate::relative::registry::ComponentRegistry;

    fn id(raw: u64) -> Option<ComponentId> {
        ComponentId::new(raw)
    }

    fn registry() -> ComponentRegistry {
        [
            (id(1).unwrap(), PixelRect::new(10, 20, 50, 40)),
            (id(2).unwrap(), PixelRect::new(100, 200, 80, 60)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_reference_bounds_fall_back_to_parent() {
        let resolver = RelativeCoordinateResolver::default();
        let parent = PixelRect::new(5, 6, 300, 400);
        let refs = resolver.reference_bounds(parent, &registry());

        assert_eq!(refs.position_rect(), parent);
        assert_eq!(refs.size_rect(), parent);
    }

    #[test]
    fn test_reference_bounds_use_each_axis_independently() {
        let resolver = RelativeCoordinateResolver::default()
            .with_relative_x(id(1))
            .with_relative_h(id(2));
        let parent = PixelRect::new(5, 6, 300, 400);
        let refs = resolver.reference_bounds(parent, &registry());

        assert_eq!(
            refs,
            ReferenceBounds {
                x: 15,
                x_width: 50,
                y: 6,
                y_height: 400,
                width: 300,
                height: 60,
            }
        );
    }

    #[test]
    fn test_reference_origin_saturates_at_extremes() {
        let registry: ComponentRegistry = [
            (id(1).unwrap(), PixelRect::new(i32::MAX, 0, 10, 10)),
            (id(2).unwrap(), PixelRect::new(0, i32::MIN, 10, 10)),
        ]
        .into_iter()
        .collect();
        let resolver = RelativeCoordinateResolver::new(CoordinateTransform::parse("0 0 10 10"))
            .with_relative_x(id(1))
            .with_relative_y(id(2));

        let refs = resolver.reference_bounds(PixelRect::new(5, -5, 100, 100), &registry);
        assert_eq!((refs.x, refs.y), (i32::MAX, i32::MIN));

        let r = resolver.resolve_absolute(PixelRect::new(5, -5, 100, 100), &registry);
        assert_eq!(r, PixelRect::new(i32::MAX, i32::MIN, 10, 10));
    }

    #[test]
    fn test_unknown_id_behaves_like_unset() {
        let parent = PixelRect::with_size(300, 400);
        let rect = CoordinateTransform::parse("10% 20% 50% 25%");
        let with_missing = RelativeCoordinateResolver::new(rect)
            .with_relative_x(id(99))
            .with_relative_w(id(98));
        let plain = RelativeCoordinateResolver::new(rect);

        assert_eq!(
            with_missing.resolve_absolute(parent, &registry()),
            plain.resolve_absolute(parent, &registry())
        );
    }

    #[test]
    fn test_origin_from_position_reference_and_size_from_size_reference() {
        let rect = CoordinateTransform::parse("0Rr 0 100% 10");
        let resolver = RelativeCoordinateResolver::new(rect)
            .with_relative_x(id(1))
            .with_relative_w(id(2));
        let r = resolver.resolve_absolute(PixelRect::with_size(300, 400), &registry());

        // x reference spans 10..60 and its resolution uses width 50, so the far
        // edge lands at 60; width comes from component 2.
        assert_eq!(r, PixelRect::new(10, 0, 80, 10));
    }

    #[test]
    fn test_empty_position_reference_gives_zero_origin() {
        let registry: ComponentRegistry = [(id(3).unwrap(), PixelRect::new(10, 10, 0, 10))]
            .into_iter()
            .collect();
        let resolver = RelativeCoordinateResolver::new(CoordinateTransform::parse("5 5 20 20"))
            .with_relative_x(id(3));
        let r = resolver.resolve_absolute(PixelRect::with_size(100, 100), &registry);

        assert_eq!(r, PixelRect::new(0, 0, 20, 20));
        let exact = resolver.resolve_absolute_f64(PixelRect::with_size(100, 100), &registry);
        assert_eq!(exact, BoundingBox::new(0.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_resolve_point() {
        let resolver =
            RelativeCoordinateResolver::new(CoordinateTransform::parse("12.5% 7 10 10"));
        let p = resolver.resolve_point(PixelRect::with_size(100, 100), &ComponentRegistry::new());
        assert_eq!(p, Point::new(12.5, 7.0));
    }

    #[test]
    fn test_rebase_from_bounds_round_trip() {
        let parent = PixelRect::with_size(300, 400);
        let mut resolver =
            RelativeCoordinateResolver::new(CoordinateTransform::parse("0R 0C 0% 0M"))
                .with_relative_x(id(1))
                .with_relative_w(id(2));

        let target = PixelRect::new(20, 30, 40, 50);
        resolver.rebase_from_bounds(target, parent, &registry());

        assert_eq!(resolver.resolve_absolute(parent, &registry()), target);
        assert_eq!(resolver.rect.width(), 0.5);
        assert_eq!(resolver.rect.height(), 350.0);
    }

    #[test]
    fn test_rebase_from_values_without_parent_keeps_proportions() {
        let mut resolver =
            RelativeCoordinateResolver::new(CoordinateTransform::parse("25% 10 50% 10"));
        resolver.rebase_from_values(
            BoundingBox::new(1.0, 2.0, 3.0, 4.0),
            PixelRect::default(),
            &ComponentRegistry::new(),
        );

        assert_eq!(resolver.rect.x(), 0.25);
        assert_eq!(resolver.rect.width(), 0.5);
        assert_eq!(resolver.rect.y(), 2.0);
        assert_eq!(resolver.rect.height(), 4.0);
    }

    #[test]
    fn test_attributes_omit_unset_ids() {
        let resolver = RelativeCoordinateResolver::new(CoordinateTransform::parse("1 2 3 4"));
        let mut node = ElementAttributes::new();
        resolver.serialize_to_attributes(&mut node);

        assert_eq!(node.names().collect::<Vec<_>>(), vec![POS_ATTRIBUTE]);
        assert_eq!(node.attribute(POS_ATTRIBUTE), Some("1 2 3 4"));
    }

    #[test]
    fn test_attributes_round_trip_with_ids() {
        let rect = CoordinateTransform::parse("10Rr 50%c 20M 30%");
        let resolver = RelativeCoordinateResolver::new(rect)
            .with_relative_x(id(0xabc))
            .with_relative_h(id(u64::MAX));
        let mut node = ElementAttributes::new();
        resolver.serialize_to_attributes(&mut node);

        assert_eq!(node.attribute(RELATIVE_X_ATTRIBUTE), Some("abc"));
        assert_eq!(node.attribute(RELATIVE_Y_ATTRIBUTE), None);

        let restored = RelativeCoordinateResolver::deserialize_from_attributes(
            &node,
            &RelativeCoordinateResolver::default(),
        );
        assert_eq!(restored, resolver);
    }

    #[test]
    fn test_serialize_clears_stale_ids() {
        let mut node = ElementAttributes::new();
        node.set_attribute(RELATIVE_W_ATTRIBUTE, "5".to_string());
        RelativeCoordinateResolver::default().serialize_to_attributes(&mut node);
        assert_eq!(node.attribute(RELATIVE_W_ATTRIBUTE), None);
    }

    #[test]
    fn test_deserialize_uses_defaults_for_missing_attributes() {
        let defaults = RelativeCoordinateResolver::new(CoordinateTransform::parse("5 5 50% 50%"))
            .with_relative_y(id(0x42));
        let node: ElementAttributes = [(RELATIVE_X_ATTRIBUTE, "7")].into_iter().collect();

        let restored = RelativeCoordinateResolver::deserialize_from_attributes(&node, &defaults);
        assert_eq!(restored.rect, defaults.rect);
        assert_eq!(restored.relative_to_x, id(7));
        assert_eq!(restored.relative_to_y, id(0x42));
        assert_eq!(restored.relative_to_w, None);
    }

    #[test]
    fn test_position_only() {
        let resolver =
            RelativeCoordinateResolver::new(CoordinateTransform::parse("-50Rc 40%c 10 20M"));
        assert_eq!(resolver.position_only(), "-50Rc 40%c");
    }
}
