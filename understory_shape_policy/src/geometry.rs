// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure rectangle/transform helpers shared by both policies.

use kurbo::{Affine, Point};

use crate::int_rect::{IntRect, IntSize};

/// Containment direction between the shape and its viewport.
///
/// This is shared by [`crate::InsetPolicy`] and [`crate::OutsetPolicy`] and
/// selects which way [`clamp_rect`] pushes a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ContainMode {
    /// The shape stays inside the viewport and never shrinks below a minimum size.
    #[default]
    Inset,
    /// The shape always covers the viewport and never grows past a maximum size.
    Outset,
}

/// Clamps `rect` against `bound` according to `mode`.
///
/// - [`ContainMode::Inset`]: each edge is clipped into `bound`, with the
///   left/top edges additionally kept far enough from the right/bottom of
///   `bound` to leave room for `limit`. If the clipped width or height is
///   still below `limit`, the right/bottom edge is re-expanded from the
///   clamped left/top edge.
/// - [`ContainMode::Outset`]: the mirror image. The result must contain
///   `bound`, each edge may sit at most `limit` away from the opposite edge
///   of `bound`, and an extent above `limit` is shrunk from the left/top edge.
///
/// The result is stable: clamping an already clamped rectangle returns it
/// unchanged.
#[must_use]
pub fn clamp_rect(bound: IntRect, rect: IntRect, limit: IntSize, mode: ContainMode) -> IntRect {
    let mut dst = rect;
    match mode {
        ContainMode::Inset => {
            let max_left = bound.x1 - limit.width;
            let max_top = bound.y1 - limit.height;

            dst.x0 = dst.x0.max(bound.x0).min(max_left);
            dst.y0 = dst.y0.max(bound.y0).min(max_top);
            dst.x1 = dst.x1.max(bound.x0).min(bound.x1);
            dst.y1 = dst.y1.max(bound.y0).min(bound.y1);

            if dst.width() < limit.width {
                dst.x1 = dst.x0 + limit.width;
            }
            if dst.height() < limit.height {
                dst.y1 = dst.y0 + limit.height;
            }
        }
        ContainMode::Outset => {
            let min_left = bound.x1 - limit.width;
            let min_top = bound.y1 - limit.height;

            dst.x0 = dst.x0.max(min_left).min(bound.x0);
            dst.y0 = dst.y0.max(min_top).min(bound.y0);
            dst.x1 = dst.x1.max(bound.x1).min(bound.x0 + limit.width);
            dst.y1 = dst.y1.max(bound.y1).min(bound.y0 + limit.height);

            if dst.width() > limit.width {
                dst.x1 = dst.x0 + limit.width;
            }
            if dst.height() > limit.height {
                dst.y1 = dst.y0 + limit.height;
            }
        }
    }
    dst
}

/// Scale + translate transform mapping the natural box `(0, 0, w, h)` onto
/// `dest`, expressed relative to `viewport_origin`.
///
/// Scale is `dest size / natural size` per axis and translation is
/// `dest origin - viewport_origin` per axis. There is no rotation or shear.
#[must_use]
pub fn rect_to_transform(natural: IntSize, viewport_origin: Point, dest: IntRect) -> Affine {
    let sx = f64::from(dest.width()) / f64::from(natural.width);
    let sy = f64::from(dest.height()) / f64::from(natural.height);
    let offset = dest.origin() - viewport_origin;
    Affine::new([sx, 0.0, 0.0, sy, offset.x, offset.y])
}

/// Replaces the translation of `transform`, leaving its linear part untouched.
#[must_use]
pub fn with_translation(transform: Affine, tx: f64, ty: f64) -> Affine {
    let [a, b, c, d, _, _] = transform.as_coeffs();
    Affine::new([a, b, c, d, tx, ty])
}
