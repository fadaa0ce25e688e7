// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The policy contract shared by the inset and outset variants.

use core::fmt;

use kurbo::{Affine, Point, Rect, Vec2};

use crate::constraint::ConstrainedAxes;
use crate::geometry::{ContainMode, clamp_rect, rect_to_transform, with_translation};
use crate::int_rect::{IntRect, IntSize, trunc_i32};

/// Scale factor applied by a double tap unless a policy overrides it.
pub const DEFAULT_DOUBLE_TAP_SCALE: f64 = 1.2;

/// Which inequality a rejected [`TransformPolicy::setup`] call violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetupProblem {
    /// The viewport has a zero or negative width or height.
    DegenerateViewport,
    /// The natural shape size has a zero or negative extent.
    DegenerateNaturalSize,
    /// The size limit has a zero or negative extent.
    DegenerateLimit,
    /// Inset: the minimum size is larger than the viewport.
    MinimumExceedsViewport,
    /// Outset: the maximum size is smaller than the viewport.
    MaximumBelowViewport,
    /// The natural size lies outside the range allowed by the limit and viewport.
    NaturalSizeOutOfRange,
}

impl fmt::Display for SetupProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::DegenerateViewport => "viewport has no area",
            Self::DegenerateNaturalSize => "natural shape size has no area",
            Self::DegenerateLimit => "size limit has no area",
            Self::MinimumExceedsViewport => "minimum size is larger than the viewport",
            Self::MaximumBelowViewport => "maximum size is smaller than the viewport",
            Self::NaturalSizeOutOfRange => "natural size is outside the allowed range",
        };
        f.write_str(msg)
    }
}

/// Error returned when a policy cannot be configured.
///
/// No state is committed when this is returned; the policy keeps whatever
/// configuration it had before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetupError {
    /// Viewport, natural size, and limit are not mutually compatible.
    InvalidConfiguration(SetupProblem),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(problem) => write!(f, "invalid configuration: {problem}"),
        }
    }
}

impl core::error::Error for SetupError {}

/// Constraint policy that turns raw gesture deltas into clamped shape updates.
///
/// A policy owns the current shape rectangle and the affine transform used
/// to render it. Gesture recognizers only ever talk to this trait, so the
/// same recognizer drives both [`crate::InsetPolicy`] and
/// [`crate::OutsetPolicy`].
pub trait TransformPolicy {
    /// Containment direction enforced by this policy.
    fn mode(&self) -> ContainMode;

    /// Configures viewport, natural shape size, and size limit.
    ///
    /// On success the shape is placed at the viewport origin with its
    /// natural size and the transform is reset to identity.
    fn setup(
        &mut self,
        viewport: IntRect,
        natural: IntSize,
        limit: IntSize,
    ) -> Result<(), SetupError>;

    /// The fixed viewport.
    fn viewport(&self) -> IntRect;

    /// Natural (untransformed) shape size.
    fn natural_size(&self) -> IntSize;

    /// Minimum (inset) or maximum (outset) shape size.
    fn limit(&self) -> IntSize;

    /// The current shape rectangle.
    fn current_shape(&self) -> IntRect;

    /// Clamps `rect`, makes it the current shape, and rebuilds the transform
    /// from scratch.
    fn set_current_shape(&mut self, rect: IntRect);

    /// Transform mapping the natural box onto the current shape, relative to
    /// the viewport origin.
    fn transform(&self) -> Affine;

    /// Whether horizontal drags can move the shape at all.
    fn can_drag_horizontal(&self) -> bool;

    /// Whether vertical drags can move the shape at all.
    fn can_drag_vertical(&self) -> bool;

    /// Whether horizontal scaling is allowed.
    fn can_scale_horizontal(&self) -> bool {
        true
    }

    /// Whether vertical scaling is allowed.
    fn can_scale_vertical(&self) -> bool {
        true
    }

    /// Factor applied on both axes by a double tap.
    fn double_tap_scale(&self) -> f64 {
        DEFAULT_DOUBLE_TAP_SCALE
    }

    /// Whether a pointer stream that starts at `point` belongs to this policy.
    fn claims_touch(&self, point: Point) -> bool;

    /// Moves the shape by up to `(dx, dy)` and reports which axes were reduced.
    fn on_drag(&mut self, dx: i32, dy: i32) -> ConstrainedAxes;

    /// Scales the shape by up to `(sx, sy)` about `pivot` (event coordinates).
    fn on_scale(&mut self, sx: f64, sy: f64, pivot: Point);

    /// Moves the shape by one fling step; same contract as [`Self::on_drag`].
    fn on_fling(&mut self, dx: i32, dy: i32) -> ConstrainedAxes {
        self.on_drag(dx, dy)
    }
}

/// Shape, transform, and configuration common to both policies.
#[derive(Clone, Debug)]
pub(crate) struct ShapeState {
    pub(crate) viewport: IntRect,
    pub(crate) natural: IntSize,
    pub(crate) limit: IntSize,
    pub(crate) shape: IntRect,
    pub(crate) transform: Affine,
}

impl Default for ShapeState {
    fn default() -> Self {
        Self {
            viewport: IntRect::default(),
            natural: IntSize::default(),
            limit: IntSize::default(),
            shape: IntRect::default(),
            transform: Affine::IDENTITY,
        }
    }
}

impl ShapeState {
    /// Commits an already validated configuration.
    pub(crate) fn reset(&mut self, viewport: IntRect, natural: IntSize, limit: IntSize) {
        self.viewport = viewport;
        self.natural = natural;
        self.limit = limit;
        self.shape = IntRect::from_origin_size(viewport.x0, viewport.y0, natural);
        self.transform = Affine::IDENTITY;
        log::debug!(
            "shape policy setup: viewport={viewport:?} natural={natural:?} limit={limit:?}"
        );
    }

    pub(crate) fn set_shape(&mut self, rect: IntRect, mode: ContainMode) {
        let clamped = clamp_rect(self.viewport, rect, self.limit, mode);
        self.transform = rect_to_transform(self.natural, self.viewport.origin(), clamped);
        self.shape = clamped;
    }

    /// Applies an already constrained translation.
    pub(crate) fn translate(&mut self, dx: i32, dy: i32) {
        self.transform = self
            .transform
            .then_translate(Vec2::new(f64::from(dx), f64::from(dy)));
        self.shape = self.shape.offset(dx, dy);
    }

    /// Applies already constrained scale factors about `pivot`.
    ///
    /// The scale part of the transform is kept as produced by the pivot
    /// scale; only its translation is corrected to follow the reclamped
    /// shape.
    pub(crate) fn scale_about(&mut self, sx: f64, sy: f64, pivot: Point, mode: ContainMode) {
        let origin = self.viewport.origin().to_vec2();
        let local_pivot = (pivot - origin).to_vec2();
        self.transform = self
            .transform
            .then_translate(-local_pivot)
            .then_scale_non_uniform(sx, sy)
            .then_translate(local_pivot);

        let natural = Rect::from_origin_size(Point::ZERO, self.natural.to_size());
        let mapped = self.transform.transform_rect_bbox(natural) + origin;
        let clamped = clamp_rect(
            self.viewport,
            IntRect::from_rect_trunc(mapped),
            self.limit,
            mode,
        );
        self.transform = with_translation(
            self.transform,
            f64::from(clamped.x0 - self.viewport.x0),
            f64::from(clamped.y0 - self.viewport.y0),
        );
        self.shape = clamped;
        log::trace!("scale ({sx}, {sy}) about {pivot:?} -> shape {clamped:?}");
    }
}

/// Recomputes requested scale factors from truncated target sizes clamped to
/// `[lower, upper]` per axis.
pub(crate) fn clamp_scale(
    current: IntSize,
    sx: f64,
    sy: f64,
    lower: IntSize,
    upper: IntSize,
) -> (f64, f64) {
    let target_width = trunc_i32(f64::from(current.width) * sx)
        .max(lower.width)
        .min(upper.width);
    let target_height = trunc_i32(f64::from(current.height) * sy)
        .max(lower.height)
        .min(upper.height);
    (
        f64::from(target_width) / f64::from(current.width),
        f64::from(target_height) / f64::from(current.height),
    )
}
