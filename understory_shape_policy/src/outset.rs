// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The policy that keeps the viewport covered by the shape.

use kurbo::{Affine, Point};

use crate::constraint::ConstrainedAxes;
use crate::geometry::ContainMode;
use crate::int_rect::{IntRect, IntSize};
use crate::policy::{SetupError, SetupProblem, ShapeState, TransformPolicy, clamp_scale};

/// Keeps the viewport fully covered by the shape.
///
/// This is the mirror image of [`crate::InsetPolicy`]: the shape may grow up
/// to a maximum size and shrink down to the viewport size, and its edges may
/// never move inside the viewport. Pointer streams are claimed when they
/// start anywhere in the viewport.
///
/// ```rust
/// use understory_shape_policy::{IntRect, IntSize, OutsetPolicy, TransformPolicy};
///
/// let mut policy = OutsetPolicy::new(
///     IntRect::new(0, 0, 100, 100),
///     IntSize::new(100, 100),
///     IntSize::new(300, 300),
/// )
/// .unwrap();
///
/// // Moving right would uncover the viewport's left edge.
/// let constrained = policy.on_drag(50, 0);
/// assert!(!constrained.is_over_constraint());
/// assert_eq!(policy.current_shape(), IntRect::new(0, 0, 100, 100));
/// ```
#[derive(Clone, Debug, Default)]
pub struct OutsetPolicy {
    state: ShapeState,
}

impl OutsetPolicy {
    /// Creates a configured policy; see [`TransformPolicy::setup`].
    pub fn new(viewport: IntRect, natural: IntSize, max: IntSize) -> Result<Self, SetupError> {
        let mut policy = Self::default();
        policy.setup(viewport, natural, max)?;
        Ok(policy)
    }

    fn validate(viewport: IntRect, natural: IntSize, max: IntSize) -> Result<(), SetupProblem> {
        if viewport.is_degenerate() {
            return Err(SetupProblem::DegenerateViewport);
        }
        if natural.is_degenerate() {
            return Err(SetupProblem::DegenerateNaturalSize);
        }
        if max.is_degenerate() {
            return Err(SetupProblem::DegenerateLimit);
        }
        if max.width < viewport.width() || max.height < viewport.height() {
            return Err(SetupProblem::MaximumBelowViewport);
        }
        if natural.width < viewport.width()
            || natural.height < viewport.height()
            || natural.width > max.width
            || natural.height > max.height
        {
            return Err(SetupProblem::NaturalSizeOutOfRange);
        }
        Ok(())
    }

    /// Reduces `(dx, dy)` so the shape keeps covering the viewport without
    /// reaching beyond the maximum-size box around it.
    ///
    /// Checks run in a fixed order per edge (outer bound, then viewport), and
    /// a later check wins when two disagree.
    fn constrain_translate(&self, dx: i32, dy: i32) -> (i32, i32, ConstrainedAxes) {
        let viewport = self.state.viewport;
        let max = self.state.limit;
        let src = self.state.shape;
        let (mut dx, mut dy) = (dx, dy);
        let mut axes = ConstrainedAxes::empty();

        if src.x0.saturating_add(dx) < viewport.x1 - max.width {
            dx = viewport.x1 - max.width - src.x0;
            axes |= ConstrainedAxes::HORIZONTAL;
        }
        if src.x0.saturating_add(dx) > viewport.x0 {
            dx = viewport.x0 - src.x0;
            axes |= ConstrainedAxes::HORIZONTAL;
        }
        if src.y0.saturating_add(dy) < viewport.y1 - max.height {
            dy = viewport.y1 - max.height - src.y0;
            axes |= ConstrainedAxes::VERTICAL;
        }
        if src.y0.saturating_add(dy) > viewport.y0 {
            dy = viewport.y0 - src.y0;
            axes |= ConstrainedAxes::VERTICAL;
        }
        if src.x1.saturating_add(dx) > viewport.x0 + max.width {
            dx = viewport.x0 + max.width - src.x1;
            axes |= ConstrainedAxes::HORIZONTAL;
        }
        if src.x1.saturating_add(dx) < viewport.x1 {
            dx = viewport.x1 - src.x1;
            axes |= ConstrainedAxes::HORIZONTAL;
        }
        if src.y1.saturating_add(dy) > viewport.y0 + max.height {
            dy = viewport.y0 + max.height - src.y1;
            axes |= ConstrainedAxes::VERTICAL;
        }
        if src.y1.saturating_add(dy) < viewport.y1 {
            dy = viewport.y1 - src.y1;
            axes |= ConstrainedAxes::VERTICAL;
        }
        (dx, dy, axes)
    }
}

impl TransformPolicy for OutsetPolicy {
    fn mode(&self) -> ContainMode {
        ContainMode::Outset
    }

    fn setup(
        &mut self,
        viewport: IntRect,
        natural: IntSize,
        max: IntSize,
    ) -> Result<(), SetupError> {
        Self::validate(viewport, natural, max).map_err(SetupError::InvalidConfiguration)?;
        self.state.reset(viewport, natural, max);
        Ok(())
    }

    fn viewport(&self) -> IntRect {
        self.state.viewport
    }

    fn natural_size(&self) -> IntSize {
        self.state.natural
    }

    fn limit(&self) -> IntSize {
        self.state.limit
    }

    fn current_shape(&self) -> IntRect {
        self.state.shape
    }

    fn set_current_shape(&mut self, rect: IntRect) {
        self.state.set_shape(rect, ContainMode::Outset);
    }

    fn transform(&self) -> Affine {
        self.state.transform
    }

    fn can_drag_horizontal(&self) -> bool {
        self.state.limit.width > self.state.viewport.width()
    }

    fn can_drag_vertical(&self) -> bool {
        self.state.limit.height > self.state.viewport.height()
    }

    fn claims_touch(&self, point: Point) -> bool {
        self.state.viewport.contains_point(point)
    }

    fn on_drag(&mut self, dx: i32, dy: i32) -> ConstrainedAxes {
        let (dx, dy, axes) = self.constrain_translate(dx, dy);
        self.state.translate(dx, dy);
        log::trace!("outset drag by ({dx}, {dy}), constrained {axes:?}");
        axes
    }

    fn on_scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        let (sx, sy) = clamp_scale(
            self.state.shape.size(),
            sx,
            sy,
            self.state.viewport.size(),
            self.state.limit,
        );
        self.state.scale_about(sx, sy, pivot, ContainMode::Outset);
    }
}
