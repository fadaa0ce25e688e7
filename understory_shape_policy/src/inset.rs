// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The policy that keeps the shape inside the viewport.

use kurbo::{Affine, Point};

use crate::constraint::ConstrainedAxes;
use crate::geometry::ContainMode;
use crate::int_rect::{IntRect, IntSize};
use crate::policy::{SetupError, SetupProblem, ShapeState, TransformPolicy, clamp_scale};

/// Keeps the shape fully inside the viewport.
///
/// The shape may shrink down to a minimum size and grow up to the viewport
/// size. Pointer streams are claimed only when they start on the shape
/// itself.
///
/// ```rust
/// use understory_shape_policy::{InsetPolicy, IntRect, IntSize, TransformPolicy};
///
/// let mut policy = InsetPolicy::new(
///     IntRect::new(0, 0, 100, 100),
///     IntSize::new(50, 50),
///     IntSize::new(10, 10),
/// )
/// .unwrap();
///
/// // Dragging far past the top-left corner pins the shape against it.
/// let constrained = policy.on_drag(-1000, -1000);
/// assert!(constrained.is_over_constraint());
/// assert_eq!(policy.current_shape(), IntRect::new(0, 0, 50, 50));
/// ```
#[derive(Clone, Debug, Default)]
pub struct InsetPolicy {
    state: ShapeState,
}

impl InsetPolicy {
    /// Creates a configured policy; see [`TransformPolicy::setup`].
    pub fn new(viewport: IntRect, natural: IntSize, min: IntSize) -> Result<Self, SetupError> {
        let mut policy = Self::default();
        policy.setup(viewport, natural, min)?;
        Ok(policy)
    }

    fn validate(viewport: IntRect, natural: IntSize, min: IntSize) -> Result<(), SetupProblem> {
        if viewport.is_degenerate() {
            return Err(SetupProblem::DegenerateViewport);
        }
        if natural.is_degenerate() {
            return Err(SetupProblem::DegenerateNaturalSize);
        }
        if min.is_degenerate() {
            return Err(SetupProblem::DegenerateLimit);
        }
        if min.width > viewport.width() || min.height > viewport.height() {
            return Err(SetupProblem::MinimumExceedsViewport);
        }
        if natural.width < min.width
            || natural.height < min.height
            || natural.width > viewport.width()
            || natural.height > viewport.height()
        {
            return Err(SetupProblem::NaturalSizeOutOfRange);
        }
        Ok(())
    }

    /// Reduces `(dx, dy)` so no shape edge crosses the matching viewport edge.
    fn constrain_translate(&self, dx: i32, dy: i32) -> (i32, i32, ConstrainedAxes) {
        let viewport = self.state.viewport;
        let src = self.state.shape;
        let (mut dx, mut dy) = (dx, dy);
        let mut axes = ConstrainedAxes::empty();

        if src.x0.saturating_add(dx) < viewport.x0 {
            dx = viewport.x0 - src.x0;
            axes |= ConstrainedAxes::HORIZONTAL;
        }
        if src.y0.saturating_add(dy) < viewport.y0 {
            dy = viewport.y0 - src.y0;
            axes |= ConstrainedAxes::VERTICAL;
        }
        if src.x1.saturating_add(dx) > viewport.x1 {
            dx = viewport.x1 - src.x1;
            axes |= ConstrainedAxes::HORIZONTAL;
        }
        if src.y1.saturating_add(dy) > viewport.y1 {
            dy = viewport.y1 - src.y1;
            axes |= ConstrainedAxes::VERTICAL;
        }
        (dx, dy, axes)
    }
}

impl TransformPolicy for InsetPolicy {
    fn mode(&self) -> ContainMode {
        ContainMode::Inset
    }

    fn setup(
        &mut self,
        viewport: IntRect,
        natural: IntSize,
        min: IntSize,
    ) -> Result<(), SetupError> {
        Self::validate(viewport, natural, min).map_err(SetupError::InvalidConfiguration)?;
        self.state.reset(viewport, natural, min);
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
        self.state.set_shape(rect, ContainMode::Inset);
    }

    fn transform(&self) -> Affine {
        self.state.transform
    }

    fn can_drag_horizontal(&self) -> bool {
        self.state.limit.width < self.state.viewport.width()
    }

    fn can_drag_vertical(&self) -> bool {
        self.state.limit.height < self.state.viewport.height()
    }

    fn claims_touch(&self, point: Point) -> bool {
        self.state.shape.contains_point(point)
    }

    fn on_drag(&mut self, dx: i32, dy: i32) -> ConstrainedAxes {
        let (dx, dy, axes) = self.constrain_translate(dx, dy);
        self.state.translate(dx, dy);
        log::trace!("inset drag by ({dx}, {dy}), constrained {axes:?}");
        axes
    }

    fn on_scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        let (sx, sy) = clamp_scale(
            self.state.shape.size(),
            sx,
            sy,
            self.state.limit,
            self.state.viewport.size(),
        );
        self.state.scale_about(sx, sy, pivot, ContainMode::Inset);
    }
}
