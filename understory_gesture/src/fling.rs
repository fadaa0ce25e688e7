// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame driver for a fling in progress.

use kurbo::{Point, Vec2};
use understory_shape_policy::{ConstrainedAxes, TransformPolicy};

use crate::decelerate::Decelerator;
use crate::host::{FrameRequest, GestureHost};

/// Outcome of one fling frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlingStep {
    /// Another frame has been requested.
    Running,
    /// The motion is exhausted or hit a boundary; no frame is pending.
    Finished,
}

/// Feeds integer position deltas from a [`Decelerator`] into a policy.
///
/// At most one frame request is outstanding at a time, and it is withdrawn
/// from the host whenever the fling is aborted.
#[derive(Clone, Debug)]
pub(crate) struct FlingDriver<D> {
    decelerator: D,
    pending: Option<FrameRequest>,
    last: (i32, i32),
    moving: ConstrainedAxes,
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "fling offsets are truncated to whole pixels"
)]
fn trunc_point(p: Point) -> (i32, i32) {
    (p.x as i32, p.y as i32)
}

impl<D: Decelerator> FlingDriver<D> {
    pub(crate) fn new(decelerator: D) -> Self {
        Self {
            decelerator,
            pending: None,
            last: (0, 0),
            moving: ConstrainedAxes::empty(),
        }
    }

    pub(crate) fn decelerator(&self) -> &D {
        &self.decelerator
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a fling and schedules its first frame.
    pub(crate) fn start(&mut self, host: &mut dyn GestureHost, velocity: Vec2, time: u64) {
        self.abort(host);
        self.decelerator.start(velocity, time);
        self.last = (0, 0);
        self.moving = ConstrainedAxes::empty();
        self.moving.set(ConstrainedAxes::HORIZONTAL, velocity.x != 0.0);
        self.moving.set(ConstrainedAxes::VERTICAL, velocity.y != 0.0);
        self.pending = Some(host.request_frame());
        log::debug!("fling started at {velocity:?}");
    }

    /// Stops the motion and withdraws any pending frame.
    pub(crate) fn abort(&mut self, host: &mut dyn GestureHost) {
        if let Some(request) = self.pending.take() {
            host.cancel_frame(request);
        }
        if !self.decelerator.is_finished() {
            self.decelerator.abort();
        }
    }

    /// Runs one frame: applies the next delta and decides whether to go on.
    ///
    /// The fling ends when the policy reports both axes constrained, or when
    /// every axis the fling moves along was constrained on this frame.
    pub(crate) fn tick<P: TransformPolicy + ?Sized>(
        &mut self,
        policy: &mut P,
        host: &mut dyn GestureHost,
        time: u64,
    ) -> FlingStep {
        self.pending = None;
        let Some(position) = self.decelerator.advance(time) else {
            log::debug!("fling exhausted");
            return FlingStep::Finished;
        };

        let current = trunc_point(position);
        let (dx, dy) = (
            current.0.saturating_sub(self.last.0),
            current.1.saturating_sub(self.last.1),
        );
        self.last = current;
        let constrained = policy.on_fling(dx, dy);
        host.request_redraw();
        log::trace!("fling step ({dx}, {dy}), constrained {constrained:?}");

        let blocked = !self.moving.is_empty() && constrained.contains(self.moving);
        if constrained.is_over_constraint() || blocked {
            self.decelerator.abort();
            log::debug!("fling stopped at boundary");
            return FlingStep::Finished;
        }
        self.pending = Some(host.request_frame());
        FlingStep::Running
    }
}
