// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus and span of a multi-pointer group.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::event::{PointerAction, PointerEvent};

/// Centroid and per-axis spread of the pointers in one event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SpanInfo {
    pub(crate) focus: Point,
    pub(crate) span: Vec2,
}

impl SpanInfo {
    /// Measures the pointers of `event`, leaving out a pointer being lifted.
    ///
    /// Each pointer's distance from the centroid is padded by half of
    /// `touch_size`; the per-axis average is doubled to give a diameter.
    /// Returns `None` when no pointer remains.
    pub(crate) fn measure(event: &PointerEvent, touch_size: f64) -> Option<Self> {
        let skip = match event.action {
            PointerAction::PointerUp { index } => Some(index),
            _ => None,
        };
        let remaining = || {
            event
                .pointers
                .iter()
                .enumerate()
                .filter(move |(i, _)| Some(*i) != skip)
                .map(|(_, p)| p.position)
        };

        let count = remaining().count();
        if count == 0 {
            return None;
        }
        let div = count as f64;

        let sum = remaining().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        let focus = (sum / div).to_point();

        let pad = touch_size / 2.0;
        let deviation = remaining().fold(Vec2::ZERO, |acc, p| {
            acc + Vec2::new((p.x - focus.x).abs() + pad, (p.y - focus.y).abs() + pad)
        });
        Some(Self {
            focus,
            span: deviation / div * 2.0,
        })
    }

    /// Squared length of the span vector.
    pub(crate) fn span_squared(&self) -> f64 {
        self.span.hypot2()
    }
}
