// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release velocity estimation.

use alloc::collections::VecDeque;

use hashbrown::HashMap;
use kurbo::{Point, Vec2};

use crate::event::{PointerEvent, PointerId};

/// Turns timestamped pointer positions into a velocity.
pub trait VelocityEstimator {
    /// Records the position of pointer `id` at `time` (milliseconds).
    fn add_sample(&mut self, id: PointerId, time: u64, position: Point);

    /// Estimated velocity of pointer `id` in pixels per second.
    ///
    /// Returns `None` if no sample has been recorded for `id`.
    fn velocity(&self, id: PointerId) -> Option<Vec2>;

    /// Forgets all samples.
    fn clear(&mut self);

    /// Records every sample of `event`, historical frames first.
    fn add_event(&mut self, event: &PointerEvent) {
        for frame in &event.history {
            for sample in &frame.samples {
                self.add_sample(sample.id, frame.time, sample.position);
            }
        }
        for sample in &event.pointers {
            self.add_sample(sample.id, event.time, sample.position);
        }
    }
}

/// Average velocity over a short trailing window.
///
/// Each pointer keeps only the samples from the last
/// [`Self::DEFAULT_HORIZON_MS`] (or the configured horizon); the velocity is
/// the displacement between the oldest and newest retained sample divided by
/// the time between them. A pointer that rested longer than the horizon
/// before release therefore reports zero.
#[derive(Clone, Debug)]
pub struct RecentVelocityTracker {
    horizon_ms: u64,
    samples: HashMap<PointerId, VecDeque<(u64, Point)>>,
}

impl Default for RecentVelocityTracker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HORIZON_MS)
    }
}

impl RecentVelocityTracker {
    /// Window used by [`Default`].
    pub const DEFAULT_HORIZON_MS: u64 = 100;

    /// Creates a tracker with the given trailing window.
    pub fn new(horizon_ms: u64) -> Self {
        Self {
            horizon_ms,
            samples: HashMap::new(),
        }
    }

    /// The trailing window in milliseconds.
    pub fn horizon_ms(&self) -> u64 {
        self.horizon_ms
    }
}

impl VelocityEstimator for RecentVelocityTracker {
    fn add_sample(&mut self, id: PointerId, time: u64, position: Point) {
        let history = self.samples.entry(id).or_default();
        if history.back().is_some_and(|&(last, _)| time < last) {
            log::debug!("dropping out-of-order sample for {id:?} at {time}");
            return;
        }
        history.push_back((time, position));
        let horizon = self.horizon_ms;
        while history
            .front()
            .is_some_and(|&(t, _)| time.saturating_sub(t) > horizon)
        {
            history.pop_front();
        }
    }

    fn velocity(&self, id: PointerId) -> Option<Vec2> {
        let history = self.samples.get(&id)?;
        let &(t0, p0) = history.front()?;
        let &(t1, p1) = history.back()?;
        if t1 == t0 {
            return Some(Vec2::ZERO);
        }
        let elapsed_ms = (t1 - t0) as f64;
        Some((p1 - p0) * 1000.0 / elapsed_ms)
    }

    fn clear(&mut self) {
        self.samples.clear();
    }
}
