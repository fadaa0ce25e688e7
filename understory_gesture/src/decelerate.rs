// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ballistic motion after a fling.

use core::f64::consts::E;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

/// Integrates a decelerating motion from an initial velocity.
///
/// Positions are offsets from where the fling started, so the first
/// [`Decelerator::advance`] of a fling is close to the origin.
pub trait Decelerator {
    /// Starts a new motion at `time` (milliseconds) with `velocity` in pixels
    /// per second, replacing any motion in progress.
    fn start(&mut self, velocity: Vec2, time: u64);

    /// Offset from the start position at `time`, or `None` once the motion
    /// is exhausted or aborted.
    fn advance(&mut self, time: u64) -> Option<Point>;

    /// Stops the motion; subsequent [`Self::advance`] calls return `None`.
    fn abort(&mut self);

    /// Whether the motion is exhausted or aborted.
    fn is_finished(&self) -> bool;
}

/// Exponential velocity damping: `x(t) = v (1 - e^(-kt)) / k`.
///
/// The motion finishes on the first step whose speed `|v| e^(-kt)` drops
/// below the rest speed; that step still reports its position.
#[derive(Clone, Debug)]
pub struct ExponentialDecelerator {
    damping: f64,
    rest_speed: f64,
    start_time: u64,
    velocity: Vec2,
    finished: bool,
}

impl Default for ExponentialDecelerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DAMPING, Self::DEFAULT_REST_SPEED)
    }
}

impl ExponentialDecelerator {
    /// Damping per second used by [`Default`].
    pub const DEFAULT_DAMPING: f64 = 4.0;
    /// Rest speed in pixels per second used by [`Default`].
    pub const DEFAULT_REST_SPEED: f64 = 20.0;

    /// Creates an idle decelerator.
    ///
    /// Higher `damping` settles faster; `rest_speed` is the speed in pixels
    /// per second under which the motion is considered over.
    pub fn new(damping: f64, rest_speed: f64) -> Self {
        Self {
            damping,
            rest_speed,
            start_time: 0,
            velocity: Vec2::ZERO,
            finished: true,
        }
    }

    fn gain(&self, seconds: f64) -> (f64, f64) {
        if self.damping <= f64::EPSILON {
            return (seconds, 1.0);
        }
        let attenuation = E.powf(-self.damping * seconds);
        ((1.0 - attenuation) / self.damping, attenuation)
    }
}

impl Decelerator for ExponentialDecelerator {
    fn start(&mut self, velocity: Vec2, time: u64) {
        self.velocity = velocity;
        self.start_time = time;
        self.finished = false;
    }

    fn advance(&mut self, time: u64) -> Option<Point> {
        if self.finished {
            return None;
        }
        let seconds = time.saturating_sub(self.start_time) as f64 / 1000.0;
        let (gain, attenuation) = self.gain(seconds);
        if self.velocity.hypot() * attenuation < self.rest_speed {
            self.finished = true;
        }
        Some((self.velocity * gain).to_point())
    }

    fn abort(&mut self) {
        self.finished = true;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
