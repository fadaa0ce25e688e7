// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thresholds used to classify pointer streams.

/// Distance and timing thresholds for gesture recognition.
///
/// Distances are in logical pixels, velocities in logical pixels per second,
/// and durations in milliseconds. The defaults match common touch-screen
/// platform conventions at baseline density.
///
/// ```rust
/// use understory_gesture::GestureConfig;
///
/// let config = GestureConfig::default()
///     .with_touch_slop(12.0)
///     .with_min_fling_velocity(120.0);
/// assert_eq!(config.span_slop, 16.0);
/// assert_eq!(config.touch_slop, 12.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Movement below this distance does not start a drag.
    pub touch_slop: f64,
    /// Change in pointer span below this distance does not start a scale.
    pub span_slop: f64,
    /// Pointer span below this distance never starts a scale.
    pub min_span: f64,
    /// Reported touch sizes are raised to at least this value.
    pub min_touch_major: f64,
    /// Release speed on at least one axis must exceed this to fling.
    pub min_fling_velocity: f64,
    /// Release speed is clamped to this magnitude per axis.
    pub max_fling_velocity: f64,
    /// Minimum time between two accepted touch-size readings.
    pub touch_stabilize_ms: u64,
    /// Maximum time between the first tap's release and the second press.
    pub double_tap_timeout_ms: u64,
    /// Maximum distance between the two presses of a double tap.
    pub double_tap_slop: f64,
    /// Presses held longer than this are not taps.
    pub tap_timeout_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            span_slop: 16.0,
            min_span: 170.0,
            min_touch_major: 48.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
            touch_stabilize_ms: 128,
            double_tap_timeout_ms: 300,
            double_tap_slop: 100.0,
            tap_timeout_ms: 500,
        }
    }
}

impl GestureConfig {
    /// Sets [`Self::touch_slop`].
    #[must_use]
    pub fn with_touch_slop(mut self, slop: f64) -> Self {
        self.touch_slop = slop;
        self
    }

    /// Sets [`Self::span_slop`].
    #[must_use]
    pub fn with_span_slop(mut self, slop: f64) -> Self {
        self.span_slop = slop;
        self
    }

    /// Sets [`Self::min_span`].
    #[must_use]
    pub fn with_min_span(mut self, span: f64) -> Self {
        self.min_span = span;
        self
    }

    /// Sets [`Self::min_touch_major`].
    #[must_use]
    pub fn with_min_touch_major(mut self, major: f64) -> Self {
        self.min_touch_major = major;
        self
    }

    /// Sets [`Self::min_fling_velocity`].
    #[must_use]
    pub fn with_min_fling_velocity(mut self, velocity: f64) -> Self {
        self.min_fling_velocity = velocity;
        self
    }

    /// Sets [`Self::max_fling_velocity`].
    #[must_use]
    pub fn with_max_fling_velocity(mut self, velocity: f64) -> Self {
        self.max_fling_velocity = velocity;
        self
    }

    /// Sets [`Self::touch_stabilize_ms`].
    #[must_use]
    pub fn with_touch_stabilize_ms(mut self, ms: u64) -> Self {
        self.touch_stabilize_ms = ms;
        self
    }

    /// Sets [`Self::double_tap_timeout_ms`].
    #[must_use]
    pub fn with_double_tap_timeout_ms(mut self, ms: u64) -> Self {
        self.double_tap_timeout_ms = ms;
        self
    }

    /// Sets [`Self::double_tap_slop`].
    #[must_use]
    pub fn with_double_tap_slop(mut self, slop: f64) -> Self {
        self.double_tap_slop = slop;
        self
    }

    /// Sets [`Self::tap_timeout_ms`].
    #[must_use]
    pub fn with_tap_timeout_ms(mut self, ms: u64) -> Self {
        self.tap_timeout_ms = ms;
        self
    }
}
