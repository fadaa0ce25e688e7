// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single and double tap recognition.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{
//!     GestureConfig, PointerEvent, PointerId, PointerSample, Tap, TapDetector, TapRecognizer,
//! };
//!
//! let mut taps = TapRecognizer::new(&GestureConfig::default());
//! let at = |x| PointerSample::new(PointerId(0), Point::new(x, 20.0));
//!
//! assert_eq!(taps.on_event(&PointerEvent::down(0, at(10.0))), None);
//! assert_eq!(
//!     taps.on_event(&PointerEvent::up(80, at(11.0))),
//!     Some(Tap::Single(Point::new(11.0, 20.0)))
//! );
//!
//! // A second press soon after, close by, is a double tap at the first press.
//! assert_eq!(
//!     taps.on_event(&PointerEvent::down(200, at(14.0))),
//!     Some(Tap::Double(Point::new(10.0, 20.0)))
//! );
//! ```

use kurbo::Point;

use crate::config::GestureConfig;
use crate::event::{PointerAction, PointerEvent};

/// A recognized tap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tap {
    /// A press and release without movement, at the release position.
    Single(Point),
    /// A second press shortly after a tap, at the first press position.
    Double(Point),
}

/// Watches a pointer stream for taps.
pub trait TapDetector {
    /// Offers one event; returns a tap if this event completes one.
    fn on_event(&mut self, event: &PointerEvent) -> Option<Tap>;

    /// Forgets any partial tap.
    fn reset(&mut self);
}

/// Default [`TapDetector`] driven by [`GestureConfig`] thresholds.
///
/// Any movement beyond the touch slop, a second pointer, a cancel, or a
/// press longer than the tap timeout rules out the current tap. The release
/// of a double tap is not reported as a single tap.
#[derive(Clone, Debug)]
pub struct TapRecognizer {
    touch_slop: f64,
    tap_timeout_ms: u64,
    double_tap_timeout_ms: u64,
    double_tap_slop: f64,
    down: Option<(Point, u64)>,
    is_tap: bool,
    double_tapping: bool,
    previous_tap: Option<(Point, u64)>,
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}

impl TapRecognizer {
    /// Creates a recognizer using the tap thresholds of `config`.
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            touch_slop: config.touch_slop,
            tap_timeout_ms: config.tap_timeout_ms,
            double_tap_timeout_ms: config.double_tap_timeout_ms,
            double_tap_slop: config.double_tap_slop,
            down: None,
            is_tap: false,
            double_tapping: false,
            previous_tap: None,
        }
    }

    fn on_down(&mut self, position: Point, time: u64) -> Option<Tap> {
        self.down = Some((position, time));
        self.is_tap = true;
        self.double_tapping = false;

        let (first, released) = self.previous_tap.take()?;
        let in_time = time.saturating_sub(released) <= self.double_tap_timeout_ms;
        let in_reach =
            (position - first).hypot2() < self.double_tap_slop * self.double_tap_slop;
        if in_time && in_reach {
            self.double_tapping = true;
            Some(Tap::Double(first))
        } else {
            None
        }
    }

    fn on_up(&mut self, position: Point, time: u64) -> Option<Tap> {
        let (start, pressed) = self.down.take()?;
        let quick = time.saturating_sub(pressed) <= self.tap_timeout_ms;
        if !self.is_tap || !quick {
            return None;
        }
        if self.double_tapping {
            self.double_tapping = false;
            return None;
        }
        self.previous_tap = Some((start, time));
        Some(Tap::Single(position))
    }
}

impl TapDetector for TapRecognizer {
    fn on_event(&mut self, event: &PointerEvent) -> Option<Tap> {
        if matches!(event.action, PointerAction::Cancel) {
            self.reset();
            return None;
        }
        let Some(primary) = event.primary() else {
            if matches!(event.action, PointerAction::Up) {
                self.down = None;
                self.double_tapping = false;
            }
            return None;
        };
        let position = primary.position;
        match event.action {
            PointerAction::Down => self.on_down(position, event.time),
            PointerAction::Move => {
                if let Some((start, _)) = self.down
                    && (position - start).hypot2() > self.touch_slop * self.touch_slop
                {
                    self.is_tap = false;
                }
                None
            }
            PointerAction::Up => self.on_up(position, event.time),
            PointerAction::PointerDown { .. } => {
                self.is_tap = false;
                self.previous_tap = None;
                None
            }
            PointerAction::PointerUp { .. } | PointerAction::Cancel => None,
        }
    }

    fn reset(&mut self) {
        self.down = None;
        self.is_tap = false;
        self.double_tapping = false;
        self.previous_tap = None;
    }
}
