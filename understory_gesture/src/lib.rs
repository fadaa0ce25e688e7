// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: pan, pinch, fling, and tap recognition for a constrained shape.
//!
//! This crate interprets raw multi-pointer streams and drives a
//! [`TransformPolicy`] from `understory_shape_policy`. It focuses on:
//! - Telling drags from pinches from taps on ambiguous multi-touch input.
//! - Smoothing reported contact sizes so pinch detection does not jitter.
//! - Turning a fast release into a fling that stops at the policy's boundary.
//!
//! The pieces, leaves first:
//! - [`PointerEvent`]: what the host's input source delivers.
//! - [`GestureConfig`]: slop, span, velocity, and timing thresholds.
//! - Collaborator traits with default implementations:
//!   [`VelocityEstimator`] ([`RecentVelocityTracker`]),
//!   [`Decelerator`] ([`ExponentialDecelerator`]),
//!   [`TapDetector`] ([`TapRecognizer`]), and the host-provided [`GestureHost`].
//! - [`GestureStateMachine`]: the `Idle`/`Dragging`/`Scaling`/`Settling` machine.
//! - [`ShapeTransHelper`]: a policy plus a machine behind one entry point,
//!   applying the policy's rule for which presses it claims.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{
//!     FrameRequest, GestureConfig, GestureHost, GestureState, OutsetTransHelper, PointerEvent,
//!     PointerId, PointerSample,
//! };
//! use understory_shape_policy::{IntRect, IntSize};
//!
//! #[derive(Default)]
//! struct Surface {
//!     frames: u64,
//!     redraws: u32,
//! }
//!
//! impl GestureHost for Surface {
//!     fn request_frame(&mut self) -> FrameRequest {
//!         self.frames += 1;
//!         FrameRequest(self.frames)
//!     }
//!     fn cancel_frame(&mut self, _request: FrameRequest) {}
//!     fn request_redraw(&mut self) {
//!         self.redraws += 1;
//!     }
//! }
//!
//! // A 300x300 photo seen through a 100x100 window.
//! let mut helper = OutsetTransHelper::outset(
//!     IntRect::new(0, 0, 100, 100),
//!     IntSize::new(300, 300),
//!     IntSize::new(900, 900),
//!     GestureConfig::default(),
//! )
//! .unwrap();
//! let mut surface = Surface::default();
//! let finger = |x, y| PointerSample::new(PointerId(0), Point::new(x, y));
//!
//! helper.process_event(&mut surface, &PointerEvent::down(0, finger(50.0, 50.0)));
//! helper.process_event(&mut surface, &PointerEvent::moved(16, [finger(40.0, 50.0)]));
//! helper.process_event(&mut surface, &PointerEvent::moved(32, [finger(20.0, 50.0)]));
//! assert_eq!(helper.state(), GestureState::Dragging);
//! assert_eq!(helper.current_shape(), IntRect::new(-30, 0, 270, 300));
//!
//! // A fast release starts a fling; the host now delivers frames.
//! helper.process_event(&mut surface, &PointerEvent::up(40, finger(20.0, 50.0)));
//! assert_eq!(helper.state(), GestureState::Settling);
//! let mut time = 40;
//! while helper.state() == GestureState::Settling {
//!     time += 16;
//!     helper.on_frame(&mut surface, time);
//! }
//! assert!(helper.current_shape().x0 < -30);
//! assert!(surface.redraws > 1);
//! ```
//!
//! ## Design notes
//!
//! - Nothing here blocks or spawns. A fling is resumed one frame at a time by
//!   the host calling `on_frame` after a [`GestureHost::request_frame`]; a
//!   new press or [`GestureStateMachine::cancel_fling`] withdraws the pending
//!   request through [`GestureHost::cancel_frame`].
//! - Malformed streams (unknown pointer ids, out-of-range indices) are logged
//!   at `debug` level and ignored.
//! - The crate logs through the `log` facade and never installs a logger.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`TransformPolicy`]: understory_shape_policy::TransformPolicy

#![no_std]

extern crate alloc;

mod config;
mod decelerate;
mod event;
mod fling;
mod helper;
mod host;
mod machine;
mod span;
mod tap;
mod touch_size;
mod velocity;

pub use config::GestureConfig;
pub use decelerate::{Decelerator, ExponentialDecelerator};
pub use event::{
    HistoricalFrame, PointerAction, PointerEvent, PointerId, PointerList, PointerSample,
};
pub use helper::{InsetTransHelper, OutsetTransHelper, ShapeTransHelper};
pub use host::{FrameRequest, GestureHost};
pub use machine::{GestureState, GestureStateMachine, TapListener};
pub use tap::{Tap, TapDetector, TapRecognizer};
pub use velocity::{RecentVelocityTracker, VelocityEstimator};
