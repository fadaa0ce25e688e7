// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture state machine.
//!
//! [`GestureStateMachine`] consumes pointer events and turns them into drag,
//! scale, and fling calls on a [`TransformPolicy`]:
//!
//! - One pointer moving past the touch slop starts a **drag**; every later
//!   move forwards its whole-pixel delta.
//! - Two or more pointers whose span grows past the minimum span and differs
//!   from the span recorded at the last pointer change by more than the span
//!   slop start a **scale**; every later move forwards the per-axis span
//!   ratio about the pointers' centroid.
//! - Releasing a drag fast enough starts a **fling**, driven one frame at a
//!   time through [`GestureStateMachine::on_frame`].
//! - Taps are recognized alongside: a double tap scales by the policy's
//!   double-tap factor, a single tap goes to the tap listener.
//!
//! The machine never owns the policy or the host; both are passed into every
//! call so a caller can keep them wherever is convenient.

use alloc::boxed::Box;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};
use understory_shape_policy::TransformPolicy;

use crate::config::GestureConfig;
use crate::decelerate::{Decelerator, ExponentialDecelerator};
use crate::event::{PointerAction, PointerEvent, PointerId};
use crate::fling::{FlingDriver, FlingStep};
use crate::host::GestureHost;
use crate::span::SpanInfo;
use crate::tap::{Tap, TapDetector, TapRecognizer};
use crate::touch_size::TouchSizeFilter;
use crate::velocity::{RecentVelocityTracker, VelocityEstimator};

/// What the current pointer stream is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// Pointers are down but have not moved enough to mean anything yet.
    #[default]
    Idle,
    /// A single pointer is moving the shape.
    Dragging,
    /// Several pointers are scaling the shape.
    Scaling,
    /// The shape is moving on its own after a fling.
    Settling,
}

/// Callback receiving the position of each single tap.
pub type TapListener = Box<dyn FnMut(Point)>;

/// Classifies pointer streams and drives a [`TransformPolicy`].
///
/// The collaborators default to [`RecentVelocityTracker`],
/// [`ExponentialDecelerator`], and [`TapRecognizer`]; use
/// [`GestureStateMachine::with_collaborators`] to replace them.
pub struct GestureStateMachine<
    V = RecentVelocityTracker,
    D = ExponentialDecelerator,
    T = TapRecognizer,
> {
    config: GestureConfig,
    state: GestureState,
    active_pointer: Option<PointerId>,
    last_position: Point,
    initial_span: f64,
    last_span: Vec2,
    touch_size: TouchSizeFilter,
    velocity: V,
    fling: FlingDriver<D>,
    taps: T,
    tap_listener: Option<TapListener>,
}

impl<V: fmt::Debug, D: fmt::Debug, T: fmt::Debug> fmt::Debug for GestureStateMachine<V, D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureStateMachine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("active_pointer", &self.active_pointer)
            .field("last_position", &self.last_position)
            .field("initial_span", &self.initial_span)
            .field("last_span", &self.last_span)
            .field("touch_size", &self.touch_size)
            .field("velocity", &self.velocity)
            .field("fling", &self.fling)
            .field("taps", &self.taps)
            .field("has_tap_listener", &self.tap_listener.is_some())
            .finish()
    }
}

impl Default for GestureStateMachine {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureStateMachine {
    /// Creates a machine with the default collaborators.
    pub fn new(config: GestureConfig) -> Self {
        Self::with_collaborators(
            config,
            RecentVelocityTracker::default(),
            ExponentialDecelerator::default(),
            TapRecognizer::new(&config),
        )
    }
}

/// Whole-pixel part of a delta, truncated toward zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "drag deltas are truncated to whole pixels"
)]
fn trunc_delta(v: Vec2) -> (i32, i32) {
    (v.x as i32, v.y as i32)
}

/// Truncates a velocity to whole pixels per second.
#[expect(
    clippy::cast_possible_truncation,
    reason = "velocities are clamped well inside i32 first"
)]
fn trunc_velocity(v: f64) -> i32 {
    v as i32
}

fn span_ratio(current: f64, last: f64) -> f64 {
    if last > 0.0 { current / last } else { 1.0 }
}

impl<V: VelocityEstimator, D: Decelerator, T: TapDetector> GestureStateMachine<V, D, T> {
    /// Creates a machine with caller-supplied collaborators.
    pub fn with_collaborators(config: GestureConfig, velocity: V, decelerator: D, taps: T) -> Self {
        Self {
            config,
            state: GestureState::Idle,
            active_pointer: None,
            last_position: Point::ZERO,
            initial_span: 0.0,
            last_span: Vec2::ZERO,
            touch_size: TouchSizeFilter::default(),
            velocity,
            fling: FlingDriver::new(decelerator),
            taps,
            tap_listener: None,
        }
    }

    /// The thresholds in use.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Current gesture state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Pointer whose movement drives drags, if any.
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    /// The fling integrator.
    pub fn decelerator(&self) -> &D {
        self.fling.decelerator()
    }

    /// Whether a fling frame has been requested and not yet delivered.
    pub fn is_frame_pending(&self) -> bool {
        self.fling.is_pending()
    }

    /// Installs the callback that receives single taps.
    pub fn set_tap_listener(&mut self, listener: impl FnMut(Point) + 'static) {
        self.tap_listener = Some(Box::new(listener));
    }

    /// Removes the single-tap callback.
    pub fn clear_tap_listener(&mut self) {
        self.tap_listener = None;
    }

    /// Stops a fling in progress and withdraws its pending frame.
    pub fn cancel_fling(&mut self, host: &mut dyn GestureHost) {
        if self.state == GestureState::Settling {
            self.fling.abort(host);
            self.set_state(GestureState::Idle);
        }
    }

    /// Handles one pointer event.
    ///
    /// Returns `false` only for events that carry no pointers and do not end
    /// the stream; everything else is consumed.
    pub fn process_event<P: TransformPolicy + ?Sized>(
        &mut self,
        policy: &mut P,
        host: &mut dyn GestureHost,
        event: &PointerEvent,
    ) -> bool {
        if event.pointers.is_empty() && !event.is_stream_end() {
            log::debug!("ignoring {:?} without pointers", event.action);
            return false;
        }

        match self.taps.on_event(event) {
            Some(Tap::Double(at)) => {
                let factor = policy.double_tap_scale();
                log::debug!("double tap at {at:?}");
                Self::apply_scale(policy, host, factor, factor, at);
            }
            Some(Tap::Single(at)) => {
                if let Some(listener) = self.tap_listener.as_mut() {
                    listener(at);
                }
            }
            None => {}
        }

        if event.is_stream_end() {
            self.finish_stream(host, event);
            return true;
        }

        let scale_enabled = policy.can_scale_horizontal() || policy.can_scale_vertical();
        self.velocity.add_event(event);
        if scale_enabled {
            self.touch_size.add(
                event,
                self.config.min_touch_major,
                self.config.touch_stabilize_ms,
            );
        }

        match event.action {
            PointerAction::Down => self.on_down(host, event),
            PointerAction::PointerDown { index } | PointerAction::PointerUp { index } => {
                self.on_pointer_change(event, index, scale_enabled);
            }
            PointerAction::Move => self.on_move(policy, host, event, scale_enabled),
            PointerAction::Up | PointerAction::Cancel => {}
        }
        true
    }

    /// Runs one frame of a fling; call when a requested frame arrives.
    ///
    /// Frames delivered while no fling is running are ignored.
    pub fn on_frame<P: TransformPolicy + ?Sized>(
        &mut self,
        policy: &mut P,
        host: &mut dyn GestureHost,
        time: u64,
    ) {
        if self.state != GestureState::Settling {
            log::trace!("ignoring frame at {time} while {:?}", self.state);
            return;
        }
        if self.fling.tick(policy, host, time) == FlingStep::Finished {
            self.set_state(GestureState::Idle);
        }
    }

    fn set_state(&mut self, state: GestureState) {
        if self.state != state {
            log::debug!("gesture {:?} -> {state:?}", self.state);
            self.state = state;
        }
    }

    fn apply_scale<P: TransformPolicy + ?Sized>(
        policy: &mut P,
        host: &mut dyn GestureHost,
        sx: f64,
        sy: f64,
        focus: Point,
    ) {
        policy.on_scale(sx, sy, focus);
        host.request_redraw();
    }

    fn reset_span(&mut self) {
        self.initial_span = 0.0;
        self.last_span = Vec2::ZERO;
    }

    fn finish_stream(&mut self, host: &mut dyn GestureHost, event: &PointerEvent) {
        if self.state == GestureState::Scaling {
            self.reset_span();
            self.set_state(GestureState::Idle);
        }
        self.touch_size.clear();

        if self.state == GestureState::Dragging {
            let fling = match event.action {
                PointerAction::Up => self.release_velocity(),
                _ => None,
            };
            match fling {
                Some(velocity) => {
                    self.fling.start(host, velocity, event.time);
                    self.set_state(GestureState::Settling);
                }
                None => self.set_state(GestureState::Idle),
            }
        }

        self.velocity.clear();
        self.active_pointer = None;
    }

    /// Clamped, truncated release velocity if it is fast enough to fling.
    fn release_velocity(&self) -> Option<Vec2> {
        let velocity = self.velocity.velocity(self.active_pointer?)?;
        let max = self.config.max_fling_velocity;
        let vx = trunc_velocity(velocity.x.max(-max).min(max));
        let vy = trunc_velocity(velocity.y.max(-max).min(max));
        let min = self.config.min_fling_velocity;
        if f64::from(vx.unsigned_abs()) > min || f64::from(vy.unsigned_abs()) > min {
            Some(Vec2::new(f64::from(vx), f64::from(vy)))
        } else {
            log::trace!("release at ({vx}, {vy}) px/s is too slow to fling");
            None
        }
    }

    fn on_down(&mut self, host: &mut dyn GestureHost, event: &PointerEvent) {
        let Some(primary) = event.primary() else {
            return;
        };
        self.active_pointer = Some(primary.id);
        self.last_position = primary.position;
        self.initial_span = 0.0;

        if self.state == GestureState::Settling {
            self.fling.abort(host);
            host.claim_pointer_stream();
            self.set_state(GestureState::Dragging);
        } else {
            self.set_state(GestureState::Idle);
        }
    }

    fn on_pointer_change(&mut self, event: &PointerEvent, index: usize, scale_enabled: bool) {
        let Some(changed) = event.pointers.get(index).copied() else {
            log::debug!(
                "pointer index {index} out of range for {} pointers",
                event.pointers.len()
            );
            return;
        };
        let lifting = matches!(event.action, PointerAction::PointerUp { .. });
        if self.state == GestureState::Settling {
            log::debug!("ignoring pointer change while settling");
            return;
        }

        if !scale_enabled {
            if !lifting {
                self.active_pointer = Some(changed.id);
                self.last_position = changed.position;
            } else if self.active_pointer == Some(changed.id)
                && let Some(other) = event
                    .pointers
                    .iter()
                    .enumerate()
                    .find(|&(i, _)| i != index)
                    .map(|(_, p)| *p)
            {
                self.active_pointer = Some(other.id);
                self.last_position = other.position;
            }
            return;
        }

        let remaining = event.pointers.len() - usize::from(lifting);
        if remaining == 1 {
            let survivor = event
                .pointers
                .iter()
                .enumerate()
                .find(|&(i, _)| !(lifting && i == index))
                .map(|(_, p)| *p);
            if let Some(survivor) = survivor {
                self.active_pointer = Some(survivor.id);
                self.last_position = survivor.position;
            }
            self.reset_span();
            self.set_state(GestureState::Idle);
            return;
        }

        let Some(info) = SpanInfo::measure(event, self.touch_size.accepted().unwrap_or(0.0))
        else {
            return;
        };
        let span = info.span.hypot();
        self.initial_span = span;
        self.last_span = info.span;
        log::trace!("span baseline {span} with {remaining} pointers");
        if !(span > self.config.min_span && self.state == GestureState::Scaling) {
            self.set_state(GestureState::Idle);
        }
    }

    fn on_move<P: TransformPolicy + ?Sized>(
        &mut self,
        policy: &mut P,
        host: &mut dyn GestureHost,
        event: &PointerEvent,
        scale_enabled: bool,
    ) {
        if self.state == GestureState::Settling {
            log::debug!("ignoring move while settling");
            return;
        }

        if event.pointers.len() > 1 && scale_enabled {
            let touch = self.touch_size.accepted().unwrap_or(0.0);
            let Some(info) = SpanInfo::measure(event, touch) else {
                return;
            };
            if self.state == GestureState::Scaling {
                let sx = if policy.can_scale_horizontal() {
                    span_ratio(info.span.x, self.last_span.x)
                } else {
                    1.0
                };
                let sy = if policy.can_scale_vertical() {
                    span_ratio(info.span.y, self.last_span.y)
                } else {
                    1.0
                };
                Self::apply_scale(policy, host, sx, sy, info.focus);
                self.last_span = info.span;
            } else {
                let span_sq = info.span_squared();
                let min_span_sq = self.config.min_span * self.config.min_span;
                let initial_sq = self.initial_span * self.initial_span;
                let slop_sq = self.config.span_slop * self.config.span_slop;
                if span_sq >= min_span_sq && (span_sq - initial_sq).abs() > slop_sq {
                    self.last_span = info.span;
                    self.set_state(GestureState::Scaling);
                }
            }
            return;
        }

        let Some(active) = self.active_pointer else {
            log::debug!("move without an active pointer");
            return;
        };
        let Some(position) = event.position_of(active) else {
            log::debug!("move does not include active pointer {active:?}");
            return;
        };
        let (dx, dy) = trunc_delta(position - self.last_position);
        if self.state == GestureState::Dragging {
            policy.on_drag(dx, dy);
            host.request_redraw();
            self.last_position = position;
        } else if self.exceeds_touch_slop(policy, dx, dy) {
            self.set_state(GestureState::Dragging);
        }
    }

    fn exceeds_touch_slop<P: TransformPolicy + ?Sized>(&self, policy: &P, dx: i32, dy: i32) -> bool {
        let slop = self.config.touch_slop;
        let (x, y) = (f64::from(dx), f64::from(dy));
        match (policy.can_drag_horizontal(), policy.can_drag_vertical()) {
            (true, true) => x * x + y * y > slop * slop,
            (true, false) => f64::from(dx.unsigned_abs()) > slop,
            (false, true) => f64::from(dy.unsigned_abs()) > slop,
            (false, false) => false,
        }
    }
}
