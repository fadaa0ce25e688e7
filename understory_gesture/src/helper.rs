// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A policy and a state machine bundled behind one event entry point.

use kurbo::{Affine, Point};
use understory_shape_policy::{
    InsetPolicy, IntRect, IntSize, OutsetPolicy, SetupError, TransformPolicy,
};

use crate::config::GestureConfig;
use crate::decelerate::{Decelerator, ExponentialDecelerator};
use crate::event::{PointerAction, PointerEvent};
use crate::host::GestureHost;
use crate::machine::{GestureState, GestureStateMachine};
use crate::tap::{TapDetector, TapRecognizer};
use crate::velocity::{RecentVelocityTracker, VelocityEstimator};

/// Owns a [`TransformPolicy`] and the [`GestureStateMachine`] driving it.
///
/// A stream is only handled if its first press is claimed by the policy (see
/// [`TransformPolicy::claims_touch`]); until the stream ends, every later
/// event goes to the state machine and the return value of
/// [`Self::process_event`] tells the caller to keep the stream to itself.
///
/// ```rust
/// use kurbo::Point;
/// use understory_gesture::{
///     FrameRequest, GestureConfig, GestureHost, InsetTransHelper, PointerEvent, PointerId,
///     PointerSample,
/// };
/// use understory_shape_policy::{IntRect, IntSize, TransformPolicy};
///
/// struct Surface;
/// impl GestureHost for Surface {
///     fn request_frame(&mut self) -> FrameRequest { FrameRequest(0) }
///     fn cancel_frame(&mut self, _: FrameRequest) {}
///     fn request_redraw(&mut self) {}
/// }
///
/// let mut helper = InsetTransHelper::inset(
///     IntRect::new(0, 0, 100, 100),
///     IntSize::new(50, 50),
///     IntSize::new(10, 10),
///     GestureConfig::default(),
/// )
/// .unwrap();
/// let at = |x, y| PointerSample::new(PointerId(0), Point::new(x, y));
///
/// // Presses outside the shape are left to someone else.
/// assert!(!helper.process_event(&mut Surface, &PointerEvent::down(0, at(80.0, 80.0))));
///
/// // Presses on the shape drag it once past the touch slop.
/// assert!(helper.process_event(&mut Surface, &PointerEvent::down(100, at(10.0, 10.0))));
/// helper.process_event(&mut Surface, &PointerEvent::moved(116, [at(30.0, 10.0)]));
/// helper.process_event(&mut Surface, &PointerEvent::moved(132, [at(35.0, 10.0)]));
/// assert_eq!(helper.current_shape(), IntRect::new(25, 0, 75, 50));
/// ```
pub struct ShapeTransHelper<
    P,
    V = RecentVelocityTracker,
    D = ExponentialDecelerator,
    T = TapRecognizer,
> {
    policy: P,
    machine: GestureStateMachine<V, D, T>,
    handling: bool,
}

impl<P: core::fmt::Debug, V: core::fmt::Debug, D: core::fmt::Debug, T: core::fmt::Debug>
    core::fmt::Debug for ShapeTransHelper<P, V, D, T>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShapeTransHelper")
            .field("policy", &self.policy)
            .field("machine", &self.machine)
            .field("handling", &self.handling)
            .finish()
    }
}

/// Helper keeping the shape inside the viewport.
pub type InsetTransHelper = ShapeTransHelper<InsetPolicy>;

/// Helper keeping the viewport covered by the shape.
pub type OutsetTransHelper = ShapeTransHelper<OutsetPolicy>;

impl<P: TransformPolicy> ShapeTransHelper<P> {
    /// Wraps `policy` with a state machine using the default collaborators.
    pub fn new(policy: P, config: GestureConfig) -> Self {
        Self::with_machine(policy, GestureStateMachine::new(config))
    }
}

impl InsetTransHelper {
    /// Creates a configured inset helper; see [`InsetPolicy::new`].
    pub fn inset(
        viewport: IntRect,
        natural: IntSize,
        min: IntSize,
        config: GestureConfig,
    ) -> Result<Self, SetupError> {
        Ok(Self::new(InsetPolicy::new(viewport, natural, min)?, config))
    }
}

impl OutsetTransHelper {
    /// Creates a configured outset helper; see [`OutsetPolicy::new`].
    pub fn outset(
        viewport: IntRect,
        natural: IntSize,
        max: IntSize,
        config: GestureConfig,
    ) -> Result<Self, SetupError> {
        Ok(Self::new(OutsetPolicy::new(viewport, natural, max)?, config))
    }
}

impl<P, V, D, T> ShapeTransHelper<P, V, D, T>
where
    P: TransformPolicy,
    V: VelocityEstimator,
    D: Decelerator,
    T: TapDetector,
{
    /// Pairs `policy` with an already built state machine.
    pub fn with_machine(policy: P, machine: GestureStateMachine<V, D, T>) -> Self {
        Self {
            policy,
            machine,
            handling: false,
        }
    }

    /// Reconfigures the policy; see [`TransformPolicy::setup`].
    pub fn setup(
        &mut self,
        viewport: IntRect,
        natural: IntSize,
        limit: IntSize,
    ) -> Result<(), SetupError> {
        self.policy.setup(viewport, natural, limit)
    }

    /// Clamps and applies `rect`; see [`TransformPolicy::set_current_shape`].
    pub fn set_current_shape(&mut self, rect: IntRect) {
        self.policy.set_current_shape(rect);
    }

    /// The current shape rectangle.
    pub fn current_shape(&self) -> IntRect {
        self.policy.current_shape()
    }

    /// The transform mapping the natural shape box onto the current shape.
    pub fn transform(&self) -> Affine {
        self.policy.transform()
    }

    /// The wrapped policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The wrapped policy, mutably.
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// The wrapped state machine.
    pub fn machine(&self) -> &GestureStateMachine<V, D, T> {
        &self.machine
    }

    /// Current gesture state.
    pub fn state(&self) -> GestureState {
        self.machine.state()
    }

    /// Whether the current stream was claimed.
    pub fn is_handling(&self) -> bool {
        self.handling
    }

    /// Installs the callback that receives single taps.
    pub fn set_tap_listener(&mut self, listener: impl FnMut(Point) + 'static) {
        self.machine.set_tap_listener(listener);
    }

    /// Removes the single-tap callback.
    pub fn clear_tap_listener(&mut self) {
        self.machine.clear_tap_listener();
    }

    /// Handles one pointer event and reports whether the stream is claimed.
    ///
    /// For `Up` and `Cancel` this reports whether the stream that just ended
    /// was claimed.
    pub fn process_event(&mut self, host: &mut dyn GestureHost, event: &PointerEvent) -> bool {
        match event.action {
            PointerAction::Down => {
                let claimed = event
                    .primary()
                    .is_some_and(|p| self.policy.claims_touch(p.position));
                self.handling =
                    claimed && self.machine.process_event(&mut self.policy, host, event);
                self.handling
            }
            PointerAction::Up | PointerAction::Cancel => {
                let handled = self.handling;
                if handled {
                    self.machine.process_event(&mut self.policy, host, event);
                }
                self.handling = false;
                handled
            }
            PointerAction::Move
            | PointerAction::PointerDown { .. }
            | PointerAction::PointerUp { .. } => {
                if self.handling {
                    self.machine.process_event(&mut self.policy, host, event);
                }
                self.handling
            }
        }
    }

    /// Runs one fling frame; see [`GestureStateMachine::on_frame`].
    pub fn on_frame(&mut self, host: &mut dyn GestureHost, time: u64) {
        self.machine.on_frame(&mut self.policy, host, time);
    }

    /// Stops a fling in progress.
    pub fn cancel_fling(&mut self, host: &mut dyn GestureHost) {
        self.machine.cancel_fling(host);
    }
}
