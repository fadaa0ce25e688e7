// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface hosting a gesture-driven shape.

/// Handle for a pending animation frame callback.
///
/// Hosts choose the value; it is only handed back to
/// [`GestureHost::cancel_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Services the gesture engine needs from the rendering surface.
///
/// All calls happen on the thread that delivers pointer events and frames.
pub trait GestureHost {
    /// Asks for one call to the engine's `on_frame` on the next display frame.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraws a pending frame request.
    fn cancel_frame(&mut self, request: FrameRequest);

    /// The shape transform changed; redraw soon.
    fn request_redraw(&mut self);

    /// Ancestors should stop intercepting the current pointer stream.
    ///
    /// Sent when a press catches a shape that is still flinging.
    fn claim_pointer_stream(&mut self) {}
}
