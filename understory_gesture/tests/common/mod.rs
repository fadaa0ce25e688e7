// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted collaborators shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::collections::VecDeque;

use kurbo::{Point, Vec2};
use understory_gesture::{
    Decelerator, FrameRequest, GestureConfig, GestureHost, GestureStateMachine, PointerId,
    PointerSample, RecentVelocityTracker, TapRecognizer,
};

/// Host that records every request made of it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    next: u64,
    pub requested: Vec<FrameRequest>,
    pub cancelled: Vec<FrameRequest>,
    pub redraws: u32,
    pub claims: u32,
}

impl GestureHost for RecordingHost {
    fn request_frame(&mut self) -> FrameRequest {
        self.next += 1;
        let request = FrameRequest(self.next);
        self.requested.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.cancelled.push(request);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn claim_pointer_stream(&mut self) {
        self.claims += 1;
    }
}

/// Decelerator replaying a fixed list of offsets.
#[derive(Debug, Default)]
pub struct ScriptedDecelerator {
    script: Vec<Point>,
    remaining: VecDeque<Point>,
    pub started: Option<(Vec2, u64)>,
    pub advances: u32,
    pub aborted: bool,
    finished: bool,
}

impl ScriptedDecelerator {
    pub fn new(script: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            script: script.into_iter().map(Point::from).collect(),
            finished: true,
            ..Self::default()
        }
    }
}

impl Decelerator for ScriptedDecelerator {
    fn start(&mut self, velocity: Vec2, time: u64) {
        self.started = Some((velocity, time));
        self.remaining = self.script.iter().copied().collect();
        self.finished = false;
        self.aborted = false;
    }

    fn advance(&mut self, _time: u64) -> Option<Point> {
        if self.finished {
            return None;
        }
        self.advances += 1;
        let next = self.remaining.pop_front();
        if next.is_none() {
            self.finished = true;
        }
        next
    }

    fn abort(&mut self) {
        self.aborted = true;
        self.finished = true;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

pub type ScriptedMachine =
    GestureStateMachine<RecentVelocityTracker, ScriptedDecelerator, TapRecognizer>;

pub fn scripted_machine(script: impl IntoIterator<Item = (f64, f64)>) -> ScriptedMachine {
    GestureStateMachine::with_collaborators(
        GestureConfig::default(),
        RecentVelocityTracker::default(),
        ScriptedDecelerator::new(script),
        TapRecognizer::default(),
    )
}

pub fn finger(id: u32, x: f64, y: f64) -> PointerSample {
    PointerSample::new(PointerId(id), Point::new(x, y))
}
