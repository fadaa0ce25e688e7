// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events as delivered by the host's input source.
//!
//! An event carries its action, a timestamp in milliseconds, the pointers
//! that are down at that moment, and optionally the intermediate samples the
//! source batched since the previous event.
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{PointerAction, PointerEvent, PointerId, PointerSample};
//!
//! let first = PointerSample::new(PointerId(0), Point::new(10.0, 10.0));
//! let second = PointerSample::new(PointerId(1), Point::new(90.0, 90.0));
//!
//! let ev = PointerEvent::pointer_down(16, 1, [first, second]);
//! assert_eq!(ev.action, PointerAction::PointerDown { index: 1 });
//! assert_eq!(ev.action_index(), Some(1));
//! assert_eq!(ev.position_of(PointerId(1)), Some(Point::new(90.0, 90.0)));
//! ```

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

/// Pointer list stored inline for the common one- and two-finger cases.
pub type PointerList = SmallVec<[PointerSample; 4]>;

/// Stable identity of one pointer for the lifetime of its contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

/// Position and contact size of one pointer at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Which pointer this sample belongs to.
    pub id: PointerId,
    /// Position in event coordinates.
    pub position: Point,
    /// Length of the major axis of the contact area.
    pub touch_major: f64,
}

impl PointerSample {
    /// Creates a sample with no reported contact size.
    pub fn new(id: PointerId, position: Point) -> Self {
        Self {
            id,
            position,
            touch_major: 0.0,
        }
    }

    /// Returns this sample with the given contact size.
    #[must_use]
    pub fn with_touch_major(mut self, touch_major: f64) -> Self {
        self.touch_major = touch_major;
        self
    }
}

/// What happened to the pointer set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The first pointer of a new stream went down.
    Down,
    /// One or more pointers moved.
    Move,
    /// The last pointer of the stream went up.
    Up,
    /// The stream was aborted by the host.
    Cancel,
    /// An additional pointer went down; `index` addresses it in
    /// [`PointerEvent::pointers`].
    PointerDown {
        /// Index of the new pointer.
        index: usize,
    },
    /// A non-last pointer went up; `index` addresses it in
    /// [`PointerEvent::pointers`], which still includes it.
    PointerUp {
        /// Index of the lifted pointer.
        index: usize,
    },
}

/// Samples the source batched between two delivered events.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalFrame {
    /// Timestamp of these samples, in milliseconds.
    pub time: u64,
    /// One sample per pointer, in the same order as the event's pointers.
    pub samples: PointerList,
}

impl HistoricalFrame {
    /// Creates a frame from its samples.
    pub fn new(time: u64, samples: impl IntoIterator<Item = PointerSample>) -> Self {
        Self {
            time,
            samples: samples.into_iter().collect(),
        }
    }
}

/// One pointer event.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub action: PointerAction,
    /// Timestamp in milliseconds.
    pub time: u64,
    /// Pointers down at `time`, including a pointer being lifted.
    pub pointers: PointerList,
    /// Older samples batched into this event, oldest first.
    pub history: Vec<HistoricalFrame>,
}

impl PointerEvent {
    /// Creates an event from its parts, with no history.
    pub fn new(
        action: PointerAction,
        time: u64,
        pointers: impl IntoIterator<Item = PointerSample>,
    ) -> Self {
        Self {
            action,
            time,
            pointers: pointers.into_iter().collect(),
            history: Vec::new(),
        }
    }

    /// First pointer of a stream goes down.
    pub fn down(time: u64, pointer: PointerSample) -> Self {
        Self::new(PointerAction::Down, time, [pointer])
    }

    /// Pointers moved.
    pub fn moved(time: u64, pointers: impl IntoIterator<Item = PointerSample>) -> Self {
        Self::new(PointerAction::Move, time, pointers)
    }

    /// Last pointer of a stream goes up.
    pub fn up(time: u64, pointer: PointerSample) -> Self {
        Self::new(PointerAction::Up, time, [pointer])
    }

    /// The host aborted the stream.
    pub fn cancel(time: u64, pointers: impl IntoIterator<Item = PointerSample>) -> Self {
        Self::new(PointerAction::Cancel, time, pointers)
    }

    /// Pointer at `index` went down while others are already down.
    pub fn pointer_down(
        time: u64,
        index: usize,
        pointers: impl IntoIterator<Item = PointerSample>,
    ) -> Self {
        Self::new(PointerAction::PointerDown { index }, time, pointers)
    }

    /// Pointer at `index` went up while others stay down.
    pub fn pointer_up(
        time: u64,
        index: usize,
        pointers: impl IntoIterator<Item = PointerSample>,
    ) -> Self {
        Self::new(PointerAction::PointerUp { index }, time, pointers)
    }

    /// Appends a batched frame to [`Self::history`].
    #[must_use]
    pub fn with_history(mut self, frame: HistoricalFrame) -> Self {
        self.history.push(frame);
        self
    }

    /// Index of the pointer that went down or up, if the action names one.
    pub fn action_index(&self) -> Option<usize> {
        match self.action {
            PointerAction::PointerDown { index } | PointerAction::PointerUp { index } => {
                Some(index)
            }
            _ => None,
        }
    }

    /// Whether this event ends the stream.
    pub fn is_stream_end(&self) -> bool {
        matches!(self.action, PointerAction::Up | PointerAction::Cancel)
    }

    /// Current position of pointer `id`, if it is part of this event.
    pub fn position_of(&self, id: PointerId) -> Option<Point> {
        self.pointers
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.position)
    }

    /// The first pointer, which is the one that started a `Down` stream.
    pub fn primary(&self) -> Option<&PointerSample> {
        self.pointers.first()
    }
}
