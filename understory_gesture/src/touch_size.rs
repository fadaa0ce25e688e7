// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact-size smoothing for span estimation.
//!
//! Touch sensors report a noisy contact size. The filter keeps a running
//! upper and lower bound over all samples and only accepts a new value after
//! the stabilization interval has passed without the sample-to-accepted
//! difference changing sign. On acceptance both bounds move halfway toward
//! the new value.

use crate::event::PointerEvent;

#[derive(Clone, Debug, Default)]
pub(crate) struct TouchSizeFilter {
    upper: Option<f64>,
    lower: Option<f64>,
    accepted: Option<f64>,
    direction: i8,
    last_accepted_time: Option<u64>,
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

impl TouchSizeFilter {
    /// Last accepted contact size, if any sample has been accepted yet.
    pub(crate) fn accepted(&self) -> Option<f64> {
        self.accepted
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Feeds every sample of `event`, historical ones included.
    pub(crate) fn add(&mut self, event: &PointerEvent, min_major: f64, stabilize_ms: u64) {
        let mut accept = self
            .last_accepted_time
            .is_none_or(|t| event.time.saturating_sub(t) >= stabilize_ms);
        let mut total = 0.0;
        let mut count = 0_u32;

        for (i, current) in event.pointers.iter().enumerate() {
            let has_accepted = self.accepted;
            let historical = event
                .history
                .iter()
                .filter_map(|frame| frame.samples.get(i).map(|s| (frame.time, s.touch_major)));
            for (time, major) in historical.chain([(event.time, current.touch_major)]) {
                let major = major.max(min_major);
                total += major;
                count += 1;

                if self.upper.is_none_or(|u| major > u) {
                    self.upper = Some(major);
                }
                if self.lower.is_none_or(|l| major < l) {
                    self.lower = Some(major);
                }

                if let Some(accepted) = has_accepted {
                    let direction = sign(major - accepted);
                    if direction != self.direction || direction == 0 {
                        self.direction = direction;
                        self.last_accepted_time = Some(time);
                        accept = false;
                    }
                }
            }
        }

        if !accept || count == 0 {
            return;
        }
        let (Some(upper), Some(lower)) = (self.upper, self.lower) else {
            return;
        };
        let average = total / f64::from(count);
        let accepted = (upper + lower + average) / 3.0;
        self.upper = Some((upper + accepted) / 2.0);
        self.lower = Some((lower + accepted) / 2.0);
        self.accepted = Some(accepted);
        self.direction = 0;
        self.last_accepted_time = Some(event.time);
        log::trace!("touch size accepted {accepted}");
    }
}
