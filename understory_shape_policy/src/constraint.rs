// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which axes of a translation a policy had to reduce.

bitflags::bitflags! {
    /// Axes along which a translation delta had to be reduced to honor the
    /// containment rule.
    ///
    /// A delta is *over constraint* only when it was reduced on both axes;
    /// reducing a single axis (even to zero) is a normal slide along an edge.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ConstrainedAxes: u8 {
        /// The horizontal component was reduced.
        const HORIZONTAL = 0b01;
        /// The vertical component was reduced.
        const VERTICAL = 0b10;
    }
}

impl ConstrainedAxes {
    /// Returns `true` when both axes were reduced.
    #[must_use]
    pub fn is_over_constraint(self) -> bool {
        self.is_all()
    }
}
