// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_shape_policy --heading-base-level=0

//! Understory Shape Policy: constraint policies for a pannable, zoomable shape.
//!
//! This crate models a rectangular **shape** that is moved and scaled inside
//! (or around) a fixed **viewport**, and the affine transform used to render
//! it. It focuses on:
//! - Clamping a proposed translation or scale so the containment rule holds.
//! - Keeping a transform that maps the shape's natural box onto the current
//!   shape rectangle.
//! - Deciding whether a pointer stream starting at a point belongs to the shape.
//!
//! Two policies implement the shared [`TransformPolicy`] contract:
//! - [`InsetPolicy`]: the shape stays inside the viewport and never shrinks
//!   below a minimum size (think of a crop box).
//! - [`OutsetPolicy`]: the shape always covers the viewport and never grows
//!   past a maximum size (think of a zoomed photo).
//!
//! It does **not** interpret pointer events; `understory_gesture` turns raw
//! pointer streams into drag/scale/fling calls on a policy.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_shape_policy::{InsetPolicy, IntRect, IntSize, TransformPolicy};
//!
//! let viewport = IntRect::new(0, 0, 100, 100);
//! let mut policy = InsetPolicy::new(viewport, IntSize::new(50, 50), IntSize::new(10, 10))
//!     .unwrap();
//!
//! // Pinch far below the minimum: the shape stops at 10x10.
//! policy.on_scale(0.1, 0.1, Point::new(25.0, 25.0));
//! assert_eq!(policy.current_shape().size(), IntSize::new(10, 10));
//!
//! // The transform maps the 50x50 natural box onto the current shape.
//! let t = policy.transform();
//! assert_eq!(t.translation().x, 20.0);
//! ```
//!
//! ## Design notes
//!
//! - Shapes live on an integer grid. Whenever a transformed floating-point
//!   rectangle is turned back into a shape, each edge is **truncated toward
//!   zero**, never rounded.
//! - Transforms are expressed relative to the viewport origin. They are
//!   rebuilt from scratch by [`TransformPolicy::set_current_shape`] and
//!   post-multiplied during drags and scales.
//! - A translation reduced on both axes is reported as *over constraint*
//!   (see [`ConstrainedAxes`]); fling drivers use this to stop early.
//!
//! This crate is `no_std`.

#![no_std]

mod constraint;
mod geometry;
mod inset;
mod int_rect;
mod outset;
mod policy;

pub use constraint::ConstrainedAxes;
pub use geometry::{ContainMode, clamp_rect, rect_to_transform, with_translation};
pub use inset::InsetPolicy;
pub use int_rect::{IntRect, IntSize};
pub use outset::OutsetPolicy;
pub use policy::{DEFAULT_DOUBLE_TAP_SCALE, SetupError, SetupProblem, TransformPolicy};
