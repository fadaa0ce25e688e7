// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for [`GestureStateMachine`] driving real shape policies.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{RecordingHost, finger, scripted_machine};
use kurbo::{Point, Vec2};
use understory_gesture::{
    FrameRequest, GestureConfig, GestureState, GestureStateMachine, PointerEvent, PointerId,
};
use understory_shape_policy::{InsetPolicy, IntRect, IntSize, TransformPolicy};

fn inset(viewport: IntRect, natural: i32) -> InsetPolicy {
    InsetPolicy::new(
        viewport,
        IntSize::new(natural, natural),
        IntSize::new(10, 10),
    )
    .unwrap()
}

#[test]
fn drag_starts_after_touch_slop_and_keeps_the_slop_distance() {
    let mut policy = inset(IntRect::new(0, 0, 400, 400), 100);
    let mut host = RecordingHost::default();
    let mut machine = GestureStateMachine::default();

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 50.0, 50.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 55.0, 50.0)]));
    assert_eq!(machine.state(), GestureState::Idle);

    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(20, [finger(0, 60.0, 50.0)]));
    assert_eq!(machine.state(), GestureState::Dragging);
    assert_eq!(policy.current_shape(), IntRect::new(0, 0, 100, 100));
    assert_eq!(host.redraws, 0);

    // The first applied delta still counts from the press position.
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(30, [finger(0, 70.5, 54.9)]));
    assert_eq!(policy.current_shape(), IntRect::new(20, 4, 120, 104));
    assert_eq!(host.redraws, 1);

    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(40, [finger(0, 60.0, 50.0)]));
    assert_eq!(policy.current_shape(), IntRect::new(10, 0, 110, 100));
}

#[test]
fn single_axis_policies_only_measure_slop_on_their_axis() {
    // Full-height minimum: the shape can only move horizontally.
    let mut policy = InsetPolicy::new(
        IntRect::new(0, 0, 200, 100),
        IntSize::new(50, 100),
        IntSize::new(10, 100),
    )
    .unwrap();
    assert!(policy.can_drag_horizontal() && !policy.can_drag_vertical());
    let mut host = RecordingHost::default();
    let mut machine = GestureStateMachine::default();

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 20.0, 20.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 20.0, 60.0)]));
    assert_eq!(machine.state(), GestureState::Idle);

    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(20, [finger(0, 29.0, 60.0)]));
    assert_eq!(machine.state(), GestureState::Dragging);
}

#[test]
fn pinch_scales_about_the_pointer_centroid() {
    let mut policy = inset(IntRect::new(0, 0, 1000, 1000), 200);
    policy.set_current_shape(IntRect::new(400, 400, 600, 600));
    let mut host = RecordingHost::default();
    let mut machine = GestureStateMachine::default();

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 400.0, 500.0)));
    machine.process_event(
        &mut policy,
        &mut host,
        &PointerEvent::pointer_down(10, 1, [finger(0, 400.0, 500.0), finger(1, 600.0, 500.0)]),
    );
    assert_eq!(machine.state(), GestureState::Idle);

    // Spreading past the span slop enters scaling without applying anything.
    machine.process_event(
        &mut policy,
        &mut host,
        &PointerEvent::moved(20, [finger(0, 350.0, 500.0), finger(1, 650.0, 500.0)]),
    );
    assert_eq!(machine.state(), GestureState::Scaling);
    assert_eq!(policy.current_shape(), IntRect::new(400, 400, 600, 600));

    // Horizontal span 348 -> 448 (contact size padding included), vertical unchanged.
    machine.process_event(
        &mut policy,
        &mut host,
        &PointerEvent::moved(30, [finger(0, 300.0, 500.0), finger(1, 700.0, 500.0)]),
    );
    assert_eq!(policy.current_shape(), IntRect::new(371, 400, 628, 600));
    assert_eq!(host.redraws, 1);

    // Lifting one finger hands tracking to the other.
    machine.process_event(
        &mut policy,
        &mut host,
        &PointerEvent::pointer_up(40, 1, [finger(0, 300.0, 500.0), finger(1, 700.0, 500.0)]),
    );
    assert_eq!(machine.state(), GestureState::Idle);
    assert_eq!(machine.active_pointer(), Some(PointerId(0)));

    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(50, [finger(0, 320.0, 500.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(60, [finger(0, 330.0, 500.0)]));
    assert_eq!(machine.state(), GestureState::Dragging);
    assert_eq!(policy.current_shape(), IntRect::new(401, 400, 658, 600));
}

#[test]
fn second_pointer_interrupts_a_drag() {
    let mut policy = inset(IntRect::new(0, 0, 1000, 1000), 200);
    let mut host = RecordingHost::default();
    let mut machine = GestureStateMachine::default();

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 100.0, 100.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 120.0, 100.0)]));
    assert_eq!(machine.state(), GestureState::Dragging);

    machine.process_event(
        &mut policy,
        &mut host,
        &PointerEvent::pointer_down(20, 1, [finger(0, 120.0, 100.0), finger(1, 130.0, 100.0)]),
    );
    assert_eq!(machine.state(), GestureState::Idle);

    // Close pointers never reach the minimum span.
    machine.process_event(
        &mut policy,
        &mut host,
        &PointerEvent::moved(30, [finger(0, 150.0, 100.0), finger(1, 160.0, 100.0)]),
    );
    assert_eq!(machine.state(), GestureState::Idle);
    assert_eq!(policy.current_shape(), IntRect::new(0, 0, 200, 200));
}

#[test]
fn fling_stops_at_a_single_axis_boundary() {
    let mut policy = inset(IntRect::new(0, 0, 200, 200), 100);
    policy.set_current_shape(IntRect::new(50, 50, 150, 150));
    let mut host = RecordingHost::default();
    let mut machine = scripted_machine([(15.0, 0.0), (30.0, 0.0), (45.0, 0.0), (60.0, 0.0)]);

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 100.0, 100.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 110.0, 100.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(20, [finger(0, 110.0, 100.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(20, finger(0, 110.0, 100.0)));

    // The move after the slop applies the 10 px gathered since the press,
    // leaving the shape 40 px from the right edge.
    assert_eq!(machine.state(), GestureState::Settling);
    assert_eq!(machine.decelerator().started, Some((Vec2::new(500.0, 0.0), 20)));
    assert_eq!(host.requested, [FrameRequest(1)]);
    assert_eq!(policy.current_shape(), IntRect::new(60, 50, 160, 150));

    let mut time = 20;
    while machine.state() == GestureState::Settling {
        time += 16;
        machine.on_frame(&mut policy, &mut host, time);
        assert!(time < 200, "fling did not stop");
    }

    // Three frames: +15, +15, then +10 of the requested +15.
    assert_eq!(machine.decelerator().advances, 3);
    assert!(machine.decelerator().aborted);
    assert_eq!(policy.current_shape(), IntRect::new(100, 50, 200, 150));
    assert_eq!(host.requested.len(), 3);
    assert!(!machine.is_frame_pending());

    // Stray frames after the fling are ignored.
    machine.on_frame(&mut policy, &mut host, time + 16);
    assert_eq!(machine.decelerator().advances, 3);
}

#[test]
fn fling_into_a_corner_stops_on_over_constraint() {
    let mut policy = inset(IntRect::new(0, 0, 200, 200), 100);
    let mut host = RecordingHost::default();
    let mut machine = scripted_machine([(-5.0, -5.0), (-10.0, -10.0)]);

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 100.0, 100.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 90.0, 90.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(20, [finger(0, 90.0, 90.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(20, finger(0, 90.0, 90.0)));
    assert_eq!(
        machine.decelerator().started,
        Some((Vec2::new(-500.0, -500.0), 20))
    );

    machine.on_frame(&mut policy, &mut host, 36);
    assert_eq!(machine.state(), GestureState::Idle);
    assert_eq!(machine.decelerator().advances, 1);
    assert_eq!(policy.current_shape(), IntRect::new(0, 0, 100, 100));
}

#[test]
fn fling_runs_until_the_decelerator_is_exhausted() {
    let mut policy = inset(IntRect::new(0, 0, 400, 400), 100);
    let mut host = RecordingHost::default();
    let mut machine = scripted_machine([(3.7, 1.2), (6.1, 2.9)]);

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 100.0, 100.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 110.0, 105.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(20, [finger(0, 110.0, 105.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(20, finger(0, 110.0, 105.0)));

    machine.on_frame(&mut policy, &mut host, 36);
    machine.on_frame(&mut policy, &mut host, 52);
    assert_eq!(machine.state(), GestureState::Settling);
    machine.on_frame(&mut policy, &mut host, 68);
    assert_eq!(machine.state(), GestureState::Idle);

    // The drag moved (10, 5), then truncated positions 3,1 and 6,2.
    assert_eq!(policy.current_shape(), IntRect::new(16, 7, 116, 107));
    // One for the drag before release, one per applied frame.
    assert_eq!(host.redraws, 3);
}

#[test]
fn release_velocity_is_clamped_and_truncated() {
    let mut policy = inset(IntRect::new(0, 0, 4000, 4000), 100);
    let mut host = RecordingHost::default();
    let mut machine = scripted_machine([]);

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 100.0, 100.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(30, [finger(0, 400.0, 100.1)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(30, finger(0, 400.0, 100.1)));

    // 300 px in 30 ms is 10000 px/s; the vertical 3.33 px/s truncates to 3.
    assert_eq!(
        machine.decelerator().started,
        Some((Vec2::new(8000.0, 3.0), 30))
    );
}

#[test]
fn slow_release_does_not_fling() {
    let mut policy = inset(IntRect::new(0, 0, 400, 400), 100);
    let mut host = RecordingHost::default();
    let mut machine = scripted_machine([(50.0, 0.0)]);

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 100.0, 100.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 112.0, 100.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(300, [finger(0, 113.0, 100.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(310, finger(0, 113.0, 100.0)));

    assert_eq!(machine.state(), GestureState::Idle);
    assert!(host.requested.is_empty());
    assert_eq!(machine.decelerator().started, None);
    assert_eq!(policy.current_shape(), IntRect::new(13, 0, 113, 100));
}

#[test]
fn release_while_scaling_or_cancel_never_flings() {
    let mut policy = inset(IntRect::new(0, 0, 1000, 1000), 200);
    let mut host = RecordingHost::default();
    let mut machine = scripted_machine([(50.0, 0.0)]);

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 400.0, 500.0)));
    machine.process_event(
        &mut policy,
        &mut host,
        &PointerEvent::pointer_down(10, 1, [finger(0, 400.0, 500.0), finger(1, 600.0, 500.0)]),
    );
    machine.process_event(
        &mut policy,
        &mut host,
        &PointerEvent::moved(20, [finger(0, 100.0, 500.0), finger(1, 900.0, 500.0)]),
    );
    assert_eq!(machine.state(), GestureState::Scaling);
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(25, finger(0, 100.0, 500.0)));
    assert_eq!(machine.state(), GestureState::Idle);

    // A fast drag that is cancelled instead of released.
    machine.process_event(&mut policy, &mut host, &PointerEvent::down(100, finger(0, 100.0, 100.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(110, [finger(0, 200.0, 100.0)]));
    assert_eq!(machine.state(), GestureState::Dragging);
    machine.process_event(&mut policy, &mut host, &PointerEvent::cancel(115, [finger(0, 200.0, 100.0)]));
    assert_eq!(machine.state(), GestureState::Idle);
    assert_eq!(machine.active_pointer(), None);

    assert!(host.requested.is_empty());
    assert_eq!(machine.decelerator().started, None);
}

#[test]
fn press_during_fling_aborts_it_and_resumes_dragging() {
    let mut policy = inset(IntRect::new(0, 0, 400, 400), 100);
    let mut host = RecordingHost::default();
    let mut machine = scripted_machine([(10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 100.0, 100.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 110.0, 100.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(20, [finger(0, 110.0, 100.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(20, finger(0, 110.0, 100.0)));
    machine.on_frame(&mut policy, &mut host, 36);
    assert_eq!(policy.current_shape(), IntRect::new(20, 0, 120, 100));
    assert_eq!(host.requested, [FrameRequest(1), FrameRequest(2)]);

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(40, finger(0, 60.0, 60.0)));
    assert_eq!(machine.state(), GestureState::Dragging);
    assert_eq!(host.cancelled, [FrameRequest(2)]);
    assert_eq!(host.claims, 1);
    assert!(machine.decelerator().aborted);

    // The pending frame may still arrive; it must not move the shape.
    machine.on_frame(&mut policy, &mut host, 52);
    assert_eq!(policy.current_shape(), IntRect::new(20, 0, 120, 100));

    // Already dragging: no slop before the first delta.
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(56, [finger(0, 63.0, 60.0)]));
    assert_eq!(policy.current_shape(), IntRect::new(23, 0, 123, 100));
}

#[test]
fn far_off_pointer_drags_to_the_edge_without_overflow() {
    let mut policy = inset(IntRect::new(0, 0, 400, 400), 100);
    let mut host = RecordingHost::default();
    let mut machine = GestureStateMachine::default();

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 50.0, 50.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 70.0, 50.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(20, [finger(0, 1e12, 50.0)]));
    assert_eq!(machine.state(), GestureState::Dragging);
    assert_eq!(policy.current_shape(), IntRect::new(300, 0, 400, 100));

    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(30, [finger(0, -1e12, -1e12)]));
    assert_eq!(policy.current_shape(), IntRect::new(0, 0, 100, 100));
}

#[test]
fn cancel_fling_withdraws_the_pending_frame() {
    let mut policy = inset(IntRect::new(0, 0, 400, 400), 100);
    let mut host = RecordingHost::default();
    let mut machine = scripted_machine([(10.0, 0.0)]);

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 100.0, 100.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 110.0, 100.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(20, [finger(0, 110.0, 100.0)]));
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(20, finger(0, 110.0, 100.0)));
    assert!(machine.is_frame_pending());

    machine.cancel_fling(&mut host);
    assert_eq!(machine.state(), GestureState::Idle);
    assert_eq!(host.cancelled, [FrameRequest(1)]);
    assert!(!machine.is_frame_pending());
}

#[test]
fn double_tap_scales_and_single_tap_reaches_listener() {
    let mut policy = inset(IntRect::new(0, 0, 400, 400), 100);
    policy.set_current_shape(IntRect::new(100, 100, 200, 200));
    let mut host = RecordingHost::default();
    let mut machine = GestureStateMachine::default();
    let taps = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&taps);
    machine.set_tap_listener(move |p| sink.borrow_mut().push(p));

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 150.0, 150.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(50, finger(0, 150.0, 150.0)));
    assert_eq!(*taps.borrow(), [Point::new(150.0, 150.0)]);

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(150, finger(0, 152.0, 150.0)));
    assert_eq!(policy.current_shape(), IntRect::new(90, 90, 210, 210));
    assert_eq!(host.redraws, 1);
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(200, finger(0, 152.0, 150.0)));
    assert_eq!(taps.borrow().len(), 1);

    machine.clear_tap_listener();
    machine.process_event(&mut policy, &mut host, &PointerEvent::down(1000, finger(0, 10.0, 10.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::up(1050, finger(0, 10.0, 10.0)));
    assert_eq!(taps.borrow().len(), 1);
}

#[test]
fn malformed_streams_are_ignored() {
    let mut policy = inset(IntRect::new(0, 0, 400, 400), 100);
    let mut host = RecordingHost::default();
    let mut machine = GestureStateMachine::new(GestureConfig::default());

    assert!(!machine.process_event(&mut policy, &mut host, &PointerEvent::moved(0, [])));

    machine.process_event(&mut policy, &mut host, &PointerEvent::down(0, finger(0, 50.0, 50.0)));
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(10, [finger(0, 70.0, 50.0)]));
    assert_eq!(machine.state(), GestureState::Dragging);

    // A move that does not mention the active pointer.
    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(20, [finger(9, 90.0, 50.0)]));
    // A pointer change naming an index that does not exist.
    machine.process_event(
        &mut policy,
        &mut host,
        &PointerEvent::pointer_up(30, 4, [finger(0, 70.0, 50.0)]),
    );
    assert_eq!(machine.state(), GestureState::Dragging);
    assert_eq!(policy.current_shape(), IntRect::new(0, 0, 100, 100));

    machine.process_event(&mut policy, &mut host, &PointerEvent::moved(40, [finger(0, 75.0, 50.0)]));
    assert_eq!(policy.current_shape(), IntRect::new(25, 0, 125, 100));
}
