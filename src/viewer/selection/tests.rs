use std::time::{Duration, Instant};

use crate::viewer::common::geometry::{Point, Rect};
use crate::viewer::selection::{DragOutcome, RegionSelector, SelectionState};

fn ms(base: Instant, millis: u64) -> Instant {
    base + Duration::from_millis(millis)
}

#[test]
fn test_click_without_movement_returns_to_idle() {
    let mut selector = RegionSelector::default();
    let t0 = Instant::now();

    assert!(selector.press(Point::new(10, 10), t0));
    assert_eq!(selector.state(), SelectionState::Selecting);

    assert_eq!(selector.release(Point::new(10, 10)), None);
    assert_eq!(selector.state(), SelectionState::Idle);
    assert_eq!(selector.crop_region(), None);
    assert_eq!(selector.committed(), None);
}

#[test]
fn test_movement_below_extent_on_one_axis_is_degenerate() {
    let mut selector = RegionSelector::default();
    selector.press(Point::new(10, 10), Instant::now());

    assert_eq!(selector.release(Point::new(200, 14)), None);
    assert_eq!(selector.state(), SelectionState::Idle);
}

#[test]
fn test_drags_are_debounced_and_release_commits() {
    let mut selector = RegionSelector::default();
    let t0 = Instant::now();
    selector.press(Point::new(0, 0), t0);

    // too soon after the press
    assert_eq!(selector.drag(Point::new(5, 5), ms(t0, 40)), DragOutcome::Ignored);

    let first = selector.drag(Point::new(20, 30), ms(t0, 120));
    assert_eq!(
        first,
        DragOutcome::PreviewRedraw(Rect { x0: 0, y0: 0, x1: 20, y1: 30 })
    );

    // within 100 ms of the last processed drag
    assert_eq!(selector.drag(Point::new(25, 35), ms(t0, 150)), DragOutcome::Ignored);
    assert_eq!(selector.drag(Point::new(27, 36), ms(t0, 210)), DragOutcome::Ignored);
    assert_eq!(selector.draft(), Some(Rect { x0: 0, y0: 0, x1: 20, y1: 30 }));

    let second = selector.drag(Point::new(40, 45), ms(t0, 220));
    assert_eq!(
        second,
        DragOutcome::PreviewRedraw(Rect { x0: 0, y0: 0, x1: 40, y1: 45 })
    );

    let committed = selector.release(Point::new(50, 50));
    assert_eq!(committed, Some(Rect { x0: 0, y0: 0, x1: 50, y1: 50 }));
    assert_eq!(selector.state(), SelectionState::Active);
    assert_eq!(selector.crop_region(), committed);
    assert_eq!(selector.draft(), None);
}

#[test]
fn test_reversed_gesture_is_normalized() {
    let mut selector = RegionSelector::default();
    selector.press(Point::new(80, 60), Instant::now());

    let rect = selector.release(Point::new(20, 10)).unwrap();

    assert_eq!(rect, Rect { x0: 20, y0: 10, x1: 80, y1: 60 });
}

#[test]
fn test_press_ignored_while_active() {
    let mut selector = RegionSelector::default();
    let t0 = Instant::now();
    selector.press(Point::new(0, 0), t0);
    selector.release(Point::new(30, 30));

    assert!(!selector.press(Point::new(5, 5), ms(t0, 500)));
    assert_eq!(selector.state(), SelectionState::Active);
    assert_eq!(selector.drag(Point::new(9, 9), ms(t0, 900)), DragOutcome::Ignored);
}

#[test]
fn test_zoom_toggles_are_idempotent() {
    let mut selector = RegionSelector::default();
    let rect = Rect { x0: 0, y0: 0, x1: 30, y1: 30 };
    selector.press(Point::new(0, 0), Instant::now());
    selector.release(Point::new(30, 30));

    selector.unset_zoom();
    selector.unset_zoom();
    assert_eq!(selector.state(), SelectionState::Idle);
    assert_eq!(selector.crop_region(), None);
    assert_eq!(selector.committed(), Some(rect));

    selector.set_zoom();
    selector.set_zoom();
    assert_eq!(selector.state(), SelectionState::Active);
    assert_eq!(selector.crop_region(), Some(rect));
}

#[test]
fn test_set_zoom_without_committed_rectangle_is_noop() {
    let mut selector = RegionSelector::default();
    selector.set_zoom();
    assert_eq!(selector.state(), SelectionState::Idle);
}

#[test]
fn test_degenerate_release_keeps_previous_rectangle() {
    let mut selector = RegionSelector::default();
    let t0 = Instant::now();
    selector.press(Point::new(0, 0), t0);
    let first = selector.release(Point::new(40, 40));
    selector.unset_zoom();

    selector.press(Point::new(10, 10), ms(t0, 300));
    assert_eq!(selector.release(Point::new(11, 11)), None);

    assert_eq!(selector.committed(), first);
    selector.set_zoom();
    assert_eq!(selector.crop_region(), first);
}

#[test]
fn test_clear_forgets_everything() {
    let mut selector = RegionSelector::default();
    selector.press(Point::new(0, 0), Instant::now());
    selector.release(Point::new(40, 40));

    selector.clear();

    assert_eq!(selector.state(), SelectionState::Idle);
    assert_eq!(selector.committed(), None);
    selector.set_zoom();
    assert_eq!(selector.state(), SelectionState::Idle);
}

#[test]
fn test_release_without_press_is_ignored() {
    let mut selector = RegionSelector::default();
    assert_eq!(selector.release(Point::new(50, 50)), None);
    assert_eq!(selector.state(), SelectionState::Idle);
}
