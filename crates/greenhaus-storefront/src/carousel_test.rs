use std::time::Duration;

use super::*;

fn images(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("/images/{i}.jpg")).collect()
}

fn carousel(n: usize) -> (Carousel, Instant) {
    let t0 = Instant::now();
    (Carousel::new(images(n), CarouselConfig::default(), t0), t0)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn go_to_next_twice_within_delay_advances_once() {
    let (mut c, t0) = carousel(3);

    assert!(c.go_to_next(t0));
    assert!(!c.go_to_next(t0 + ms(10)));

    c.poll(t0 + ms(50));
    assert_eq!(c.active_index(), 1);
    assert!(!c.is_transitioning());

    c.poll(t0 + ms(200));
    assert_eq!(c.active_index(), 1);
}

#[test]
fn advance_waits_for_transition_delay() {
    let (mut c, t0) = carousel(3);
    c.go_to_next(t0);

    c.poll(t0 + ms(49));
    assert_eq!(c.active_index(), 0);
    assert!(c.is_transitioning());
    assert_eq!(c.direction(), Some(Direction::Next));

    c.poll(t0 + ms(50));
    assert_eq!(c.active_index(), 1);
}

#[test]
fn go_to_index_current_is_a_no_op() {
    let (mut c, t0) = carousel(3);
    let before = c.snapshot();

    assert!(!c.go_to_index(0, t0));
    assert_eq!(c.snapshot(), before);
    assert_eq!(c.direction(), None);
    assert!(c.is_auto_playing());
}

#[test]
fn go_to_previous_wraps_to_last_item() {
    let (mut c, t0) = carousel(3);

    assert!(c.go_to_previous(t0));
    assert_eq!(c.direction(), Some(Direction::Prev));
    c.poll(t0 + ms(50));

    assert_eq!(c.active_index(), 2);
}

#[test]
fn go_to_next_wraps_to_first_item() {
    let (mut c, t0) = carousel(2);
    c.go_to_next(t0);
    c.poll(t0 + ms(50));
    c.go_to_next(t0 + ms(100));
    c.poll(t0 + ms(150));

    assert_eq!(c.active_index(), 0);
}

#[test]
fn go_to_index_infers_direction_by_comparison() {
    let (mut c, t0) = carousel(5);

    assert!(c.go_to_index(4, t0));
    assert_eq!(c.direction(), Some(Direction::Next));
    c.poll(t0 + ms(50));
    assert_eq!(c.active_index(), 4);

    assert!(c.go_to_index(1, t0 + ms(100)));
    assert_eq!(c.direction(), Some(Direction::Prev));
    c.poll(t0 + ms(150));
    assert_eq!(c.active_index(), 1);
}

#[test]
fn navigation_is_ignored_with_one_or_no_items() {
    for n in [0, 1] {
        let (mut c, t0) = carousel(n);
        assert!(!c.go_to_next(t0));
        assert!(!c.go_to_previous(t0));
        assert!(!c.is_transitioning());
        c.poll(t0 + Duration::from_secs(30));
        assert_eq!(c.active_index(), 0);
    }
}

#[test]
fn out_of_range_index_resets_to_idle() {
    let (mut c, t0) = carousel(3);

    assert!(!c.go_to_index(7, t0));
    assert!(!c.is_transitioning());
    assert!(!c.is_image_loading());
    assert_eq!(c.active_index(), 0);

    // The carousel still navigates afterwards.
    assert!(c.go_to_next(t0 + ms(1)));
}

#[test]
fn transition_captures_previous_image_and_loading_flag() {
    let (mut c, t0) = carousel(3);
    c.go_to_next(t0);

    assert_eq!(c.previous_image(), Some("/images/0.jpg"));
    assert!(c.is_image_loading());

    c.poll(t0 + ms(50));
    assert_eq!(c.current_image(), Some("/images/1.jpg"));
    assert!(c.is_image_loading());

    c.image_loaded();
    assert!(!c.is_image_loading());

    c.go_to_next(t0 + ms(100));
    c.image_failed();
    assert!(!c.is_image_loading());
}

#[test]
fn manual_navigation_suspends_autoplay_for_cooldown() {
    let (mut c, t0) = carousel(3);
    assert!(c.is_auto_playing());

    c.go_to_next(t0);
    assert!(!c.is_auto_playing());
    c.poll(t0 + ms(50));

    c.poll(t0 + Duration::from_secs(9));
    assert!(!c.is_auto_playing());
    assert_eq!(c.active_index(), 1);

    c.poll(t0 + Duration::from_secs(10));
    assert!(c.is_auto_playing());

    // First automatic advance one interval after resuming.
    c.poll(t0 + Duration::from_secs(15));
    assert!(c.is_transitioning());
    assert!(c.is_auto_playing());
    c.poll(t0 + Duration::from_secs(15) + ms(50));
    assert_eq!(c.active_index(), 2);
}

#[test]
fn later_navigation_replaces_pending_resume() {
    let (mut c, t0) = carousel(3);

    c.go_to_next(t0);
    c.poll(t0 + ms(50));
    c.go_to_next(t0 + Duration::from_secs(5));
    c.poll(t0 + Duration::from_secs(5) + ms(50));

    c.poll(t0 + Duration::from_secs(10));
    assert!(!c.is_auto_playing(), "first cooldown must not resume autoplay");

    c.poll(t0 + Duration::from_secs(15));
    assert!(c.is_auto_playing());
}

#[test]
fn autoplay_advances_on_interval() {
    let (mut c, t0) = carousel(3);

    assert_eq!(c.next_deadline(), Some(t0 + Duration::from_secs(5)));
    c.poll(t0 + Duration::from_secs(5));
    assert!(c.is_transitioning());
    assert_eq!(c.direction(), Some(Direction::Next));
    c.poll(t0 + Duration::from_secs(5) + ms(50));

    assert_eq!(c.active_index(), 1);
    assert!(c.is_auto_playing());
}

#[test]
fn disabling_autoplay_cancels_timers() {
    let (mut c, t0) = carousel(3);
    c.go_to_next(t0);
    c.set_autoplay(false, t0);
    c.poll(t0 + ms(50));

    assert_eq!(c.next_deadline(), None);
    c.poll(t0 + Duration::from_secs(60));
    assert!(!c.is_auto_playing());
    assert_eq!(c.active_index(), 1);

    c.set_autoplay(true, t0 + Duration::from_secs(60));
    assert!(c.is_auto_playing());
    assert_eq!(
        c.next_deadline(),
        Some(t0 + Duration::from_secs(65))
    );
}

#[test]
fn next_deadline_prefers_pending_advance() {
    let (mut c, t0) = carousel(3);
    c.go_to_next(t0);

    assert_eq!(c.next_deadline(), Some(t0 + ms(50)));
    c.poll(t0 + ms(50));
    assert_eq!(c.next_deadline(), Some(t0 + Duration::from_secs(10)));
}

#[test]
fn set_items_resets_to_first_item() {
    let (mut c, t0) = carousel(4);
    c.go_to_index(3, t0);
    c.poll(t0 + ms(50));
    c.go_to_next(t0 + ms(100));

    c.set_items(images(2), t0 + ms(120));
    assert_eq!(c.active_index(), 0);
    assert!(!c.is_transitioning());
    assert_eq!(c.direction(), None);
    assert_eq!(c.previous_image(), None);

    // The cancelled advance never fires.
    c.poll(t0 + ms(500));
    assert_eq!(c.active_index(), 0);
}

#[test]
fn small_pointer_moves_are_not_swipes() {
    let (mut c, _) = carousel(3);
    c.pointer_down(100.0);
    c.pointer_move(95.0);

    assert!(!c.swipe().is_swiping);
    assert!(!c.swipe().has_moved);
    assert!(c.drag_offset().abs() < f64::EPSILON);
}

#[test]
fn swipe_tracks_live_offset_and_resets_on_leave() {
    let (mut c, t0) = carousel(3);
    c.pointer_down(200.0);
    c.pointer_move(150.0);

    assert!(c.swipe().is_swiping);
    assert!((c.drag_offset() + 50.0).abs() < f64::EPSILON);

    c.pointer_move(40.0);
    c.pointer_leave();
    assert!(!c.swipe().is_swiping);
    assert!(c.swipe().has_moved);
    assert!(c.swipe().distance.abs() < f64::EPSILON);
    assert!(!c.is_transitioning(), "leaving never navigates");

    // Move events after release are ignored.
    c.pointer_move(0.0);
    assert!(!c.swipe().is_swiping);
    assert_eq!(c.pointer_up(t0), None);
}

#[test]
fn releasing_past_threshold_navigates() {
    let (mut c, t0) = carousel(3);

    c.pointer_down(300.0);
    c.pointer_move(210.0);
    assert_eq!(c.pointer_up(t0), Some(Direction::Next));
    c.poll(t0 + ms(50));
    assert_eq!(c.active_index(), 1);

    c.pointer_down(100.0);
    c.pointer_move(190.0);
    assert_eq!(c.pointer_up(t0 + ms(100)), Some(Direction::Prev));
    c.poll(t0 + ms(150));
    assert_eq!(c.active_index(), 0);
}

#[test]
fn releasing_within_threshold_does_not_navigate() {
    let (mut c, t0) = carousel(3);
    c.pointer_down(100.0);
    c.pointer_move(20.0);

    assert_eq!(c.pointer_up(t0), None);
    assert!(!c.is_transitioning());
    assert!(!c.swipe().is_swiping);
}

#[test]
fn swipe_during_transition_is_dropped() {
    let (mut c, t0) = carousel(3);
    c.go_to_next(t0);

    c.pointer_down(300.0);
    c.pointer_move(100.0);
    assert_eq!(c.pointer_up(t0 + ms(10)), None);

    c.poll(t0 + ms(50));
    assert_eq!(c.active_index(), 1);
}
