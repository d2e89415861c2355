use super::*;

fn range(start: usize, end: usize) -> CharRange {
    CharRange { start, end }
}

fn pacing(interval_secs: f64) -> RevealPacing {
    RevealPacing {
        interval_secs,
        start_delay_secs: 0.0,
    }
}

#[test]
fn base_pacing_reveals_one_after_another() {
    let schedule = TimelineBuilder::new(4, pacing(0.5)).finalize().unwrap();
    assert_eq!(schedule.reveal_times(), &[0.0, 0.5, 1.0, 1.5]);
    assert_eq!(schedule.duration(), 2.0);
}

#[test]
fn start_delay_offsets_everything() {
    let p = RevealPacing {
        interval_secs: 1.0,
        start_delay_secs: 2.0,
    };
    let schedule = TimelineBuilder::new(2, p).finalize().unwrap();
    assert_eq!(schedule.reveal_times(), &[2.0, 3.0]);
}

#[test]
fn every_index_gets_exactly_one_time() {
    let mut b = TimelineBuilder::new(10, pacing(0.1));
    b.delay(range(2, 5), 1.0)
        .group(range(4, 8))
        .speed(range(0, 10), 2.0)
        .pause(3, 0.25);
    let schedule = b.finalize().unwrap();
    assert_eq!(schedule.len(), 10);
    for i in 0..10 {
        assert!(schedule.reveal_time(i).unwrap().is_finite());
    }
    assert_eq!(schedule.reveal_time(10), None);
}

#[test]
fn overlapping_rules_resolve_last_writer_wins() {
    let mut b = TimelineBuilder::new(6, pacing(1.0));
    b.delay(range(0, 4), 10.0);
    b.reveal_at(range(2, 6), 0.5);
    let schedule = b.finalize().unwrap();
    assert_eq!(schedule.reveal_times(), &[10.0, 11.0, 0.5, 0.5, 0.5, 0.5]);
}

#[test]
fn group_reveals_at_first_paced_time() {
    let mut b = TimelineBuilder::new(5, pacing(1.0));
    b.group(range(1, 4));
    let schedule = b.finalize().unwrap();
    assert_eq!(schedule.reveal_times(), &[0.0, 1.0, 1.0, 1.0, 4.0]);
}

#[test]
fn pauses_accumulate_and_shift_later_characters() {
    let mut b = TimelineBuilder::new(3, pacing(1.0));
    b.pause(1, 0.5).pause(1, 0.25).pause(3, 2.0);
    let schedule = b.finalize().unwrap();
    assert_eq!(schedule.reveal_times(), &[0.0, 1.75, 2.75]);
    assert_eq!(schedule.duration(), 5.75);
}

#[test]
fn speed_changes_intervals_in_range() {
    let mut b = TimelineBuilder::new(4, pacing(1.0));
    b.speed(range(0, 2), 4.0);
    let schedule = b.finalize().unwrap();
    assert_eq!(schedule.reveal_times(), &[0.0, 0.25, 0.5, 1.5]);
}

#[test]
fn out_of_bounds_range_fails_at_finalize() {
    let n = 4;
    let mut b = TimelineBuilder::new(n, pacing(0.1));
    b.delay(range(n - 1, n + 5), 1.0);
    assert_eq!(
        b.finalize().unwrap_err(),
        TimelineError::RangeOutOfBounds {
            range: range(3, 9),
            char_count: 4,
        }
    );

    let mut b = TimelineBuilder::new(n, pacing(0.1));
    b.pause(5, 1.0);
    assert!(matches!(
        b.finalize(),
        Err(TimelineError::PauseOutOfBounds { index: 5, .. })
    ));
}

#[test]
fn inverted_range_fails_at_finalize() {
    let mut b = TimelineBuilder::new(4, pacing(0.1));
    b.group(range(3, 1));
    assert_eq!(
        b.finalize().unwrap_err(),
        TimelineError::InvertedRange { range: range(3, 1) }
    );
}

#[test]
fn repeated_pause_at_one_index_adds_up() {
    let mut b = TimelineBuilder::new(2, pacing(1.0));
    b.pause(1, 0.4).pause(1, 0.4);
    let schedule = b.finalize().unwrap();
    assert_eq!(schedule.reveal_times(), &[0.0, 1.8]);
}

#[test]
fn invalid_values_fail_at_finalize() {
    let mut b = TimelineBuilder::new(2, pacing(0.1));
    b.speed(range(0, 1), 0.0);
    assert!(matches!(
        b.finalize(),
        Err(TimelineError::InvalidValue { what: "speed factor", .. })
    ));

    let mut b = TimelineBuilder::new(2, pacing(0.1));
    b.delay(range(0, 1), f64::NAN);
    assert!(b.finalize().is_err());

    assert!(TimelineBuilder::new(1, pacing(-1.0)).finalize().is_err());
}

#[test]
fn hoist_moves_tail_ahead_of_subtree_requests() {
    let mut b = TimelineBuilder::new(3, pacing(1.0));
    let mark = b.mark();
    b.reveal_at(range(0, 3), 5.0); // recorded by a descendant
    let tail = b.mark();
    b.reveal_at(range(0, 3), 1.0); // recorded by the enclosing tag
    b.hoist(mark, tail);
    // The enclosing tag now comes first, so the descendant wins.
    let schedule = b.finalize().unwrap();
    assert_eq!(schedule.reveal_times(), &[5.0, 5.0, 5.0]);
}

#[test]
fn schedule_reports_elapsed_and_reveal_state() {
    let schedule = TimelineBuilder::new(2, pacing(1.0)).finalize().unwrap();
    assert_eq!(schedule.char_elapsed(1, 0.25), Some(-0.75));
    assert!(!schedule.is_revealed(1, 0.25));
    assert!(schedule.is_revealed(1, 1.0));
    assert!(!schedule.is_revealed(7, 100.0));
}

#[test]
fn empty_timeline_finalizes() {
    let schedule = TimelineBuilder::new(0, pacing(1.0)).finalize().unwrap();
    assert!(schedule.is_empty());
    assert_eq!(schedule.duration(), 0.0);
}
