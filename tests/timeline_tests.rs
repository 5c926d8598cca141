use sensor_chart::api::{ChartId, Timeline, TimerTask};

fn reveal(chart: u64, marker_index: usize) -> TimerTask {
    TimerTask::RevealMarker {
        chart: ChartId(chart),
        marker_index,
    }
}

#[test]
fn timers_fire_in_deadline_order() {
    let mut timeline = Timeline::new();
    timeline.schedule(300.0, reveal(1, 2)).expect("schedule");
    timeline.schedule(100.0, reveal(1, 0)).expect("schedule");
    timeline.schedule(200.0, reveal(1, 1)).expect("schedule");

    let fired = timeline.advance_to(1_000.0).expect("advance");
    let order: Vec<TimerTask> = fired.iter().map(|timer| timer.task).collect();

    assert_eq!(order, vec![reveal(1, 0), reveal(1, 1), reveal(1, 2)]);
    assert_eq!(timeline.now_ms(), 1_000.0);
    assert_eq!(timeline.pending_count(), 0);
}

#[test]
fn equal_deadlines_fire_in_registration_order() {
    let mut timeline = Timeline::new();
    timeline.schedule(500.0, reveal(2, 0)).expect("schedule");
    timeline.schedule(500.0, reveal(1, 0)).expect("schedule");
    timeline.schedule(500.0, reveal(3, 0)).expect("schedule");

    let fired = timeline.advance_to(500.0).expect("advance");
    let owners: Vec<ChartId> = fired.iter().map(|timer| timer.task.owner()).collect();

    assert_eq!(owners, vec![ChartId(2), ChartId(1), ChartId(3)]);
}

#[test]
fn timers_not_yet_due_stay_pending() {
    let mut timeline = Timeline::new();
    let early = timeline.schedule(100.0, reveal(1, 0)).expect("schedule");
    let late = timeline.schedule(900.0, reveal(1, 1)).expect("schedule");

    let fired = timeline.advance_to(500.0).expect("advance");

    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].handle, early);
    assert!(timeline.is_pending(late));
    assert_eq!(timeline.next_deadline_ms(), Some(900.0));
}

#[test]
fn cancelled_timers_never_fire() {
    let mut timeline = Timeline::new();
    let handle = timeline.schedule(100.0, reveal(1, 0)).expect("schedule");

    assert!(timeline.cancel(handle));
    assert!(!timeline.cancel(handle));
    assert!(timeline.advance_to(1_000.0).expect("advance").is_empty());
}

#[test]
fn delays_are_relative_to_current_time() {
    let mut timeline = Timeline::new();
    timeline.advance_to(2_000.0).expect("advance");

    let handle = timeline.schedule(250.0, reveal(1, 0)).expect("schedule");

    assert_eq!(handle.deadline_ms(), 2_250.0);
}

#[test]
fn pop_due_moves_clock_to_each_deadline() {
    let mut timeline = Timeline::new();
    timeline.schedule(100.0, reveal(1, 0)).expect("schedule");
    timeline.schedule(400.0, reveal(1, 1)).expect("schedule");

    assert!(timeline.pop_due(1_000.0).is_some());
    assert_eq!(timeline.now_ms(), 100.0);
    assert!(timeline.pop_due(1_000.0).is_some());
    assert_eq!(timeline.now_ms(), 400.0);
    assert!(timeline.pop_due(1_000.0).is_none());
}

#[test]
fn invalid_delays_are_rejected() {
    let mut timeline = Timeline::new();
    assert!(timeline.schedule(-1.0, reveal(1, 0)).is_err());
    assert!(timeline.schedule(f64::NAN, reveal(1, 0)).is_err());
    assert!(timeline.advance_to(f64::INFINITY).is_err());
}

#[test]
fn clock_never_moves_backwards() {
    let mut timeline = Timeline::new();
    timeline.advance_to(1_000.0).expect("advance");
    timeline.advance_to(10.0).expect("advance");

    assert_eq!(timeline.now_ms(), 1_000.0);
}
