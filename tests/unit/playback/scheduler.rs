use super::*;
use std::time::Instant;

#[test]
fn start_rejects_empty_durations_and_double_start() {
    let mut scheduler = Scheduler::new();
    assert!(scheduler.start(Vec::new()).is_err());
    assert!(!scheduler.is_playing());

    scheduler.start(vec![50]).unwrap();
    assert!(scheduler.is_playing());
    assert!(matches!(
        scheduler.start(vec![50]),
        Err(StudioError::Guard(_))
    ));
    scheduler.stop();
}

#[test]
fn cursor_advances_through_all_indices_and_wraps() {
    let mut scheduler = Scheduler::new();
    scheduler.start(vec![2, 2, 2]).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut seen = [false; 3];
    let mut wrapped = false;
    let mut last = 0usize;
    while (!seen.iter().all(|s| *s) || !wrapped) && Instant::now() < deadline {
        let cursor = scheduler.cursor();
        assert!(cursor < 3);
        seen[cursor] = true;
        if cursor < last {
            wrapped = true;
        }
        last = cursor;
        thread::sleep(Duration::from_millis(1));
    }
    scheduler.stop();

    assert!(seen.iter().all(|s| *s));
    assert!(wrapped);
}

#[test]
fn stop_is_synchronous() {
    let mut scheduler = Scheduler::new();
    scheduler.start(vec![1, 1]).unwrap();
    thread::sleep(Duration::from_millis(10));

    scheduler.stop();
    assert!(!scheduler.is_playing());

    // No further cursor write may be observed once stop has returned.
    let frozen = scheduler.cursor();
    thread::sleep(Duration::from_millis(25));
    assert_eq!(scheduler.cursor(), frozen);
}

#[test]
fn stop_when_stopped_is_a_noop() {
    let mut scheduler = Scheduler::new();
    scheduler.stop();
    assert_eq!(scheduler.cursor(), 0);
}

#[test]
fn restart_after_stop_resets_the_cursor() {
    let mut scheduler = Scheduler::new();
    scheduler.start(vec![1000, 1000]).unwrap();
    scheduler.stop();

    scheduler.start(vec![1000]).unwrap();
    assert_eq!(scheduler.cursor(), 0);
    scheduler.stop();
}

#[test]
fn dropping_a_playing_scheduler_stops_the_worker() {
    let mut scheduler = Scheduler::new();
    scheduler.start(vec![1]).unwrap();
    drop(scheduler);
}
