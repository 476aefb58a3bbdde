//! End-to-end session tests: multi-site runs, compositing windows,
//! staleness annotation, and checkpoint/resume.

use chrono::{DateTime, Duration, TimeZone, Utc};
use hail_index::{
    slice_by_window, Accumulator, Frame, Scan, Session, SessionConfig,
};
use radar_common::{CrsCode, GridSpec};
use test_utils::{codes_from_severities, create_hail_core_codes};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("hail_index=debug")
        .with_test_writer()
        .try_init();
}

fn target_9x9() -> GridSpec {
    GridSpec::new(9, 9, 1.0, -1.0, 0.0, 8.0, CrsCode::Epsg4326)
}

fn t(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 18, 21, minute, 0).unwrap()
}

/// A storm core moving one cell east per scan.
fn moving_storm_scans(steps: usize) -> Vec<Scan> {
    (0..steps)
        .map(|step| {
            let codes = create_hail_core_codes(9, 9, 2 + step, 4, 1);
            Scan::new(codes, target_9x9(), t(5 * step as u32), "KTLX").unwrap()
        })
        .collect()
}

#[test]
fn test_full_session_traces_a_swath() {
    init_tracing();

    let mut session = Session::new(target_9x9(), SessionConfig::default()).unwrap();
    let mut frames: Vec<Frame> = Vec::new();

    let summary = session.run(moving_storm_scans(5), &mut frames).unwrap();
    assert_eq!(summary.frames_emitted, 5);
    assert_eq!(summary.scans_skipped, 0);
    assert_eq!(frames.len(), 5);

    let last = frames.last().unwrap();

    // Every visited core cell accumulated severity; the swath spans
    // columns 2 through 6 on the storm row.
    for col in 2..=6 {
        assert!(
            last.cumulative.get(col, 4).unwrap() >= 3,
            "column {} missing from swath",
            col
        );
    }

    // Cells the storm never crossed stay zero
    assert_eq!(last.cumulative.get(0, 0), Some(0));
    assert_eq!(last.cumulative.get(8, 8), Some(0));

    // Cumulative totals never decrease frame to frame
    for pair in frames.windows(2) {
        assert!(pair[1].cumulative.total() >= pair[0].cumulative.total());
    }
}

#[test]
fn test_frames_pair_instantaneous_with_cumulative() {
    let mut session = Session::new(target_9x9(), SessionConfig::default()).unwrap();
    let mut frames: Vec<Frame> = Vec::new();

    session.run(moving_storm_scans(3), &mut frames).unwrap();

    // The instantaneous grid carries only this scan's severities while
    // the cumulative grid carries the whole history.
    let second = &frames[1];
    assert_eq!(second.instantaneous.get(1, 4), Some(0));
    assert!(second.cumulative.get(1, 4).unwrap() > 0);
    assert!(second.instantaneous.get(3, 4).unwrap() > 0);
}

#[test]
fn test_stale_cells_appear_after_storm_passes() {
    // Tight staleness horizon: one nominal interval
    let config = SessionConfig {
        nominal_scan_interval_secs: 300,
        stale_after_intervals: 1.0,
        composite_window_secs: 300,
    };
    let mut session = Session::new(target_9x9(), config).unwrap();

    // Storm sits at column 2, then goes quiet for three intervals
    let (active_codes, _, _) = codes_from_severities(&[
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 3, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
    ]);
    let quiet_codes = vec![0u8; 81];

    let scans = vec![
        Scan::new(active_codes, target_9x9(), t(0), "KTLX").unwrap(),
        Scan::new(quiet_codes.clone(), target_9x9(), t(5), "KTLX").unwrap(),
        Scan::new(quiet_codes.clone(), target_9x9(), t(10), "KTLX").unwrap(),
        Scan::new(quiet_codes, target_9x9(), t(15), "KTLX").unwrap(),
    ];

    let mut frames: Vec<Frame> = Vec::new();
    session.run(scans, &mut frames).unwrap();

    // While fresh, no staleness
    assert!(frames[0].stale_cells.is_empty());
    assert!(frames[1].stale_cells.is_empty());
    // Past the one-interval horizon the contributing cell is flagged
    let flat = 4 * 9 + 2;
    assert_eq!(frames[2].stale_cells, vec![flat]);
    assert_eq!(frames[3].stale_cells, vec![flat]);
}

#[test]
fn test_windowed_multi_site_compositing() {
    init_tracing();

    let target = target_9x9();
    let config = SessionConfig::default();
    let mut session = Session::new(target.clone(), config.clone()).unwrap();

    // Two sites observe the same cell in the same window with different
    // severities; a third scan lands in the next window.
    let mut site_a = vec![0u8; 81];
    site_a[4 * 9 + 4] = 10; // severity 1
    let mut site_b = vec![0u8; 81];
    site_b[4 * 9 + 4] = 12; // severity 3

    let scans = vec![
        Scan::new(site_a.clone(), target.clone(), t(0), "KTLX").unwrap(),
        Scan::new(site_b, target.clone(), t(2), "KFWS").unwrap(),
        Scan::new(site_a, target.clone(), t(6), "KTLX").unwrap(),
    ];

    let windows = slice_by_window(scans, config.composite_window()).unwrap();
    assert_eq!(windows.len(), 2);

    let mut frames = Vec::new();
    for (window, members) in &windows {
        let frame = session.process_window(members, window.start).unwrap();
        frames.push(frame);
    }

    // First window counts the stronger signature once, not both
    assert_eq!(frames[0].cumulative.get(4, 4), Some(3));
    // Second window adds the follow-up scan
    assert_eq!(frames[1].cumulative.get(4, 4), Some(4));
}

#[test]
fn test_checkpoint_resume_mid_session() {
    let scans = moving_storm_scans(6);
    let config = SessionConfig::default();

    // Uninterrupted session
    let mut full = Session::new(target_9x9(), config.clone()).unwrap();
    let mut full_frames: Vec<Frame> = Vec::new();
    full.run(scans.clone(), &mut full_frames).unwrap();

    // Interrupted after three scans, checkpointed through JSON, resumed
    let mut first = Session::new(target_9x9(), config.clone()).unwrap();
    let mut frames: Vec<Frame> = Vec::new();
    first
        .run(scans[..3].to_vec(), &mut frames)
        .unwrap();

    let json = serde_json::to_string(&first.accumulator().checkpoint()).unwrap();
    let restored = Accumulator::resume(serde_json::from_str(&json).unwrap()).unwrap();

    let mut resumed = Session::resume(target_9x9(), config, restored).unwrap();
    resumed.run(scans[3..].to_vec(), &mut frames).unwrap();

    assert_eq!(
        frames.last().unwrap().cumulative,
        full_frames.last().unwrap().cumulative
    );
}

#[test]
fn test_session_survives_irregular_cadence() {
    // Irregular intervals and a long gap; no interpolation, the
    // cumulative grid simply stops growing during the gap.
    let target = target_9x9();
    let mut session = Session::new(target.clone(), SessionConfig::default()).unwrap();
    let mut frames: Vec<Frame> = Vec::new();

    let make_scan = |minute: u32| {
        let codes = create_hail_core_codes(9, 9, 4, 4, 1);
        Scan::new(codes, target.clone(), t(minute), "KTLX").unwrap()
    };

    let scans = vec![make_scan(0), make_scan(3), make_scan(11), make_scan(40)];
    let summary = session.run(scans, &mut frames).unwrap();

    assert_eq!(summary.frames_emitted, 4);
    assert_eq!(frames.last().unwrap().cumulative.get(4, 4), Some(12));
}

#[test]
fn test_window_slicing_with_gap() {
    let target = target_9x9();
    let scans = vec![
        Scan::new(vec![0; 81], target.clone(), t(0), "KTLX").unwrap(),
        Scan::new(vec![0; 81], target.clone(), t(1), "KFWS").unwrap(),
        // 25-minute gap
        Scan::new(vec![0; 81], target, t(26), "KTLX").unwrap(),
    ];

    let windows = slice_by_window(scans, Duration::minutes(5)).unwrap();

    // Two populated windows; the empty ones in between are omitted
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].1.len(), 2);
    assert_eq!(windows[1].1.len(), 1);
    assert_eq!(windows[1].0.start, t(25));
}
