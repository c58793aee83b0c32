use std::cell::RefCell;
use std::rc::Rc;
use walk_pace::{
    haversine_distance_meters, DistanceAccumulator, ManualSource, Position, PositionSample,
    PositionSource, SampleFilter, SampleOutcome, TrackingSession, WalkLog,
};

/// A short loop around St James's Park, roughly 20 m between fixes.
fn park_loop() -> Vec<Position> {
    (0..40)
        .map(|i| {
            let angle = i as f64 / 40.0 * std::f64::consts::TAU;
            Position::new(51.5025 + 0.0012 * angle.sin(), -0.1340 + 0.0020 * angle.cos())
        })
        .collect()
}

fn subscribed_session(source: &ManualSource) -> (Rc<RefCell<TrackingSession>>, walk_pace::Subscription) {
    let session = Rc::new(RefCell::new(TrackingSession::new(SampleFilter::default())));
    let recorder = session.clone();
    let sub = source
        .subscribe(Box::new(move |sample: PositionSample| {
            recorder.borrow_mut().record(sample);
        }))
        .unwrap();
    (session, sub)
}

#[test]
fn synthetic_walk_matches_leg_sum() {
    let source = ManualSource::new();
    let (session, _sub) = subscribed_session(&source);

    session.borrow_mut().start(0.0);
    source.replay(park_loop().into_iter().map(PositionSample::from));

    let expected: f64 = park_loop()
        .windows(2)
        .map(|w| haversine_distance_meters(&w[0], &w[1]))
        .sum();
    let live = session.borrow().live_distance();
    assert!((live - expected).abs() < 1e-6);
    assert!(live > 500.0 && live < 1_000.0, "loop length {live}");
}

#[test]
fn fixes_outside_a_session_are_not_counted() {
    let source = ManualSource::new();
    let (session, _sub) = subscribed_session(&source);
    let path = park_loop();

    // fixes before start
    source.replay(path[..10].iter().copied().map(PositionSample::from));
    session.borrow_mut().start(0.0);
    source.replay(path[10..20].iter().copied().map(PositionSample::from));
    let summary = session.borrow_mut().stop(300_000.0).unwrap();
    // fixes after stop
    source.replay(path[20..].iter().copied().map(PositionSample::from));

    let expected: f64 = path[10..20]
        .windows(2)
        .map(|w| haversine_distance_meters(&w[0], &w[1]))
        .sum();
    assert!((summary.distance_meters - expected).abs() < 1e-6);
    assert_eq!(summary.walk_minutes, 5.0);
}

#[test]
fn noisy_fixes_are_dropped_mid_walk() {
    let mut session = TrackingSession::new(SampleFilter::default());
    session.start(0.0);

    let path = park_loop();
    let mut accepted = DistanceAccumulator::new();
    for (i, p) in path.iter().enumerate() {
        let sample = if i % 7 == 3 {
            // a wild fix far across town with poor accuracy
            PositionSample::new(51.55, -0.20).with_accuracy(800.0)
        } else {
            accepted.add_sample(*p);
            PositionSample::from(*p).with_accuracy(8.0)
        };
        let outcome = session.record(sample);
        if i % 7 == 3 {
            assert!(matches!(outcome, SampleOutcome::Rejected(_)));
        }
    }
    assert!((session.live_distance() - accepted.current_total()).abs() < 1e-6);
}

#[test]
fn totals_never_decrease_through_a_session() {
    let mut session = TrackingSession::new(SampleFilter::permissive());
    session.start(0.0);
    let mut previous = 0.0;
    for p in park_loop().into_iter().chain(park_loop().into_iter().rev()) {
        if let Some(total) = session.record(p.into()).total() {
            assert!(total >= previous);
            previous = total;
        }
    }
}

#[test]
fn walk_log_over_two_sessions() {
    let source = ManualSource::new();
    let (session, _sub) = subscribed_session(&source);
    let mut log = WalkLog::new();
    let path = park_loop();

    session.borrow_mut().start(0.0);
    source.replay(path[..21].iter().copied().map(PositionSample::from));
    assert!(log.record(session.borrow_mut().stop(600_000.0).unwrap()));

    session.borrow_mut().start(1_000_000.0);
    source.replay(path[20..].iter().copied().map(PositionSample::from));
    assert!(log.record(session.borrow_mut().stop(1_600_000.0).unwrap()));

    let whole: DistanceAccumulator = path.iter().copied().collect();
    assert!((log.total_distance_meters() - whole.current_total()).abs() < 1e-6);
    assert_eq!(log.total_walk_minutes(), 20.0);

    let pace = log.average_pace().unwrap();
    assert!((pace - 20.0 / (whole.current_total() / 1000.0)).abs() < 1e-9);
}
