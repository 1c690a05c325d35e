use assert_matches::assert_matches;
use disksweeper::{
    boundary, text, BoundaryEvent, CircleId, Error, LifecycleViolation, Policy, Radius, Sweeper,
};
use kurbo::Point;

fn records(points: &[(f64, f64)]) -> String {
    let events = boundary(points.iter().copied(), Radius::default()).unwrap();
    let mut buf = Vec::new();
    text::write_events(&mut buf, &events).unwrap();
    String::from_utf8(buf).unwrap()
}

fn close(p: Point, x: f64, y: f64) -> bool {
    (p.x - x).abs() < 1e-12 && (p.y - y).abs() < 1e-12
}

#[test]
fn two_overlapping_disks() {
    let events = boundary([(0.0, 0.0), (0.6, 0.0)], Radius::default()).unwrap();
    assert_eq!(events.len(), 2);

    // The later disk is listed first for the crossing to the left of the
    // vector between the centers.
    assert_matches!(events[0], BoundaryEvent::Crossing { a: CircleId(1), b: CircleId(0), point } if close(point, 0.3, -0.4));
    assert_matches!(events[1], BoundaryEvent::Crossing { a: CircleId(0), b: CircleId(1), point } if close(point, 0.3, 0.4));
}

#[test]
fn two_tangent_disks() {
    insta::assert_snapshot!(records(&[(0.0, 0.0), (2.0, 0.0)]), @r"
    0 0 0 0
    1 1 2 0
    ");
}

#[test]
fn chain_of_three() {
    let events = boundary([(0.0, 0.0), (0.6, 0.0), (1.2, 0.0)], Radius::default()).unwrap();
    assert_eq!(events.len(), 4);
    let owners: Vec<_> = events.iter().map(|ev| ev.owners()).collect();
    assert_eq!(
        owners,
        vec![
            (CircleId(1), CircleId(0)),
            (CircleId(0), CircleId(1)),
            (CircleId(2), CircleId(1)),
            (CircleId(1), CircleId(2)),
        ]
    );
}

#[test]
fn tight_triangle() {
    // Each inner crossing is covered by the third disk, so only the three
    // outer ones are on the boundary.
    let h = 0.2 * 3.0f64.sqrt() / 2.0;
    let events = boundary([(0.0, 0.0), (0.1, h), (0.2, 0.0)], Radius::default()).unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|ev| !ev.is_standalone()));

    let mut pairs: Vec<_> = events
        .iter()
        .map(|ev| {
            let (a, b) = ev.owners();
            (a.min(b), a.max(b))
        })
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            (CircleId(0), CircleId(1)),
            (CircleId(0), CircleId(2)),
            (CircleId(1), CircleId(2)),
        ]
    );
}

#[test]
fn fully_covered_crossings() {
    // A dense cluster: every pairwise crossing is inside some other disk,
    // except for those on the outer rim.
    let mut points = Vec::new();
    for i in 0..5 {
        for j in 0..5 {
            points.push((i as f64 * 0.1, j as f64 * 0.1));
        }
    }
    let events = boundary(points.iter().copied(), Radius::default()).unwrap();
    assert!(!events.is_empty());
    // Every emitted crossing lies on the rim: at distance at least R from
    // every center.
    for ev in &events {
        let p = ev.point();
        for &(x, y) in &points {
            assert!(p.distance(Point::new(x, y)) >= 0.5 - 1e-12);
        }
    }
}

#[test]
fn single_disk() {
    insta::assert_snapshot!(records(&[(0.25, -3.5)]), @"0 0 0.25 -3.5");
}

#[test]
fn empty_input() {
    assert_eq!(records(&[]), "");
}

#[test]
fn streaming_output_is_prompt() {
    // Events come out as soon as the frontier has passed them.
    let mut sweeper = Sweeper::default();
    let mut out = Vec::new();
    sweeper.begin();
    sweeper.push(0.0, 0.0, &mut |ev| out.push(ev)).unwrap();
    sweeper.push(0.6, 0.0, &mut |ev| out.push(ev)).unwrap();
    assert!(out.is_empty());

    // The crossings are at x = 0.3, so they're final once x - R > 0.3.
    sweeper.push(0.79, 5.0, &mut |ev| out.push(ev)).unwrap();
    assert_eq!(out.len(), 0);
    sweeper.push(0.81, 10.0, &mut |ev| out.push(ev)).unwrap();
    assert_eq!(out.len(), 2);

    // Disk 0 leaves the window once x - 2R > 0.
    sweeper.push(1.0, 15.0, &mut |ev| out.push(ev)).unwrap();
    assert_eq!(out.len(), 2);
    sweeper.push(1.01, 20.0, &mut |ev| out.push(ev)).unwrap();
    // Disks 0 and 1 overlapped, so neither is standalone, but disk 2 (at
    // x = 0.79) isn't out of the window yet.
    assert_eq!(out.len(), 2);

    sweeper.end(&mut |ev| out.push(ev)).unwrap();
    let standalone: Vec<_> = out
        .iter()
        .filter(|ev| ev.is_standalone())
        .map(|ev| ev.owners().0)
        .collect();
    assert_eq!(
        standalone,
        vec![CircleId(2), CircleId(3), CircleId(4), CircleId(5)]
    );
}

#[test]
fn drop_standalone() {
    let mut sweeper = Sweeper::default().with_policy(Policy::DropStandalone);
    let mut out = Vec::new();
    let mut sink = |ev| out.push(ev);
    sweeper.begin();
    sweeper.push(0.0, 0.0, &mut sink).unwrap();
    sweeper.push(5.0, 0.0, &mut sink).unwrap();
    sweeper.end(&mut sink).unwrap();
    assert!(out.is_empty());
}

#[test]
fn lifecycle_errors() {
    let mut sweeper = Sweeper::default();
    assert_eq!(
        sweeper.push(0.0, 0.0, &mut |_| {}),
        Err(Error::Lifecycle(LifecycleViolation::NotStarted))
    );
    sweeper.begin();
    sweeper.end(&mut |_| {}).unwrap();
    assert_eq!(
        sweeper.end(&mut |_| {}),
        Err(Error::Lifecycle(LifecycleViolation::Finished))
    );
}

#[test]
fn unsorted_and_degenerate_input() {
    assert_matches!(
        boundary([(1.0, 0.0), (0.5, 0.0)], Radius::default()),
        Err(Error::Unsorted { .. })
    );
    assert_matches!(
        boundary([(1.0, 0.0), (1.0, 0.0)], Radius::default()),
        Err(Error::DegenerateInput { existing: CircleId(0), .. })
    );
    assert_matches!(boundary([(0.0, f64::NAN)], Radius::default()), Err(Error::NaN));
}

#[test]
fn text_round_trip() {
    let centers = text::parse_centers("0 0\n0.6 0\n3 1\n").unwrap();
    let events = boundary(centers, Radius::default()).unwrap();
    let mut buf = Vec::new();
    text::write_events(&mut buf, &events).unwrap();
    let out = String::from_utf8(buf).unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "2 2 3 1");
    for (line, ev) in lines.iter().zip(&events) {
        let fields: Vec<&str> = line.split(' ').collect();
        assert_eq!(fields.len(), 4);
        let p = ev.point();
        assert_eq!(fields[2].parse::<f64>().unwrap(), p.x);
        assert_eq!(fields[3].parse::<f64>().unwrap(), p.y);
    }
}
