use super::*;

fn l_shape() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ]
}

#[test]
fn cumulative_distance_over_l_shape() {
    let (cumulative, total) = build_cumulative_distance(&l_shape());
    assert_eq!(cumulative, vec![0.0, 10.0, 20.0]);
    assert_eq!(total, 20.0);
}

#[test]
fn cumulative_distance_degenerate_inputs() {
    assert_eq!(
        build_cumulative_distance(&[Point::new(3.0, 4.0)]),
        (vec![0.0], 0.0)
    );
    assert_eq!(build_cumulative_distance(&[]), (Vec::new(), 0.0));
}

#[test]
fn distance_to_percent_boundaries_and_midpoints() {
    let (cumulative, total) = build_cumulative_distance(&l_shape());
    assert_eq!(distance_to_percent(&cumulative, total, 0.0), 0.0);
    assert_eq!(distance_to_percent(&cumulative, total, total), 1.0);
    assert!((distance_to_percent(&cumulative, total, 10.0) - 0.5).abs() < 1e-9);
    assert!((distance_to_percent(&cumulative, total, 5.0) - 0.25).abs() < 1e-9);
    assert!((distance_to_percent(&cumulative, total, 15.0) - 0.75).abs() < 1e-9);
}

#[test]
fn distance_to_percent_clamps_out_of_range() {
    let (cumulative, total) = build_cumulative_distance(&l_shape());
    assert_eq!(distance_to_percent(&cumulative, total, -4.0), 0.0);
    assert_eq!(distance_to_percent(&cumulative, total, 99.0), 1.0);
    assert_eq!(distance_to_percent(&cumulative, total, f64::NAN), 0.0);
}

#[test]
fn distance_to_percent_is_exact_on_samples() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(3.0, 0.0),
        Point::new(3.0, 7.0),
        Point::new(0.0, 7.0),
    ];
    let (cumulative, total) = build_cumulative_distance(&points);
    assert_eq!(distance_to_percent(&cumulative, total, 3.0), 1.0 / 3.0);
    assert_eq!(distance_to_percent(&cumulative, total, 10.0), 2.0 / 3.0);
}

#[test]
fn distance_to_percent_uses_vertex_parameterization() {
    // Uneven segments: 2 then 8.
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(10.0, 0.0),
    ];
    let (cumulative, total) = build_cumulative_distance(&points);
    assert_eq!(distance_to_percent(&cumulative, total, 1.0), 0.25);
    assert_eq!(distance_to_percent(&cumulative, total, 6.0), 0.75);
}

#[test]
fn point_at_percent_inverts_distance_mapping() {
    let points = l_shape();
    let (cumulative, total) = build_cumulative_distance(&points);
    for d in [0.0, 4.0, 10.0, 13.5, 20.0] {
        let pct = distance_to_percent(&cumulative, total, d);
        let p = point_at_percent(&points, pct).unwrap();
        let expected = if d <= 10.0 {
            Point::new(d, 0.0)
        } else {
            Point::new(10.0, d - 10.0)
        };
        assert!((p - expected).hypot() < 1e-9, "d={d} p={p:?}");
    }
}

#[test]
fn point_at_percent_degenerate_inputs() {
    assert_eq!(point_at_percent(&[], 0.5), None);
    assert_eq!(
        point_at_percent(&[Point::new(1.0, 2.0)], 0.7),
        Some(Point::new(1.0, 2.0))
    );
}
