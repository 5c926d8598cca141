use proptest::prelude::*;
use sensor_chart::core::{DataPoint, locate_index};

fn sorted_points(mut dates: Vec<i32>) -> Vec<DataPoint> {
    dates.sort_unstable();
    dates
        .into_iter()
        .map(|date| DataPoint::new(f64::from(date), 0.0, 0.0, 0.0))
        .collect()
}

proptest! {
    #[test]
    fn locate_returns_nearest_with_earlier_tie_break(
        dates in prop::collection::vec(-10_000i32..10_000, 1..64),
        query_factor in 0.0f64..=1.0
    ) {
        let points = sorted_points(dates);
        let first = points[0].date;
        let last = points[points.len() - 1].date;
        // Half-unit steps keep every distance exactly representable.
        let query = ((first + query_factor * (last - first)) * 2.0).round() / 2.0;

        let index = locate_index(&points, query).expect("locate");
        let best = points
            .iter()
            .map(|point| (point.date - query).abs())
            .fold(f64::INFINITY, f64::min);
        let chosen = &points[index];

        prop_assert_eq!((chosen.date - query).abs(), best);
        prop_assert!(
            points
                .iter()
                .all(|point| (point.date - query).abs() != best || point.date >= chosen.date)
        );
    }

    #[test]
    fn locate_clamps_queries_outside_the_domain(
        dates in prop::collection::vec(-10_000i32..10_000, 1..64),
        overshoot in 1.0f64..1_000_000.0
    ) {
        let points = sorted_points(dates);
        let first = points[0].date;
        let last = points[points.len() - 1].date;

        prop_assert_eq!(locate_index(&points, first - overshoot).expect("before"), 0);
        prop_assert_eq!(
            locate_index(&points, last + overshoot).expect("after"),
            points.len() - 1
        );
    }
}
