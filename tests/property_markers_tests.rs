use proptest::prelude::*;
use sensor_chart::core::TimeScale;
use sensor_chart::extensions::{
    Marker, MarkerAnimationConfig, MarkerKind, MarkerLayout, schedule_marker_reveals,
};

fn kind_strategy() -> impl Strategy<Value = MarkerKind> {
    prop_oneof![Just(MarkerKind::Auto), Just(MarkerKind::Manual)]
}

proptest! {
    #[test]
    fn reveal_offsets_are_strictly_increasing(
        dates in prop::collection::vec(-1_000.0f64..1_000.0, 0..40),
        base in 0.0f64..5_000.0,
        step in 1.0f64..2_000.0
    ) {
        let markers: Vec<Marker> = dates
            .iter()
            .map(|date| Marker::new(*date, MarkerKind::Auto, 100))
            .collect();

        let schedule = schedule_marker_reveals(&markers, base, step).expect("schedule");
        prop_assert_eq!(schedule.len(), markers.len());
        for (i, slot) in schedule.iter().enumerate() {
            prop_assert_eq!(slot.marker_index, i);
            prop_assert_eq!(slot.offset_ms, base + i as f64 * step);
        }
        for pair in schedule.windows(2) {
            prop_assert!(pair[0].offset_ms < pair[1].offset_ms);
        }
    }

    #[test]
    fn resting_lane_depends_only_on_kind(
        date in 0.0f64..10.0,
        quantity in 0i64..100_000,
        kind in kind_strategy()
    ) {
        let config = MarkerAnimationConfig::default();
        let time_scale = TimeScale::new(0.0, 10.0, 940.0).expect("time scale");
        let layout = MarkerLayout::resolve(
            Marker::new(date, kind, quantity),
            time_scale,
            440.0,
            config,
        )
        .expect("layout");

        let expected = config.lane_px(kind) + config.badge_radius_px - config.badge_inset_px;
        prop_assert_eq!(layout.y_end, expected);
        prop_assert_eq!(layout.sample(1.0).y, expected);
    }
}
