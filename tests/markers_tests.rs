use approx::assert_abs_diff_eq;
use sensor_chart::core::TimeScale;
use sensor_chart::extensions::{
    ClipReveal, Marker, MarkerAnimationConfig, MarkerKind, MarkerLayout, MarkerReveal,
    RevealPhase, ease_cubic_in_out, schedule_marker_reveals, transition_progress,
};

const PLOT_HEIGHT: f64 = 440.0;

fn time_scale() -> TimeScale {
    TimeScale::new(0.0, 10.0, 940.0).expect("time scale")
}

#[test]
fn reveals_follow_base_plus_step_offsets() {
    let markers = vec![
        Marker::new(1.0, MarkerKind::Auto, 100),
        Marker::new(2.0, MarkerKind::Manual, 200),
        Marker::new(3.0, MarkerKind::Auto, 300),
    ];

    let schedule = schedule_marker_reveals(&markers, 1000.0, 500.0).expect("schedule");
    let offsets: Vec<f64> = schedule.iter().map(|slot| slot.offset_ms).collect();

    assert_eq!(offsets, vec![1000.0, 1500.0, 2000.0]);
}

#[test]
fn schedule_keeps_input_order_for_unsorted_dates() {
    let markers = vec![
        Marker::new(9.0, MarkerKind::Auto, 100),
        Marker::new(1.0, MarkerKind::Manual, 200),
    ];

    let schedule = schedule_marker_reveals(&markers, 0.0, 250.0).expect("schedule");

    assert_eq!(schedule[0].marker_index, 0);
    assert_eq!(schedule[1].marker_index, 1);
    assert!(schedule[0].offset_ms < schedule[1].offset_ms);
}

#[test]
fn schedule_rejects_non_increasing_step() {
    let markers = vec![Marker::new(1.0, MarkerKind::Auto, 1)];
    assert!(schedule_marker_reveals(&markers, 1000.0, 0.0).is_err());
    assert!(schedule_marker_reveals(&markers, -1.0, 500.0).is_err());
}

#[test]
fn empty_marker_list_schedules_nothing() {
    let schedule = schedule_marker_reveals(&[], 1000.0, 500.0).expect("schedule");
    assert!(schedule.is_empty());
}

#[test]
fn quantity_label_divides_by_hundred() {
    assert_eq!(Marker::new(0.0, MarkerKind::Auto, 250).quantity_label(), "2.5mL");
    assert_eq!(Marker::new(0.0, MarkerKind::Auto, 300).quantity_label(), "3mL");
    assert_eq!(Marker::new(0.0, MarkerKind::Auto, 5).quantity_label(), "0.05mL");
    assert_eq!(Marker::new(0.0, MarkerKind::Manual, 0).quantity_label(), "0mL");
}

#[test]
fn layout_anchors_badge_to_marker_date() {
    let config = MarkerAnimationConfig::default();
    let marker = Marker::new(5.0, MarkerKind::Manual, 250);

    let layout = MarkerLayout::resolve(marker, time_scale(), PLOT_HEIGHT, config).expect("layout");

    assert_eq!(layout.x, 470.0 - 32.0 - 3.0);
    assert_eq!(layout.y_start, PLOT_HEIGHT - 32.0 - 3.0);
    assert_eq!(layout.y_end, 160.0 + 32.0 - 3.0);
    assert_eq!(layout.stem_start.y1, 35.0);
    assert_eq!(layout.stem_start.y2, 35.0);
    assert_eq!(layout.stem_end.y1, PLOT_HEIGHT - 189.0);
    assert_eq!(layout.stem_end.y2, 64.0);
}

#[test]
fn manual_and_auto_settle_in_distinct_fixed_lanes() {
    let config = MarkerAnimationConfig::default();
    let lane = |date: f64, kind: MarkerKind| {
        MarkerLayout::resolve(Marker::new(date, kind, 100), time_scale(), PLOT_HEIGHT, config)
            .expect("layout")
            .y_end
    };

    let manual_left = lane(0.5, MarkerKind::Manual);
    let manual_right = lane(9.5, MarkerKind::Manual);
    let auto_left = lane(0.5, MarkerKind::Auto);
    let auto_right = lane(9.5, MarkerKind::Auto);

    assert_eq!(manual_left, manual_right);
    assert_eq!(auto_left, auto_right);
    assert_ne!(manual_left, auto_left);
}

#[test]
fn sample_interpolates_position_opacity_and_stem() {
    let config = MarkerAnimationConfig::default();
    let layout = MarkerLayout::resolve(
        Marker::new(5.0, MarkerKind::Auto, 100),
        time_scale(),
        PLOT_HEIGHT,
        config,
    )
    .expect("layout");

    let start = layout.sample(0.0);
    assert_eq!(start.opacity, 0.0);
    assert_eq!(start.y, layout.y_start);
    assert_eq!(start.stem, layout.stem_start);

    let end = layout.sample(1.0);
    assert_eq!(end.opacity, 1.0);
    assert_eq!(end.y, layout.y_end);
    assert_eq!(end.stem, layout.stem_end);

    let middle = layout.sample(0.5);
    assert_abs_diff_eq!(middle.y, (layout.y_start + layout.y_end) / 2.0);
    assert_eq!(middle.x, layout.x);
}

#[test]
fn easing_is_symmetric_and_bounded() {
    assert_eq!(ease_cubic_in_out(0.0), 0.0);
    assert_eq!(ease_cubic_in_out(0.5), 0.5);
    assert_eq!(ease_cubic_in_out(1.0), 1.0);
    assert_abs_diff_eq!(
        ease_cubic_in_out(0.25) + ease_cubic_in_out(0.75),
        1.0,
        epsilon = 1e-12
    );
    assert_eq!(ease_cubic_in_out(-1.0), 0.0);
    assert_eq!(ease_cubic_in_out(2.0), 1.0);
}

#[test]
fn zero_duration_transitions_complete_immediately() {
    assert_eq!(transition_progress(0.0, 0.0), 1.0);
    assert_eq!(transition_progress(-5.0, 1000.0), 0.0);
    assert_eq!(transition_progress(1000.0, 1000.0), 1.0);
}

#[test]
fn reveal_frame_exists_only_after_start() {
    let layout = MarkerLayout::resolve(
        Marker::new(5.0, MarkerKind::Manual, 100),
        time_scale(),
        PLOT_HEIGHT,
        MarkerAnimationConfig::default(),
    )
    .expect("layout");
    let mut reveal = MarkerReveal::new(layout);

    assert_eq!(reveal.frame_at(5_000.0, 1000.0), None);
    assert!(reveal.start(1_000.0));
    assert!(!reveal.start(2_000.0));
    assert_eq!(
        reveal.phase,
        RevealPhase::Revealing {
            started_at_ms: 1_000.0
        }
    );

    let halfway = reveal.frame_at(1_500.0, 1000.0).expect("frame");
    assert_eq!(halfway.opacity, 0.5);
    let settled = reveal.frame_at(9_000.0, 1000.0).expect("frame");
    assert_eq!(settled.y, reveal.layout.y_end);
}

#[test]
fn clip_reveal_duration_scales_with_marker_count() {
    let clip = ClipReveal::new(940.0, 0.0, 3, 1000.0);

    assert_eq!(clip.duration_ms, 3000.0);
    assert_eq!(clip.width_at(0.0), 0.0);
    assert_eq!(clip.width_at(1500.0), 470.0);
    assert_eq!(clip.width_at(3000.0), 940.0);
    assert!(!clip.is_complete(2999.0));
    assert!(clip.is_complete(3000.0));
}

#[test]
fn clip_reveal_without_markers_is_immediate() {
    let clip = ClipReveal::new(940.0, 250.0, 0, 1000.0);

    assert_eq!(clip.duration_ms, 0.0);
    assert_eq!(clip.width_at(250.0), 940.0);
}

#[test]
fn config_validation_rejects_colliding_lanes() {
    let config = MarkerAnimationConfig {
        manual_lane_px: 80.0,
        ..MarkerAnimationConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(MarkerAnimationConfig::default().validate().is_ok());
}
