use sensor_chart::telemetry::init_default_tracing;

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_helper_is_inert_without_feature() {
    assert!(!init_default_tracing());
}

#[cfg(feature = "telemetry")]
#[test]
fn tracing_helper_installs_subscriber_once() {
    let first = init_default_tracing();
    let second = init_default_tracing();

    assert!(!second, "global subscriber can only be installed once");
    let _ = first;
}
