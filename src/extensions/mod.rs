//! Irrigation marker badges and their timed reveal.

pub mod marker_animator;
pub mod markers;

pub use marker_animator::{
    ClipReveal, MarkerReveal, RevealPhase, ScheduledReveal, ease_cubic_in_out,
    schedule_marker_reveals, transition_progress,
};
pub use markers::{
    Marker, MarkerAnimationConfig, MarkerFrame, MarkerKind, MarkerLayout, StemGeometry,
};
