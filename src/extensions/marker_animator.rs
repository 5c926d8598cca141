use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::extensions::markers::{Marker, MarkerFrame, MarkerLayout, lerp};

/// Reveal slot for one marker, relative to chart build time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReveal {
    pub marker_index: usize,
    pub offset_ms: f64,
}

/// Assigns marker `i` the offset `base_delay_ms + i * per_marker_delay_ms`.
///
/// Input order is preserved; markers are never re-sorted by date.
pub fn schedule_marker_reveals(
    markers: &[Marker],
    base_delay_ms: f64,
    per_marker_delay_ms: f64,
) -> ChartResult<Vec<ScheduledReveal>> {
    if !base_delay_ms.is_finite() || base_delay_ms < 0.0 {
        return Err(ChartError::InvalidData(
            "reveal base delay must be finite and >= 0".to_owned(),
        ));
    }
    if !per_marker_delay_ms.is_finite() || per_marker_delay_ms <= 0.0 {
        return Err(ChartError::InvalidData(
            "reveal per-marker delay must be finite and > 0".to_owned(),
        ));
    }

    Ok((0..markers.len())
        .map(|marker_index| ScheduledReveal {
            marker_index,
            offset_ms: base_delay_ms + marker_index as f64 * per_marker_delay_ms,
        })
        .collect())
}

/// Cubic in-out easing over `t` in `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        0.5 * t * t * t
    } else {
        let t = t - 2.0;
        0.5 * (t * t * t + 2.0)
    }
}

/// Eased progress of a transition `elapsed_ms` after its start.
///
/// A zero duration completes immediately.
#[must_use]
pub fn transition_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if elapsed_ms < 0.0 {
        return 0.0;
    }
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ease_cubic_in_out(elapsed_ms / duration_ms)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RevealPhase {
    /// Timer not yet fired; the badge is not on the surface.
    Pending,
    Revealing { started_at_ms: f64 },
}

/// Per-marker reveal state owned by a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerReveal {
    pub layout: MarkerLayout,
    pub phase: RevealPhase,
}

impl MarkerReveal {
    #[must_use]
    pub fn new(layout: MarkerLayout) -> Self {
        Self {
            layout,
            phase: RevealPhase::Pending,
        }
    }

    /// Starts the reveal transition. Returns `false` if it already started.
    pub fn start(&mut self, now_ms: f64) -> bool {
        match self.phase {
            RevealPhase::Pending => {
                self.phase = RevealPhase::Revealing {
                    started_at_ms: now_ms,
                };
                true
            }
            RevealPhase::Revealing { .. } => false,
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        matches!(self.phase, RevealPhase::Revealing { .. })
    }

    #[must_use]
    pub fn frame_at(&self, now_ms: f64, duration_ms: f64) -> Option<MarkerFrame> {
        match self.phase {
            RevealPhase::Pending => None,
            RevealPhase::Revealing { started_at_ms } => Some(
                self.layout
                    .sample(transition_progress(now_ms - started_at_ms, duration_ms)),
            ),
        }
    }
}

/// Slide-in of the plotted region: clip width grows from `0` to the plot width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipReveal {
    pub target_width: f64,
    pub started_at_ms: f64,
    pub duration_ms: f64,
}

impl ClipReveal {
    /// Duration scales with the marker count; zero markers reveal instantly.
    #[must_use]
    pub fn new(
        target_width: f64,
        started_at_ms: f64,
        marker_count: usize,
        per_marker_ms: f64,
    ) -> Self {
        Self {
            target_width,
            started_at_ms,
            duration_ms: per_marker_ms * marker_count as f64,
        }
    }

    #[must_use]
    pub fn width_at(self, now_ms: f64) -> f64 {
        let progress = transition_progress(now_ms - self.started_at_ms, self.duration_ms);
        lerp(0.0, self.target_width, progress)
    }

    #[must_use]
    pub fn is_complete(self, now_ms: f64) -> bool {
        now_ms - self.started_at_ms >= self.duration_ms
    }
}
