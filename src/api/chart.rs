use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    DataPoint, LineSegment, Quantity, SeriesPath, TimeScale, ValueScales, project_series,
    validate_series,
};
use crate::error::ChartResult;
use crate::extensions::{
    ClipReveal, Marker, MarkerFrame, MarkerLayout, MarkerReveal, schedule_marker_reveals,
};
use crate::interaction::{FocusContext, FocusTracker, FocusVisibility, PointerEvent};
use crate::render::{CirclePrimitive, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::{ChartConfig, ChartLayout, Timeline, TimerHandle, TimerTask};

/// Identity of one chart build. Never reused within a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartId(pub u64);

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart#{}", self.0)
    }
}

/// One assembled chart and all of its mutable state.
///
/// Built once from a full dataset; redrawing with new data means building a
/// new chart. Marker reveal timers scheduled at build time are tracked here
/// and cancelled by [`Chart::teardown`].
#[derive(Debug, Clone)]
pub struct Chart {
    id: ChartId,
    config: ChartConfig,
    layout: ChartLayout,
    points: Vec<DataPoint>,
    time_scale: TimeScale,
    value_scales: ValueScales,
    series: Vec<SeriesPath>,
    focus: FocusTracker,
    reveals: Vec<MarkerReveal>,
    clip: ClipReveal,
    timers: Vec<TimerHandle>,
    torn_down: bool,
}

impl Chart {
    /// Assembles scales, series paths, focus overlay and marker schedule.
    ///
    /// `data` must be non-empty and sorted by date. Reveal timers are
    /// registered on `timeline` relative to its current time.
    pub fn build(
        id: ChartId,
        data: Vec<DataPoint>,
        markers: Vec<Marker>,
        config: ChartConfig,
        timeline: &mut Timeline,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        validate_series(&data)?;

        let layout = ChartLayout::new(config.surface, config.margin)?;
        let time_scale = TimeScale::from_data(&data, layout.plot_width())?;
        let value_scales =
            ValueScales::from_data(&data, layout.plot_height(), config.shared_scale)?;

        let series = Quantity::DRAW_ORDER
            .iter()
            .map(|quantity| {
                project_series(
                    &data,
                    time_scale,
                    value_scales.for_quantity(*quantity),
                    *quantity,
                )
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let reveals = markers
            .iter()
            .map(|marker| {
                MarkerLayout::resolve(*marker, time_scale, layout.plot_height(), config.markers)
                    .map(MarkerReveal::new)
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let schedule = schedule_marker_reveals(
            &markers,
            config.markers.base_delay_ms,
            config.markers.per_marker_delay_ms,
        )?;

        let now_ms = timeline.now_ms();
        let clip = ClipReveal::new(
            layout.plot_width(),
            now_ms,
            markers.len(),
            config.markers.clip_duration_per_marker_ms,
        );

        let mut timers = Vec::with_capacity(schedule.len());
        for slot in schedule {
            let task = TimerTask::RevealMarker {
                chart: id,
                marker_index: slot.marker_index,
            };
            match timeline.schedule(slot.offset_ms, task) {
                Ok(handle) => timers.push(handle),
                Err(err) => {
                    for handle in timers {
                        timeline.cancel(handle);
                    }
                    return Err(err);
                }
            }
        }

        debug!(
            %id,
            points = data.len(),
            markers = markers.len(),
            shared_scale = config.shared_scale,
            "chart built"
        );

        Ok(Self {
            id,
            config,
            layout,
            points: data,
            time_scale,
            value_scales,
            series,
            focus: FocusTracker::default(),
            reveals,
            clip,
            timers,
            torn_down: false,
        })
    }

    /// Cancels every outstanding reveal timer. Returns the number cancelled.
    ///
    /// After teardown the chart ignores timer callbacks.
    pub fn teardown(&mut self, timeline: &mut Timeline) -> usize {
        let cancelled = self
            .timers
            .drain(..)
            .filter(|handle| timeline.cancel(*handle))
            .count();
        self.torn_down = true;
        debug!(id = %self.id, cancelled, "chart torn down");
        cancelled
    }

    /// Handles a fired timer. Returns `true` when chart state changed.
    ///
    /// Tasks owned by another chart and tasks arriving after teardown are
    /// dropped.
    pub fn on_timer(&mut self, handle: TimerHandle, task: TimerTask, now_ms: f64) -> bool {
        if task.owner() != self.id || self.torn_down {
            warn!(id = %self.id, owner = %task.owner(), "dropping foreign or stale timer");
            return false;
        }
        self.timers.retain(|pending| *pending != handle);

        match task {
            TimerTask::RevealMarker { marker_index, .. } => {
                let Some(reveal) = self.reveals.get_mut(marker_index) else {
                    warn!(id = %self.id, marker_index, "reveal timer for unknown marker");
                    return false;
                };
                let started = reveal.start(now_ms);
                trace!(id = %self.id, marker_index, now_ms, started, "marker reveal");
                started
            }
        }
    }

    #[must_use]
    pub fn id(&self) -> ChartId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    #[must_use]
    pub fn value_scales(&self) -> ValueScales {
        self.value_scales
    }

    #[must_use]
    pub fn series(&self) -> &[SeriesPath] {
        &self.series
    }

    #[must_use]
    pub fn focus(&self) -> &FocusTracker {
        &self.focus
    }

    #[must_use]
    pub fn reveals(&self) -> &[MarkerReveal] {
        &self.reveals
    }

    #[must_use]
    pub fn pending_timers(&self) -> &[TimerHandle] {
        &self.timers
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Applies a pointer event given in plot-local pixels.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ChartResult<()> {
        let context = FocusContext {
            points: &self.points,
            time_scale: self.time_scale,
            value_scales: self.value_scales,
        };
        self.focus.handle(event, &context)
    }

    pub fn pointer_enter(&mut self) -> ChartResult<()> {
        self.handle_pointer(PointerEvent::Enter)
    }

    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.handle_pointer(PointerEvent::Leave)
    }

    /// Pointer move in surface pixels; the margin is removed before lookup.
    pub fn pointer_move(&mut self, surface_x: f64, surface_y: f64) -> ChartResult<()> {
        let (x, y) = self.layout.surface_to_plot(surface_x, surface_y);
        self.handle_pointer(PointerEvent::Move { x, y })
    }

    /// Current clip width of the plotted region.
    #[must_use]
    pub fn clip_width(&self, now_ms: f64) -> f64 {
        self.clip.width_at(now_ms)
    }

    #[must_use]
    pub fn clip_reveal(&self) -> ClipReveal {
        self.clip
    }

    /// Badges of every marker whose reveal has started, in input order.
    #[must_use]
    pub fn marker_frames(&self, now_ms: f64) -> Vec<MarkerFrame> {
        self.reveals
            .iter()
            .filter_map(|reveal| reveal.frame_at(now_ms, self.config.markers.reveal_duration_ms))
            .collect()
    }

    /// Materializes the scene at `now_ms` in surface pixels.
    pub fn render_frame(&self, now_ms: f64) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.layout.surface());
        self.push_series(&mut frame, now_ms);
        self.push_markers(&mut frame, now_ms);
        self.push_focus(&mut frame);
        frame.validate()?;
        Ok(frame)
    }

    fn push_series(&self, frame: &mut RenderFrame, now_ms: f64) {
        let style = self.config.style;
        let clip_width = self.clip_width(now_ms);
        for path in &self.series {
            let color = style.series_color(path.quantity);
            for segment in path.segments() {
                let Some(visible) = clip_segment(segment, clip_width) else {
                    continue;
                };
                let (x1, y1) = self.layout.plot_to_surface(visible.x1, visible.y1);
                let (x2, y2) = self.layout.plot_to_surface(visible.x2, visible.y2);
                frame
                    .lines
                    .push(LinePrimitive::new(x1, y1, x2, y2, style.series_line_width, color));
            }
        }
    }

    fn push_markers(&self, frame: &mut RenderFrame, now_ms: f64) {
        let style = self.config.style;
        for badge in self.marker_frames(now_ms) {
            let color = style.marker_color(badge.marker.kind).with_opacity(badge.opacity);
            let label_color = style.marker_label_color.with_opacity(badge.opacity);

            let (stem_x, stem_y1) = self
                .layout
                .plot_to_surface(badge.x + badge.stem.x, badge.y + badge.stem.y1);
            let (_, stem_y2) = self
                .layout
                .plot_to_surface(badge.x + badge.stem.x, badge.y + badge.stem.y2);
            frame.lines.push(LinePrimitive::new(
                stem_x,
                stem_y1,
                stem_x,
                stem_y2,
                style.marker_stem_width,
                color,
            ));

            let (cx, cy) = badge.center();
            let (cx, cy) = self.layout.plot_to_surface(cx, cy);
            frame
                .circles
                .push(CirclePrimitive::new(cx, cy, badge.radius, color));

            let (kx, ky) = badge.kind_label_anchor();
            let (kx, ky) = self.layout.plot_to_surface(kx, ky);
            frame.texts.push(TextPrimitive::new(
                badge.marker.kind.label(),
                kx,
                ky,
                style.marker_label_font_size_px,
                label_color,
                TextHAlign::Center,
            ));

            let (qx, qy) = badge.quantity_label_anchor();
            let (qx, qy) = self.layout.plot_to_surface(qx, qy);
            frame.texts.push(TextPrimitive::new(
                badge.marker.quantity_label(),
                qx,
                qy,
                style.marker_label_font_size_px,
                label_color,
                TextHAlign::Center,
            ));
        }
    }

    fn push_focus(&self, frame: &mut RenderFrame) {
        if self.focus.visibility() != FocusVisibility::Visible
            || self.focus.focused_index().is_none()
        {
            return;
        }

        let style = self.config.style;
        for indicator in self.focus.indicators() {
            let (x, y) = self.layout.plot_to_surface(indicator.x, indicator.y);
            frame.circles.push(CirclePrimitive::new(
                x,
                y,
                style.focus_indicator_radius_px,
                style.series_color(indicator.quantity),
            ));
            frame.texts.push(TextPrimitive::new(
                indicator.text.clone(),
                x + style.focus_label_offset_x_px,
                y + style.focus_label_offset_y_px,
                style.focus_label_font_size_px,
                style.focus_label_color,
                TextHAlign::Left,
            ));
        }
    }
}

/// Cuts a left-to-right segment at `clip_x`; `None` when nothing is visible.
fn clip_segment(segment: LineSegment, clip_x: f64) -> Option<LineSegment> {
    if clip_x <= segment.x1 {
        return None;
    }
    if segment.x2 <= clip_x {
        return Some(segment);
    }

    let t = (clip_x - segment.x1) / (segment.x2 - segment.x1);
    Some(LineSegment {
        x2: clip_x,
        y2: segment.y1 + (segment.y2 - segment.y1) * t,
        ..segment
    })
}

#[cfg(test)]
mod tests {
    use super::clip_segment;
    use crate::core::LineSegment;

    #[test]
    fn clip_segment_interpolates_cut_point() {
        let segment = LineSegment {
            x1: 0.0,
            y1: 100.0,
            x2: 10.0,
            y2: 0.0,
        };

        assert_eq!(clip_segment(segment, 0.0), None);
        assert_eq!(clip_segment(segment, 20.0), Some(segment));

        let cut = clip_segment(segment, 2.5).expect("partially visible");
        assert_eq!(cut.x2, 2.5);
        assert!((cut.y2 - 75.0).abs() <= 1e-9);
    }
}
