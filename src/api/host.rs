use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};
use crate::extensions::Marker;
use crate::render::Renderer;

use super::{Chart, ChartConfig, ChartId, ChartInput, Timeline};

struct Container<R> {
    renderer: R,
    chart: Option<Chart>,
}

/// Event-loop side of the dashboard: named render containers, the shared
/// timer clock, and dispatch of pointer and timer events to mounted charts.
///
/// All methods take `&mut self`, so every chart mutation is serialized
/// through this owner.
pub struct ChartHost<R: Renderer> {
    containers: IndexMap<String, Container<R>>,
    timeline: Timeline,
    next_chart_id: u64,
}

impl<R: Renderer> Default for ChartHost<R> {
    fn default() -> Self {
        Self {
            containers: IndexMap::new(),
            timeline: Timeline::new(),
            next_chart_id: 1,
        }
    }
}

impl<R: Renderer> ChartHost<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a render target under `id`.
    pub fn add_container(&mut self, id: impl Into<String>, renderer: R) -> ChartResult<()> {
        let id = id.into();
        if self.containers.contains_key(&id) {
            return Err(ChartError::InvalidData(format!(
                "container `{id}` is already registered"
            )));
        }
        self.containers.insert(
            id,
            Container {
                renderer,
                chart: None,
            },
        );
        Ok(())
    }

    /// Unregisters a container, tearing down its chart, and returns its renderer.
    pub fn remove_container(&mut self, id: &str) -> ChartResult<R> {
        let mut container = self
            .containers
            .shift_remove(id)
            .ok_or_else(|| ChartError::MissingContainer { id: id.to_owned() })?;
        if let Some(chart) = container.chart.as_mut() {
            chart.teardown(&mut self.timeline);
        }
        Ok(container.renderer)
    }

    #[must_use]
    pub fn has_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    /// Container ids in registration order.
    pub fn container_ids(&self) -> impl Iterator<Item = &str> {
        self.containers.keys().map(String::as_str)
    }

    /// Builds a chart and mounts it into container `id`.
    ///
    /// A chart already mounted there is torn down once the new one builds
    /// successfully; a failed build leaves the previous chart in place.
    pub fn make_chart(
        &mut self,
        id: &str,
        data: Vec<DataPoint>,
        markers: Vec<Marker>,
        config: ChartConfig,
    ) -> ChartResult<ChartId> {
        if !self.containers.contains_key(id) {
            return Err(ChartError::MissingContainer { id: id.to_owned() });
        }

        let chart_id = ChartId(self.next_chart_id);
        let chart = Chart::build(chart_id, data, markers, config, &mut self.timeline)?;
        self.next_chart_id += 1;

        let container = self
            .containers
            .get_mut(id)
            .ok_or_else(|| ChartError::MissingContainer { id: id.to_owned() })?;
        if let Some(mut previous) = container.chart.replace(chart) {
            let cancelled = previous.teardown(&mut self.timeline);
            debug!(container = id, previous = %previous.id(), cancelled, "replaced chart");
        }
        Ok(chart_id)
    }

    /// [`ChartHost::make_chart`] for a parsed dashboard feed.
    pub fn make_chart_from_input(
        &mut self,
        id: &str,
        input: ChartInput,
        config: ChartConfig,
    ) -> ChartResult<ChartId> {
        self.make_chart(id, input.data, input.markers, config)
    }

    /// Cancels the mounted chart's outstanding timers and unmounts it.
    ///
    /// Returns the number of cancelled timers.
    pub fn teardown(&mut self, id: &str) -> ChartResult<usize> {
        let container = self.container_mut(id)?;
        let Some(mut chart) = container.chart.take() else {
            return Ok(0);
        };
        Ok(chart.teardown(&mut self.timeline))
    }

    #[must_use]
    pub fn chart(&self, id: &str) -> Option<&Chart> {
        self.containers.get(id)?.chart.as_ref()
    }

    #[must_use]
    pub fn renderer(&self, id: &str) -> Option<&R> {
        self.containers.get(id).map(|container| &container.renderer)
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.timeline.now_ms()
    }

    pub fn pointer_enter(&mut self, id: &str) -> ChartResult<()> {
        self.mounted_chart_mut(id)?.pointer_enter()
    }

    pub fn pointer_leave(&mut self, id: &str) -> ChartResult<()> {
        self.mounted_chart_mut(id)?.pointer_leave()
    }

    /// Pointer move in surface pixels of container `id`.
    pub fn pointer_move(&mut self, id: &str, x: f64, y: f64) -> ChartResult<()> {
        trace!(container = id, x, y, "pointer move");
        self.mounted_chart_mut(id)?.pointer_move(x, y)
    }

    pub fn advance_by(&mut self, delta_ms: f64) -> ChartResult<usize> {
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "time advance must be finite and >= 0".to_owned(),
            ));
        }
        self.advance_to(self.timeline.now_ms() + delta_ms)
    }

    /// Fires every timer due by `target_ms`, one at a time, and dispatches it
    /// to the chart that scheduled it. Returns the number of tasks applied.
    pub fn advance_to(&mut self, target_ms: f64) -> ChartResult<usize> {
        if !target_ms.is_finite() {
            return Err(ChartError::InvalidData(
                "timeline target must be finite".to_owned(),
            ));
        }

        let mut applied = 0;
        while let Some(fired) = self.timeline.pop_due(target_ms) {
            let now_ms = self.timeline.now_ms();
            let owner = fired.task.owner();
            let chart = self
                .containers
                .values_mut()
                .filter_map(|container| container.chart.as_mut())
                .find(|chart| chart.id() == owner);
            match chart {
                Some(chart) => {
                    if chart.on_timer(fired.handle, fired.task, now_ms) {
                        applied += 1;
                    }
                }
                None => warn!(%owner, "timer fired for an unmounted chart"),
            }
        }
        self.timeline.settle_at(target_ms)?;
        Ok(applied)
    }

    /// Renders the mounted chart of container `id` at the current time.
    pub fn render(&mut self, id: &str) -> ChartResult<()> {
        let now_ms = self.timeline.now_ms();
        let container = self.container_mut(id)?;
        let chart = container
            .chart
            .as_ref()
            .ok_or_else(|| ChartError::UnknownChart { id: id.to_owned() })?;
        let frame = chart.render_frame(now_ms)?;
        container.renderer.render(&frame)
    }

    fn container_mut(&mut self, id: &str) -> ChartResult<&mut Container<R>> {
        self.containers
            .get_mut(id)
            .ok_or_else(|| ChartError::MissingContainer { id: id.to_owned() })
    }

    fn mounted_chart_mut(&mut self, id: &str) -> ChartResult<&mut Chart> {
        self.container_mut(id)?
            .chart
            .as_mut()
            .ok_or_else(|| ChartError::UnknownChart { id: id.to_owned() })
    }
}
