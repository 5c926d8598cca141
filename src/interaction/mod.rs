//! Pointer-driven focus readout.
//!
//! The visibility state machine is a pure function ([`next_visibility`]); the
//! [`FocusTracker`] applies it and repositions one indicator per quantity at
//! the sample nearest to the pointer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::unix_millis_to_datetime;
use crate::core::{DataPoint, Quantity, TimeScale, ValueScales, locate_index};
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FocusVisibility {
    #[default]
    Hidden,
    Visible,
}

/// Pointer input on the chart's interactive overlay, in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Enter,
    Leave,
    Move { x: f64, y: f64 },
}

/// Visibility transition for one pointer event.
#[must_use]
pub fn next_visibility(current: FocusVisibility, event: PointerEvent) -> FocusVisibility {
    match event {
        PointerEvent::Enter => FocusVisibility::Visible,
        PointerEvent::Leave => FocusVisibility::Hidden,
        PointerEvent::Move { .. } => current,
    }
}

/// Read-only chart state the tracker resolves pointer positions against.
#[derive(Debug, Clone, Copy)]
pub struct FocusContext<'a> {
    pub points: &'a [DataPoint],
    pub time_scale: TimeScale,
    pub value_scales: ValueScales,
}

/// Overlay marker for one quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusIndicator {
    pub quantity: Quantity,
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl FocusIndicator {
    fn hidden(quantity: Quantity) -> Self {
        Self {
            quantity,
            visible: false,
            x: 0.0,
            y: 0.0,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusTracker {
    visibility: FocusVisibility,
    cursor_x: f64,
    cursor_y: f64,
    focused_index: Option<usize>,
    indicators: [FocusIndicator; 3],
}

impl Default for FocusTracker {
    fn default() -> Self {
        Self {
            visibility: FocusVisibility::Hidden,
            cursor_x: 0.0,
            cursor_y: 0.0,
            focused_index: None,
            indicators: Quantity::ALL.map(FocusIndicator::hidden),
        }
    }
}

impl FocusTracker {
    #[must_use]
    pub fn visibility(&self) -> FocusVisibility {
        self.visibility
    }

    #[must_use]
    pub fn cursor(&self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    /// Index into the chart data of the currently focused sample.
    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    #[must_use]
    pub fn indicators(&self) -> &[FocusIndicator; 3] {
        &self.indicators
    }

    #[must_use]
    pub fn indicator(&self, quantity: Quantity) -> &FocusIndicator {
        let slot = Quantity::ALL
            .iter()
            .position(|candidate| *candidate == quantity)
            .unwrap_or_default();
        &self.indicators[slot]
    }

    /// Focused sample date as a UTC timestamp.
    pub fn focused_datetime(&self, points: &[DataPoint]) -> ChartResult<Option<DateTime<Utc>>> {
        self.focused_index
            .and_then(|index| points.get(index))
            .map(|point| unix_millis_to_datetime(point.date))
            .transpose()
    }

    /// Applies one pointer event.
    ///
    /// Repeated identical moves leave the tracker in the same state; the data
    /// behind `context` is only read.
    pub fn handle(&mut self, event: PointerEvent, context: &FocusContext<'_>) -> ChartResult<()> {
        self.visibility = next_visibility(self.visibility, event);
        let visible = self.visibility == FocusVisibility::Visible;
        for indicator in &mut self.indicators {
            indicator.visible = visible;
        }

        match event {
            PointerEvent::Move { x, y } if visible => self.focus_at(x, y, context),
            _ => Ok(()),
        }
    }

    pub fn on_pointer_enter(&mut self, context: &FocusContext<'_>) -> ChartResult<()> {
        self.handle(PointerEvent::Enter, context)
    }

    pub fn on_pointer_leave(&mut self, context: &FocusContext<'_>) -> ChartResult<()> {
        self.handle(PointerEvent::Leave, context)
    }

    pub fn on_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        context: &FocusContext<'_>,
    ) -> ChartResult<()> {
        self.handle(PointerEvent::Move { x, y }, context)
    }

    fn focus_at(&mut self, x: f64, y: f64, context: &FocusContext<'_>) -> ChartResult<()> {
        let query = context.time_scale.pixel_to_time(x)?;
        let index = locate_index(context.points, query)?;
        let point = &context.points[index];
        let point_x = context.time_scale.time_to_pixel(point.date)?;

        for indicator in &mut self.indicators {
            let value = indicator.quantity.value(point);
            indicator.x = point_x;
            indicator.y = context
                .value_scales
                .for_quantity(indicator.quantity)
                .value_to_pixel(value)?;
            indicator.text = format_focus_value(value);
        }

        self.cursor_x = x;
        self.cursor_y = y;
        self.focused_index = Some(index);
        trace!(pointer_x = x, query, index, "focus moved");
        Ok(())
    }
}

/// Readout text for a sample value, printed like a JavaScript number.
///
/// Integral values have no fractional part (`22`, `22.5`), negative zero
/// prints as `0`, and magnitudes below `1e-6` or from `1e21` up switch to
/// exponent form (`1e-7`, `1e+21`).
#[must_use]
pub fn format_focus_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }

    let magnitude = value.abs();
    if magnitude < 1e-6 || magnitude >= 1e21 {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }

    format!("{value}")
}
