use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ChartId;

/// Work item carried by a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerTask {
    RevealMarker { chart: ChartId, marker_index: usize },
}

impl TimerTask {
    #[must_use]
    pub fn owner(self) -> ChartId {
        match self {
            Self::RevealMarker { chart, .. } => chart,
        }
    }
}

/// Cancellation handle returned by [`Timeline::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle {
    deadline: OrderedFloat<f64>,
    sequence: u64,
}

impl TimerHandle {
    #[must_use]
    pub fn deadline_ms(self) -> f64 {
        self.deadline.into_inner()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub task: TimerTask,
}

/// Virtual millisecond clock with deadline-ordered timers.
///
/// Timers fire in deadline order; equal deadlines fire in scheduling order.
#[derive(Debug, Default)]
pub struct Timeline {
    now_ms: f64,
    next_sequence: u64,
    pending: BTreeMap<TimerHandle, TimerTask>,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    #[must_use]
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.pending.keys().next().map(|handle| handle.deadline_ms())
    }

    /// Schedules `task` to fire `delay_ms` after the current time.
    pub fn schedule(&mut self, delay_ms: f64, task: TimerTask) -> ChartResult<TimerHandle> {
        if !delay_ms.is_finite() || delay_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "timer delay must be finite and >= 0".to_owned(),
            ));
        }

        let handle = TimerHandle {
            deadline: OrderedFloat(self.now_ms + delay_ms),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.pending.insert(handle, task);
        Ok(handle)
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Removes the earliest timer due at or before `until_ms` and moves the
    /// clock to its deadline.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<FiredTimer> {
        let (&handle, _) = self.pending.first_key_value()?;
        if handle.deadline_ms() > until_ms {
            return None;
        }

        let task = self.pending.remove(&handle)?;
        self.now_ms = self.now_ms.max(handle.deadline_ms());
        Some(FiredTimer { handle, task })
    }

    /// Moves the clock forward to `target_ms` without firing anything.
    ///
    /// Callers drain [`Timeline::pop_due`] first; the clock never moves back.
    pub fn settle_at(&mut self, target_ms: f64) -> ChartResult<()> {
        if !target_ms.is_finite() {
            return Err(ChartError::InvalidData(
                "timeline target must be finite".to_owned(),
            ));
        }
        self.now_ms = self.now_ms.max(target_ms);
        Ok(())
    }

    /// Fires every timer due by `target_ms` in order and advances the clock.
    pub fn advance_to(&mut self, target_ms: f64) -> ChartResult<Vec<FiredTimer>> {
        if !target_ms.is_finite() {
            return Err(ChartError::InvalidData(
                "timeline target must be finite".to_owned(),
            ));
        }

        let mut fired = Vec::new();
        while let Some(timer) = self.pop_due(target_ms) {
            fired.push(timer);
        }
        self.settle_at(target_ms)?;
        Ok(fired)
    }
}
