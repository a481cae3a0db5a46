//! Per-engine working state and timeline recording.

use crate::models::{Interval, ProcessSpec, Ticks, WaitingTime};

/// Mutable bookkeeping for one process during one engine run.
///
/// Engines build a fresh set from the shared, read-only `ProcessSpec`s and
/// drop it when the run ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingState {
    pub remaining_time: Ticks,
    pub wait_time: Ticks,
}

impl WorkingState {
    pub fn new(spec: &ProcessSpec) -> Self {
        Self {
            remaining_time: spec.burst_time,
            wait_time: 0,
        }
    }

    /// One working state per process, in input order.
    pub fn fresh_set(processes: &[ProcessSpec]) -> Vec<WorkingState> {
        processes.iter().map(WorkingState::new).collect()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Consume `ticks` of CPU time.
    pub fn execute(&mut self, ticks: Ticks) {
        debug_assert!(ticks > 0, "executed slice must be positive");
        debug_assert!(
            ticks <= self.remaining_time,
            "slice {} exceeds remaining time {}",
            ticks,
            self.remaining_time
        );
        self.remaining_time -= ticks;
    }

    pub fn accrue_wait(&mut self, ticks: Ticks) {
        debug_assert!(ticks >= 0);
        self.wait_time += ticks;
    }
}

/// Ordered record of execution intervals produced by an engine.
#[derive(Debug, Default)]
pub struct Timeline {
    intervals: Vec<Interval>,
}

impl Timeline {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            intervals: Vec::with_capacity(capacity),
        }
    }

    /// Append an interval as its own entry.
    pub fn push(&mut self, process: usize, spec: &ProcessSpec, start: Ticks, end: Ticks) {
        debug_assert!(start < end, "empty interval for {}", spec.name);
        debug_assert!(
            self.intervals.last().map_or(true, |last| last.end <= start),
            "interval for {} overlaps the previous one",
            spec.name
        );
        self.intervals.push(Interval {
            process,
            name: spec.name.clone(),
            start,
            end,
        });
    }

    /// Append an interval, merging it into the previous one when the same
    /// process simply keeps running.
    pub fn extend_or_push(&mut self, process: usize, spec: &ProcessSpec, start: Ticks, end: Ticks) {
        if let Some(last) = self.intervals.last_mut() {
            if last.process == process && last.end == start {
                last.end = end;
                return;
            }
        }
        self.push(process, spec, start, end);
    }

    pub fn into_intervals(self) -> Vec<Interval> {
        self.intervals
    }
}

/// Pair each process's final wait with its name, in the given order.
pub fn collect_waiting_times(
    processes: &[ProcessSpec],
    order: impl IntoIterator<Item = usize>,
    wait_of: impl Fn(usize) -> Ticks,
) -> Vec<WaitingTime> {
    order
        .into_iter()
        .map(|i| WaitingTime {
            name: processes[i].name.clone(),
            value: wait_of(i),
        })
        .collect()
}
