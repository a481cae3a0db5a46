//! Non-preemptive shortest-job-first engine.

use crate::config::SimulationConfig;
use crate::models::{Algorithm, ProcessSpec, ScheduleReport, Ticks};
use crate::{log_changes, log_checks};

use super::state::{collect_waiting_times, Timeline};

pub struct NsjfScheduler<'a> {
    processes: &'a [ProcessSpec],
    verbosity: u8,
}

impl<'a> NsjfScheduler<'a> {
    pub fn new(processes: &'a [ProcessSpec], config: &SimulationConfig) -> Self {
        Self {
            processes,
            verbosity: config.verbosity,
        }
    }

    /// Candidate pool: every process, ordered by arrival then input position.
    ///
    /// This is also the order the waiting times are reported in.
    fn arrival_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.processes.len()).collect();
        order.sort_by_key(|&i| self.processes[i].arrival_time);
        order
    }

    /// Pick the shortest arrived candidate; ties go to the earliest pool entry.
    ///
    /// Returns the position within `pool`, not the process index.
    fn select(&self, pool: &[usize], current_time: Ticks) -> Option<usize> {
        pool.iter()
            .enumerate()
            .filter(|(_, &i)| self.processes[i].arrival_time <= current_time)
            .min_by_key(|&(pos, &i)| (self.processes[i].burst_time, pos))
            .map(|(pos, _)| pos)
    }

    pub fn schedule(&self) -> ScheduleReport {
        let order = self.arrival_order();
        let mut pool = order.clone();
        let mut waits: Vec<Ticks> = vec![0; self.processes.len()];
        let mut timeline = Timeline::with_capacity(self.processes.len());
        let mut current_time: Ticks = 0;

        while !pool.is_empty() {
            let pos = match self.select(&pool, current_time) {
                Some(pos) => pos,
                None => {
                    // Nothing has arrived yet: jump to the next arrival
                    let Some(next) = pool.iter().map(|&i| self.processes[i].arrival_time).min()
                    else {
                        break;
                    };
                    log_changes!(self.verbosity, "[NSJF] idle {}..{}", current_time, next);
                    current_time = next;
                    continue;
                }
            };

            let index = pool.remove(pos);
            let process = &self.processes[index];
            log_checks!(
                self.verbosity,
                "[NSJF] t={} picked {} (burst={}) from {} candidates",
                current_time,
                process.name,
                process.burst_time,
                pool.len() + 1
            );

            waits[index] = current_time - process.arrival_time;
            let end = current_time + process.burst_time;
            timeline.push(index, process, current_time, end);
            log_changes!(
                self.verbosity,
                "[NSJF] {} runs {}..{} (wait {})",
                process.name,
                current_time,
                end,
                waits[index]
            );
            current_time = end;
        }

        let waiting_times = collect_waiting_times(self.processes, order, |i| waits[i]);
        ScheduleReport::new(Algorithm::Nsjf, timeline.into_intervals(), waiting_times)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_processes(records: &[(&str, Ticks, Ticks)]) -> Vec<ProcessSpec> {
        records
            .iter()
            .map(|&(name, arrival, burst)| ProcessSpec::new(name, arrival, burst))
            .collect()
    }

    fn run(processes: &[ProcessSpec]) -> ScheduleReport {
        NsjfScheduler::new(processes, &SimulationConfig::default()).schedule()
    }

    fn spans(report: &ScheduleReport) -> Vec<(&str, Ticks, Ticks)> {
        report
            .intervals
            .iter()
            .map(|i| (i.name.as_str(), i.start, i.end))
            .collect()
    }

    #[test]
    fn test_example_schedule() {
        let processes = make_processes(&[("A", 0, 5), ("B", 1, 3), ("C", 2, 8)]);
        let report = run(&processes);

        assert_eq!(spans(&report), vec![("A", 0, 5), ("B", 5, 8), ("C", 8, 16)]);
        assert_eq!(report.waiting_time("A"), Some(0));
        assert_eq!(report.waiting_time("B"), Some(4));
        assert_eq!(report.waiting_time("C"), Some(6));
    }

    #[test]
    fn test_shortest_arrived_job_wins() {
        let processes = make_processes(&[("A", 0, 4), ("B", 1, 6), ("C", 2, 1), ("D", 3, 2)]);
        let report = run(&processes);

        // At t=4 B(6), C(1), D(2) are waiting; C then D then B
        assert_eq!(
            spans(&report),
            vec![("A", 0, 4), ("C", 4, 5), ("D", 5, 7), ("B", 7, 13)]
        );
        assert_eq!(report.waiting_time("B"), Some(6));
        assert_eq!(report.waiting_time("C"), Some(2));
        assert_eq!(report.waiting_time("D"), Some(2));
    }

    #[test]
    fn test_tie_goes_to_earliest_arrival_then_input_order() {
        let processes = make_processes(&[("late", 1, 3), ("X", 0, 1), ("Y", 0, 3), ("Z", 0, 3)]);
        let report = run(&processes);

        // At t=1 late, Y and Z all have burst 3; Y and Z arrived first, Y is listed first
        let names: Vec<&str> = report.intervals.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y", "Z", "late"]);
    }

    #[test]
    fn test_idle_jump_charges_no_wait() {
        let processes = make_processes(&[("A", 5, 2), ("B", 20, 1)]);
        let report = run(&processes);

        assert_eq!(spans(&report), vec![("A", 5, 7), ("B", 20, 21)]);
        assert_eq!(report.waiting_time("A"), Some(0));
        assert_eq!(report.waiting_time("B"), Some(0));
        assert_eq!(
            report.algorithm_metadata.get("idle_time").map(String::as_str),
            Some("18")
        );
    }

    #[test]
    fn test_waits_reported_in_arrival_order() {
        let processes = make_processes(&[("A", 4, 1), ("B", 0, 2), ("C", 2, 1)]);
        let report = run(&processes);

        let names: Vec<&str> = report.waiting_times.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_selected_burst_is_minimal_among_arrived() {
        let processes = make_processes(&[
            ("P1", 0, 7),
            ("P2", 2, 4),
            ("P3", 4, 1),
            ("P4", 5, 4),
            ("P5", 6, 2),
        ]);
        let report = run(&processes);

        let mut done: Vec<usize> = Vec::new();
        for interval in &report.intervals {
            let chosen = &processes[interval.process];
            for (i, other) in processes.iter().enumerate() {
                if i != interval.process
                    && !done.contains(&i)
                    && other.arrival_time <= interval.start
                {
                    assert!(chosen.burst_time <= other.burst_time);
                }
            }
            assert!(interval.start >= chosen.arrival_time);
            done.push(interval.process);
        }
    }
}
