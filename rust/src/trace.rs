//! Rendering schedule reports as text.
//!
//! The legacy layout reproduces the historic output byte for byte, including
//! its per-algorithm differences (PSJF separates interval fields with tabs
//! and prints the average with two decimals, FCFS prints no per-process
//! waits, RR uses a comma after the name). The normalized layout drops those
//! differences.

use std::io::{self, Write};

use crate::config::TraceFormat;
use crate::models::{Algorithm, ScheduleReport};

/// Lines for one algorithm block.
///
/// `first` marks the first block of a trace; the normalized layout separates
/// blocks with a blank line.
pub fn render_block(report: &ScheduleReport, format: TraceFormat, first: bool) -> Vec<String> {
    match format {
        TraceFormat::Legacy => render_legacy(report),
        TraceFormat::Normalized => render_normalized(report, first),
    }
}

fn render_legacy(report: &ScheduleReport) -> Vec<String> {
    let algorithm = report.algorithm;
    let mut lines: Vec<String> = match algorithm {
        Algorithm::Fcfs => vec!["FCFS: ".to_string(), String::new()],
        Algorithm::Nsjf => vec![String::new(), "NSJF: ".to_string(), String::new()],
        Algorithm::Psjf => vec!["PSJF:".to_string()],
        Algorithm::RoundRobin => vec!["RR: ".to_string()],
    };

    let separator = if algorithm == Algorithm::Psjf { "\t" } else { "  " };
    for interval in &report.intervals {
        lines.push(format!(
            "{}{sep}{}{sep}{}",
            interval.name,
            interval.start,
            interval.end,
            sep = separator
        ));
    }

    let wait_separator = match algorithm {
        Algorithm::Fcfs => None,
        Algorithm::RoundRobin => Some(","),
        Algorithm::Nsjf | Algorithm::Psjf => Some(":"),
    };
    if let Some(sep) = wait_separator {
        for wait in &report.waiting_times {
            lines.push(format!("Waiting time {}{} {}", wait.name, sep, wait.value));
        }
    }

    lines.push(match algorithm {
        Algorithm::Psjf => format!(
            "Average Waiting Time: {}",
            two_decimal_average(report)
        ),
        _ => format!("Average Waiting Time: {}", single_precision_average(report)),
    });
    lines
}

fn render_normalized(report: &ScheduleReport, first: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.intervals.len() + report.waiting_times.len() + 3);
    if !first {
        lines.push(String::new());
    }
    lines.push(format!("{}:", report.algorithm.name()));
    for interval in &report.intervals {
        lines.push(format!(
            "{}  {}  {}",
            interval.name, interval.start, interval.end
        ));
    }
    for wait in &report.waiting_times {
        lines.push(format!("Waiting time {}: {}", wait.name, wait.value));
    }
    lines.push(format!(
        "Average Waiting Time: {}",
        two_decimal_average(report)
    ));
    lines
}

/// Average as a single-precision float, printed shortest round-trip.
fn single_precision_average(report: &ScheduleReport) -> f32 {
    if report.waiting_times.is_empty() {
        return 0.0;
    }
    report.total_waiting_time() as f32 / report.waiting_times.len() as f32
}

/// Average with exactly two decimals, halves rounded away from zero.
///
/// Worked out in integer hundredths from the exact total, so midpoints such
/// as 0.125 always print as 0.13.
fn two_decimal_average(report: &ScheduleReport) -> String {
    let count = report.waiting_times.len() as i128;
    if count == 0 {
        return "0.00".to_string();
    }
    let scaled = report.total_waiting_time() * 100;
    let hundredths = (scaled.abs() * 2 + count) / (2 * count);
    let sign = if scaled < 0 && hundredths != 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, hundredths / 100, hundredths % 100)
}

/// Writes report blocks to an output sink, one line at a time.
pub struct TraceWriter<W: Write> {
    out: W,
    format: TraceFormat,
    blocks_written: usize,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W, format: TraceFormat) -> Self {
        Self {
            out,
            format,
            blocks_written: 0,
        }
    }

    pub fn write_report(&mut self, report: &ScheduleReport) -> io::Result<()> {
        for line in render_block(report, self.format, self.blocks_written == 0) {
            writeln!(self.out, "{}", line)?;
        }
        self.blocks_written += 1;
        Ok(())
    }

    pub fn write_reports<'r>(
        &mut self,
        reports: impl IntoIterator<Item = &'r ScheduleReport>,
    ) -> io::Result<()> {
        for report in reports {
            self.write_report(report)?;
        }
        Ok(())
    }

    /// Flush and hand back the underlying sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Render a whole trace into a string.
pub fn render_trace(reports: &[ScheduleReport], format: TraceFormat) -> String {
    let mut out = String::new();
    for (i, report) in reports.iter().enumerate() {
        for line in render_block(report, format, i == 0) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}
