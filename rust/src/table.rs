//! Process table loading and validation.
//!
//! Input is one record per line, `name,arrival,burst`, no header. Lines that
//! do not split into exactly three comma-separated fields are skipped. Any
//! record that does split into three fields must be valid, otherwise the
//! whole table is rejected.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::models::{ProcessSpec, Ticks};

/// Errors that can occur while building the process table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Input not found: {}", .path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed record on line {line}: {field} {value:?} is not a valid {expected}")]
    MalformedRecord {
        line: usize,
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    /// `line` is the 1-based record position when the table is built from
    /// in-memory records.
    #[error("Duplicate process name {name:?} on line {line}")]
    DuplicateName { name: String, line: usize },
    #[error("Failed to read input at line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// The validated, read-only set of processes shared by every engine.
#[derive(Clone, Debug, Default)]
pub struct ProcessTable {
    processes: Vec<ProcessSpec>,
    names: FxHashSet<String>,
    /// Sum of all bursts so far
    total_burst: Ticks,
    latest_arrival: Ticks,
}

impl ProcessTable {
    /// Build a table from records already in memory.
    pub fn from_specs(specs: Vec<ProcessSpec>) -> Result<Self, TableError> {
        let mut table = Self {
            processes: Vec::with_capacity(specs.len()),
            names: FxHashSet::with_capacity_and_hasher(specs.len(), Default::default()),
            ..Self::default()
        };
        for (position, spec) in specs.into_iter().enumerate() {
            let line = position + 1;
            check_non_negative(line, "arrival", spec.arrival_time)?;
            check_positive(line, "burst", spec.burst_time)?;
            table.push(spec, line)?;
        }
        Ok(table)
    }

    /// Parse a table from comma-separated text.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, TableError> {
        let mut table = Self::default();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|source| TableError::Read {
                line: line_no,
                source,
            })?;

            let fields: Vec<&str> = line.split(',').collect();
            let [name, arrival, burst] = fields.as_slice() else {
                continue;
            };

            let arrival_time = parse_field(line_no, "arrival", arrival)?;
            check_non_negative(line_no, "arrival", arrival_time)?;
            let burst_time = parse_field(line_no, "burst", burst)?;
            check_positive(line_no, "burst", burst_time)?;

            table.push(ProcessSpec::new(*name, arrival_time, burst_time), line_no)?;
        }

        Ok(table)
    }

    /// Load a table from a file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::MissingInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(BufReader::new(file))
    }

    fn push(&mut self, spec: ProcessSpec, line: usize) -> Result<(), TableError> {
        if self.names.contains(&spec.name) {
            return Err(TableError::DuplicateName {
                name: spec.name,
                line,
            });
        }

        // Every completion time is bounded by the latest arrival plus all bursts
        let total_burst = self.total_burst.checked_add(spec.burst_time);
        let latest_arrival = self.latest_arrival.max(spec.arrival_time);
        let Some(total_burst) = total_burst else {
            return Err(out_of_range(line, "burst", spec.burst_time));
        };
        if latest_arrival.checked_add(total_burst).is_none() {
            let (field, value) = if spec.arrival_time == latest_arrival {
                ("arrival", spec.arrival_time)
            } else {
                ("burst", spec.burst_time)
            };
            return Err(out_of_range(line, field, value));
        }

        self.total_burst = total_burst;
        self.latest_arrival = latest_arrival;
        self.names.insert(spec.name.clone());
        self.processes.push(spec);
        Ok(())
    }

    /// Processes in input order.
    pub fn processes(&self) -> &[ProcessSpec] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

fn parse_field(line: usize, field: &'static str, raw: &str) -> Result<Ticks, TableError> {
    raw.trim()
        .parse::<Ticks>()
        .map_err(|_| TableError::MalformedRecord {
            line,
            field,
            value: raw.to_string(),
            expected: "integer",
        })
}

fn check_non_negative(line: usize, field: &'static str, value: Ticks) -> Result<(), TableError> {
    if value < 0 {
        return Err(TableError::MalformedRecord {
            line,
            field,
            value: value.to_string(),
            expected: "non-negative integer",
        });
    }
    Ok(())
}

fn out_of_range(line: usize, field: &'static str, value: Ticks) -> TableError {
    TableError::MalformedRecord {
        line,
        field,
        value: value.to_string(),
        expected: "time (the schedule would run past the largest tick)",
    }
}

fn check_positive(line: usize, field: &'static str, value: Ticks) -> Result<(), TableError> {
    if value <= 0 {
        return Err(TableError::MalformedRecord {
            line,
            field,
            value: value.to_string(),
            expected: "positive integer",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<ProcessTable, TableError> {
        ProcessTable::parse(Cursor::new(text))
    }

    #[test]
    fn test_parse_example() {
        let table = parse("A,0,5\nB,1,3\nC,2,8\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.processes()[1], ProcessSpec::new("B", 1, 3));
        assert_eq!(table.processes()[2].name, "C");
    }

    #[test]
    fn test_wrong_field_count_lines_skipped() {
        let table = parse("\nA,0,5\nheader only\nB,1\nC,2,8,extra\nD,3,1\n").unwrap();
        let names: Vec<&str> = table.processes().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "D"]);
    }

    #[test]
    fn test_crlf_and_padded_numbers() {
        let table = parse("A, 0 , 5\r\nB,1,3\r\n").unwrap();
        assert_eq!(table.processes()[0], ProcessSpec::new("A", 0, 5));
        assert_eq!(table.processes()[1], ProcessSpec::new("B", 1, 3));
    }

    #[test]
    fn test_unparseable_integer_fails_whole_table() {
        let err = parse("A,0,5\nB,one,3\nC,2,8\n").unwrap_err();
        match err {
            TableError::MalformedRecord {
                line, field, value, ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(field, "arrival");
                assert_eq!(value, "one");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_arrival_and_zero_burst_rejected() {
        assert!(matches!(
            parse("A,-1,5\n"),
            Err(TableError::MalformedRecord {
                field: "arrival",
                ..
            })
        ));
        assert!(matches!(
            parse("A,0,0\n"),
            Err(TableError::MalformedRecord { field: "burst", .. })
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = parse("A,0,5\nB,1,3\nA,2,8\n").unwrap_err();
        assert!(matches!(
            err,
            TableError::DuplicateName { ref name, line: 3 } if name == "A"
        ));
    }

    #[test]
    fn test_schedule_end_overflow_rejected() {
        let err = parse("A,9223372036854775807,1\n").unwrap_err();
        assert!(matches!(
            err,
            TableError::MalformedRecord {
                line: 1,
                field: "arrival",
                ..
            }
        ));

        let err = parse("A,0,9223372036854775807\nB,0,1\n").unwrap_err();
        assert!(matches!(
            err,
            TableError::MalformedRecord {
                line: 2,
                field: "burst",
                ..
            }
        ));

        // Both values fit alone, but the late arrival pushes the schedule end past the limit
        let err = parse("A,0,9223372036854775000\nB,1000,1\n").unwrap_err();
        assert!(matches!(
            err,
            TableError::MalformedRecord {
                line: 2,
                field: "arrival",
                ..
            }
        ));
    }

    #[test]
    fn test_largest_representable_schedule_accepted() {
        let table = parse("A,9223372036854775806,1\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_from_specs_validates() {
        let table = ProcessTable::from_specs(vec![
            ProcessSpec::new("A", 0, 5),
            ProcessSpec::new("B", 1, 3),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);

        let err = ProcessTable::from_specs(vec![ProcessSpec::new("A", 0, -2)]).unwrap_err();
        assert!(matches!(err, TableError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_missing_input() {
        let err = ProcessTable::load("/nonexistent/dir/TaskSpec.txt").unwrap_err();
        assert!(matches!(err, TableError::MissingInput { .. }));
        assert!(err.to_string().contains("TaskSpec.txt"));
    }

    #[test]
    fn test_empty_input() {
        let table = parse("").unwrap();
        assert!(table.is_empty());
    }
}
