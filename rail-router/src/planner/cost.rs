//! Service frequency table and edge cost lookup.
//!
//! Travelling one stop along a line costs the line's service interval for
//! the current time of day. Changing lines at an interchange costs a fixed
//! penalty, also per time of day. Some lines do not run at all during some
//! buckets.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;

use crate::domain::{LineCode, TimeOfDay};

/// Key name for the line-change penalty in serialized tables.
pub const LINE_CHANGE: &str = "LINE_CHANGE";

/// Errors from building or querying a cost table.
#[derive(Debug, thiserror::Error)]
pub enum CostError {
    /// The table has no entry for a line or the line-change penalty during a
    /// time-of-day bucket. This is a configuration defect, not a user error.
    #[error("cost table has no {time_of_day} entry for {key}")]
    MissingEntry { time_of_day: TimeOfDay, key: CostKey },

    /// A table key is neither a line code nor LINE_CHANGE.
    #[error("invalid cost table key {0:?}")]
    InvalidKey(String),

    /// Failed to read a table file.
    #[error("failed to read cost table: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a table file.
    #[error("failed to parse cost table: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a cost table entry is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostKey {
    /// Travelling one stop along a line.
    Line(LineCode),
    /// Changing lines at an interchange.
    LineChange,
}

impl CostKey {
    fn parse(s: &str) -> Result<Self, CostError> {
        if s == LINE_CHANGE {
            return Ok(CostKey::LineChange);
        }
        LineCode::parse(s)
            .map(CostKey::Line)
            .map_err(|_| CostError::InvalidKey(s.to_string()))
    }
}

impl fmt::Display for CostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostKey::Line(line) => write!(f, "line {}", line),
            CostKey::LineChange => f.write_str("line change"),
        }
    }
}

/// Time taken by one hop, or the fact that the hop cannot be made now.
///
/// Serialized as a positive number of minutes, or `null` for not running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Option<u32>")]
pub enum Interval {
    /// The hop takes this many minutes.
    Minutes(u32),
    /// The line does not operate during this bucket.
    NotRunning,
}

impl Interval {
    /// The hop's duration, or `None` if it cannot be made.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Interval::Minutes(mins) => Some(Duration::minutes(i64::from(*mins))),
            Interval::NotRunning => None,
        }
    }
}

impl TryFrom<Option<u32>> for Interval {
    type Error = String;

    fn try_from(value: Option<u32>) -> Result<Self, Self::Error> {
        match value {
            Some(0) => Err("interval must be a positive number of minutes".to_string()),
            Some(mins) => Ok(Interval::Minutes(mins)),
            None => Ok(Interval::NotRunning),
        }
    }
}

/// Per-bucket service intervals for each line, plus the line-change penalty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostTable {
    entries: HashMap<TimeOfDay, HashMap<CostKey, Interval>>,
}

impl CostTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Set the interval for a line during a bucket.
    pub fn with_line(mut self, time_of_day: TimeOfDay, line: LineCode, interval: Interval) -> Self {
        self.insert(time_of_day, CostKey::Line(line), interval);
        self
    }

    /// Set the line-change penalty during a bucket.
    pub fn with_line_change(mut self, time_of_day: TimeOfDay, interval: Interval) -> Self {
        self.insert(time_of_day, CostKey::LineChange, interval);
        self
    }

    fn insert(&mut self, time_of_day: TimeOfDay, key: CostKey, interval: Interval) {
        self.entries
            .entry(time_of_day)
            .or_default()
            .insert(key, interval);
    }

    /// Look up an entry.
    pub fn get(&self, time_of_day: TimeOfDay, key: CostKey) -> Result<Interval, CostError> {
        self.entries
            .get(&time_of_day)
            .and_then(|bucket| bucket.get(&key))
            .copied()
            .ok_or(CostError::MissingEntry { time_of_day, key })
    }

    /// Check that every given line, and the line-change penalty, has an entry
    /// for every bucket.
    pub fn check_covers<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a LineCode>,
    ) -> Result<(), CostError> {
        let keys: Vec<CostKey> = lines
            .into_iter()
            .map(|line| CostKey::Line(*line))
            .chain(std::iter::once(CostKey::LineChange))
            .collect();

        for time_of_day in TimeOfDay::ALL {
            for key in &keys {
                self.get(time_of_day, *key)?;
            }
        }
        Ok(())
    }

    /// Parse a table from JSON of the form
    /// `{"PEAK": {"NE": 12, "LINE_CHANGE": 15}, "NONPEAK": {"CG": null, ...}, ...}`.
    ///
    /// Buckets are keyed `PEAK`, `NIGHT` and `NONPEAK`.
    pub fn from_json_str(json: &str) -> Result<Self, CostError> {
        let raw: HashMap<TimeOfDay, HashMap<String, Interval>> = serde_json::from_str(json)?;

        let mut table = Self::new();
        for (time_of_day, bucket) in raw {
            for (key, interval) in bucket {
                table.insert(time_of_day, CostKey::parse(&key)?, interval);
            }
        }
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, CostError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

impl Default for CostTable {
    /// The built-in frequencies for the bundled network.
    fn default() -> Self {
        use Interval::{Minutes, NotRunning};
        use TimeOfDay::{NonPeak, Night, Peak};

        // (line, peak, night, non-peak)
        let lines = [
            ("NS", Minutes(12), Minutes(10), Minutes(10)),
            ("NE", Minutes(12), Minutes(10), Minutes(10)),
            ("EW", Minutes(10), Minutes(10), Minutes(10)),
            ("CG", Minutes(10), NotRunning, Minutes(10)),
            ("CC", Minutes(10), Minutes(10), Minutes(10)),
            ("CE", Minutes(10), NotRunning, NotRunning),
            ("DT", Minutes(10), NotRunning, Minutes(8)),
            ("TE", Minutes(10), Minutes(8), Minutes(8)),
        ];

        let mut table = Self::new()
            .with_line_change(Peak, Minutes(15))
            .with_line_change(Night, Minutes(10))
            .with_line_change(NonPeak, Minutes(10));

        for (code, peak, night, non_peak) in lines {
            if let Ok(line) = LineCode::parse(code) {
                table = table
                    .with_line(Peak, line, peak)
                    .with_line(Night, line, night)
                    .with_line(NonPeak, line, non_peak);
            }
        }
        table
    }
}

/// Edge cost lookup driven by a [`CostTable`].
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    table: CostTable,
}

impl CostModel {
    /// Create a cost model over the given table.
    pub fn new(table: CostTable) -> Self {
        Self { table }
    }

    /// The underlying table.
    pub fn table(&self) -> &CostTable {
        &self.table
    }

    /// Cost of moving from a station on `from` to an adjacent station on
    /// `to`, leaving at `departure`.
    ///
    /// The bucket is taken from `departure`, so a journey crossing into peak
    /// hours starts paying peak intervals from that point on. A missing
    /// entry is an error; [`Interval::NotRunning`] is not.
    pub fn edge_cost(
        &self,
        from: LineCode,
        to: LineCode,
        departure: NaiveDateTime,
    ) -> Result<Interval, CostError> {
        let time_of_day = TimeOfDay::classify(departure);
        let key = if from == to {
            CostKey::Line(from)
        } else {
            CostKey::LineChange
        };
        self.table.get(time_of_day, key)
    }
}
