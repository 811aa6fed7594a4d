//! Station master list loading.
//!
//! The master list is a CSV file with one row per station:
//!
//! ```text
//! Station Code,Station Name,Opening Date
//! NE1,HarbourFront,20 June 2003
//! TE22,Gardens by the Bay,November 2022
//! ```
//!
//! Opening dates come in several formats; a date with no day of month
//! defaults to the first of that month.

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::LoadError;
use crate::domain::{Station, StationCode, StationId};

/// One row of the master list as it appears in the file.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Station Code")]
    code: String,
    #[serde(rename = "Station Name")]
    name: String,
    #[serde(rename = "Opening Date")]
    opening_date: String,
}

/// A validated master list entry, independent of any query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub code: StationCode,
    pub name: String,
    pub opened: NaiveDateTime,
}

/// The full station master list.
///
/// Loaded once; each query asks for the stations open at its start time.
#[derive(Debug, Clone, Default)]
pub struct StationMaster {
    records: Vec<StationRecord>,
}

impl StationMaster {
    /// Create a master list from already-validated records.
    pub fn new(records: Vec<StationRecord>) -> Self {
        Self { records }
    }

    /// Read a master list from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        let master = Self::from_reader(file)?;
        debug!(
            path = %path.display(),
            stations = master.len(),
            "loaded station master list"
        );
        Ok(master)
    }

    /// Read a master list from CSV data.
    ///
    /// Rows whose opening date cannot be parsed are skipped with a warning.
    /// A row with a malformed station code fails the whole load.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (idx, row) in csv.deserialize::<RawRecord>().enumerate() {
            let raw = row?;
            // Header is line 1.
            let row = idx + 2;

            let code =
                StationCode::parse(&raw.code).map_err(|source| LoadError::InvalidCode { row, source })?;

            let Some(opened) = parse_opening_date(&raw.opening_date) else {
                warn!(row, code = %code, date = %raw.opening_date, "skipping station with unparseable opening date");
                continue;
            };

            records.push(StationRecord {
                code,
                name: raw.name,
                opened,
            });
        }

        Ok(Self { records })
    }

    /// All records, in file order.
    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stations that opened strictly before `at`.
    ///
    /// Ids are assigned densely in file order over the included stations, so
    /// they line up with the adjacency structure built for this query.
    pub fn open_at(&self, at: NaiveDateTime) -> Vec<Station> {
        self.records
            .iter()
            .filter(|record| record.opened < at)
            .enumerate()
            .map(|(idx, record)| {
                Station::new(StationId(idx), record.code, record.name.clone(), record.opened)
            })
            .collect()
    }
}

/// Parse an opening date such as "20 December 1987", "7 January 2006" or
/// "December 2019". Opening happens at the start of the day.
pub fn parse_opening_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let date = NaiveDate::parse_from_str(s, "%d %B %Y")
        .or_else(|_| NaiveDate::parse_from_str(&format!("1 {s}"), "%d %B %Y"))
        .ok()?;

    date.and_hms_opt(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Station Code,Station Name,Opening Date
NE2,Buangkok,7 January 2006
NE3,Hougang,1 June 2003
NE4,Kovan,20 June 2003
";

    fn datetime(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn parse_date_formats() {
        assert_eq!(
            parse_opening_date("20 December 1987"),
            Some(datetime(1987, 12, 20, 0))
        );
        assert_eq!(
            parse_opening_date("7 January 2006"),
            Some(datetime(2006, 1, 7, 0))
        );
        assert_eq!(
            parse_opening_date("07 January 2006"),
            Some(datetime(2006, 1, 7, 0))
        );
        assert_eq!(
            parse_opening_date("December 2019"),
            Some(datetime(2019, 12, 1, 0))
        );
    }

    #[test]
    fn reject_unparseable_dates() {
        assert_eq!(parse_opening_date(""), None);
        assert_eq!(parse_opening_date("2019-12-01"), None);
        assert_eq!(parse_opening_date("sometime soon"), None);
        assert_eq!(parse_opening_date("31 February 2020"), None);
    }

    #[test]
    fn read_sample() {
        let master = StationMaster::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(master.len(), 3);

        let first = &master.records()[0];
        assert_eq!(first.code.to_string(), "NE2");
        assert_eq!(first.name, "Buangkok");
        assert_eq!(first.opened, datetime(2006, 1, 7, 0));
    }

    #[test]
    fn all_open() {
        let master = StationMaster::from_reader(SAMPLE.as_bytes()).unwrap();
        let stations = master.open_at(datetime(2020, 10, 21, 7));

        let codes: Vec<String> = stations.iter().map(|s| s.code.to_string()).collect();
        assert_eq!(codes, vec!["NE2", "NE3", "NE4"]);
        let ids: Vec<usize> = stations.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn some_not_yet_open_ids_stay_dense() {
        let master = StationMaster::from_reader(SAMPLE.as_bytes()).unwrap();
        let stations = master.open_at(datetime(2003, 10, 21, 7));

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].code.to_string(), "NE3");
        assert_eq!(stations[0].id, StationId(0));
        assert_eq!(stations[1].code.to_string(), "NE4");
        assert_eq!(stations[1].id, StationId(1));
    }

    #[test]
    fn none_open() {
        let master = StationMaster::from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(master.open_at(datetime(1999, 10, 21, 7)).is_empty());
    }

    #[test]
    fn opening_instant_is_exclusive() {
        let master = StationMaster::from_reader(SAMPLE.as_bytes()).unwrap();
        let stations = master.open_at(datetime(2003, 6, 20, 0));
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Hougang");
    }

    #[test]
    fn skips_rows_with_bad_dates() {
        let csv = "\
Station Code,Station Name,Opening Date
NE2,Buangkok,7 January 2006
NE3,Hougang,TBC
";
        let master = StationMaster::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(master.len(), 1);
        assert_eq!(master.records()[0].name, "Buangkok");
    }

    #[test]
    fn rejects_bad_station_codes() {
        let csv = "\
Station Code,Station Name,Opening Date
NE2,Buangkok,7 January 2006
N,Hougang,1 June 2003
";
        let err = StationMaster::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidCode { row: 3, .. }));
    }

    #[test]
    fn trims_whitespace() {
        let csv = "\
Station Code,Station Name,Opening Date
 NE2 , Buangkok , 7 January 2006
";
        let master = StationMaster::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(master.records()[0].code.to_string(), "NE2");
        assert_eq!(master.records()[0].name, "Buangkok");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("StationMap.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let master = StationMaster::from_path(&path).unwrap();
        assert_eq!(master.len(), 3);

        let missing = StationMaster::from_path(&dir.path().join("missing.csv"));
        assert!(matches!(missing, Err(LoadError::Io(_))));
    }
}
