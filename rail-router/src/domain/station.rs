//! Station and line code types.

use std::fmt;

use chrono::NaiveDateTime;

/// Error returned when parsing an invalid line or station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

impl InvalidStationCode {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A valid 2-letter line code such as "NE" or "CC".
///
/// # Examples
///
/// ```
/// use rail_router::domain::LineCode;
///
/// let ne = LineCode::parse("NE").unwrap();
/// assert_eq!(ne.as_str(), "NE");
///
/// assert!(LineCode::parse("ne").is_err());
/// assert!(LineCode::parse("NEL").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineCode([u8; 2]);

impl LineCode {
    /// Parse a line code from a string.
    ///
    /// The input must be exactly 2 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidStationCode::new(
                "line code must be exactly 2 characters",
            ));
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidStationCode::new(
                "line code must be uppercase ASCII letters A-Z",
            ));
        }

        Ok(LineCode([bytes[0], bytes[1]]))
    }

    /// Returns the line code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Debug for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineCode({})", self.as_str())
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station code: line code followed by the station's sequence number on
/// that line, e.g. "NE3" or "CC16".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationCode {
    pub line: LineCode,
    pub number: u32,
}

impl StationCode {
    /// Parse a station code such as "NE3".
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_router::domain::StationCode;
    ///
    /// let code = StationCode::parse("CC16").unwrap();
    /// assert_eq!(code.line.as_str(), "CC");
    /// assert_eq!(code.number, 16);
    /// assert_eq!(code.to_string(), "CC16");
    ///
    /// assert!(StationCode::parse("CC").is_err());
    /// assert!(StationCode::parse("C16").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let s = s.trim();
        let (line, number) = s
            .split_at_checked(2)
            .ok_or_else(|| InvalidStationCode::new("too short"))?;

        let line = LineCode::parse(line)?;

        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStationCode::new(
                "sequence number must be ASCII digits",
            ));
        }
        let number = number
            .parse()
            .map_err(|_| InvalidStationCode::new("sequence number out of range"))?;

        Ok(Self { line, number })
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.line, self.number)
    }
}

/// Dense index of a station within one query's open-station set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub usize);

/// An open station.
///
/// Stations sharing a `name` but on different lines are the same physical
/// interchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub code: StationCode,
    pub name: String,
    pub opened: NaiveDateTime,
}

impl Station {
    /// Create a new station.
    pub fn new(
        id: StationId,
        code: StationCode,
        name: impl Into<String>,
        opened: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            code,
            name: name.into(),
            opened,
        }
    }

    /// The line this station is on.
    pub fn line(&self) -> LineCode {
        self.code.line
    }

    /// Position of this station on its line.
    pub fn number(&self) -> u32 {
        self.code.number
    }

    /// Case-folded display name, used as the lookup key.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    /// Whether `other` is the same physical location on a different line.
    pub fn is_interchange_with(&self, other: &Station) -> bool {
        self.id != other.id
            && self.line() != other.line()
            && self.name_key() == other.name_key()
    }
}

/// Case-folded form of a station name. Names are compared case-insensitively
/// everywhere.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.name)
    }
}
