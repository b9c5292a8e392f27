use crate::{Error, Result};
use std::str::FromStr;

const FIELD_COUNT: usize = 4;

/// One scan measurement, as read from a data line.
///
/// Data lines are `index,column,row,distance`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanRecord {
    /// The sequence number of this measurement. Not used by the transform.
    pub index: i64,
    /// The raw column, which can run past one full rotation.
    pub column: i64,
    /// The row.
    pub row: i64,
    /// The measured distance, in scanner units.
    pub distance: f64,
}

impl ScanRecord {
    /// Parses a data line.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::ScanRecord;
    /// let record = ScanRecord::parse("7,1601,3,250.5").unwrap();
    /// assert_eq!(1601, record.column);
    /// assert_eq!(250.5, record.distance);
    /// assert!(ScanRecord::parse("1,2,3").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<ScanRecord> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            return Err(Error::malformed_record(
                line,
                format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            ));
        }
        Ok(ScanRecord {
            index: field(line, "index", fields[0])?,
            column: field(line, "column", fields[1])?,
            row: field(line, "row", fields[2])?,
            distance: field(line, "distance", fields[3])?,
        })
    }
}

impl FromStr for ScanRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<ScanRecord> {
        ScanRecord::parse(s)
    }
}

fn field<T>(line: &str, name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|err| Error::malformed_record(line, format!("{name} '{value}': {err}")))
}
