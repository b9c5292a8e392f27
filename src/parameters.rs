//! Scanner geometry collected from the header lines.

use crate::{Error, Result};
use std::{fmt, num::NonZeroU32};

/// The geometry of one scan.
///
/// Parameters start out empty and are filled in as header lines are read. Every getter returns
/// `None` (or an error, for the derived values) until the corresponding header key was seen, so a
/// missing key can never be mistaken for a zero.
///
/// ```
/// use asdp::ScanParameters;
/// use std::num::NonZeroU32;
///
/// let mut parameters = ScanParameters::default();
/// assert!(parameters.point_count().is_err());
/// parameters.set_horizontal_resolution(NonZeroU32::new(1600).unwrap());
/// parameters.set_row_count(NonZeroU32::new(1200).unwrap());
/// assert_eq!(1_920_000, parameters.point_count().unwrap());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanParameters {
    horizontal_resolution: Option<NonZeroU32>,
    vertical_resolution: Option<NonZeroU32>,
    row_count: Option<NonZeroU32>,
}

impl ScanParameters {
    /// Creates parameters with a known horizontal and vertical resolution.
    ///
    /// The row count is left unset.
    pub fn with_resolution(horizontal: NonZeroU32, vertical: NonZeroU32) -> ScanParameters {
        ScanParameters {
            horizontal_resolution: Some(horizontal),
            vertical_resolution: Some(vertical),
            row_count: None,
        }
    }

    /// Angular steps per full horizontal rotation (`x-resolution`).
    pub fn horizontal_resolution(&self) -> Option<u32> {
        self.horizontal_resolution.map(NonZeroU32::get)
    }

    /// Angular steps per full vertical sweep (`y-resolution`).
    pub fn vertical_resolution(&self) -> Option<u32> {
        self.vertical_resolution.map(NonZeroU32::get)
    }

    /// Number of rows in the scan (`num-rows`).
    pub fn row_count(&self) -> Option<u32> {
        self.row_count.map(NonZeroU32::get)
    }

    /// Sets the horizontal resolution.
    pub fn set_horizontal_resolution(&mut self, resolution: NonZeroU32) {
        self.horizontal_resolution = Some(resolution);
    }

    /// Sets the vertical resolution.
    pub fn set_vertical_resolution(&mut self, resolution: NonZeroU32) {
        self.vertical_resolution = Some(resolution);
    }

    /// Sets the row count.
    pub fn set_row_count(&mut self, row_count: NonZeroU32) {
        self.row_count = Some(row_count);
    }

    /// The number of points in the scan, `rows * horizontal resolution`.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::{Error, ScanParameters};
    /// let parameters = ScanParameters::default();
    /// assert!(matches!(parameters.point_count(), Err(Error::MissingParameter("x-resolution"))));
    /// ```
    pub fn point_count(&self) -> Result<u64> {
        let width = self.width()?;
        let height = self.height()?;
        Ok(u64::from(width) * u64::from(height))
    }

    /// The horizontal resolution, or an error naming the missing header key.
    pub fn width(&self) -> Result<u32> {
        self.horizontal_resolution()
            .ok_or(Error::MissingParameter("x-resolution"))
    }

    /// The row count, or an error naming the missing header key.
    pub fn height(&self) -> Result<u32> {
        self.row_count().ok_or(Error::MissingParameter("num-rows"))
    }
}

impl fmt::Display for ScanParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_unset(value: Option<u32>) -> String {
            value.map_or_else(|| "unset".to_string(), |v| v.to_string())
        }
        write!(
            f,
            "x-resolution={} y-resolution={} num-rows={}",
            or_unset(self.horizontal_resolution()),
            or_unset(self.vertical_resolution()),
            or_unset(self.row_count())
        )
    }
}
