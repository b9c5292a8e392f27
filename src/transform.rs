//! Spherical to Cartesian conversion of scan records.
//!
//! Both angles use the scanner's full-circle encoding: the column maps onto `[0, 2π)` around the
//! vertical axis, and the row maps onto a full circle as well. Azimuth is measured from the y
//! axis, so a record in column zero lies on y.

use crate::{Error, Options, Point, Result, ScanParameters, ScanRecord};
use std::f64::consts::TAU;

/// Converts scan records into points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transformer {
    options: Options,
}

impl Transformer {
    /// Creates a new transformer.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::{Options, Transformer};
    /// let transformer = Transformer::new(Options::shaft_compensated());
    /// ```
    pub fn new(options: Options) -> Transformer {
        Transformer { options }
    }

    /// Returns this transformer's options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Transforms one record.
    ///
    /// Both resolutions must be known.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::{ScanParameters, ScanRecord, Transformer};
    /// use std::num::NonZeroU32;
    ///
    /// let four = NonZeroU32::new(4).unwrap();
    /// let parameters = ScanParameters::with_resolution(four, four);
    /// let record = ScanRecord::parse("0,0,0,5.0").unwrap();
    /// let point = Transformer::default().transform(&record, &parameters).unwrap();
    /// assert_eq!("0.000000 0.050000 0.000000", point.to_string());
    /// ```
    pub fn transform(&self, record: &ScanRecord, parameters: &ScanParameters) -> Result<Point> {
        let azimuth = azimuth(record.column, parameters)?;
        let elevation = elevation(record.row, parameters)?;
        let range = self.effective_range(record.distance);
        let horizontal = range * elevation.cos();
        let point = Point {
            x: self.options.handedness.sign() * horizontal * azimuth.sin(),
            y: horizontal * azimuth.cos(),
            z: range * elevation.sin(),
        };
        Ok(point.scaled(self.options.scale))
    }

    /// The distance after offset compensation, never negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::{Options, Transformer};
    /// let transformer = Transformer::new(Options::shaft_compensated());
    /// assert_eq!(0., transformer.effective_range(1.));
    /// ```
    pub fn effective_range(&self, distance: f64) -> f64 {
        (distance - self.options.offset).max(0.)
    }
}

/// The column within one rotation, in `[0, horizontal resolution)`.
///
/// # Examples
///
/// ```
/// use asdp::{transform::azimuth_index, ScanParameters};
/// use std::num::NonZeroU32;
///
/// let parameters = ScanParameters::with_resolution(
///     NonZeroU32::new(1600).unwrap(),
///     NonZeroU32::new(1600).unwrap(),
/// );
/// assert_eq!(1, azimuth_index(1601, &parameters).unwrap());
/// assert_eq!(1599, azimuth_index(-1, &parameters).unwrap());
/// ```
pub fn azimuth_index(column: i64, parameters: &ScanParameters) -> Result<u32> {
    let resolution = parameters
        .horizontal_resolution()
        .ok_or(Error::DivisionByZero("x-resolution"))?;
    // rem_euclid of a positive u32 divisor fits back into a u32
    Ok(column.rem_euclid(i64::from(resolution)) as u32)
}

/// The horizontal angle of a column, in radians, in `[0, 2π)`.
pub fn azimuth(column: i64, parameters: &ScanParameters) -> Result<f64> {
    let index = azimuth_index(column, parameters)?;
    let resolution = parameters.width()?;
    Ok(TAU * (f64::from(index) / f64::from(resolution)))
}

/// The row angle, in radians.
pub fn elevation(row: i64, parameters: &ScanParameters) -> Result<f64> {
    let resolution = parameters
        .vertical_resolution()
        .ok_or(Error::DivisionByZero("y-resolution"))?;
    Ok(TAU * (row as f64 / f64::from(resolution)))
}
