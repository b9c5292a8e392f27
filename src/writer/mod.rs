//! Write point cloud containers.
//!
//! A `Writer` emits the container header, if its format has one, and then one line per point:
//!
//! ```
//! use asdp::{Format, Point, ScanParameters, Writer};
//! use std::num::NonZeroU32;
//!
//! let mut parameters = ScanParameters::default();
//! parameters.set_horizontal_resolution(NonZeroU32::new(4).unwrap());
//! parameters.set_row_count(NonZeroU32::new(1).unwrap());
//!
//! let mut writer = Writer::new(Vec::new(), Format::Pcd);
//! writer.write_header(&parameters).unwrap();
//! writer.write_point(&Point::new(0., 0.05, 0.)).unwrap();
//! let pcd = String::from_utf8(writer.into_inner().unwrap()).unwrap();
//! assert!(pcd.ends_with("DATA ascii\n0.000000 0.050000 0.000000\n"));
//! ```
//!
//! The header can only be written once, and for formats that have a header it must come before
//! the first point:
//!
//! ```
//! use asdp::{Format, Point, Writer};
//! let mut writer = Writer::new(Vec::new(), Format::Pcd);
//! assert!(writer.write_point(&Point::default()).is_err());
//! ```

mod asc;
mod pcd;

use crate::{Error, Format, Point, Result, ScanParameters};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

trait WriteContainer {
    fn write_header(&mut self, write: &mut dyn Write, parameters: &ScanParameters) -> Result<()>;
    fn write_point(&mut self, write: &mut dyn Write, point: &Point) -> Result<()>;
}

/// Writes points into a PCD or ASC container.
#[allow(missing_debug_implementations)]
pub struct Writer<W: Write> {
    write: W,
    format: Format,
    header_written: bool,
    declared_points: Option<u64>,
    points_written: u64,
    container: Box<dyn WriteContainer>,
}

impl<W: Write> Writer<W> {
    /// Creates a new writer.
    ///
    /// Nothing is written until the header or the first point.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::{Format, Writer};
    /// let writer = Writer::new(std::io::sink(), Format::Asc);
    /// ```
    pub fn new(write: W, format: Format) -> Writer<W> {
        let container: Box<dyn WriteContainer> = match format {
            Format::Pcd => Box::new(pcd::ContainerWriter),
            Format::Asc => Box::new(asc::ContainerWriter),
        };
        Writer {
            write,
            format,
            header_written: false,
            declared_points: None,
            points_written: 0,
            container,
        }
    }

    /// Writes the container header.
    ///
    /// The header is flushed to the underlying stream before this returns.
    ///
    /// For PCD the horizontal resolution and the row count must be known. ASC has no header, so
    /// this only records that the header step happened.
    pub fn write_header(&mut self, parameters: &ScanParameters) -> Result<()> {
        if self.header_written {
            return Err(Error::HeaderAlreadyWritten);
        }
        self.container.write_header(&mut self.write, parameters)?;
        self.write.flush()?;
        if self.format.has_header() {
            self.declared_points = Some(parameters.point_count()?);
        }
        self.header_written = true;
        Ok(())
    }

    /// Writes one point and flushes it to the underlying stream.
    pub fn write_point(&mut self, point: &Point) -> Result<()> {
        if self.format.has_header() && !self.header_written {
            return Err(Error::HeaderNotWritten);
        }
        self.container.write_point(&mut self.write, point)?;
        self.write.flush()?;
        self.points_written += 1;
        Ok(())
    }

    /// Returns this writer's format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Has the header step happened?
    pub fn header_written(&self) -> bool {
        self.header_written
    }

    /// The `POINTS` value of the PCD header, once written.
    pub fn declared_points(&self) -> Option<u64> {
        self.declared_points
    }

    /// The number of points written so far.
    pub fn points_written(&self) -> u64 {
        self.points_written
    }

    /// Returns a reference to the underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.write
    }

    /// Flushes the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.write.flush().map_err(Error::from)
    }

    /// Flushes and returns the underlying stream.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.write)
    }
}

impl Writer<BufWriter<File>> {
    /// Creates a new writer for a path.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::{Format, Writer};
    /// let writer = Writer::from_path("/dev/null", Format::Pcd).unwrap();
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P, format: Format) -> Result<Writer<BufWriter<File>>> {
        File::create(path)
            .map_err(Error::from)
            .map(|file| Writer::new(BufWriter::new(file), format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn parameters(width: u32, height: u32) -> ScanParameters {
        let mut parameters = ScanParameters::default();
        parameters.set_horizontal_resolution(NonZeroU32::new(width).unwrap());
        parameters.set_row_count(NonZeroU32::new(height).unwrap());
        parameters
    }

    fn output(writer: Writer<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn pcd_header() {
        let mut writer = Writer::new(Vec::new(), Format::Pcd);
        writer.write_header(&parameters(1600, 1200)).unwrap();
        assert_eq!(Some(1_920_000), writer.declared_points());
        assert_eq!(
            "# .PCD v.7 - Point Cloud Data file format\n\
             VERSION .7\n\
             FIELDS x y z\n\
             SIZE 4 4 4\n\
             TYPE F F F\n\
             COUNT 1 1 1\n\
             WIDTH 1600\n\
             HEIGHT 1200\n\
             VIEWPOINT 0 0 0 1 0 0 0\n\
             POINTS 1920000\n\
             DATA ascii\n",
            output(writer)
        );
    }

    #[test]
    fn pcd_header_needs_width_and_height() {
        let mut writer = Writer::new(Vec::new(), Format::Pcd);
        let mut incomplete = ScanParameters::default();
        incomplete.set_horizontal_resolution(NonZeroU32::new(4).unwrap());
        assert!(matches!(
            writer.write_header(&incomplete),
            Err(Error::MissingParameter("num-rows"))
        ));
        assert!(!writer.header_written());
        assert_eq!("", output(writer));
    }

    #[test]
    fn pcd_header_only_once() {
        let mut writer = Writer::new(Vec::new(), Format::Pcd);
        writer.write_header(&parameters(4, 1)).unwrap();
        assert!(matches!(
            writer.write_header(&parameters(4, 1)),
            Err(Error::HeaderAlreadyWritten)
        ));
    }

    #[test]
    fn pcd_point_before_header() {
        let mut writer = Writer::new(Vec::new(), Format::Pcd);
        assert!(matches!(
            writer.write_point(&Point::default()),
            Err(Error::HeaderNotWritten)
        ));
        assert_eq!(0, writer.points_written());
    }

    #[test]
    fn pcd_points() {
        let mut writer = Writer::new(Vec::new(), Format::Pcd);
        writer.write_header(&parameters(2, 1)).unwrap();
        writer.write_point(&Point::new(1., 2., 3.)).unwrap();
        writer.write_point(&Point::new(-0.5, 0.25, 0.)).unwrap();
        assert_eq!(2, writer.points_written());
        let output = output(writer);
        let lines: Vec<_> = output.lines().skip(11).collect();
        assert_eq!(
            vec!["1.000000 2.000000 3.000000", "-0.500000 0.250000 0.000000"],
            lines
        );
    }

    #[test]
    fn asc_has_no_header() {
        let mut writer = Writer::new(Vec::new(), Format::Asc);
        writer.write_point(&Point::new(1., 2., 3.)).unwrap();
        assert_eq!("1.000000 2.000000 3.000000 0 0 0 0\n", output(writer));
    }

    #[test]
    fn asc_header_is_empty() {
        let mut writer = Writer::new(Vec::new(), Format::Asc);
        writer.write_header(&ScanParameters::default()).unwrap();
        assert!(writer.header_written());
        assert_eq!(None, writer.declared_points());
        assert_eq!("", output(writer));
    }

    #[test]
    fn field_counts() {
        for format in [Format::Pcd, Format::Asc] {
            let mut writer = Writer::new(Vec::new(), format);
            writer.write_header(&parameters(1, 1)).unwrap();
            writer.write_point(&Point::new(1., 2., 3.)).unwrap();
            let output = output(writer);
            let last = output.lines().last().unwrap();
            assert_eq!(format.fields_per_point(), last.split(' ').count());
        }
    }
}
