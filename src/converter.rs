//! Stream scan files into point cloud containers.
//!
//! The converter is a small state machine. Header lines update the scan parameters whenever they
//! appear. The first data line triggers the container header, which is why every header line the
//! PCD header depends on must come before the first data line.
//!
//! ```
//! use asdp::{Converter, Format, Options, Reader};
//!
//! let input = "# version 1\n# x-resolution 4\n# y-resolution 4\n# num-rows 1\n0,0,0,5.0\n";
//! let mut converter = Converter::new(Vec::new(), Format::Pcd, Options::default());
//! converter.convert(&mut Reader::new(input.as_bytes())).unwrap();
//! let (output, summary) = converter.finish().unwrap();
//! let pcd = String::from_utf8(output).unwrap();
//! assert!(pcd.contains("WIDTH 4\nHEIGHT 1\n"));
//! assert!(pcd.ends_with("POINTS 4\nDATA ascii\n0.000000 0.050000 0.000000\n"));
//! assert_eq!(1, summary.points_written);
//! ```

use crate::{
    Format, Options, Reader, ResolutionSource, Result, ScanParameters, ScanRecord, Transformer,
    Writer,
    header::HeaderLine,
    reader::Line,
};
use log::{debug, info, warn};
use std::{
    fs::File,
    io::{self, BufRead, BufWriter, Write},
    path::Path,
};

/// Where a converter is in its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// No data line has been seen yet.
    AwaitingFirstPoint,
    /// The container header, if any, is written and points are flowing.
    Streaming,
}

/// What a finished conversion did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// The number of header lines read.
    pub header_lines: u64,
    /// The number of points written.
    pub points_written: u64,
    /// The `POINTS` value of the PCD header, if one was written.
    pub declared_points: Option<u64>,
}

/// Converts scan lines into a point cloud container.
#[allow(missing_debug_implementations)]
pub struct Converter<W: Write> {
    writer: Writer<W>,
    transformer: Transformer,
    parameters: ScanParameters,
    state: State,
    header_lines: u64,
}

impl<W: Write> Converter<W> {
    /// Creates a new converter.
    ///
    /// With a fixed resolution source the parameters start out with that resolution.
    pub fn new(write: W, format: Format, options: Options) -> Converter<W> {
        let parameters = match options.resolution {
            ResolutionSource::Header => ScanParameters::default(),
            ResolutionSource::Fixed {
                horizontal,
                vertical,
            } => ScanParameters::with_resolution(horizontal, vertical),
        };
        Converter {
            writer: Writer::new(write, format),
            transformer: Transformer::new(options),
            parameters,
            state: State::AwaitingFirstPoint,
            header_lines: 0,
        }
    }

    /// Converts every line of a reader.
    ///
    /// Stops at the first error, which is attributed to its line number.
    pub fn convert<R: BufRead>(&mut self, reader: &mut Reader<R>) -> Result<()> {
        for line in reader.lines() {
            let (number, line) = line?;
            self.process(&line).map_err(|err| err.at_line(number))?;
        }
        Ok(())
    }

    /// Processes one line of input.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::{converter::State, Converter, Format, Options};
    /// let mut converter = Converter::new(Vec::new(), Format::Asc, Options::default());
    /// converter.process_line("# x-resolution 4").unwrap();
    /// assert_eq!(State::AwaitingFirstPoint, converter.state());
    /// ```
    pub fn process_line(&mut self, line: &str) -> Result<()> {
        self.process(&Line::new(line.to_string()))
    }

    fn process(&mut self, line: &Line) -> Result<()> {
        match line {
            Line::Header(line) => self.process_header(line),
            Line::Record(line) => self.process_record(line),
        }
    }

    fn process_header(&mut self, line: &str) -> Result<()> {
        let header = HeaderLine::parse(line)?;
        if header.key().is_resolution() && self.has_fixed_resolution() {
            header.apply(&mut ScanParameters::default())?;
            self.header_lines += 1;
            debug!("fixed resolution, ignoring '{}'", line);
            return Ok(());
        }
        let before = self.parameters;
        header.apply(&mut self.parameters)?;
        self.header_lines += 1;
        if self.writer.declared_points().is_some()
            && (before.width().ok() != self.parameters.width().ok()
                || before.height().ok() != self.parameters.height().ok())
        {
            warn!(
                "'{}' changes the scan geometry after the PCD header was written",
                line
            );
        }
        Ok(())
    }

    fn process_record(&mut self, line: &str) -> Result<()> {
        if self.state == State::AwaitingFirstPoint {
            if self.writer.format().has_header() {
                self.writer.write_header(&self.parameters)?;
            }
            debug!("first point, streaming with {}", self.parameters);
            self.state = State::Streaming;
        }
        let record = ScanRecord::parse(line)?;
        let point = self.transformer.transform(&record, &self.parameters)?;
        self.writer.write_point(&point)
    }

    fn has_fixed_resolution(&self) -> bool {
        matches!(
            self.transformer.options().resolution,
            ResolutionSource::Fixed { .. }
        )
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the scan parameters read so far.
    pub fn parameters(&self) -> &ScanParameters {
        &self.parameters
    }

    /// Returns a reference to the output stream.
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Returns what has been done so far.
    pub fn summary(&self) -> Summary {
        Summary {
            header_lines: self.header_lines,
            points_written: self.writer.points_written(),
            declared_points: self.writer.declared_points(),
        }
    }

    /// Flushes the output without finishing the conversion.
    ///
    /// Unlike `finish`, nothing is logged, so this is the way out after an error.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }

    /// Flushes the output and returns it, with a summary of the conversion.
    pub fn finish(self) -> Result<(W, Summary)> {
        let summary = self.summary();
        if let Some(declared) = summary.declared_points {
            if declared != summary.points_written {
                warn!(
                    "the PCD header declares {} points, but {} were written",
                    declared, summary.points_written
                );
            }
        }
        info!(
            "wrote {} points from {} header lines",
            summary.points_written, summary.header_lines
        );
        let write = self.writer.into_inner()?;
        Ok((write, summary))
    }
}

/// Converts a scan stream.
///
/// # Examples
///
/// ```
/// use asdp::{Format, Options};
/// let mut output = Vec::new();
/// let input = "# x-resolution 4\n# y-resolution 4\n0,1,0,100\n";
/// asdp::convert(input.as_bytes(), &mut output, Format::Asc, Options::default()).unwrap();
/// assert_eq!("1.000000 0.000000 0.000000 0 0 0 0\n", String::from_utf8(output).unwrap());
/// ```
pub fn convert<R: BufRead, W: Write>(
    read: R,
    write: W,
    format: Format,
    options: Options,
) -> Result<Summary> {
    let mut converter = Converter::new(write, format, options);
    converter.convert(&mut Reader::new(read))?;
    converter.finish().map(|(_, summary)| summary)
}

/// Converts a scan file, writing to `output` or to standard output.
pub fn convert_path<P: AsRef<Path>>(
    input: P,
    output: Option<&Path>,
    format: Format,
    options: Options,
) -> Result<Summary> {
    let mut reader = Reader::from_path(input)?;
    let write: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    let mut converter = Converter::new(write, format, options);
    if let Err(err) = converter.convert(&mut reader) {
        // the points before the bad line stay in the output
        if let Err(flush) = converter.flush() {
            warn!("could not flush the output: {}", flush);
        }
        return Err(err);
    }
    converter.finish().map(|(_, summary)| summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Point};
    use std::num::NonZeroU32;

    /// Holds written bytes back until they are flushed.
    #[derive(Debug, Default)]
    struct Delivered {
        pending: Vec<u8>,
        delivered: Vec<u8>,
    }

    impl Write for Delivered {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.pending.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.delivered.append(&mut self.pending);
            Ok(())
        }
    }

    impl Delivered {
        fn lines(&self) -> usize {
            self.delivered.iter().filter(|&&b| b == b'\n').count()
        }
    }

    const HEADER: &str = "# version 1\n# x-resolution 4\n# y-resolution 4\n# num-rows 1\n";

    fn run(input: &str, format: Format, options: Options) -> (Result<()>, Converter<Vec<u8>>) {
        let mut converter = Converter::new(Vec::new(), format, options);
        let result = converter.convert(&mut Reader::new(input.as_bytes()));
        (result, converter)
    }

    fn output(converter: &Converter<Vec<u8>>) -> String {
        String::from_utf8(converter.get_ref().clone()).unwrap()
    }

    #[test]
    fn end_to_end_pcd() {
        let input = format!("{HEADER}0,0,0,5.0\n");
        let (result, converter) = run(&input, Format::Pcd, Options::default());
        result.unwrap();
        assert_eq!(State::Streaming, converter.state());
        assert_eq!(
            "# .PCD v.7 - Point Cloud Data file format\n\
             VERSION .7\n\
             FIELDS x y z\n\
             SIZE 4 4 4\n\
             TYPE F F F\n\
             COUNT 1 1 1\n\
             WIDTH 4\n\
             HEIGHT 1\n\
             VIEWPOINT 0 0 0 1 0 0 0\n\
             POINTS 4\n\
             DATA ascii\n\
             0.000000 0.050000 0.000000\n",
            output(&converter)
        );
    }

    #[test]
    fn end_to_end_asc() {
        let input = format!("{HEADER}0,0,0,5.0\n0,1,0,100\n");
        let (result, converter) = run(&input, Format::Asc, Options::default());
        result.unwrap();
        assert_eq!(
            "0.000000 0.050000 0.000000 0 0 0 0\n1.000000 0.000000 0.000000 0 0 0 0\n",
            output(&converter)
        );
    }

    #[test]
    fn pcd_header_exactly_once_before_points() {
        let input = format!("{HEADER}0,0,0,1\n# comment here\n0,1,0,1\n0,2,0,1\n0,3,0,1\n");
        let (result, converter) = run(&input, Format::Pcd, Options::default());
        result.unwrap();
        let output = output(&converter);
        let lines: Vec<&str> = output.lines().collect();
        let banners: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.starts_with("# .PCD"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(vec![0], banners);
        assert_eq!("DATA ascii", lines[10]);
        assert_eq!(15, lines.len());
        assert!(lines[11..].iter().all(|line| line.split(' ').count() == 3));
    }

    #[test]
    fn header_lines_only() {
        let (result, converter) = run(HEADER, Format::Pcd, Options::default());
        result.unwrap();
        assert_eq!(State::AwaitingFirstPoint, converter.state());
        assert_eq!("", output(&converter));
        let (_, summary) = converter.finish().unwrap();
        assert_eq!(4, summary.header_lines);
        assert_eq!(None, summary.declared_points);
    }

    #[test]
    fn malformed_record_after_header() {
        let input = format!("{HEADER}1,2,3\n");
        let (result, converter) = run(&input, Format::Pcd, Options::default());
        let err = result.unwrap_err();
        assert_eq!(Some(5), err.line_number());
        assert!(matches!(err.root(), Error::MalformedRecord { .. }));
        let output = output(&converter);
        assert!(output.ends_with("DATA ascii\n"));
        assert_eq!(11, output.lines().count());
    }

    #[test]
    fn missing_resolution() {
        let (result, converter) = run("0,0,0,1\n", Format::Asc, Options::default());
        assert!(matches!(
            result.unwrap_err().root(),
            Error::DivisionByZero("x-resolution")
        ));
        assert_eq!("", output(&converter));
    }

    #[test]
    fn missing_rows_for_pcd() {
        let input = "# x-resolution 4\n# y-resolution 4\n0,0,0,1\n";
        let (result, converter) = run(input, Format::Pcd, Options::default());
        assert!(matches!(
            result.unwrap_err().root(),
            Error::MissingParameter("num-rows")
        ));
        assert_eq!("", output(&converter));
    }

    #[test]
    fn unsupported_version() {
        let (result, _) = run("# version 2\n", Format::Pcd, Options::default());
        let err = result.unwrap_err();
        assert_eq!(Some(1), err.line_number());
        assert!(matches!(err.root(), Error::UnsupportedVersion(_)));
    }

    #[test]
    fn header_after_first_point_applies() {
        let input = "# x-resolution 4\n# y-resolution 4\n0,1,0,100\n# x-resolution 8\n0,1,0,100\n";
        let (result, converter) = run(input, Format::Asc, Options::default());
        result.unwrap();
        assert_eq!(Some(8), converter.parameters().horizontal_resolution());
        let output = output(&converter);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!("1.000000 0.000000 0.000000 0 0 0 0", lines[0]);
        assert_eq!("0.707107 0.707107 0.000000 0 0 0 0", lines[1]);
    }

    #[test]
    fn fixed_resolution_ignores_header() {
        let four = NonZeroU32::new(4).unwrap();
        let options = Options::default().with_resolution(ResolutionSource::Fixed {
            horizontal: four,
            vertical: four,
        });
        let input = "# x-resolution 1600\n# num-rows 1\n0,1,0,100\n";
        let (result, converter) = run(input, Format::Pcd, options);
        result.unwrap();
        assert_eq!(Some(4), converter.parameters().horizontal_resolution());
        let output = output(&converter);
        assert!(output.contains("WIDTH 4\n"));
        assert!(output.ends_with("1.000000 0.000000 0.000000\n"));
    }

    #[test]
    fn fixed_resolution_still_validates() {
        let four = NonZeroU32::new(4).unwrap();
        let options = Options::default().with_resolution(ResolutionSource::Fixed {
            horizontal: four,
            vertical: four,
        });
        let (result, _) = run("# x-resolution zero\n", Format::Asc, options);
        assert!(matches!(
            result.unwrap_err().root(),
            Error::MalformedHeader(_)
        ));
    }

    #[test]
    fn summary() {
        let input = format!("{HEADER}0,0,0,1\n0,1,0,1\n");
        let (result, converter) = run(&input, Format::Pcd, Options::default());
        result.unwrap();
        let (_, summary) = converter.finish().unwrap();
        assert_eq!(
            Summary {
                header_lines: 4,
                points_written: 2,
                declared_points: Some(4),
            },
            summary
        );
    }

    #[test]
    fn points_are_delivered_line_by_line() {
        let mut converter = Converter::new(Delivered::default(), Format::Pcd, Options::default());
        for line in HEADER.lines() {
            converter.process_line(line).unwrap();
        }
        assert_eq!(0, converter.get_ref().lines());
        converter.process_line("0,0,0,1").unwrap();
        assert!(converter.get_ref().pending.is_empty());
        assert_eq!(12, converter.get_ref().lines());
        converter.process_line("0,1,0,1").unwrap();
        assert!(converter.get_ref().pending.is_empty());
        assert_eq!(13, converter.get_ref().lines());
    }

    #[test]
    fn flush_after_error_keeps_prefix() {
        let input = format!("{HEADER}0,0,0,1
0,1,0
");
        let mut converter = Converter::new(Delivered::default(), Format::Asc, Options::default());
        assert!(converter.convert(&mut Reader::new(input.as_bytes())).is_err());
        converter.flush().unwrap();
        assert_eq!(1, converter.get_ref().lines());
        assert_eq!(1, converter.summary().points_written);
    }

    #[test]
    fn invalid_utf8_record() {
        let input: &[u8] = b"# x-resolution 4\n# y-resolution 4\n0,0,0,\xff\n";
        let mut converter = Converter::new(Vec::new(), Format::Asc, Options::default());
        let err = converter.convert(&mut Reader::new(input)).unwrap_err();
        assert_eq!(Some(3), err.line_number());
        assert!(matches!(err.root(), Error::MalformedRecord { .. }));
        assert!(converter.get_ref().is_empty());
    }

    #[test]
    fn invalid_utf8_header() {
        let input: &[u8] = b"# x-resolution \xff\n";
        let mut converter = Converter::new(Vec::new(), Format::Asc, Options::default());
        let err = converter.convert(&mut Reader::new(input)).unwrap_err();
        assert_eq!(Some(1), err.line_number());
        assert!(matches!(err.root(), Error::MalformedHeader(_)));
    }

    #[test]
    fn rejected_header_lines_are_not_counted() {
        let (result, converter) = run("# version 1
# version 2
", Format::Pcd, Options::default());
        assert!(result.is_err());
        assert_eq!(1, converter.summary().header_lines);

        let four = NonZeroU32::new(4).unwrap();
        let options = Options::default().with_resolution(ResolutionSource::Fixed {
            horizontal: four,
            vertical: four,
        });
        let (result, converter) = run("# x-resolution 8
# x-resolution 0
", Format::Asc, options);
        assert!(result.is_err());
        assert_eq!(1, converter.summary().header_lines);
    }

    #[test]
    fn process_line() {
        let mut converter = Converter::new(Vec::new(), Format::Asc, Options::default());
        converter.process_line("# x-resolution 4").unwrap();
        converter.process_line("# y-resolution 4").unwrap();
        converter.process_line("0,0,0,5").unwrap();
        assert_eq!(State::Streaming, converter.state());
        let (output, _) = converter.finish().unwrap();
        let mut expected = Point::new(0., 0.05, 0.).to_string();
        expected.push_str(" 0 0 0 0\n");
        assert_eq!(expected, String::from_utf8(output).unwrap());
    }
}
