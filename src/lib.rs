//! Convert rotating lidar scans into [PCD](https://pointclouds.org/documentation/tutorials/pcd_file_format.html)
//! or ASC point clouds.
//!
//! A scan file interleaves header lines, which describe the scanner geometry, with data lines
//! holding one measurement each:
//!
//! ```text
//! # version 1
//! # x-resolution 1600
//! # y-resolution 1600
//! # num-rows 1200
//! 0,0,0,512.25
//! 1,1,0,511.5
//! ```
//!
//! # Converting
//!
//! Convert anything that implements `BufRead` into anything that implements `Write`:
//!
//! ```
//! use asdp::{Format, Options};
//!
//! let input = "# version 1\n# x-resolution 4\n# y-resolution 4\n# num-rows 1\n0,0,0,5.0\n";
//! let mut output = Vec::new();
//! let summary = asdp::convert(input.as_bytes(), &mut output, Format::Pcd, Options::default()).unwrap();
//! assert_eq!(Some(4), summary.declared_points);
//! ```
//!
//! Or convert a file with `convert_path`, which writes to standard output when no output path is
//! given:
//!
//! ```no_run
//! use asdp::{Format, Options};
//! asdp::convert_path("scan.asdp", None, Format::Asc, Options::default()).unwrap();
//! ```
//!
//! # Options
//!
//! Scanner deployments differ in their distance offset, their x axis sign, their output units,
//! and whether the angular resolution comes from the header. All of these live in `Options`:
//!
//! ```
//! use asdp::{Handedness, Options};
//! let options = Options::shaft_compensated()
//!     .with_handedness(Handedness::Left)
//!     .with_raw_units();
//! ```
//!
//! # Errors
//!
//! Conversion stops at the first bad line. Anything written before that stays in the output, so
//! a failed conversion leaves an incomplete file behind.
//!
//! ```
//! use asdp::{Error, Format, Options};
//! let result = asdp::convert("1,2,3\n".as_bytes(), std::io::sink(), Format::Asc, Options::default());
//! let err = result.unwrap_err();
//! assert_eq!(Some(1), err.line_number());
//! assert!(matches!(err.root(), Error::MalformedRecord { .. }));
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

pub mod converter;
pub mod header;
pub mod reader;
pub mod transform;
pub mod writer;

mod error;
mod format;
mod options;
mod parameters;
mod point;
mod record;

pub use crate::{
    converter::{Converter, Summary, convert, convert_path},
    error::Error,
    format::Format,
    options::{Handedness, Options, ResolutionSource, SHAFT_OFFSET, UNITS_PER_METER},
    parameters::ScanParameters,
    point::Point,
    reader::Reader,
    record::ScanRecord,
    transform::Transformer,
    writer::Writer,
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
