//! Header lines, which describe the scanner geometry.
//!
//! A header line starts with `#` and carries exactly one key and one value separated by a single
//! space:
//!
//! ```text
//! # version 1
//! # x-resolution 1600
//! # y-resolution 1600
//! # num-rows 1200
//! ```
//!
//! Keys we don't know about are ignored, so newer scanners can add their own.

use crate::{Error, Result, ScanParameters};
use log::debug;
use std::num::NonZeroU32;

/// The only header version we can read.
pub const SUPPORTED_VERSION: &str = "1";

/// Returns true if this line is a header line rather than a data line.
///
/// # Examples
///
/// ```
/// assert!(asdp::header::is_header_line("# version 1"));
/// assert!(!asdp::header::is_header_line("0,0,0,5.0"));
/// ```
pub fn is_header_line(line: &str) -> bool {
    line.starts_with('#')
}

/// A recognized header key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// `version`
    Version,
    /// `x-resolution`
    XResolution,
    /// `y-resolution`
    YResolution,
    /// `num-rows`
    NumRows,
    /// Anything else.
    Other,
}

impl Key {
    fn from_name(name: &str) -> Key {
        match name {
            "version" => Key::Version,
            "x-resolution" => Key::XResolution,
            "y-resolution" => Key::YResolution,
            "num-rows" => Key::NumRows,
            _ => Key::Other,
        }
    }

    /// Does this key set one of the angular resolutions?
    pub fn is_resolution(&self) -> bool {
        matches!(self, Key::XResolution | Key::YResolution)
    }
}

/// One header line, split into its key and value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> HeaderLine<'a> {
    /// Parses a header line.
    ///
    /// The line must be `#`, optional whitespace, a key without whitespace, exactly one space,
    /// and a value without whitespace. A trailing carriage return is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::header::HeaderLine;
    /// let header = HeaderLine::parse("#  x-resolution 1600").unwrap();
    /// assert_eq!("x-resolution", header.name());
    /// assert_eq!("1600", header.value());
    /// assert!(HeaderLine::parse("# x-resolution  1600").is_err());
    /// ```
    pub fn parse(line: &'a str) -> Result<HeaderLine<'a>> {
        let malformed = || Error::MalformedHeader(line.to_string());
        let body = line
            .strip_suffix('\r')
            .unwrap_or(line)
            .strip_prefix('#')
            .ok_or_else(malformed)?
            .trim_start();
        let (name, value) = body.split_once(' ').ok_or_else(malformed)?;
        if name.is_empty() || value.is_empty() || has_whitespace(name) || has_whitespace(value) {
            return Err(malformed());
        }
        Ok(HeaderLine { name, value })
    }

    /// The raw key.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The raw value.
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// The recognized key.
    pub fn key(&self) -> Key {
        Key::from_name(self.name)
    }

    /// Validates this header line and applies it to the parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::{header::HeaderLine, ScanParameters};
    /// let mut parameters = ScanParameters::default();
    /// HeaderLine::parse("# num-rows 1200").unwrap().apply(&mut parameters).unwrap();
    /// assert_eq!(Some(1200), parameters.row_count());
    /// ```
    pub fn apply(&self, parameters: &mut ScanParameters) -> Result<()> {
        match self.key() {
            Key::Version => {
                if self.value != SUPPORTED_VERSION {
                    return Err(Error::UnsupportedVersion(self.value.to_string()));
                }
            }
            Key::XResolution => parameters.set_horizontal_resolution(self.positive()?),
            Key::YResolution => parameters.set_vertical_resolution(self.positive()?),
            Key::NumRows => parameters.set_row_count(self.positive()?),
            Key::Other => debug!("ignoring unknown header key '{}'", self.name),
        }
        Ok(())
    }

    fn positive(&self) -> Result<NonZeroU32> {
        self.value.parse().map_err(|_| {
            Error::MalformedHeader(format!("# {} {}", self.name, self.value))
        })
    }
}

fn has_whitespace(s: &str) -> bool {
    s.contains(char::is_whitespace)
}

/// Parses a header line and applies it to the parameters.
///
/// # Examples
///
/// ```
/// use asdp::ScanParameters;
/// let mut parameters = ScanParameters::default();
/// asdp::header::apply("# x-resolution 1600", &mut parameters).unwrap();
/// assert_eq!(Some(1600), parameters.horizontal_resolution());
/// ```
pub fn apply(line: &str, parameters: &mut ScanParameters) -> Result<()> {
    HeaderLine::parse(line)?.apply(parameters)
}
