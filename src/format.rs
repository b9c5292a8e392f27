use crate::Error;
use std::{fmt, str::FromStr};

/// The output container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Point Cloud Data, v0.7, ascii encoding.
    #[default]
    Pcd,
    /// Headerless `x y z 0 0 0 0` lines.
    Asc,
}

impl Format {
    /// Does this format start with a header?
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::Format;
    /// assert!(Format::Pcd.has_header());
    /// assert!(!Format::Asc.has_header());
    /// ```
    pub fn has_header(&self) -> bool {
        match self {
            Format::Pcd => true,
            Format::Asc => false,
        }
    }

    /// The number of fields on each point line.
    pub fn fields_per_point(&self) -> usize {
        match self {
            Format::Pcd => 3,
            Format::Asc => 7,
        }
    }

    /// The conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Pcd => "pcd",
            Format::Asc => "asc",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Format, Error> {
        match s {
            "pcd" => Ok(Format::Pcd),
            "asc" => Ok(Format::Asc),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
