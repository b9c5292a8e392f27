/// Crate-specific error enum.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A header line could not be split into a key and a value, or its value is not a positive
    /// integer.
    #[error("invalid header: {0}")]
    MalformedHeader(String),

    /// The header declared a format version we don't know how to read.
    #[error("unknown version in header: {0}")]
    UnsupportedVersion(String),

    /// A data line is not four comma-separated fields, or one of the fields is not a number.
    #[error("invalid line '{line}': {reason}")]
    MalformedRecord {
        /// The offending line.
        line: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A record was transformed before the named resolution was known.
    #[error("division by zero: {0} is not known yet")]
    DivisionByZero(&'static str),

    /// The output format is neither `pcd` nor `asc`.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// A value derived from the header was needed before the header key that sets it.
    #[error("missing header parameter: {0}")]
    MissingParameter(&'static str),

    /// The container header was already written.
    #[error("the container header was already written")]
    HeaderAlreadyWritten,

    /// A point was written before the container header.
    #[error("a point was written before the container header")]
    HeaderNotWritten,

    /// [std::io::Error]
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An error raised while processing a specific input line.
    #[error("line {number}: {source}")]
    Line {
        /// The 1-based line number.
        number: usize,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attributes this error to an input line.
    ///
    /// Errors that are already attributed are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::Error;
    /// let error = Error::DivisionByZero("x-resolution").at_line(3);
    /// assert_eq!("line 3: division by zero: x-resolution is not known yet", error.to_string());
    /// ```
    pub fn at_line(self, number: usize) -> Error {
        match self {
            Error::Line { .. } => self,
            error => Error::Line {
                number,
                source: Box::new(error),
            },
        }
    }

    /// Returns the error without any line attribution.
    ///
    /// # Examples
    ///
    /// ```
    /// use asdp::Error;
    /// let error = Error::HeaderNotWritten.at_line(1);
    /// assert!(matches!(error.root(), Error::HeaderNotWritten));
    /// ```
    pub fn root(&self) -> &Error {
        match self {
            Error::Line { source, .. } => source.root(),
            error => error,
        }
    }

    /// Returns the line this error is attributed to, if any.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Error::Line { number, .. } => Some(*number),
            _ => None,
        }
    }

    pub(crate) fn malformed_record(line: &str, reason: impl ToString) -> Error {
        Error::MalformedRecord {
            line: line.to_string(),
            reason: reason.to_string(),
        }
    }
}
