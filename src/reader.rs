//! Read scan files line by line.
//!
//! `Reader::from_path` buffers the file for you:
//!
//! ```
//! use asdp::Reader;
//! let reader = Reader::from_path("tests/data/sample.asdp").unwrap();
//! ```
//!
//! Use `Reader::lines` to walk the file, with each line already classified as a header line or a
//! data line:
//!
//! ```
//! use asdp::{reader::Line, Reader};
//! let mut reader = Reader::new("# version 1\n0,0,0,5.0\n".as_bytes());
//! let lines = reader.lines().collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!((1, Line::Header("# version 1".to_string())), lines[0]);
//! assert_eq!((2, Line::Record("0,0,0,5.0".to_string())), lines[1]);
//! ```

use crate::{Error, Result, header};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// One line of a scan file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// A line starting with `#`.
    Header(String),
    /// Anything else.
    Record(String),
}

impl Line {
    /// Classifies a line.
    pub fn new(line: String) -> Line {
        if header::is_header_line(&line) {
            Line::Header(line)
        } else {
            Line::Record(line)
        }
    }
}

/// Reads scan files.
#[derive(Debug)]
pub struct Reader<R: BufRead> {
    read: R,
}

impl Reader<BufReader<File>> {
    /// Creates a new reader for a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader<BufReader<File>>> {
        File::open(path)
            .map_err(Error::from)
            .map(BufReader::new)
            .map(Reader::new)
    }
}

impl<R: BufRead> Reader<R> {
    /// Creates a new reader.
    pub fn new(read: R) -> Reader<R> {
        Reader { read }
    }

    /// Returns an iterator over the numbered lines of this reader.
    ///
    /// Line numbers start at one. Read errors are attributed to the line that failed.
    pub fn lines(&mut self) -> LineIterator<'_, R> {
        LineIterator {
            read: &mut self.read,
            number: 0,
        }
    }
}

/// An iterator over the lines of a `Reader`.
///
/// This struct is generally created by calling `lines()` on `Reader`.
#[derive(Debug)]
pub struct LineIterator<'a, R: BufRead> {
    read: &'a mut R,
    number: usize,
}

impl<R: BufRead> Iterator for LineIterator<'_, R> {
    type Item = Result<(usize, Line)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut bytes = Vec::new();
        self.number += 1;
        match self.read.read_until(b'\n', &mut bytes) {
            Ok(0) => None,
            Ok(_) => {
                if bytes.ends_with(b"\n") {
                    let _ = bytes.pop();
                    if bytes.ends_with(b"\r") {
                        let _ = bytes.pop();
                    }
                }
                Some(
                    decode(bytes)
                        .map(|line| (self.number, Line::new(line)))
                        .map_err(|err| err.at_line(self.number)),
                )
            }
            Err(err) => Some(Err(Error::from(err).at_line(self.number))),
        }
    }
}

/// Text that is not UTF-8 is a malformed line of whichever kind it would have been.
fn decode(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|err| {
        let line = String::from_utf8_lossy(err.as_bytes()).into_owned();
        if err.as_bytes().starts_with(b"#") {
            Error::MalformedHeader(line)
        } else {
            Error::malformed_record(&line, "not valid UTF-8")
        }
    })
}
