//! JSONL reading operations.
//!
//! This module provides line-by-line reading of JSONL data with line number
//! tracking, plus the resilient loaders that skip malformed or invalid lines
//! and report them as [`Warning`]s instead of failing the whole load.

use crate::warning::Warning;
use crate::{Result, Validate};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// UTF-8 byte order mark, tolerated at the start of the first line.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reader for JSONL (JSON Lines) data.
///
/// `JsonlReader` wraps a buffered reader and hands out one line at a time
/// with the line terminator removed. It tracks line numbers so callers can
/// attach useful context to diagnostics.
///
/// # Examples
///
/// ```
/// use beadview_jsonl::JsonlReader;
/// use std::io::Cursor;
///
/// let mut reader = JsonlReader::new(Cursor::new("{\"a\":1}\r\n{\"a\":2}\n"));
/// assert_eq!(reader.next_line().unwrap(), Some(&b"{\"a\":1}"[..]));
/// assert_eq!(reader.line_number(), 1);
/// assert_eq!(reader.next_line().unwrap(), Some(&b"{\"a\":2}"[..]));
/// assert_eq!(reader.next_line().unwrap(), None);
/// ```
pub struct JsonlReader<R> {
    /// Underlying buffered reader.
    reader: R,
    /// Current line number (1-based counting, 0 before any lines are read).
    line_number: usize,
    /// Scratch buffer reused across lines.
    buf: Vec<u8>,
}

impl<R: BufRead> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given buffered reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Returns the current line number.
    ///
    /// Returns 0 before any lines have been read. After reading, returns the
    /// 1-based line number of the last line read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next raw line, without its `\n` or `\r\n` terminator.
    ///
    /// A UTF-8 byte order mark at the start of the first line is stripped.
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails.
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut line: &[u8] = &self.buf;
        line = line.strip_suffix(b"\n").unwrap_or(line);
        line = line.strip_suffix(b"\r").unwrap_or(line);
        if self.line_number == 1 {
            line = line.strip_prefix(UTF8_BOM).unwrap_or(line);
        }
        Ok(Some(line))
    }

    /// Consumes the reader, returning the underlying reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Records parsed by a resilient load, together with the lines it skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// Records that parsed and validated, in file order.
    pub records: Vec<T>,
    /// One warning per skipped line, in file order.
    pub warnings: Vec<Warning>,
}

impl<T> Loaded<T> {
    /// Returns `true` when no lines were skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Splits into records and warnings.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Vec<Warning>) {
        (self.records, self.warnings)
    }
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Parses JSONL from `reader`, skipping bad lines instead of failing.
///
/// - Empty and whitespace-only lines are skipped silently.
/// - A line that is not valid JSON for `T` yields [`Warning::MalformedJson`].
/// - A line that parses but fails [`Validate`] yields [`Warning::InvalidRecord`].
///
/// # Errors
///
/// Only an I/O failure of the underlying reader aborts the load.
pub fn read_jsonl_resilient<T, R>(reader: R) -> Result<Loaded<T>>
where
    T: DeserializeOwned + Validate,
    R: BufRead,
{
    let mut reader = JsonlReader::new(reader);
    let mut loaded = Loaded::default();

    while let Some(line) = reader.next_line()? {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let parsed = serde_json::from_slice::<T>(line);
        let line_number = reader.line_number();

        let record = match parsed {
            Ok(record) => record,
            Err(e) => {
                warn!(line_number, error = %e, "Skipping malformed JSON line");
                loaded.warnings.push(Warning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                });
                continue;
            }
        };

        if let Err(reason) = record.validate() {
            warn!(line_number, %reason, "Skipping invalid record");
            loaded
                .warnings
                .push(Warning::InvalidRecord { line_number, reason });
            continue;
        }

        loaded.records.push(record);
    }

    Ok(loaded)
}

/// Loads a JSONL file resiliently.
///
/// A missing file is treated as an empty collection: no records, no
/// warnings, no error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be opened or read.
pub fn load_jsonl<T>(path: impl AsRef<Path>) -> Result<Loaded<T>>
where
    T: DeserializeOwned + Validate,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "JSONL file not found, treating as empty");
            return Ok(Loaded::default());
        }
        Err(e) => return Err(e.into()),
    };

    let loaded = read_jsonl_resilient(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        records = loaded.records.len(),
        warnings = loaded.warnings.len(),
        "Loaded JSONL collection"
    );
    Ok(loaded)
}
