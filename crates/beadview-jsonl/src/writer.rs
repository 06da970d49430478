//! JSONL writing operations.
//!
//! This module provides buffered writing of values in JSONL format: each
//! value is serialized to a single compact JSON line followed by `\n`.

use crate::Result;
use serde::Serialize;
use std::io::{BufWriter, Write};

/// Writer for JSONL (JSON Lines) data.
///
/// # Examples
///
/// ```
/// use beadview_jsonl::JsonlWriter;
///
/// let mut writer = JsonlWriter::new(Vec::new());
/// writer.write(&serde_json::json!({"id": 1})).unwrap();
/// let bytes = writer.into_inner().unwrap();
/// assert_eq!(bytes, b"{\"id\":1}\n");
/// ```
pub struct JsonlWriter<W: Write> {
    /// Buffered writer wrapping the underlying writer.
    writer: BufWriter<W>,
}

impl<W: Write> JsonlWriter<W> {
    /// Creates a new `JsonlWriter` wrapping the given writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Creates a new `JsonlWriter` with a custom buffer capacity.
    #[must_use]
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, writer),
        }
    }

    /// Serializes `value` as one JSON line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Writes every value from `values`, one per line.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first serialization or I/O error.
    pub fn write_all<T, I>(&mut self, values: I) -> Result<()>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.write(&value)?;
        }
        Ok(())
    }

    /// Flushes buffered data to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails to flush.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::Error::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestRecord {
        id: u32,
        name: String,
    }

    #[test]
    fn write_emits_one_line_per_value() {
        let mut writer = JsonlWriter::new(Vec::new());
        writer
            .write_all([
                TestRecord {
                    id: 1,
                    name: "Alice".to_string(),
                },
                TestRecord {
                    id: 2,
                    name: "Bob".to_string(),
                },
            ])
            .unwrap();

        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            output,
            "{\"id\":1,\"name\":\"Alice\"}\n{\"id\":2,\"name\":\"Bob\"}\n"
        );
    }

    #[test]
    fn embedded_newlines_stay_on_one_line() {
        let mut writer = JsonlWriter::with_capacity(Vec::new(), 16);
        writer
            .write(&TestRecord {
                id: 1,
                name: "line one\nline two".to_string(),
            })
            .unwrap();

        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("line one\\nline two"));
    }

    #[test]
    fn empty_iterator_writes_nothing() {
        let mut writer = JsonlWriter::new(Vec::new());
        writer.write_all(Vec::<TestRecord>::new()).unwrap();
        writer.flush().unwrap();
        assert!(writer.into_inner().unwrap().is_empty());
    }
}
