//! Incremental JSON array output.
//!
//! Records are serialized as they arrive, so a long product run never holds
//! the whole export in memory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

/// Writes records to `W` as one JSON array, one record per line.
pub(crate) struct JsonArraySink<W: Write> {
    writer: W,
    count: usize,
}

impl JsonArraySink<BufWriter<File>> {
    /// Creates (or truncates) `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub(crate) fn create(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> JsonArraySink<W> {
    /// Starts the array on `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the opening bracket cannot be written.
    pub(crate) fn new(mut writer: W) -> anyhow::Result<Self> {
        writer.write_all(b"[")?;
        Ok(Self { writer, count: 0 })
    }

    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub(crate) fn emit<T: Serialize>(&mut self, record: &T) -> anyhow::Result<()> {
        if self.count > 0 {
            self.writer.write_all(b",")?;
        }
        self.writer.write_all(b"\n")?;
        serde_json::to_writer(&mut self.writer, record).context("failed to serialize record")?;
        self.count += 1;
        Ok(())
    }

    /// Closes the array and flushes. Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns an error if the closing bracket cannot be written or flushed.
    pub(crate) fn finish(mut self) -> anyhow::Result<usize> {
        if self.count > 0 {
            self.writer.write_all(b"\n")?;
        }
        self.writer.write_all(b"]\n")?;
        self.writer.flush()?;
        Ok(self.count)
    }
}
