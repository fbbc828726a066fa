//! Snapshot serialization.

use std::io::{self, ErrorKind, Write};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::STDIO_MARKER;

use super::types::Snapshot;

/// Stdout wrapper that ignores broken pipe errors (e.g. when piped to `head`).
pub(crate) struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                // Ignore broken pipe - downstream command closed the pipe
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Opens a report destination: a file path, or stdout for `-`.
pub fn open_output(destination: &str) -> io::Result<Box<dyn Write>> {
    if destination == STDIO_MARKER {
        Ok(Box::new(IgnoreBrokenPipe::new(io::stdout())))
    } else {
        Ok(Box::new(std::fs::File::create(destination)?))
    }
}

/// Writes a snapshot as tab-indented JSON followed by a newline.
pub fn write_snapshot<W: Write>(mut writer: W, snapshot: &Snapshot) -> io::Result<()> {
    let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"\t"));
    snapshot.serialize(&mut serializer).map_err(io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Serializes a snapshot to bytes, exactly as [`write_snapshot`] writes it.
pub fn snapshot_to_vec(snapshot: &Snapshot) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"\t"));
    snapshot.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}
