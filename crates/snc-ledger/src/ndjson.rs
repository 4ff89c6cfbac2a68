//! NDJSON persistence for deed events.
//!
//! One JSON object per line, appended as deeds happen, streamed back
//! without loading whole files. Line numbers in errors are 1-indexed.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::deed::DeedLedger;
use crate::error::LedgerError;
use crate::types::DeedEvent;

/// Iterator over NDJSON deed events.
///
/// Parses lazily, one `Result<DeedEvent>` per line. Empty lines are
/// skipped.
pub struct DeedEvents<R: BufRead> {
    reader: R,
    line_buffer: String,
    line_number: usize,
}

impl<R: BufRead> DeedEvents<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_buffer: String::new(),
            line_number: 0,
        }
    }

    /// Current line number (1-indexed, for error messages).
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for DeedEvents<R> {
    type Item = Result<DeedEvent, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();

            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    self.line_number += 1;

                    let line = self.line_buffer.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let result =
                        serde_json::from_str::<DeedEvent>(line).map_err(|source| {
                            LedgerError::Malformed {
                                line: self.line_number,
                                source,
                            }
                        });
                    return Some(result);
                }
                Err(source) => {
                    return Some(Err(LedgerError::Read {
                        line: self.line_number + 1,
                        source,
                    }));
                }
            }
        }
    }
}

/// Read all deeds from a reader into a Vec. For streaming, use
/// [`DeedEvents`] directly.
pub fn read_deeds<R: BufRead>(reader: R) -> Result<Vec<DeedEvent>, LedgerError> {
    DeedEvents::new(reader).collect()
}

/// Read all deeds from a file. An absent file reads as an empty ledger.
pub fn read_deeds_path(path: impl AsRef<Path>) -> Result<Vec<DeedEvent>, LedgerError> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(LedgerError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    read_deeds(BufReader::new(file))
}

/// Load a file into a [`DeedLedger`], verifying every content hash.
pub fn load_ledger(path: impl AsRef<Path>) -> Result<DeedLedger, LedgerError> {
    DeedLedger::from_events(read_deeds_path(path)?)
}

/// Seal `event` if needed and append it as one NDJSON line, creating the
/// file on first use. Returns the event as written.
pub fn append_deed(path: impl AsRef<Path>, event: DeedEvent) -> Result<DeedEvent, LedgerError> {
    let path = path.as_ref();
    let event = match event.content_hash {
        Some(_) => {
            event.verify_hash()?;
            event
        }
        None => event.seal()?,
    };

    let line = serde_json::to_string(&event).map_err(|source| LedgerError::Serialize {
        id: event.id,
        source,
    })?;

    let io_err = |source| LedgerError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(line.as_bytes()).map_err(io_err)?;
    file.write_all(b"\n").map_err(io_err)?;

    tracing::debug!(deed = %event.id, path = %path.display(), "deed recorded");
    Ok(event)
}
