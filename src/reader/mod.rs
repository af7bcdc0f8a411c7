//! Input reader: lazy, chunked CSV row source.
//!
//! Tables are read in fixed-size chunks so a large campaign never has to fit
//! in memory. Every value is kept as a raw string; phone numbers with leading
//! zeros or formatting survive untouched.

use std::fs::File;
use std::path::Path;

/// Rows per chunk when the caller does not override it.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Columns every input table must provide.
pub const REQUIRED_COLUMNS: [&str; 2] = ["phone_number", "message"];

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("could not open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("[{table}] is missing required column: {column}")]
    MissingColumn { table: String, column: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One input row, reduced to the fields the dispatcher needs.
pub struct InputRow {
    pub phone_number: String,
    pub message: String,
}

/// Read just the header row of a table.
///
/// Used by validation to check required columns before any dispatching
/// starts.
pub fn read_header(path: &Path) -> Result<Vec<String>, ReadError> {
    let file = File::open(path).map_err(|source| ReadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers().map_err(|source| ReadError::Csv {
        path: path.display().to_string(),
        source,
    })?;
    Ok(headers.iter().map(str::to_owned).collect())
}

/// Lazy iterator over chunks of rows from one table.
///
/// Yields `Vec<InputRow>` of at most `chunk_size` rows, in file order. The
/// iterator is finite and non-restartable; a CSV error ends it after the
/// error is yielded.
pub struct RowChunks {
    records: csv::StringRecordsIntoIter<File>,
    path: String,
    phone_idx: usize,
    message_idx: usize,
    chunk_size: usize,
    done: bool,
}

impl RowChunks {
    /// Open a table for chunked reading.
    ///
    /// Fails with [`ReadError::MissingColumn`] when the header lacks
    /// `phone_number` or `message`. Extra columns are ignored.
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self, ReadError> {
        let display = path.display().to_string();
        let file = File::open(path).map_err(|source| ReadError::Io {
            path: display.clone(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = reader.headers().map_err(|source| ReadError::Csv {
            path: display.clone(),
            source,
        })?;

        let mut column = |name: &'static str| -> Result<usize, ReadError> {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or(ReadError::MissingColumn {
                    table: display.clone(),
                    column: name,
                })
        };
        let phone_idx = column("phone_number")?;
        let message_idx = column("message")?;

        Ok(Self {
            records: reader.into_records(),
            path: display,
            phone_idx,
            message_idx,
            chunk_size: chunk_size.max(1),
            done: false,
        })
    }

    /// Open with the default chunk size of [`DEFAULT_CHUNK_SIZE`].
    pub fn open_default(path: &Path) -> Result<Self, ReadError> {
        Self::open(path, DEFAULT_CHUNK_SIZE)
    }
}

impl Iterator for RowChunks {
    type Item = Result<Vec<InputRow>, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = Vec::with_capacity(self.chunk_size);
        while chunk.len() < self.chunk_size {
            match self.records.next() {
                Some(Ok(record)) => {
                    chunk.push(InputRow {
                        phone_number: record.get(self.phone_idx).unwrap_or("").to_owned(),
                        message: record.get(self.message_idx).unwrap_or("").to_owned(),
                    });
                }
                Some(Err(source)) => {
                    self.done = true;
                    return Some(Err(ReadError::Csv {
                        path: self.path.clone(),
                        source,
                    }));
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if chunk.is_empty() {
            None
        } else {
            Some(Ok(chunk))
        }
    }
}
