use crate::{
    CsvSource, FieldCountPolicy, LineSource, MappedRow, ReaderOptions, Record, Result, Row,
};

use std::{collections::HashSet, fs::File, path::Path};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowReaderError {
    #[error("Field count mismatch on data row {line}: header has {expected} fields, row has {found}")]
    FieldCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Header record couldn't be read: {0}")]
    HeaderUnreadable(String),
}

/// Lifecycle of the header state. Leaves `Uninitialized` exactly once.
#[derive(Debug)]
enum State {
    Uninitialized,
    Initialized { headers: Option<Record> },
    /// The header read failed; every later access reports it
    Failed { reason: String },
}

/// Forward-only reader handing out rows from a [`LineSource`], either as raw field
/// lists or keyed by the header captured from the first record.
#[derive(Debug)]
pub struct RowReader<S> {
    source: S,
    options: ReaderOptions,
    state: State,
    line: usize,
}

impl RowReader<CsvSource<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let source = CsvSource::from_path(path, &options)?;
        Ok(Self::new(source, options))
    }
}

impl<S: LineSource> RowReader<S> {
    pub fn new(source: S, options: ReaderOptions) -> Self {
        Self {
            source,
            options,
            state: State::Uninitialized,
            line: 0,
        }
    }

    /// Returns the header record, or `None` when header mode is off or the input was empty
    pub fn get_headers(&mut self) -> Result<Option<&Record>> {
        self.init()?;

        match &self.state {
            State::Initialized { headers } => Ok(headers.as_ref()),
            _ => Ok(None),
        }
    }

    /// Returns the next data row, or `None` once the source is drained
    pub fn get_row(&mut self) -> Result<Option<Row>> {
        self.init()?;

        let record = match self.next_record()? {
            Some(record) => record,
            None => return Ok(None),
        };

        let row = match &self.state {
            State::Initialized {
                headers: Some(headers),
            } => Row::Mapped(map_record(
                headers,
                record,
                self.options.field_count_policy(),
                self.line + 1,
            )?),
            _ => Row::Fields(record),
        };

        self.line += 1;

        Ok(Some(row))
    }

    /// Drains every remaining row
    pub fn get_all(&mut self) -> Result<Vec<Row>> {
        let mut rows = vec![];

        while let Some(row) = self.get_row()? {
            rows.push(row);
        }

        log::debug!("Drained {} rows", rows.len());

        Ok(rows)
    }

    /// Yields rows until the end of input or the first error, whichever comes first
    pub fn rows(&mut self) -> impl Iterator<Item = Result<Row>> + '_ {
        let mut done = false;

        std::iter::from_fn(move || {
            if done {
                return None;
            }

            let next = self.get_row().transpose();
            done = !matches!(next, Some(Ok(_)));

            next
        })
    }

    /// Count of data rows handed out so far. The header row is never counted.
    pub fn line_number(&self) -> usize {
        self.line
    }

    fn init(&mut self) -> Result {
        match &self.state {
            State::Initialized { .. } => return Ok(()),
            State::Failed { reason } => {
                return Err(RowReaderError::HeaderUnreadable(reason.clone()).into())
            }
            State::Uninitialized => {}
        }

        let headers = if self.options.has_headers() {
            self.next_record()
        } else {
            Ok(None)
        };

        let headers = match headers {
            Ok(headers) => headers,
            Err(e) => {
                let reason = format!("{e:#}");
                log::warn!("Header record couldn't be read: {reason}");
                self.state = State::Failed {
                    reason: reason.clone(),
                };
                return Err(RowReaderError::HeaderUnreadable(reason).into());
            }
        };

        if let Some(headers) = &headers {
            log::debug!("Captured headers: {headers:?}");
            warn_duplicates(headers);
        }

        self.state = State::Initialized { headers };

        Ok(())
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        if self.source.is_exhausted() {
            return Ok(None);
        }

        self.source.next_record()
    }
}

fn map_record(
    headers: &Record,
    record: Record,
    policy: FieldCountPolicy,
    line: usize,
) -> Result<MappedRow> {
    let expected = headers.len();
    let found = record.len();

    if expected == found {
        return Ok(headers.iter().cloned().zip(record).collect());
    }

    match policy {
        FieldCountPolicy::Reject => Err(RowReaderError::FieldCountMismatch {
            line,
            expected,
            found,
        }
        .into()),
        FieldCountPolicy::Truncate => {
            log::warn!("Data row {line} has {found} fields, header has {expected}: truncating");

            Ok(headers.iter().cloned().zip(record).collect())
        }
        FieldCountPolicy::Pad => {
            if found > expected {
                log::warn!("Data row {line} has {found} fields, header has {expected}: dropping surplus");
            }

            let mut values = record.into_iter();

            Ok(headers
                .iter()
                .map(|header| (header.clone(), values.next().unwrap_or_default()))
                .collect())
        }
    }
}

fn warn_duplicates(headers: &Record) {
    let mut seen = HashSet::new();

    for header in headers {
        if !seen.insert(header) {
            log::warn!("Duplicate header {header:?}: later values overwrite earlier ones");
        }
    }
}
