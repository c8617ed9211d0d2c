use crate::{ReaderOptions, Record, Result};

use std::{fs::File, io, path::Path};

use anyhow::Context;
use csv::{ByteRecord, Reader, ReaderBuilder};

/// Forward-only supplier of parsed records
pub trait LineSource {
    /// True once the underlying input has nothing left to hand out
    fn is_exhausted(&self) -> bool;

    /// Reads and parses the next record. `Ok(None)` means nothing was read.
    fn next_record(&mut self) -> Result<Option<Record>>;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        (**self).next_record()
    }
}

/// [`LineSource`] backed by the `csv` tokenizer
#[derive(Debug)]
pub struct CsvSource<R> {
    reader: Reader<R>,
    buffer: ByteRecord,
}

impl CsvSource<File> {
    pub fn from_path<P: AsRef<Path>>(path: P, options: &ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let reader = builder(options)
            .from_path(path)
            .with_context(|| format!("Couldn't open csv source: {path:?}"))?;

        Ok(Self::new(reader))
    }
}

impl<R: io::Read> CsvSource<R> {
    pub fn from_reader(rdr: R, options: &ReaderOptions) -> Self {
        Self::new(builder(options).from_reader(rdr))
    }

    fn new(reader: Reader<R>) -> Self {
        Self {
            reader,
            buffer: ByteRecord::new(),
        }
    }
}

impl<R: io::Read> LineSource for CsvSource<R> {
    fn is_exhausted(&self) -> bool {
        self.reader.is_done()
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        if !self.reader.read_byte_record(&mut self.buffer)? {
            return Ok(None);
        }

        // Undecodable bytes become U+FFFD rather than failing the record
        Ok(Some(
            self.buffer
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        ))
    }
}

/// Header handling, field-count checks and blank lines are left to callers; the
/// tokenizer only splits.
fn builder(options: &ReaderOptions) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter())
        .quote(options.quote())
        .trim(options.trim())
        .terminator(options.line_endings().terminator());

    builder
}
