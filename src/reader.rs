use crate::args::InputArgs;

use ecsv::{detect_delimiter, CsvSource, ReaderOptions, Result, RowReader, DEFAULT_SAMPLE_LINES};

use std::fs::File;

const FALLBACK_DELIMITER: u8 = b',';

/// Resolves the delimiter (given or detected) and opens a reader with it
pub fn build_row_reader(args: &InputArgs) -> Result<(u8, RowReader<CsvSource<File>>)> {
    let delimiter = match args.delimiter {
        Some(delimiter) => delimiter,
        None => detect_delimiter(&args.path, DEFAULT_SAMPLE_LINES, &[])?.unwrap_or_else(|| {
            log::warn!("Couldn't detect a delimiter, falling back to {:?}", FALLBACK_DELIMITER as char);
            FALLBACK_DELIMITER
        }),
    };

    let options = ReaderOptions::builder()
        .with_delimiter(delimiter)
        .with_headers(args.has_headers)
        .build();

    let reader = RowReader::from_path(&args.path, options)?;

    return Ok((delimiter, reader));
}
