pub mod detector;
mod options;
mod record;
mod result;
mod row_reader;
mod source;

pub use detector::{detect_delimiter, DetectError, DEFAULT_DELIMITERS, DEFAULT_SAMPLE_LINES};
pub use options::{FieldCountPolicy, LineEndings, ReaderOptions, ReaderOptionsBuilder};
pub use record::{MappedRow, Record, Row};
pub use result::Result;
pub use row_reader::{RowReader, RowReaderError};
pub use source::{CsvSource, LineSource};
