use csv::{Terminator, Trim};

/// Line-ending convention used when splitting records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEndings {
    /// Accept Unix (`\n`), DOS (`\r\n`) and old Mac (`\r`) endings.
    #[default]
    Auto,
    /// Only `\n` ends a record; a stray `\r` stays part of the field.
    Unix,
}

impl LineEndings {
    pub fn terminator(self) -> Terminator {
        match self {
            LineEndings::Auto => Terminator::CRLF,
            LineEndings::Unix => Terminator::Any(b'\n'),
        }
    }
}

/// What to do when a data row and the header disagree on field count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldCountPolicy {
    /// Pair positionally up to the shorter of the two, warning about the rest.
    #[default]
    Truncate,
    /// Fill missing values with empty strings, drop surplus values.
    Pad,
    /// Fail the row.
    Reject,
}

/// A builder for [`ReaderOptions`].
#[derive(Debug)]
pub struct ReaderOptionsBuilder {
    /// The byte used as a field delimiter.
    delimiter: u8,
    /// The byte used to enclose fields.
    quote: u8,
    /// Whether the first record holds the field names.
    has_headers: bool,
    /// Whether surrounding whitespace is trimmed from fields.
    trim: bool,
    line_endings: LineEndings,
    field_count_policy: FieldCountPolicy,
}

impl ReaderOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_line_endings(mut self, line_endings: LineEndings) -> Self {
        self.line_endings = line_endings;
        self
    }

    pub fn with_field_count_policy(mut self, policy: FieldCountPolicy) -> Self {
        self.field_count_policy = policy;
        self
    }

    pub fn build(self) -> ReaderOptions {
        ReaderOptions {
            delimiter: self.delimiter,
            quote: self.quote,
            has_headers: self.has_headers,
            trim: self.trim,
            line_endings: self.line_endings,
            field_count_policy: self.field_count_policy,
        }
    }
}

impl Default for ReaderOptionsBuilder {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            has_headers: true,
            trim: false,
            line_endings: LineEndings::default(),
            field_count_policy: FieldCountPolicy::default(),
        }
    }
}

/// Configuration for a [`crate::RowReader`] and the source underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    delimiter: u8,
    quote: u8,
    has_headers: bool,
    trim: bool,
    line_endings: LineEndings,
    field_count_policy: FieldCountPolicy,
}

impl ReaderOptions {
    pub fn builder() -> ReaderOptionsBuilder {
        ReaderOptionsBuilder::new()
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn quote(&self) -> u8 {
        self.quote
    }

    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    pub fn trim(&self) -> Trim {
        if self.trim {
            Trim::All
        } else {
            Trim::None
        }
    }

    pub fn line_endings(&self) -> LineEndings {
        self.line_endings
    }

    pub fn field_count_policy(&self) -> FieldCountPolicy {
        self.field_count_policy
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptionsBuilder::default().build()
    }
}
