/// One parsed line's ordered field list. Values are never coerced.
pub type Record = Vec<String>;

/// Header-keyed view of a data row, kept in header order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedRow {
    entries: Vec<(String, String)>,
}

impl MappedRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value for `key`. A repeated key keeps the position of its first
    /// occurrence and takes the newest value.
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MappedRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = MappedRow::new();
        for (key, value) in iter {
            row.insert(key.into(), value.into());
        }

        row
    }
}

/// A data row as handed to callers: raw fields without header mode, a mapping with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Fields(Record),
    Mapped(MappedRow),
}

impl Row {
    pub fn is_mapped(&self) -> bool {
        matches!(self, Row::Mapped(_))
    }

    pub fn fields(&self) -> Option<&Record> {
        match self {
            Row::Fields(fields) => Some(fields),
            Row::Mapped(_) => None,
        }
    }

    pub fn as_mapped(&self) -> Option<&MappedRow> {
        match self {
            Row::Mapped(mapped) => Some(mapped),
            Row::Fields(_) => None,
        }
    }
}
