use crate::Result;

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use csv::ReaderBuilder;
use thiserror::Error;

/// Delimiters tried by [`detect_delimiter`] before any caller-supplied extras
pub const DEFAULT_DELIMITERS: [u8; 6] = [b',', b'\t', b'|', b':', b';', b'^'];

pub const DEFAULT_SAMPLE_LINES: usize = 10;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Couldn't open file for any delimiter candidate: {0:?}")]
    Unreadable(PathBuf),
}

/// Default delimiters followed by `extra`, repeats dropped in favour of their first position
pub fn candidates(extra: &[u8]) -> Vec<u8> {
    let mut merged = Vec::with_capacity(DEFAULT_DELIMITERS.len() + extra.len());

    for &delimiter in DEFAULT_DELIMITERS.iter().chain(extra) {
        if !merged.contains(&delimiter) {
            merged.push(delimiter);
        }
    }

    merged
}

/// Counts how many of the `sample_lines` records after the first one split into
/// more than one field and match the first record's field count.
pub fn score_reader<R: io::Read>(rdr: R, delimiter: u8, sample_lines: usize) -> usize {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(rdr);

    let mut records = reader.byte_records();

    let baseline = match records.next() {
        Some(Ok(record)) => record.len(),
        _ => return 0,
    };

    records
        .take(sample_lines)
        .map_while(|record| record.ok())
        .filter(|record| record.len() > 1 && record.len() == baseline)
        .count()
}

/// Picks the best delimiter for the file at `path` among the defaults and `extra`.
///
/// Returns `Ok(None)` when no candidate scores above zero.
pub fn detect_delimiter<P: AsRef<Path>>(
    path: P,
    sample_lines: usize,
    extra: &[u8],
) -> Result<Option<u8>> {
    detect_delimiter_from(path, sample_lines, &candidates(extra))
}

/// Scores each of `candidates` in order against a fresh handle on `path`.
///
/// The highest score wins; on a tie the earliest candidate is kept. A candidate
/// whose open fails scores zero, and only when every open fails is an error returned.
pub fn detect_delimiter_from<P: AsRef<Path>>(
    path: P,
    sample_lines: usize,
    candidates: &[u8],
) -> Result<Option<u8>> {
    let path = path.as_ref();

    if candidates.is_empty() {
        log::debug!("No delimiter candidates for {path:?}");
        return Ok(None);
    }

    let mut best: Option<(u8, usize)> = None;
    let mut opened = 0;

    for &delimiter in candidates {
        let score = match File::open(path) {
            Ok(file) => {
                opened += 1;
                score_reader(file, delimiter, sample_lines)
            }
            Err(e) => {
                log::warn!("Couldn't open {path:?} to score {:?}: {e}", delimiter as char);
                0
            }
        };

        log::debug!("Delimiter {:?} scored {score}", delimiter as char);

        match best {
            Some((_, max)) if score <= max => {}
            _ => best = Some((delimiter, score)),
        }
    }

    if opened == 0 {
        return Err(DetectError::Unreadable(path.to_path_buf()).into());
    }

    Ok(best
        .filter(|(_, score)| *score > 0)
        .map(|(delimiter, _)| delimiter))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn table(delimiter: char, rows: usize) -> String {
        let mut content = ["id", "name", "amount"].join(&delimiter.to_string());
        content.push('\n');

        for idx in 0..rows {
            let row = [idx.to_string(), format!("name{idx}"), format!("{idx}00")];
            content.push_str(&row.join(&delimiter.to_string()));
            content.push('\n');
        }

        content
    }

    #[test]
    fn merged_candidates() {
        assert_eq!(candidates(&[]), DEFAULT_DELIMITERS.to_vec());
        assert_eq!(
            candidates(&[b'#', b',', b'~', b'#']),
            vec![b',', b'\t', b'|', b':', b';', b'^', b'#', b'~']
        );
    }

    #[test]
    fn score_counts_matching_lines() {
        let data = "a,b,c\n1,2,3\n1,2\n4,5,6\n";

        assert_eq!(score_reader(data.as_bytes(), b',', 10), 2);
        assert_eq!(score_reader(data.as_bytes(), b';', 10), 0);
    }

    #[test]
    fn score_respects_sample_size() {
        let data = table(',', 20);

        assert_eq!(score_reader(data.as_bytes(), b',', 5), 5);
        assert_eq!(score_reader(data.as_bytes(), b',', 100), 20);
        assert_eq!(score_reader(data.as_bytes(), b',', 0), 0);
    }

    #[test]
    fn score_of_empty_input() {
        assert_eq!(score_reader("".as_bytes(), b',', 10), 0);
    }

    #[test]
    fn single_field_lines_never_score() {
        let data = "a\nb\nc\n";

        assert_eq!(score_reader(data.as_bytes(), b',', 10), 0);
    }

    #[test]
    fn detects_each_default_delimiter() {
        for delimiter in DEFAULT_DELIMITERS {
            let file = write_file(&table(delimiter as char, 4));

            assert_eq!(
                detect_delimiter(file.path(), DEFAULT_SAMPLE_LINES, &[]).unwrap(),
                Some(delimiter),
                "delimiter {:?}",
                delimiter as char
            );
        }
    }

    #[test]
    fn detects_extra_delimiter() {
        let file = write_file(&table('~', 4));

        assert_eq!(
            detect_delimiter(file.path(), DEFAULT_SAMPLE_LINES, &[]).unwrap(),
            None
        );
        assert_eq!(
            detect_delimiter(file.path(), DEFAULT_SAMPLE_LINES, &[b'~']).unwrap(),
            Some(b'~')
        );
    }

    #[test]
    fn tie_goes_to_first_candidate() {
        let file = write_file("a,b#c\n1,2#3\n4,5#6\n");

        assert_eq!(
            detect_delimiter(file.path(), DEFAULT_SAMPLE_LINES, &[b'#']).unwrap(),
            Some(b',')
        );
        assert_eq!(
            detect_delimiter_from(file.path(), DEFAULT_SAMPLE_LINES, &[b'#', b',']).unwrap(),
            Some(b'#')
        );
    }

    #[test]
    fn higher_score_beats_earlier_candidate() {
        let file = write_file("a;b;c,d\n1;2;3,4\n5;6;7\n8;9;0\n");

        assert_eq!(
            detect_delimiter(file.path(), DEFAULT_SAMPLE_LINES, &[]).unwrap(),
            Some(b';')
        );
    }

    #[test]
    fn no_positive_score() {
        let file = write_file("single\ncolumn\nfile\n");

        assert_eq!(
            detect_delimiter(file.path(), DEFAULT_SAMPLE_LINES, &[]).unwrap(),
            None
        );
    }

    #[test]
    fn empty_candidates() {
        let file = write_file(&table(',', 2));

        assert_eq!(
            detect_delimiter_from(file.path(), DEFAULT_SAMPLE_LINES, &[]).unwrap(),
            None
        );
    }

    #[test]
    fn unreadable_file() {
        let err = detect_delimiter("./does/not/exist.csv", DEFAULT_SAMPLE_LINES, &[]).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DetectError>(),
            Some(DetectError::Unreadable(_))
        ));
    }
}
