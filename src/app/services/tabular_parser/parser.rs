//! Row iterator over the transcoded stream

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use tracing::debug;

use crate::Result;

/// Lazy, single-pass sequence of data rows
///
/// The first row is always consumed as the header and never yielded,
/// whatever it contains. Malformed quoting and ragged rows are accepted;
/// only I/O failures and invalid UTF-8 end the iteration with an error,
/// after which the iterator is exhausted.
pub struct TabularParser<R: Read> {
    headers: StringRecord,
    records: StringRecordsIntoIter<R>,
    rows_yielded: usize,
    failed: bool,
}

impl<R: Read> TabularParser<R> {
    /// Build a parser and read the header row
    pub fn new(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(true)
            .double_quote(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        debug!("Header row has {} columns", headers.len());

        Ok(Self {
            headers,
            records: csv_reader.into_records(),
            rows_yielded: 0,
            failed: false,
        })
    }

    /// The header row (empty for an empty input)
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Data rows yielded so far
    pub fn rows_yielded(&self) -> usize {
        self.rows_yielded
    }

    /// The underlying byte source
    pub fn source(&self) -> &R {
        self.records.reader().get_ref()
    }
}

impl<R: Read> Iterator for TabularParser<R> {
    type Item = Result<StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.records.next()? {
            Ok(record) => {
                self.rows_yielded += 1;
                Some(Ok(record))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e.into()))
            }
        }
    }
}
