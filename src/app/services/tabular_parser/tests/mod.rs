//! Test utilities for the tabular parser

use super::{TabularParser, verify_header};
use crate::{Error, Result};
use csv::StringRecord;


/// Parse a UTF-8 string and collect every row, failing on the first error
pub fn parse_rows(content: &str) -> Vec<StringRecord> {
    TabularParser::new(content.as_bytes())
        .unwrap()
        .collect::<Result<Vec<_>>>()
        .unwrap()
}

/// Fields of a record as owned strings
pub fn fields(record: &StringRecord) -> Vec<String> {
    record.iter().map(|f| f.to_string()).collect()
}

/// Header row matching the official export layout
pub const EXPORT_HEADER: &str = "d_codigo,d_asenta,d_tipo_asenta,D_mnpio,d_estado,d_ciudad,d_CP";
