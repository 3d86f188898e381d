//! Test utilities for the import pipeline

use super::ImportPipeline;
use crate::Error;
use crate::app::models::PostalRecord;
use crate::app::services::catalog_query::CatalogQueryService;
use crate::app::services::store::tests::{
    RecordingStore, create_test_store, seed_records, table_contents,
};
use crate::app::services::store::{CatalogStore, SqliteStore};
use crate::app::services::transcoding_reader::tests::FailingReader;
use crate::config::Config;


/// Header row matching the official export layout
pub const EXPORT_HEADER: &str = "d_codigo,d_asenta,d_tipo_asenta,D_mnpio,d_estado";

/// Encode UTF-8 text the way the export is published
pub fn windows_1252(text: &str) -> Vec<u8> {
    let (bytes, _, unmappable) = encoding_rs::WINDOWS_1252.encode(text);
    assert!(!unmappable, "fixture text must be representable in Windows-1252");
    bytes.into_owned()
}

/// Header plus three rows, one with an empty postal code
pub fn sample_export() -> Vec<u8> {
    windows_1252(&format!(
        "{}\r\n\
         12345,Centro,X,Cuauhtémoc,CDMX\r\n\
         ,Vacío,X,M,E\r\n\
         67890,Norte,X,Tlalnepantla,MEX\r\n",
        EXPORT_HEADER
    ))
}

/// Pipeline with default settings and a small batch size
pub fn pipeline() -> ImportPipeline {
    ImportPipeline::new(Config::default().with_batch_size(2)).unwrap()
}
