//! Catalog table creation and derived index maintenance

use tracing::{debug, info};

use super::CatalogStore;
use crate::Result;
use crate::constants::{CATALOG_INDEXES, CATALOG_TABLE, CREATE_TABLE_SQL};

/// Create the catalog table if it does not exist yet
pub fn ensure_schema<S: CatalogStore + ?Sized>(store: &mut S) -> Result<()> {
    store.execute_raw(CREATE_TABLE_SQL)
}

/// Drop the derived lookup indexes ahead of a bulk load
pub fn drop_indexes<S: CatalogStore + ?Sized>(store: &mut S) -> Result<()> {
    for (name, _) in CATALOG_INDEXES {
        store.execute_raw(&format!("DROP INDEX IF EXISTS {}", name))?;
        debug!("Dropped index {}", name);
    }
    Ok(())
}

/// Rebuild the derived lookup indexes from the table contents
///
/// Uses `CREATE INDEX IF NOT EXISTS`, so running it against a table that
/// already has the indexes is a no-op rather than an error.
pub fn rebuild_indexes<S: CatalogStore + ?Sized>(store: &mut S) -> Result<()> {
    for (name, columns) in CATALOG_INDEXES {
        store.execute_raw(&format!(
            "CREATE INDEX IF NOT EXISTS {} ON {}({})",
            name, CATALOG_TABLE, columns
        ))?;
        debug!("Index {} ready", name);
    }
    info!("Rebuilt {} catalog indexes", CATALOG_INDEXES.len());
    Ok(())
}
