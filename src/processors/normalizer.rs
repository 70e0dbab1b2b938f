use crate::models::RawTable;

/// Strips incidental whitespace from raw column names.
///
/// Source exports routinely carry headers like ` _tempm`; everything
/// downstream binds columns by exact name, so normalization runs first.
/// Row order and cell values pass through untouched, and the operation is
/// idempotent.
pub struct SchemaNormalizer;

impl SchemaNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, table: RawTable) -> RawTable {
        let headers = table
            .headers
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect();

        RawTable {
            headers,
            rows: table.rows,
        }
    }
}

impl Default for SchemaNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
