//! Repository methods over the regsync tables.
//!
//! Each module adds methods to `RegDb` via `impl RegDb` blocks.

pub mod courses;
pub mod term_info;

use crate::RegDb;
use crate::columns::Record;
use crate::error::DatabaseError;

impl RegDb {
    /// Number of rows in the table backing `R`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count<R: Record>(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {}", R::TABLE), ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count)
            .map_err(|_| DatabaseError::InvalidState(format!("negative count {count}")))
    }
}
