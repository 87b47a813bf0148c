//! Term listing queries.

use reg_core::entities::TermInfo;

use crate::RegDb;
use crate::error::DatabaseError;

fn row_to_term_info(row: &libsql::Row) -> Result<TermInfo, DatabaseError> {
    Ok(TermInfo {
        term_id: row.get::<String>(0)?,
        sub_college: row.get::<String>(1)?,
        text: row.get::<String>(2)?,
    })
}

impl RegDb {
    /// Terms offered by a sub-college, newest term first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_term_infos(&self, sub_college: &str) -> Result<Vec<TermInfo>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT term_id, sub_college, text FROM term_info WHERE sub_college = ?1 ORDER BY term_id DESC",
                [sub_college],
            )
            .await?;
        let mut terms = Vec::new();
        while let Some(row) = rows.next().await? {
            terms.push(row_to_term_info(&row)?);
        }
        Ok(terms)
    }
}
