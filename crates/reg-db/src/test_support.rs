//! Shared test utilities for reg-db unit tests.

pub(crate) mod helpers {
    use chrono::{DateTime, Utc};

    use crate::RegDb;
    use crate::helpers::format_timestamp;

    /// Fresh in-memory database with the schema applied.
    pub async fn test_db() -> RegDb {
        RegDb::open_local(":memory:").await.unwrap()
    }

    /// Insert a bare `neu.edu` CS course with the given freshness.
    pub async fn insert_course(db: &RegDb, term_id: &str, class_id: &str, at: DateTime<Utc>) {
        let id = format!("neu.edu/{term_id}/CS/{class_id}");
        db.conn()
            .execute(
                "INSERT INTO courses (id, host, term_id, subject, class_id, last_update_time)
                 VALUES (?1, 'neu.edu', ?2, 'CS', ?3, ?4)",
                libsql::params![id.as_str(), term_id, class_id, format_timestamp(at)],
            )
            .await
            .unwrap();
    }

    /// Insert a bare section under an existing CS course.
    pub async fn insert_section(db: &RegDb, term_id: &str, class_id: &str, crn: &str) {
        let class_hash = format!("neu.edu/{term_id}/CS/{class_id}");
        let id = format!("{class_hash}/{crn}");
        db.conn()
            .execute(
                "INSERT INTO sections (id, class_hash, host, term_id, subject, class_id, crn, last_update_time)
                 VALUES (?1, ?2, 'neu.edu', ?3, 'CS', ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    class_hash.as_str(),
                    term_id,
                    class_id,
                    crn,
                    format_timestamp(Utc::now())
                ],
            )
            .await
            .unwrap();
    }
}
