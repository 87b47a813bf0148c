//! Snapshot reconciliation.
//!
//! [`Reconciler::reconcile`] merges one scraper snapshot into the store in
//! strictly ordered phases: professors, courses, course-identity refresh,
//! sections, freshness stamping, subjects and term infos, optional staleness
//! cleanup, and finally the downstream index trigger. No transaction spans
//! phases; every write is an idempotent upsert, so a failed run can simply be
//! repeated.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use reg_core::entities::{ClassRecord, ProfessorRecord, SectionRecord, TermDump, TermInfo};
use reg_core::requisite::{ClassIndex, prepare_requisites};
use reg_core::tunables::FRESHNESS_WINDOW;
use serde::Serialize;
use tracing::{info, warn};

use crate::RegDb;
use crate::columns::Record;
use crate::error::DatabaseError;
use crate::term_cache::TermInfoCache;
use crate::upsert::upsert_all;

/// Hook fired once at the end of every successful reconcile, typically to
/// rebuild a search index over the fresh data.
pub trait IndexTrigger: Send + Sync {
    fn trigger(&self);
}

impl<F> IndexTrigger for F
where
    F: Fn() + Send + Sync,
{
    fn trigger(&self) {
        self();
    }
}

/// Trigger that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrigger;

impl IndexTrigger for NoopTrigger {
    fn trigger(&self) {}
}

/// Per-phase counts from one reconcile run.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReconcileReport {
    pub started_at: Option<DateTime<Utc>>,
    pub professors: usize,
    pub courses: usize,
    pub sections: usize,
    /// Sections skipped for lacking an identity or a stored owning course.
    pub sections_dropped: usize,
    pub courses_stamped: u64,
    pub subjects: usize,
    pub term_infos: usize,
    pub courses_deleted: u64,
    pub covered_terms: Vec<String>,
}

/// Merges scraper snapshots into a [`RegDb`].
pub struct Reconciler<T: IndexTrigger = NoopTrigger> {
    db: RegDb,
    trigger: T,
    terms: TermInfoCache,
}

impl Reconciler<NoopTrigger> {
    #[must_use]
    pub fn new(db: RegDb) -> Self {
        Self::with_trigger(db, NoopTrigger)
    }
}

impl<T: IndexTrigger> Reconciler<T> {
    #[must_use]
    pub fn with_trigger(db: RegDb, trigger: T) -> Self {
        Self {
            db,
            trigger,
            terms: TermInfoCache::new(),
        }
    }

    #[must_use]
    pub const fn db(&self) -> &RegDb {
        &self.db
    }

    /// Cached term listing for a sub-college.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a cache refresh fails.
    pub async fn term_infos(&self, sub_college: &str) -> Result<Vec<TermInfo>, DatabaseError> {
        self.terms.get(&self.db, sub_college).await
    }

    /// Merge `snapshot` and `professors` into the store.
    ///
    /// With `destroy`, courses in the snapshot's terms that were not seen
    /// within [`FRESHNESS_WINDOW`] are deleted along with their sections.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` from the first failing phase; earlier phases
    /// stay committed.
    pub async fn reconcile(
        &self,
        snapshot: &TermDump,
        professors: &[ProfessorRecord],
        destroy: bool,
    ) -> Result<ReconcileReport, DatabaseError> {
        let now = Utc::now();
        let conn = self.db.conn();
        let mut report = ReconcileReport {
            started_at: Some(now),
            ..ReconcileReport::default()
        };

        let professors = keyed(professors.iter().cloned(), "professor");
        report.professors = upsert_all(conn, &professors, now).await?;
        info!(count = report.professors, "professors upserted");

        let index = ClassIndex::build(snapshot.classes.values());
        let courses: Vec<ClassRecord> = keyed(snapshot.classes.values().cloned(), "course")
            .iter()
            .map(|class| prepare_requisites(class, &index))
            .collect();
        let covered: BTreeSet<String> = courses.iter().map(|c| c.term_id.clone()).collect();
        report.covered_terms = covered.iter().cloned().collect();
        report.courses = upsert_all(conn, &courses, now).await?;
        info!(
            count = report.courses,
            terms = ?report.covered_terms,
            "courses upserted"
        );

        let stored_courses = self.db.course_ids().await?;
        let offered = snapshot.sections.len();
        let sections: Vec<SectionRecord> = snapshot
            .sections
            .values()
            .filter(|s| {
                s.class_hash()
                    .is_some_and(|owner| s.is_keyed() && stored_courses.contains(&owner))
            })
            .cloned()
            .collect();
        report.sections_dropped = offered - sections.len();
        report.sections = upsert_all(conn, &sections, now).await?;
        info!(
            count = report.sections,
            dropped = report.sections_dropped,
            "sections upserted"
        );

        let owners: BTreeSet<String> =
            sections.iter().filter_map(SectionRecord::class_hash).collect();
        report.courses_stamped = self.db.stamp_courses(owners, now).await?;
        info!(count = report.courses_stamped, "courses stamped fresh");

        let subjects = keyed(snapshot.subject_records(), "subject");
        report.subjects = upsert_all(conn, &subjects, now).await?;
        let term_infos = keyed(snapshot.term_infos.iter().cloned(), "term info");
        report.term_infos = upsert_all(conn, &term_infos, now).await?;
        if report.term_infos > 0 {
            self.terms.invalidate().await;
        }
        info!(
            subjects = report.subjects,
            term_infos = report.term_infos,
            "subjects and term infos upserted"
        );

        if destroy {
            let window = TimeDelta::from_std(FRESHNESS_WINDOW)
                .map_err(|e| DatabaseError::InvalidState(format!("freshness window: {e}")))?;
            report.courses_deleted = self.db.delete_stale_courses(&covered, now - window).await?;
            info!(count = report.courses_deleted, "stale courses deleted");
        }

        self.trigger.trigger();
        info!("downstream index triggered");

        Ok(report)
    }
}

/// Drop records without a complete identity, warning once per record.
fn keyed<R: Record>(records: impl IntoIterator<Item = R>, what: &str) -> Vec<R> {
    records
        .into_iter()
        .filter(|record| {
            let ok = record.is_keyed();
            if !ok {
                warn!(table = R::TABLE, "skipping {what} without a complete identity");
            }
            ok
        })
        .collect()
}
