//! Column tables for every persisted record type.

use reg_core::entities::{ClassRecord, ProfessorRecord, SectionRecord, SubjectRecord, TermInfo};

use crate::columns::{Column, Field, Record};

impl Record for ProfessorRecord {
    const TABLE: &'static str = "professors";
    const CONFLICT_KEY: &'static [&'static str] = &["id"];
    const COLUMNS: &'static [Column<Self>] = &[
        Column::new("id", |p: &Self| Field::key(Some(p.id.clone()))),
        Column::new("name", |p: &Self| Field::opt_text(p.name.as_deref())),
        Column::new("first_name", |p: &Self| Field::opt_text(p.first_name.as_deref())),
        Column::new("last_name", |p: &Self| Field::opt_text(p.last_name.as_deref())),
        Column::new("phone", |p: &Self| Field::opt_text(p.phone.as_deref())),
        Column::new("email", |p: &Self| Field::opt_text(p.email.as_deref())),
        Column::new("primary_role", |p: &Self| Field::opt_text(p.primary_role.as_deref())),
        Column::new("primary_department", |p: &Self| {
            Field::opt_text(p.primary_department.as_deref())
        }),
        Column::new("office_room", |p: &Self| Field::opt_text(p.office_room.as_deref())),
        Column::new("url", |p: &Self| Field::opt_text(p.url.as_deref())),
        Column::new("personal_site", |p: &Self| Field::opt_text(p.personal_site.as_deref())),
        Column::new("google_scholar_id", |p: &Self| {
            Field::opt_text(p.google_scholar_id.as_deref())
        }),
        Column::new("big_picture_url", |p: &Self| {
            Field::opt_text(p.big_picture_url.as_deref())
        }),
        Column::new("pic", |p: &Self| Field::json(p.pic.as_ref())),
    ];

    fn is_keyed(&self) -> bool {
        !self.id.is_empty()
    }
}

impl Record for ClassRecord {
    const TABLE: &'static str = "courses";
    const CONFLICT_KEY: &'static [&'static str] = &["id"];
    const COLUMNS: &'static [Column<Self>] = &[
        Column::new("id", |c: &Self| Field::key(c.hash())),
        Column::new("host", |c: &Self| Field::text(&c.host)),
        Column::new("term_id", |c: &Self| Field::text(&c.term_id)),
        Column::new("subject", |c: &Self| Field::text(&c.subject)),
        Column::new("class_id", |c: &Self| Field::text(&c.class_id)),
        Column::new("name", |c: &Self| Field::opt_text(c.name.as_deref())),
        Column::new("description", |c: &Self| Field::opt_text(c.description.as_deref())),
        Column::new("min_credits", |c: &Self| Field::Integer(c.min_credits)),
        Column::new("max_credits", |c: &Self| Field::Integer(c.max_credits)),
        Column::new("prereqs", |c: &Self| Field::json(c.prereqs.as_ref())),
        Column::new("coreqs", |c: &Self| Field::json(c.coreqs.as_ref())),
        Column::new("prereqs_for", |c: &Self| Field::json(c.prereqs_for.as_ref())),
        Column::new("opt_prereqs_for", |c: &Self| Field::json(c.opt_prereqs_for.as_ref())),
        Column::new("class_attributes", |c: &Self| Field::array(&c.class_attributes)),
        Column::new("nupath", |c: &Self| Field::array(&c.nupath)),
        Column::new("url", |c: &Self| Field::opt_text(c.url.as_deref())),
        Column::new("pretty_url", |c: &Self| Field::opt_text(c.pretty_url.as_deref())),
        Column::new("fee_amount", |c: &Self| Field::Integer(c.fee_amount)),
        Column::new("fee_description", |c: &Self| {
            Field::opt_text(c.fee_description.as_deref())
        }),
        Column::latest("last_update_time", |c: &Self| Field::Timestamp(c.last_update_time)),
    ];

    fn is_keyed(&self) -> bool {
        self.hash().is_some()
    }
}

impl Record for SectionRecord {
    const TABLE: &'static str = "sections";
    const CONFLICT_KEY: &'static [&'static str] = &["id"];
    const COLUMNS: &'static [Column<Self>] = &[
        Column::new("id", |s: &Self| Field::key(s.hash())),
        Column::new("class_hash", |s: &Self| Field::key(s.class_hash())),
        Column::new("host", |s: &Self| Field::text(&s.host)),
        Column::new("term_id", |s: &Self| Field::text(&s.term_id)),
        Column::new("subject", |s: &Self| Field::text(&s.subject)),
        Column::new("class_id", |s: &Self| Field::text(&s.class_id)),
        Column::new("crn", |s: &Self| Field::text(&s.crn)),
        Column::new("seats_capacity", |s: &Self| Field::Integer(s.seats_capacity)),
        Column::new("seats_remaining", |s: &Self| Field::Integer(s.seats_remaining)),
        Column::new("wait_capacity", |s: &Self| Field::Integer(s.wait_capacity)),
        Column::new("wait_remaining", |s: &Self| Field::Integer(s.wait_remaining)),
        Column::new("meetings", |s: &Self| Field::json(Some(&s.meetings))),
        Column::new("profs", |s: &Self| Field::array(&s.profs)),
        Column::new("campus", |s: &Self| Field::opt_text(s.campus.as_deref())),
        Column::new("honors", |s: &Self| Field::Boolean(s.honors)),
        Column::new("online", |s: &Self| Field::Boolean(s.online)),
        Column::new("url", |s: &Self| Field::opt_text(s.url.as_deref())),
        Column::latest("last_update_time", |s: &Self| Field::Timestamp(s.last_update_time)),
    ];

    fn is_keyed(&self) -> bool {
        self.hash().is_some()
    }
}

impl Record for SubjectRecord {
    const TABLE: &'static str = "subjects";
    const CONFLICT_KEY: &'static [&'static str] = &["abbreviation"];
    const COLUMNS: &'static [Column<Self>] = &[
        Column::new("abbreviation", |s: &Self| Field::key(Some(s.abbreviation.clone()))),
        Column::new("description", |s: &Self| Field::text(&s.description)),
    ];

    fn is_keyed(&self) -> bool {
        !self.abbreviation.is_empty()
    }
}

impl Record for TermInfo {
    const TABLE: &'static str = "term_info";
    const CONFLICT_KEY: &'static [&'static str] = &["term_id", "sub_college"];
    const COLUMNS: &'static [Column<Self>] = &[
        Column::new("term_id", |t: &Self| Field::key(Some(t.term_id.clone()))),
        Column::new("sub_college", |t: &Self| Field::key(Some(t.sub_college.clone()))),
        Column::new("text", |t: &Self| Field::text(&t.text)),
    ];

    fn is_keyed(&self) -> bool {
        !self.term_id.is_empty() && !self.sub_college.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use reg_core::requisite::Requisite;

    use super::*;

    fn columns<R: Record>() -> Vec<&'static str> {
        R::COLUMNS.iter().map(|c| c.name).collect()
    }

    #[test]
    fn conflict_keys_are_columns() {
        fn check<R: Record>() {
            for key in R::CONFLICT_KEY {
                assert!(columns::<R>().contains(key), "{}: {key}", R::TABLE);
            }
        }
        check::<ProfessorRecord>();
        check::<ClassRecord>();
        check::<SectionRecord>();
        check::<SubjectRecord>();
        check::<TermInfo>();
    }

    #[test]
    fn course_row_encoding() {
        let now = DateTime::from_timestamp_millis(1_610_000_000_000).unwrap();
        let class = ClassRecord {
            host: "neu.edu".into(),
            term_id: "202110".into(),
            subject: "CS".into(),
            class_id: "2500".into(),
            name: Some("Fundamentals of Computer Science 1".into()),
            min_credits: Some(0),
            prereqs: Some(Requisite::and(vec![Requisite::course("CS", "1800")])),
            ..Default::default()
        };
        let row: Vec<libsql::Value> = class.encode_row(now).collect::<Result<_, _>>().unwrap();
        let by_name = |name: &str| {
            let idx = columns::<ClassRecord>()
                .iter()
                .position(|c| *c == name)
                .unwrap();
            row[idx].clone()
        };

        assert_eq!(by_name("id"), libsql::Value::Text("neu.edu/202110/CS/2500".into()));
        assert_eq!(by_name("min_credits"), libsql::Value::Integer(0));
        assert_eq!(by_name("max_credits"), libsql::Value::Null);
        assert_eq!(by_name("description"), libsql::Value::Text(String::new()));
        assert_eq!(by_name("coreqs"), libsql::Value::Text("{}".into()));
        assert_eq!(by_name("class_attributes"), libsql::Value::Text("[]".into()));
        let prereqs = r#"{"type":"and","values":[{"subject":"CS","classId":"1800"}]}"#;
        assert_eq!(by_name("prereqs"), libsql::Value::Text(prereqs.into()));
        assert_eq!(
            by_name("last_update_time"),
            libsql::Value::Text("2021-01-07T06:13:20.000Z".into())
        );
    }

    #[test]
    fn malformed_requisite_is_stored_verbatim() {
        let raw = r#"{"kind":"or","when":{"zeta":1,"alpha":2}}"#;
        let class = ClassRecord {
            host: "neu.edu".into(),
            term_id: "202110".into(),
            subject: "CS".into(),
            class_id: "2500".into(),
            prereqs: Some(Requisite::Malformed(serde_json::from_str(raw).unwrap())),
            ..Default::default()
        };
        let now = DateTime::from_timestamp_millis(1_610_000_000_000).unwrap();
        let idx = columns::<ClassRecord>()
            .iter()
            .position(|c| *c == "prereqs")
            .unwrap();
        let value = class.encode_row(now).nth(idx).unwrap().unwrap();
        assert_eq!(value, libsql::Value::Text(raw.into()));
    }

    #[test]
    fn keyed_requires_complete_identity() {
        let mut section = SectionRecord {
            host: "neu.edu".into(),
            term_id: "202110".into(),
            subject: "CS".into(),
            class_id: "2500".into(),
            crn: "10001".into(),
            ..Default::default()
        };
        assert!(section.is_keyed());
        section.crn.clear();
        assert!(!section.is_keyed());

        assert!(!TermInfo {
            term_id: "202110".into(),
            sub_college: String::new(),
            text: "Fall".into(),
        }
        .is_keyed());
    }
}
