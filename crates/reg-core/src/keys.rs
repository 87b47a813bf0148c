//! Identity keys for hosts, terms, subjects, courses, and sections.
//!
//! A key is the `/`-joined list of an entity's coordinates, with whitespace
//! inside each coordinate replaced by `_`. Case is preserved. The same key is
//! used as the storage primary key, the dedup key, and the lookup key for
//! requisite resolution, so every component must go through these functions.

/// Join coordinates into a key.
///
/// Returns `None` if any coordinate is missing or empty.
#[must_use]
pub fn hash(parts: &[Option<&str>]) -> Option<String> {
    let mut key = String::new();
    for (idx, part) in parts.iter().enumerate() {
        let part = part.filter(|p| !p.is_empty())?;
        if idx > 0 {
            key.push('/');
        }
        key.extend(part.chars().map(|c| if c.is_whitespace() { '_' } else { c }));
    }
    if key.is_empty() { None } else { Some(key) }
}

#[must_use]
pub fn host_hash(host: Option<&str>) -> Option<String> {
    hash(&[host])
}

#[must_use]
pub fn term_hash(host: Option<&str>, term_id: Option<&str>) -> Option<String> {
    hash(&[host, term_id])
}

#[must_use]
pub fn subject_hash(
    host: Option<&str>,
    term_id: Option<&str>,
    subject: Option<&str>,
) -> Option<String> {
    hash(&[host, term_id, subject])
}

/// Key of a course: `host/term/subject/classId`.
#[must_use]
pub fn class_hash(
    host: Option<&str>,
    term_id: Option<&str>,
    subject: Option<&str>,
    class_id: Option<&str>,
) -> Option<String> {
    hash(&[host, term_id, subject, class_id])
}

/// Key of a section: `host/term/subject/classId/crn`.
#[must_use]
pub fn section_hash(
    host: Option<&str>,
    term_id: Option<&str>,
    subject: Option<&str>,
    class_id: Option<&str>,
    crn: Option<&str>,
) -> Option<String> {
    hash(&[host, term_id, subject, class_id, crn])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_hash_joins_with_slashes() {
        assert_eq!(
            class_hash(Some("neu"), Some("1234"), Some("cs"), Some("id")).as_deref(),
            Some("neu/1234/cs/id")
        );
    }

    #[test]
    fn whitespace_becomes_underscore() {
        assert_eq!(
            class_hash(Some("host name"), Some("1234"), Some("cs"), Some("id")).as_deref(),
            Some("host_name/1234/cs/id")
        );
        assert_eq!(host_hash(Some("a\tb c")).as_deref(), Some("a_b_c"));
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(
            subject_hash(Some("NEU"), Some("202110"), Some("Cs")).as_deref(),
            Some("NEU/202110/Cs")
        );
    }

    #[test]
    fn missing_coordinate_yields_none() {
        assert_eq!(class_hash(Some("neu"), None, Some("cs"), Some("id")), None);
        assert_eq!(class_hash(Some("neu"), Some("1234"), Some(""), Some("id")), None);
        assert_eq!(host_hash(None), None);
        assert_eq!(
            section_hash(Some("neu"), Some("1234"), Some("cs"), Some("id"), None),
            None
        );
    }

    #[test]
    fn each_depth_extends_the_previous() {
        let term = term_hash(Some("neu"), Some("202110")).unwrap();
        let section = section_hash(
            Some("neu"),
            Some("202110"),
            Some("CS"),
            Some("2500"),
            Some("12345"),
        )
        .unwrap();
        assert!(section.starts_with(&term));
        assert_eq!(section, "neu/202110/CS/2500/12345");
    }

    #[test]
    fn stable_for_identical_coordinates() {
        let a = class_hash(Some("neu"), Some("1"), Some("CS"), Some("2500"));
        let b = class_hash(Some("neu"), Some("1"), Some("CS"), Some("2500"));
        assert_eq!(a, b);
    }
}
