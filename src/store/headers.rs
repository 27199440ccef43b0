use serde::Serialize;
use std::collections::HashSet;

/// Outcome of comparing a worksheet header against the expected column set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HeaderReport {
    /// Expected columns absent from the worksheet, in expected order
    pub missing: Vec<String>,
    /// Worksheet columns not in the expected set, in worksheet order
    pub extra: Vec<String>,
}

impl HeaderReport {
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compare columns as sets; order and duplicates are ignored.
pub fn verify_headers<A, E>(actual: &[A], expected: &[E]) -> HeaderReport
where
    A: AsRef<str>,
    E: AsRef<str>,
{
    let actual_set: HashSet<&str> = actual.iter().map(AsRef::as_ref).collect();
    let expected_set: HashSet<&str> = expected.iter().map(AsRef::as_ref).collect();

    let mut seen = HashSet::new();
    let missing = expected
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| !actual_set.contains(c) && seen.insert(*c))
        .map(str::to_string)
        .collect();

    let mut seen = HashSet::new();
    let extra = actual
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| !expected_set.contains(c) && seen.insert(*c))
        .map(str::to_string)
        .collect();

    HeaderReport { missing, extra }
}
