use std::sync::LazyLock;

use regex::Regex;

static SALARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+\s?k\s?€").unwrap());

/// Return the first candidate that reads like a salary (`50k €`, `60 k €`).
///
/// Candidates are scanned in the order given; later and larger matches are
/// ignored. `None` is the normal outcome for postings without a salary pill.
pub fn find_salary<I, S>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .map(|c| c.as_ref().trim().to_string())
        .find(|text| SALARY_RE.is_match(text))
}
