use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::classify::{self, Role};
use crate::error::ScrapeError;
use crate::record::JobRecord;

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Drop unsalaried postings, derive `salary_k` and `role`, drop unclassified
/// postings.
///
/// Fails only when a non-empty salary holds no digit run, which the salary
/// pattern should never let through.
pub fn clean(mut records: Vec<JobRecord>) -> Result<Vec<JobRecord>, ScrapeError> {
    let total = records.len();
    records.retain(|job| !job.salary.is_empty());
    let with_salary = records.len();

    let mut cleaned = Vec::with_capacity(records.len());
    for mut job in records {
        let salary_k = salary_thousands(&job.salary)?;
        let role = classify::categorize(&job.title);
        if role == Role::Other {
            continue;
        }
        job.salary_k = Some(salary_k);
        job.role = Some(role);
        cleaned.push(job);
    }

    info!(
        total,
        with_salary,
        kept = cleaned.len(),
        "cleaned job records"
    );
    Ok(cleaned)
}

/// First run of ASCII digits in `salary`, read as thousands.
pub fn salary_thousands(salary: &str) -> Result<u64, ScrapeError> {
    let digits = DIGITS_RE
        .find(salary)
        .ok_or_else(|| ScrapeError::SalaryParse {
            salary: salary.to_string(),
        })?;
    digits
        .as_str()
        .parse()
        .map_err(|_| ScrapeError::SalaryOutOfRange {
            salary: salary.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::salary::find_salary;

    fn job(title: &str, salary: &str) -> JobRecord {
        JobRecord::new(
            title.to_string(),
            "Co".to_string(),
            salary.to_string(),
            String::new(),
        )
    }

    fn sample() -> Vec<JobRecord> {
        vec![
            job("Data Scientist", "50 k €"),
            job("Backend Engineer", "60 k €"),
            job("Projekt Manager", ""),
            job("Random Job", "40 k €"),
        ]
    }

    #[test]
    fn drops_unsalaried_and_other() {
        let cleaned = clean(sample()).unwrap();
        let roles: Vec<Role> = cleaned.iter().filter_map(|j| j.role).collect();
        assert_eq!(roles, [Role::DataScientist, Role::Backend]);
        assert!(cleaned.iter().all(|j| !j.salary.is_empty()));
        assert!(!roles.contains(&Role::Other));
    }

    #[test]
    fn salary_k_is_first_digit_run() {
        let cleaned = clean(sample()).unwrap();
        for j in &cleaned {
            assert_eq!(j.salary_k, Some(salary_thousands(&j.salary).unwrap()));
        }
        assert_eq!(cleaned[0].salary_k, Some(50));
        assert_eq!(salary_thousands("ab 45k € bis 60k €").unwrap(), 45);
    }

    #[test]
    fn project_manager_survives_with_salary() {
        let cleaned = clean(vec![job("Projekt Manager", "48k €")]).unwrap();
        assert_eq!(cleaned[0].role, Some(Role::ProjectManager));
    }

    #[test]
    fn idempotent_on_clean_input() {
        let once = clean(sample()).unwrap();
        let twice = clean(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn digitless_salary_is_an_error() {
        let err = clean(vec![job("Backend Engineer", "k €")]).unwrap_err();
        assert_eq!(err.to_string(), r#"salary "k €" contains no ASCII digits"#);
        assert!(matches!(err, ScrapeError::SalaryParse { salary } if salary == "k €"));
    }

    #[test]
    fn full_width_digits_never_reach_cleaning() {
        let salary = find_salary(["５０k €"]).unwrap_or_default();
        assert_eq!(salary, "");
        let cleaned = clean(vec![job("Backend Engineer", &salary)]).unwrap();
        assert!(cleaned.is_empty());
    }

    #[test]
    fn wide_salaries() {
        let salary = find_salary(["99999999999k €"]).unwrap_or_default();
        let cleaned = clean(vec![job("Backend Engineer", &salary)]).unwrap();
        assert_eq!(cleaned[0].salary_k, Some(99_999_999_999));
    }

    #[test]
    fn overflowing_salary_is_reported_as_out_of_range() {
        let salary = "123456789012345678901234k €";
        let err = salary_thousands(salary).unwrap_err();
        assert!(matches!(err, ScrapeError::SalaryOutOfRange { .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn empty_input() {
        assert!(clean(Vec::new()).unwrap().is_empty());
    }
}
