use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use crate::classify::Role;
use crate::record::JobRecord;

/// Salary summary for one role.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub role: Role,
    pub count: usize,
    pub min_salary_k: u64,
    pub max_salary_k: u64,
    pub avg_salary_k: f64,
}

/// Salaries grouped by role, in taxonomy order. Records that were never
/// cleaned are ignored.
pub fn salaries_by_role(records: &[JobRecord]) -> BTreeMap<Role, Vec<u64>> {
    let mut groups: BTreeMap<Role, Vec<u64>> = BTreeMap::new();
    for job in records {
        if let (Some(role), Some(salary_k)) = (job.role, job.salary_k) {
            groups.entry(role).or_default().push(salary_k);
        }
    }
    groups
}

/// One row per role present in `records`, ordered by taxonomy position.
pub fn aggregate(records: &[JobRecord]) -> Vec<AggregateRow> {
    salaries_by_role(records)
        .into_iter()
        .map(|(role, salaries)| summarize(role, &salaries))
        .collect()
}

fn summarize(role: Role, salaries: &[u64]) -> AggregateRow {
    let count = salaries.len();
    let sum: u128 = salaries.iter().map(|&s| u128::from(s)).sum();
    AggregateRow {
        role,
        count,
        min_salary_k: salaries.iter().copied().min().unwrap_or_default(),
        max_salary_k: salaries.iter().copied().max().unwrap_or_default(),
        avg_salary_k: sum as f64 / count as f64,
    }
}

/// Sample variance (n - 1); `None` below two values.
pub fn sample_variance(values: &[u64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let squares: f64 = values.iter().map(|&v| (v as f64 - mean).powi(2)).sum();
    Some(squares / (n - 1.0))
}

/// Rows ordered by mean salary, lowest first.
pub fn by_mean(rows: &[AggregateRow]) -> Vec<&AggregateRow> {
    let mut sorted: Vec<&AggregateRow> = rows.iter().collect();
    sorted.sort_by(|a, b| a.avg_salary_k.total_cmp(&b.avg_salary_k));
    sorted
}

/// Rows ordered by posting count, highest first.
pub fn by_count(rows: &[AggregateRow]) -> Vec<&AggregateRow> {
    let mut sorted: Vec<&AggregateRow> = rows.iter().collect();
    sorted.sort_by_key(|r| Reverse(r.count));
    sorted
}

/// Groups ordered by salary variance, lowest first; roles with a single
/// posting have no variance and go last.
pub fn by_variance(groups: &BTreeMap<Role, Vec<u64>>) -> Vec<(Role, &[u64])> {
    let mut sorted: Vec<(Role, &[u64], Option<f64>)> = groups
        .iter()
        .map(|(role, salaries)| (*role, salaries.as_slice(), sample_variance(salaries)))
        .collect();
    sorted.sort_by(|a, b| match (a.2, b.2) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
        .into_iter()
        .map(|(role, salaries, _)| (role, salaries))
        .collect()
}

pub fn render_markdown(rows: &[AggregateRow]) -> String {
    let mut out = String::new();
    out.push_str("## Salary by role (k €)\n");
    out.push_str("| Role | Count | Min | Max | Avg |\n");
    out.push_str("|------|------:|----:|----:|----:|\n");
    for r in rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {:.1} |\n",
            r.role, r.count, r.min_salary_k, r.max_salary_k, r.avg_salary_k
        ));
    }
    let total: usize = rows.iter().map(|r| r.count).sum();
    out.push_str(&format!("\n{} postings across {} roles\n", total, rows.len()));
    out
}
