use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::record::JobRecord;

/// Write `title, company, salary, summary` for every record.
pub fn write_raw_csv(path: &Path, jobs: &[JobRecord]) -> Result<usize> {
    write_rows(path, jobs.iter().map(JobRecord::raw_row))
}

/// Write the cleaned superset (adds `salary_k, role`). Uncleaned records are skipped.
pub fn write_clean_csv(path: &Path, jobs: &[JobRecord]) -> Result<usize> {
    write_rows(path, jobs.iter().filter_map(JobRecord::clean_row))
}

fn write_rows<T: Serialize>(path: &Path, rows: impl Iterator<Item = T>) -> Result<usize> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}
