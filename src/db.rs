use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::record::JobRecord;
use crate::stats::AggregateRow;

pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    Ok(conn)
}

// ── Raw and cleaned postings ──
//
// Every writer drops and recreates its table, so a run always replaces what
// the previous run stored.

pub fn replace_jobs(conn: &Connection, jobs: &[JobRecord]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "
        DROP TABLE IF EXISTS jobs;
        CREATE TABLE jobs (
            title   TEXT NOT NULL,
            company TEXT NOT NULL,
            salary  TEXT NOT NULL,
            summary TEXT NOT NULL
        );
        ",
    )?;
    let mut count = 0;
    {
        let mut stmt =
            tx.prepare("INSERT INTO jobs (title, company, salary, summary) VALUES (?1, ?2, ?3, ?4)")?;
        for j in jobs {
            count += stmt.execute(rusqlite::params![j.title, j.company, j.salary, j.summary])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

/// Store cleaned postings. Records without a derived salary or role are left out.
pub fn replace_clean_jobs(conn: &Connection, jobs: &[JobRecord]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "
        DROP TABLE IF EXISTS jobs_clean;
        CREATE TABLE jobs_clean (
            title    TEXT NOT NULL,
            company  TEXT NOT NULL,
            salary   TEXT NOT NULL,
            summary  TEXT NOT NULL,
            salary_k INTEGER NOT NULL,
            role     TEXT NOT NULL
        );
        CREATE INDEX idx_jobs_clean_role ON jobs_clean(role);
        ",
    )?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO jobs_clean (title, company, salary, summary, salary_k, role)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for r in jobs.iter().filter_map(JobRecord::clean_row) {
            count += stmt.execute(rusqlite::params![
                r.title,
                r.company,
                r.salary,
                r.summary,
                i64::try_from(r.salary_k)
                    .with_context(|| format!("salary_k {} does not fit SQLite INTEGER", r.salary_k))?,
                r.role,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub fn fetch_jobs(conn: &Connection) -> Result<Vec<JobRecord>> {
    let mut stmt = conn
        .prepare("SELECT title, company, salary, summary FROM jobs ORDER BY rowid")
        .context("No jobs table; run 'scrape' first")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(JobRecord::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Aggregates ──

pub fn replace_role_summary(conn: &Connection, rows: &[AggregateRow]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "
        DROP TABLE IF EXISTS role_summary;
        CREATE TABLE role_summary (
            role         TEXT PRIMARY KEY,
            count        INTEGER NOT NULL,
            min_salary_k INTEGER NOT NULL,
            max_salary_k INTEGER NOT NULL,
            avg_salary_k REAL NOT NULL
        );
        ",
    )?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO role_summary (role, count, min_salary_k, max_salary_k, avg_salary_k)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for r in rows {
            count += stmt.execute(rusqlite::params![
                r.role.as_str(),
                r.count as i64,
                i64::try_from(r.min_salary_k)?,
                i64::try_from(r.max_salary_k)?,
                r.avg_salary_k,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}
