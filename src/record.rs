use serde::Serialize;

use crate::classify::Role;

/// One job posting as scraped from a listing.
///
/// `salary_k` and `role` stay `None` until the record passes through
/// [`crate::clean::clean`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    /// Raw salary text, empty when no salary pill was found.
    pub salary: String,
    pub summary: String,
    pub salary_k: Option<u64>,
    pub role: Option<Role>,
}

impl JobRecord {
    pub fn new(title: String, company: String, salary: String, summary: String) -> Self {
        JobRecord {
            title,
            company,
            salary,
            summary,
            salary_k: None,
            role: None,
        }
    }

    pub fn raw_row(&self) -> RawRow<'_> {
        RawRow {
            title: &self.title,
            company: &self.company,
            salary: &self.salary,
            summary: &self.summary,
        }
    }

    /// Row view for cleaned output; `None` for records that were never cleaned.
    pub fn clean_row(&self) -> Option<CleanRow<'_>> {
        Some(CleanRow {
            title: &self.title,
            company: &self.company,
            salary: &self.salary,
            summary: &self.summary,
            salary_k: self.salary_k?,
            role: self.role?.as_str(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RawRow<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub salary: &'a str,
    pub summary: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CleanRow<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub salary: &'a str,
    pub summary: &'a str,
    pub salary_k: u64,
    pub role: &'a str,
}
