use anyhow::Result;
use tracing::info;

use crate::charts;
use crate::clean;
use crate::db;
use crate::error::ScrapeError;
use crate::export;
use crate::fetch::{self, PagePlan, PageSource};
use crate::record::JobRecord;
use crate::settings::Settings;
use crate::stats::{self, AggregateRow};

/// Cleaned postings and their per-role summary.
#[derive(Debug)]
pub struct Analysis {
    pub cleaned: Vec<JobRecord>,
    pub rows: Vec<AggregateRow>,
}

/// Clean and aggregate in memory. Touches no sink.
pub fn analyze(jobs: Vec<JobRecord>) -> Result<Analysis, ScrapeError> {
    let cleaned = clean::clean(jobs)?;
    let rows = stats::aggregate(&cleaned);
    Ok(Analysis { cleaned, rows })
}

/// Scrape, clean and aggregate, then write every sink. Any fetch or
/// cleaning fault returns before the first file or table is written.
pub fn run<S: PageSource>(source: &S, plan: PagePlan, settings: &Settings) -> Result<Analysis> {
    let jobs = scrape(source, plan, settings)?;
    let analysis = analyze(jobs.clone())?;
    save_raw(settings, &jobs)?;
    save_analysis(settings, &analysis)?;
    Ok(analysis)
}

/// Scrape and write the raw sinks only.
pub fn scrape_only<S: PageSource>(source: &S, plan: PagePlan, settings: &Settings) -> Result<usize> {
    let jobs = scrape(source, plan, settings)?;
    save_raw(settings, &jobs)?;
    Ok(jobs.len())
}

/// Re-analyze the raw `jobs` table left by an earlier scrape.
pub fn analyze_stored(settings: &Settings) -> Result<Analysis> {
    let conn = db::connect(&settings.db_path)?;
    let jobs = db::fetch_jobs(&conn)?;
    println!("Loaded {} raw jobs from {:?}", jobs.len(), settings.db_path);
    let analysis = analyze(jobs)?;
    save_analysis(settings, &analysis)?;
    Ok(analysis)
}

fn scrape<S: PageSource>(source: &S, plan: PagePlan, settings: &Settings) -> Result<Vec<JobRecord>> {
    println!(
        "Scraping {} pages (stride {}) for {:?}...",
        plan.page_count(),
        plan.stride(),
        settings.query
    );
    let jobs = fetch::collect_jobs(source, plan)?;
    println!("Collected {} listings", jobs.len());
    Ok(jobs)
}

fn save_raw(settings: &Settings, jobs: &[JobRecord]) -> Result<()> {
    let n = export::write_raw_csv(&settings.raw_csv, jobs)?;
    println!("Wrote {} rows to {:?}", n, settings.raw_csv);

    let conn = db::connect(&settings.db_path)?;
    let n = db::replace_jobs(&conn, jobs)?;
    println!("Stored {} rows in {:?} (table jobs)", n, settings.db_path);
    Ok(())
}

fn save_analysis(settings: &Settings, analysis: &Analysis) -> Result<()> {
    println!("{} postings with salary and known role", analysis.cleaned.len());
    println!("\n{}", stats::render_markdown(&analysis.rows));

    export::write_clean_csv(&settings.clean_csv, &analysis.cleaned)?;
    let conn = db::connect(&settings.db_path)?;
    db::replace_clean_jobs(&conn, &analysis.cleaned)?;
    db::replace_role_summary(&conn, &analysis.rows)?;

    let groups = stats::salaries_by_role(&analysis.cleaned);
    for path in charts::render_all(&settings.plots_dir, &analysis.rows, &groups)? {
        println!("Chart: {:?}", path);
    }
    info!(roles = analysis.rows.len(), "analysis saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    struct FixturePages(String);

    impl FixturePages {
        fn load(name: &str) -> Self {
            FixturePages(fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap())
        }
    }

    impl PageSource for FixturePages {
        fn fetch_page(&self, _page_index: u32) -> Result<String, ScrapeError> {
            Ok(self.0.clone())
        }
    }

    fn settings_in(dir: &Path) -> Settings {
        Settings {
            base_url: "http://localhost".to_string(),
            query: "wien".to_string(),
            page_count: 2,
            page_stride: 10,
            user_agent: "test".to_string(),
            db_path: dir.join("jobs.db"),
            raw_csv: dir.join("jobs.csv"),
            clean_csv: dir.join("jobs_clean.csv"),
            plots_dir: dir.join("plots"),
        }
    }

    #[test]
    fn cleaning_fault_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let source = FixturePages::load("oversized_salary");

        let err = run(&source, PagePlan::new(2, 10).unwrap(), &settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrapeError>(),
            Some(ScrapeError::SalaryOutOfRange { .. })
        ));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn run_writes_every_sink() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let source = FixturePages::load("search_page");

        let analysis = run(&source, PagePlan::new(2, 10).unwrap(), &settings).unwrap();
        // Senior Backend Engineer, Data Scientist, Head of Engineering on each page
        assert_eq!(analysis.cleaned.len(), 6);
        assert_eq!(analysis.rows.len(), 3);

        assert!(settings.raw_csv.exists());
        assert!(settings.clean_csv.exists());
        let conn = db::connect(&settings.db_path).unwrap();
        assert_eq!(db::fetch_jobs(&conn).unwrap().len(), 8);
        let roles: i64 = conn
            .query_row("SELECT COUNT(*) FROM role_summary", [], |r| r.get(0))
            .unwrap();
        assert_eq!(roles, 3);
        assert_eq!(fs::read_dir(&settings.plots_dir).unwrap().count(), 3);
    }

    #[test]
    fn analyze_stored_reuses_raw_table() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let source = FixturePages::load("search_page");

        assert_eq!(
            scrape_only(&source, PagePlan::new(1, 10).unwrap(), &settings).unwrap(),
            4
        );
        assert!(!settings.clean_csv.exists());

        let analysis = analyze_stored(&settings).unwrap();
        assert_eq!(analysis.cleaned.len(), 3);
        assert!(settings.clean_csv.exists());
    }
}
