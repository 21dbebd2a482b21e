pub mod listing;
pub mod salary;

use scraper::Html;
use tracing::{debug, warn};

use crate::record::JobRecord;

/// Parse one search-results page into job records.
///
/// Malformed listings (no title or no company) are logged and skipped; the
/// remaining listings on the page are still returned.
pub fn extract_jobs(markup: &str) -> Vec<JobRecord> {
    let document = Html::parse_document(markup);
    let mut jobs = Vec::new();
    let mut skipped = 0usize;

    for (i, item) in listing::listings(&document).enumerate() {
        match listing::parse_listing(i, item) {
            Ok(job) => jobs.push(job),
            Err(e) => {
                warn!("skipping listing: {}", e);
                skipped += 1;
            }
        }
    }

    debug!(parsed = jobs.len(), skipped, "page extracted");
    jobs
}
