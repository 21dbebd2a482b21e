use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use tracing::info;

use crate::error::ScrapeError;
use crate::parser;
use crate::record::JobRecord;
use crate::settings::Settings;

/// Source of raw search-result markup, one page index at a time.
pub trait PageSource {
    fn fetch_page(&self, page_index: u32) -> Result<String, ScrapeError>;
}

/// Fetches search pages over HTTP with a browser user agent.
pub struct HttpFetcher {
    client: Client,
    search_url: String,
    query: String,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self, ScrapeError> {
        let search_url = format!("{}/jobs/search", settings.base_url.trim_end_matches('/'));
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| ScrapeError::Transport {
                url: search_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(HttpFetcher {
            client,
            search_url,
            query: settings.query.clone(),
        })
    }
}

impl PageSource for HttpFetcher {
    fn fetch_page(&self, page_index: u32) -> Result<String, ScrapeError> {
        let transport = |e: reqwest::Error| ScrapeError::Transport {
            url: format!("{}?text={}&page={}", self.search_url, self.query, page_index),
            reason: e.to_string(),
        };

        self.client
            .get(&self.search_url)
            .query(&[("text", self.query.as_str())])
            .query(&[("page", page_index)])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(transport)
    }
}

/// Which page indices to visit: `page_count` pages, `stride` apart, from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    page_count: u32,
    stride: u32,
}

impl PagePlan {
    /// Rejects a zero stride and plans whose last index would not fit in `u32`.
    pub fn new(page_count: u32, stride: u32) -> Result<Self, ScrapeError> {
        if stride == 0 {
            return Err(ScrapeError::InvalidPlan("stride must be at least 1".to_string()));
        }
        page_count
            .saturating_sub(1)
            .checked_mul(stride)
            .ok_or_else(|| {
                ScrapeError::InvalidPlan(format!(
                    "{} pages with stride {} overflows the page index",
                    page_count, stride
                ))
            })?;
        Ok(PagePlan { page_count, stride })
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn indices(&self) -> impl Iterator<Item = u32> {
        let stride = self.stride;
        (0..self.page_count).map(move |i| i * stride)
    }
}

/// Fetch and extract every planned page in order, returning all records.
///
/// A transport fault on any page aborts the whole collection; nothing
/// gathered so far is returned.
pub fn collect_jobs<S: PageSource>(source: &S, plan: PagePlan) -> Result<Vec<JobRecord>, ScrapeError> {
    let pb = ProgressBar::new(u64::from(plan.page_count()));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} pages")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut jobs = Vec::new();
    for page_index in plan.indices() {
        info!("Getting page {}", page_index);
        let markup = match source.fetch_page(page_index) {
            Ok(m) => m,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };
        let found = parser::extract_jobs(&markup);
        info!(page = page_index, listings = found.len(), "page parsed");
        jobs.extend(found);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Collected {} job records", jobs.len());
    Ok(jobs)
}
