use thiserror::Error;

/// Faults raised by the scrape → clean pipeline.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("listing #{listing} has no {field}")]
    MissingField { listing: usize, field: &'static str },

    #[error("salary {salary:?} contains no ASCII digits")]
    SalaryParse { salary: String },

    #[error("salary {salary:?} is too large to store")]
    SalaryOutOfRange { salary: String },

    #[error("invalid page plan: {0}")]
    InvalidPlan(String),
}
