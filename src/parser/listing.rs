use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::salary;
use crate::error::ScrapeError;
use crate::record::JobRecord;

static LI: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
static H2: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());
static P: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

const LISTING_CLASSES: &[&str] = &["bg-dj-mono-50"];

const PILL_CLASSES: &[&str] = &[
    "transition-all",
    "text-sm",
    "flex",
    "place-items-center",
    "whitespace-nowrap",
    "rounded",
    "bg-opacity-5",
    "dark:bg-opacity-10",
    "text-dj-pill-shade-tertiary",
    "dark:text-white",
    "bg-dj-pill-tertiary",
    "dark:bg-dj-pill-tertiary",
    "py-1.5",
    "px-3",
    "first:ml-4",
];

const SUMMARY_CLASSES: &[&str] = &[
    "text-dj-mono-500",
    "dark:text-dj-mono-dark-400",
    "line-clamp-2",
    "px-4",
    "font-normal",
];

/// All job listing elements on a page, in document order.
pub fn listings(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .select(&LI)
        .filter(|el| has_classes(el, LISTING_CLASSES))
}

/// Build a [`JobRecord`] from one listing element. `index` is only used to
/// identify the listing in errors.
pub fn parse_listing(index: usize, item: ElementRef<'_>) -> Result<JobRecord, ScrapeError> {
    let title = item
        .select(&H2)
        .next()
        .map(|h| h.text().collect::<String>())
        .ok_or(ScrapeError::MissingField {
            listing: index,
            field: "title",
        })?;

    let company = item
        .select(&P)
        .next()
        .map(|p| p.text().collect::<String>())
        .ok_or(ScrapeError::MissingField {
            listing: index,
            field: "company",
        })?;

    let pills = item
        .select(&LI)
        .filter(|li| has_classes(li, PILL_CLASSES))
        .map(stripped_text);
    let salary = salary::find_salary(pills).unwrap_or_default();

    let summary = item
        .select(&P)
        .find(|p| has_classes(p, SUMMARY_CLASSES))
        .map(|p| p.text().collect::<String>().trim().replace('\n', ""))
        .unwrap_or_default();

    Ok(JobRecord::new(title, company, salary, summary))
}

fn has_classes(el: &ElementRef<'_>, wanted: &[&str]) -> bool {
    wanted
        .iter()
        .all(|w| el.value().classes().any(|c| c == *w))
}

/// Text of every descendant node, each trimmed, concatenated.
fn stripped_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
