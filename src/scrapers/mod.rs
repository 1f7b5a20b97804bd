//! Scrapers for the satirical-news archive site.
//!
//! The site is the pipeline's only source, and scraping it splits into two
//! phases that mirror the `fetch` and `dates` pipeline steps:
//!
//! 1. **Listing**: Walk the paginated `/latest/` archive and extract
//!    headline, URL, and category from each post card.
//! 2. **Article**: Fetch one article page and pull the publication
//!    datetime from its `<time datetime=...>` element.
//!
//! Parsing is separated from fetching so the HTML extraction is testable
//! without a network. Fetch failures are logged and surface as errors or
//! empty results, never panics; the crawl loop decides what to do with
//! them.

pub mod onion;
