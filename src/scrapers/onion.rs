//! Listing and article-page scraping for theonion.com.
//!
//! The site runs on WordPress, so both page shapes are stable block markup:
//! listing pages carry one `li.wp-block-post` per story with the headline
//! link in `h3.wp-block-post-title a` and the category in
//! `div.taxonomy-category a`; article pages carry the publication datetime
//! in their first `<time datetime=...>` element.
//!
//! Listing order is reverse-chronological, which is what makes the crawl
//! resumable: new stories only ever appear on page 1.

use reqwest::Client;
use scraper::{Html, Selector};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

use crate::models::RawHeadline;

/// Site root; relative listing links resolve against it.
pub const BASE_URL: &str = "https://theonion.com";

/// Desktop browser User-Agent; the site answers bot agents with a
/// challenge page instead of markup.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the HTTP client shared by all pipeline fetches.
///
/// Ten-second timeout per request; a hung article page should cost one
/// record, not the whole run.
pub fn client() -> Result<Client, Box<dyn Error>> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(10))
        .build()?)
}

/// URL of one listing page. Page 1 is the bare `/latest/` root; later
/// pages use the WordPress `/latest/page/N/` form.
pub fn listing_url(page: u32) -> String {
    if page <= 1 {
        format!("{BASE_URL}/latest/")
    } else {
        format!("{BASE_URL}/latest/page/{page}/")
    }
}

/// Fetch one listing page and parse it into raw records.
///
/// # Returns
///
/// The page's records in listing order, each stamped with `page` for the
/// crawler's resume bookkeeping. A non-success status is an error; the
/// crawl loop treats any error as the end of the archive.
#[instrument(level = "info", skip(client))]
pub async fn fetch_listing_page(
    client: &Client,
    page: u32,
) -> Result<Vec<RawHeadline>, Box<dyn Error>> {
    let url = listing_url(page);
    let html = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let records = parse_listing(&html, page)?;
    info!(page, count = records.len(), "Indexed listing page");
    debug!(urls = ?records.iter().map(|r| r.url.as_str()).collect::<Vec<_>>(), "Listing URLs");
    Ok(records)
}

/// Extract headline records from listing-page HTML.
///
/// Cards missing a headline link or a category are skipped; partial
/// records would only fall out later in the pipeline.
pub fn parse_listing(html: &str, page: u32) -> Result<Vec<RawHeadline>, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let item_selector = Selector::parse("li.wp-block-post").unwrap();
    let title_selector = Selector::parse("h3.wp-block-post-title a").unwrap();
    let tag_selector = Selector::parse("div.taxonomy-category a").unwrap();
    let base = Url::parse(BASE_URL)?;

    let mut records = Vec::new();
    for item in document.select(&item_selector) {
        let Some(link) = item.select(&title_selector).next() else {
            continue;
        };
        let headline = link.text().collect::<Vec<_>>().join(" ").trim().to_string();
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        let Some(tag) = item
            .select(&tag_selector)
            .next()
            .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        else {
            continue;
        };
        if headline.is_empty() || tag.is_empty() {
            continue;
        }

        records.push(RawHeadline {
            headline,
            url: resolved.to_string(),
            tag: Some(tag),
            date: None,
            page: Some(page),
        });
    }

    Ok(records)
}

/// Fetch one article page and pull its publication datetime.
///
/// # Returns
///
/// The raw `datetime` attribute value (RFC 3339 on this site), or `None`
/// when the page has no `<time>` element.
#[instrument(level = "info", skip(client), fields(%url))]
pub async fn fetch_article_date(
    client: &Client,
    url: &str,
) -> Result<Option<String>, Box<dyn Error>> {
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_article_date(&html))
}

/// First `<time datetime=...>` attribute in the document, if any.
pub fn parse_article_date(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let time_selector = Selector::parse("time[datetime]").unwrap();
    document
        .select(&time_selector)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_HTML: &str = r#"
        <ul class="wp-block-post-template">
            <li class="wp-block-post">
                <h3 class="wp-block-post-title">
                    <a href="/news/area-man-wins/">Area Man Wins</a>
                </h3>
                <div class="taxonomy-category"><a href="/cat/local/">Local</a></div>
            </li>
            <li class="wp-block-post">
                <h3 class="wp-block-post-title">
                    <a href="https://theonion.com/news/nation-reels/">Nation Reels</a>
                </h3>
                <div class="taxonomy-category"><a href="/cat/politics/">Politics</a></div>
            </li>
            <li class="wp-block-post">
                <h3 class="wp-block-post-title">Card Without A Link</h3>
                <div class="taxonomy-category"><a href="/cat/local/">Local</a></div>
            </li>
            <li class="wp-block-post">
                <h3 class="wp-block-post-title">
                    <a href="/news/untagged-story/">Untagged Story</a>
                </h3>
            </li>
        </ul>
    "#;

    #[test]
    fn test_listing_url_forms() {
        assert_eq!(listing_url(1), "https://theonion.com/latest/");
        assert_eq!(listing_url(2), "https://theonion.com/latest/page/2/");
        assert_eq!(listing_url(37), "https://theonion.com/latest/page/37/");
    }

    #[test]
    fn test_parse_listing_extracts_complete_cards() {
        let records = parse_listing(LISTING_HTML, 3).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].headline, "Area Man Wins");
        assert_eq!(records[0].url, "https://theonion.com/news/area-man-wins/");
        assert_eq!(records[0].tag.as_deref(), Some("Local"));
        assert_eq!(records[0].date, None);
        assert_eq!(records[0].page, Some(3));

        // Absolute hrefs pass through untouched.
        assert_eq!(records[1].url, "https://theonion.com/news/nation-reels/");
        assert_eq!(records[1].tag.as_deref(), Some("Politics"));
    }

    #[test]
    fn test_parse_listing_empty_page() {
        let records = parse_listing("<html><body></body></html>", 1).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_article_date_first_time_element_wins() {
        let html = r#"
            <article>
                <time datetime="2015-03-15T10:30:00-04:00">March 15, 2015</time>
                <time datetime="2020-01-01T00:00:00Z">updated</time>
            </article>
        "#;
        assert_eq!(
            parse_article_date(html),
            Some("2015-03-15T10:30:00-04:00".to_string())
        );
    }

    #[test]
    fn test_parse_article_date_missing() {
        assert_eq!(parse_article_date("<article><p>No date.</p></article>"), None);
        assert_eq!(parse_article_date("<time>March 15</time>"), None);
    }
}
