//! Crawl record wire types.
//!
//! The crawler emits one JSON object per fetched page. Normalization strips
//! the bulky `title`/`content` fields and keeps only the page URL and its
//! outbound links — roughly 15% of the original volume. Field names follow
//! the crawl wire format (`pageUrl`, `linkURLs`).

use serde::{Deserialize, Serialize};

/// A normalized per-page crawl record: the page URL and its outbound links.
///
/// Records carry no uniqueness guarantee — the same `page_url` may appear
/// in multiple records and each is processed independently by the graph
/// builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// URL of the fetched page.
    #[serde(rename = "pageUrl")]
    pub page_url: String,

    /// Outbound link URLs found on the page, in document order.
    #[serde(rename = "linkURLs", default)]
    pub link_urls: Vec<String>,
}

impl PageRecord {
    /// Convenience constructor used by builders and tests.
    #[must_use]
    pub fn new(page_url: impl Into<String>, link_urls: Vec<String>) -> Self {
        Self {
            page_url: page_url.into(),
            link_urls,
        }
    }
}

/// A raw crawl page as written by the crawler, before normalization.
///
/// `title` and `content` are present on the wire but dropped by
/// [`RawCrawlPage::strip`]; unknown extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCrawlPage {
    #[serde(rename = "pageUrl")]
    pub page_url: String,

    #[serde(rename = "linkURLs", default)]
    pub link_urls: Vec<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

impl RawCrawlPage {
    /// Drop page content and title, keeping only the link structure.
    #[must_use]
    pub fn strip(self) -> PageRecord {
        PageRecord {
            page_url: self.page_url,
            link_urls: self.link_urls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_wire_names() {
        let record = PageRecord::new("http://a.onion/p1", vec!["http://b.onion/x".to_string()]);
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"pageUrl\""), "wire name pageUrl: {json}");
        assert!(json.contains("\"linkURLs\""), "wire name linkURLs: {json}");

        let back: PageRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn missing_links_default_to_empty() {
        let record: PageRecord =
            serde_json::from_str(r#"{"pageUrl":"http://a.onion/"}"#).expect("deserialize");
        assert!(record.link_urls.is_empty());
    }

    #[test]
    fn strip_drops_title_and_content() {
        let raw: RawCrawlPage = serde_json::from_str(
            r#"{"pageUrl":"http://a.onion/","linkURLs":["http://b.onion/"],
                "title":"Welcome","content":"<html>…</html>"}"#,
        )
        .expect("deserialize raw page");

        let record = raw.strip();
        assert_eq!(record.page_url, "http://a.onion/");
        assert_eq!(record.link_urls, vec!["http://b.onion/".to_string()]);

        let json = serde_json::to_string(&record).expect("serialize");
        assert!(!json.contains("title"));
        assert!(!json.contains("content"));
    }

    #[test]
    fn unknown_fields_ignored() {
        let raw: RawCrawlPage = serde_json::from_str(
            r#"{"pageUrl":"http://a.onion/","fetchDepth":3,"statusCode":200}"#,
        )
        .expect("deserialize with extras");
        assert_eq!(raw.page_url, "http://a.onion/");
    }
}
