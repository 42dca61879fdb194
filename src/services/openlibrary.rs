//! Open Library catalog client
//!
//! Two sequential lookups: resolve an ISBN from an edition record, then
//! fetch bibliographic data keyed by that ISBN. Fields the service does
//! not return are filled with fixed placeholders.

use serde_json::Value;
use std::time::Duration;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::book::BookCandidate,
};

pub const PLACEHOLDER_TITLE: &str = "Title not available";
pub const PLACEHOLDER_AUTHOR: &str = "Author not available";
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.png";
pub const PLACEHOLDER_PUBLISH_DATE: &str = "Publish date not available";

#[derive(Clone)]
pub struct OpenLibraryService {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OpenLibraryService {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// Look up an Open Library edition by OLID and map it into a book
    /// candidate. Fails with a catalog error when the edition resolves
    /// no ISBN; no retry policy.
    pub async fn fetch_by_olid(&self, olid: &str) -> AppResult<BookCandidate> {
        // Step 1: resolve an ISBN from the edition record
        let url = format!("{}/books/{}.json", self.base_url, olid);
        let edition = self.get_json(&url).await?;

        let isbn = resolve_isbn(&edition).ok_or_else(|| {
            AppError::Catalog(format!("No ISBN found for edition {}", olid))
        })?;

        // Step 2: bibliographic data keyed by the ISBN
        let url = format!(
            "{}/api/books?bibkeys=ISBN:{}&format=json&jscmd=data",
            self.base_url, isbn
        );
        let response = self.get_json(&url).await?;

        let bib = response
            .get(format!("ISBN:{}", isbn))
            .cloned()
            .unwrap_or(Value::Null);

        Ok(candidate_from_bib(olid, &isbn, &bib))
    }

    async fn get_json(&self, url: &str) -> AppResult<Value> {
        tracing::debug!("Open Library request: {}", url);

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Catalog(format!("Open Library request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Catalog(format!("Open Library returned an error: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| AppError::Catalog(format!("Invalid Open Library response: {}", e)))
    }
}

/// Pull an ISBN out of an edition record, isbn_13 preferred
fn resolve_isbn(edition: &Value) -> Option<String> {
    for key in ["isbn_13", "isbn_10"] {
        if let Some(isbn) = edition
            .get(key)
            .and_then(|v| v.get(0))
            .and_then(Value::as_str)
        {
            return Some(isbn.to_string());
        }
    }
    None
}

/// Map a bibliographic record into a book candidate, substituting a
/// fixed placeholder for every absent field
fn candidate_from_bib(olid: &str, isbn: &str, data: &Value) -> BookCandidate {
    let title = data
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(PLACEHOLDER_TITLE)
        .to_string();

    let author = data
        .get("authors")
        .and_then(|a| a.get(0))
        .and_then(|a| a.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(PLACEHOLDER_AUTHOR)
        .to_string();

    let image = data
        .get("cover")
        .and_then(|c| c.get("medium"))
        .and_then(Value::as_str)
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string();

    let num_pages = data
        .get("number_of_pages")
        .and_then(Value::as_i64)
        .unwrap_or(0) as i32;

    let publish_date = data
        .get("publish_date")
        .and_then(Value::as_str)
        .unwrap_or(PLACEHOLDER_PUBLISH_DATE)
        .to_string();

    BookCandidate {
        olid: olid.to_string(),
        isbn: isbn.to_string(),
        title,
        author,
        image: Some(image),
        num_pages,
        publish_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn isbn_13_is_preferred() {
        let edition = json!({
            "isbn_10": ["0261103571"],
            "isbn_13": ["9780261103573"]
        });
        assert_eq!(resolve_isbn(&edition).as_deref(), Some("9780261103573"));
    }

    #[test]
    fn falls_back_to_isbn_10() {
        let edition = json!({ "isbn_10": ["0261103571"] });
        assert_eq!(resolve_isbn(&edition).as_deref(), Some("0261103571"));
    }

    #[test]
    fn no_isbn_resolves_none() {
        assert_eq!(resolve_isbn(&json!({ "title": "The Hobbit" })), None);
        assert_eq!(resolve_isbn(&json!({ "isbn_13": [] })), None);
    }

    #[test]
    fn full_record_maps_every_field() {
        let bib = json!({
            "title": "The Hobbit",
            "authors": [{ "name": "J.R.R. Tolkien" }],
            "cover": { "medium": "https://covers.openlibrary.org/b/id/1-M.jpg" },
            "number_of_pages": 310,
            "publish_date": "21 September 1937"
        });

        let candidate = candidate_from_bib("OL1M", "9780261103573", &bib);
        assert_eq!(candidate.title, "The Hobbit");
        assert_eq!(candidate.author, "J.R.R. Tolkien");
        assert_eq!(
            candidate.image.as_deref(),
            Some("https://covers.openlibrary.org/b/id/1-M.jpg")
        );
        assert_eq!(candidate.num_pages, 310);
        assert_eq!(candidate.publish_date, "21 September 1937");
        assert_eq!(candidate.olid, "OL1M");
        assert_eq!(candidate.isbn, "9780261103573");
    }

    #[test]
    fn absent_fields_get_placeholders() {
        let candidate = candidate_from_bib("OL2M", "0000000000", &Value::Null);
        assert_eq!(candidate.title, PLACEHOLDER_TITLE);
        assert_eq!(candidate.author, PLACEHOLDER_AUTHOR);
        assert_eq!(candidate.image.as_deref(), Some(PLACEHOLDER_IMAGE));
        assert_eq!(candidate.num_pages, 0);
        assert_eq!(candidate.publish_date, PLACEHOLDER_PUBLISH_DATE);
    }

    #[test]
    fn empty_author_list_gets_placeholder() {
        let bib = json!({ "title": "Anonymous Work", "authors": [] });
        let candidate = candidate_from_bib("OL3M", "1111111111", &bib);
        assert_eq!(candidate.title, "Anonymous Work");
        assert_eq!(candidate.author, PLACEHOLDER_AUTHOR);
    }
}
