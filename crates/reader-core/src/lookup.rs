//! Optional online metadata lookup against the Open Library search API.
//!
//! Every failure path returns `None`; a lookup can only ever add metadata.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::types::BookMetadata;

pub const SEARCH_URL: &str = "https://openlibrary.org/search.json";
pub const COVER_URL_PREFIX: &str = "https://covers.openlibrary.org/b/id/";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    cover_i: Option<i64>,
}

pub fn cover_url(cover_id: i64) -> String {
    format!("{COVER_URL_PREFIX}{cover_id}-M.jpg")
}

/// Query parameters for a search by title and/or author, or `None` when
/// there is nothing to search for.
pub fn search_params(title: Option<&str>, author: Option<&str>) -> Option<Vec<(&'static str, String)>> {
    let mut params = Vec::new();
    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        params.push(("title", title.to_string()));
    }
    if let Some(author) = author.map(str::trim).filter(|a| !a.is_empty()) {
        params.push(("author", author.to_string()));
    }
    if params.is_empty() {
        return None;
    }
    params.push(("limit", "1".to_string()));
    Some(params)
}

/// Metadata from the first search hit, if any field is usable.
pub fn parse_search_response(body: &str) -> Option<BookMetadata> {
    let response: SearchResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "unexpected metadata search response");
            return None;
        }
    };
    let doc = response.docs.into_iter().next()?;
    let metadata = BookMetadata {
        title: doc.title.filter(|t| !t.trim().is_empty()),
        author: doc.author_name.into_iter().next(),
        cover: doc.cover_i.map(cover_url),
    };
    (!metadata.is_empty()).then_some(metadata)
}

/// Blocking search. Never fails; errors and non-200 responses yield `None`.
pub fn lookup_metadata(title: Option<&str>, author: Option<&str>) -> Option<BookMetadata> {
    let params = search_params(title, author)?;
    let url = match reqwest::Url::parse_with_params(SEARCH_URL, &params) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "cannot build metadata search url");
            return None;
        }
    };
    debug!(url = %url, "metadata lookup");
    let response = match reqwest::blocking::get(url) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "metadata lookup failed");
            return None;
        }
    };
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        warn!(%status, "metadata lookup returned non-200");
        return None;
    }
    let body = match response.text() {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "cannot read metadata response");
            return None;
        }
    };
    parse_search_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_params_from_title_and_author() {
        let params = search_params(Some(" Dune "), Some("Frank Herbert")).unwrap();
        assert_eq!(
            params,
            vec![
                ("title", "Dune".to_string()),
                ("author", "Frank Herbert".to_string()),
                ("limit", "1".to_string()),
            ]
        );
        let params = search_params(None, Some("Austen")).unwrap();
        assert_eq!(params[0], ("author", "Austen".to_string()));
    }

    #[test]
    fn nothing_to_search_for() {
        assert_eq!(search_params(None, None), None);
        assert_eq!(search_params(Some("  "), Some("")), None);
    }

    #[test]
    fn parses_first_doc() {
        let body = r#"{"numFound": 2, "docs": [
            {"title": "Dune", "author_name": ["Frank Herbert", "Someone"], "cover_i": 12345},
            {"title": "Other"}
        ]}"#;
        let meta = parse_search_response(body).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Dune"));
        assert_eq!(meta.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(
            meta.cover.as_deref(),
            Some("https://covers.openlibrary.org/b/id/12345-M.jpg")
        );
    }

    #[test]
    fn partial_doc_keeps_available_fields() {
        let meta = parse_search_response(r#"{"docs": [{"title": "Only Title"}]}"#).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Only Title"));
        assert_eq!(meta.author, None);
        assert_eq!(meta.cover, None);
    }

    #[test]
    fn empty_or_invalid_responses_yield_none() {
        assert_eq!(parse_search_response(r#"{"docs": []}"#), None);
        assert_eq!(parse_search_response(r#"{"docs": [{}]}"#), None);
        assert_eq!(parse_search_response("<html>error</html>"), None);
    }
}
