//! Serde types for the API response envelope and result items.
//!
//! Every field an endpoint projects is required, so a response missing one
//! fails to deserialize instead of producing a partial row.

use serde::Deserialize;

use crate::models::PageInfo;

/// `{"response": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub response: T,
}

/// Payload of the list endpoints (search, tags, sections, editions)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResultsPayload<T> {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
    pub results: Vec<T>,
}

impl<T> ResultsPayload<T> {
    pub fn page_info(&self) -> Option<PageInfo> {
        if self.total.is_none() && self.current_page.is_none() && self.pages.is_none() {
            return None;
        }
        Some(PageInfo {
            total: self.total,
            current_page: self.current_page,
            pages: self.pages,
        })
    }
}

/// Payload of a single-item lookup
#[derive(Debug, Deserialize)]
pub(crate) struct ContentPayload {
    pub content: ContentItem,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContentItem {
    pub web_title: String,
    pub section_name: String,
    pub web_publication_date: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PillarItem {
    pub web_title: String,
    pub section_name: String,
    pub web_publication_date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub pillar_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LinkItem {
    pub web_title: String,
    pub api_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TagItem {
    pub web_title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Section and edition items only contribute their title
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NamedItem {
    pub web_title: String,
}

/// Best-effort error message from an error body.
///
/// The API reports errors either as `{"response": {"message": ..}}` or as a
/// top-level `{"message": ..}`; anything else falls back to the raw body.
pub(crate) fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        v.pointer("/response/message")
            .or_else(|| v.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
    });

    message.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "empty response body".to_string()
        } else {
            trimmed.chars().take(200).collect()
        }
    })
}

/// Whether the body carries `"status": "error"` inside the envelope
pub(crate) fn is_error_status(body: &str) -> bool {
    #[derive(Deserialize)]
    struct Status {
        #[serde(default)]
        status: Option<String>,
    }

    serde_json::from_str::<Envelope<Status>>(body)
        .ok()
        .and_then(|e| e.response.status)
        .is_some_and(|s| s == "error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_error_status() {
        assert!(is_error_status(
            r#"{"response": {"status": "error", "message": "bad key"}}"#
        ));
        assert!(!is_error_status(r#"{"response": {"status": "ok"}}"#));
        assert!(!is_error_status(r#"{"message": "Unauthorized"}"#));
        assert!(!is_error_status("<html></html>"));
    }

    #[test]
    fn test_results_payload_page_info() {
        let json = r#"{"response": {"status": "ok", "total": 120, "currentPage": 2, "pages": 3,
            "results": [{"webTitle": "Football"}]}}"#;
        let env: Envelope<ResultsPayload<NamedItem>> = serde_json::from_str(json).unwrap();
        let info = env.response.page_info().unwrap();
        assert_eq!(info.total, Some(120));
        assert_eq!(info.current_page, Some(2));
        assert_eq!(info.pages, Some(3));
        assert_eq!(env.response.results[0].web_title, "Football");
    }

    #[test]
    fn test_missing_results_is_an_error() {
        let json = r#"{"response": {"status": "ok"}}"#;
        let parsed: Result<Envelope<ResultsPayload<NamedItem>>, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_item_field_is_an_error() {
        let json = r#"{"webTitle": "x", "sectionName": "Film", "type": "article"}"#;
        let parsed: Result<ContentItem, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"response": {"status": "error", "message": "page out of range"}}"#),
            "page out of range"
        );
        assert_eq!(error_message(r#"{"message": "Unauthorized"}"#), "Unauthorized");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("  "), "empty response body");
    }
}
