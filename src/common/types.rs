use chrono::{NaiveDate, NaiveDateTime};

use crate::common::error::{Result, ScraperError};
use crate::meeting::Meeting;

/// Raw per-item data carried between extraction stages.
///
/// JSON-backed sources pass upstream items through unchanged; HTML-backed
/// multi-stage sources stash whatever state the next stage needs under
/// their own keys.
pub type RawItem = serde_json::Value;

/// An already-fetched document: the body text (HTML or JSON) plus the URL
/// it was retrieved from. Fetching is the collaborator's job, never ours.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

impl Page {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Description of a fetch the external collaborator must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub method: HttpMethod,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            body: None,
            headers: Vec::new(),
        }
    }

    /// A POST carrying a JSON payload. The payload is rendered immediately
    /// so each request owns an immutable body.
    pub fn post_json(url: impl Into<String>, payload: &serde_json::Value) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            body: Some(payload.to_string()),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// One unit of output from an extraction stage: either a finished record,
/// or a follow-up fetch paired with the item it belongs to.
#[derive(Debug)]
pub enum Extraction {
    Meeting(Meeting),
    FollowUp { request: FetchRequest, item: RawItem },
}

/// Core trait every meeting data source implements.
///
/// Sources are stateless between invocations; `now` is passed in explicitly
/// so status computation stays deterministic under test.
pub trait MeetingSource {
    /// Stable identifier namespacing every meeting id from this source.
    fn name(&self) -> &'static str;

    /// Human-readable name of the governmental body.
    fn agency(&self) -> &'static str;

    /// The civic timezone all emitted naive datetimes belong to.
    fn timezone(&self) -> &'static str {
        "America/Chicago"
    }

    /// Initial fetches the collaborator should perform for this source.
    fn requests(&self, today: NaiveDate) -> Vec<FetchRequest>;

    /// First-stage extraction over a fetched document.
    fn extract(&self, page: &Page, now: NaiveDateTime) -> Result<Vec<Extraction>>;

    /// Later-stage extraction for sources that yield follow-up fetches.
    fn extract_detail(
        &self,
        _page: &Page,
        _item: &RawItem,
        _now: NaiveDateTime,
    ) -> Result<Vec<Extraction>> {
        Err(ScraperError::Parse {
            message: format!("{} has no detail stage", self.name()),
        })
    }
}
