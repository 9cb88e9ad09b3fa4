use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};
use tracing::warn;

use crate::common::constants::{
    TARRANT_ARCHIVED_URL, TARRANT_ATTACHMENTS_URL, TARRANT_COMMISSIONERS_COURT,
    TARRANT_COMMISSIONERS_COURT_AGENCY, TARRANT_COMMITTEE_ID, TARRANT_LOCATION_ADDRESS,
    TARRANT_LOCATION_NAME, TARRANT_SOURCE_URL, TARRANT_UPCOMING_URL,
};
use crate::common::error::Result;
use crate::common::types::{Extraction, FetchRequest, MeetingSource, Page};
use crate::meeting::{Classification, Link, Location, MeetingArgs};
use crate::normalize::datetime;

/// Tarrant County Commissioners Court.
///
/// The agenda-management portal exposes two endpoints, one for archived and
/// one for current-and-upcoming meetings; the same committee id is POSTed
/// to both. The endpoints never cover the same date range, so the results
/// are concatenated without deduplication.
pub struct TarrantCommissionersCourt;

impl Default for TarrantCommissionersCourt {
    fn default() -> Self {
        Self::new()
    }
}

impl TarrantCommissionersCourt {
    pub fn new() -> Self {
        Self
    }
}

impl MeetingSource for TarrantCommissionersCourt {
    fn name(&self) -> &'static str {
        TARRANT_COMMISSIONERS_COURT
    }

    fn agency(&self) -> &'static str {
        TARRANT_COMMISSIONERS_COURT_AGENCY
    }

    fn requests(&self, _today: NaiveDate) -> Vec<FetchRequest> {
        let payload = json!({ "committeeId": TARRANT_COMMITTEE_ID });
        vec![
            FetchRequest::post_json(TARRANT_ARCHIVED_URL, &payload),
            FetchRequest::post_json(TARRANT_UPCOMING_URL, &payload),
        ]
    }

    fn extract(&self, page: &Page, now: NaiveDateTime) -> Result<Vec<Extraction>> {
        let data: Value = serde_json::from_str(&page.body)?;
        let meetings = data["data"].as_array().cloned().unwrap_or_default();

        let mut extractions = Vec::new();
        for item in &meetings {
            let args = MeetingArgs {
                title: Some(parse_title(item)),
                classification: Classification::Commission,
                start: item["meetingStartDateTime"]
                    .as_str()
                    .and_then(datetime::parse_iso_naive),
                end: item["meetingEndDateTime"]
                    .as_str()
                    .and_then(datetime::parse_iso_naive),
                location: Location::new(TARRANT_LOCATION_NAME, TARRANT_LOCATION_ADDRESS),
                links: parse_links(item),
                source: TARRANT_SOURCE_URL.to_string(),
                ..Default::default()
            };

            match args.build(TARRANT_COMMISSIONERS_COURT, now) {
                Ok(meeting) => extractions.push(Extraction::Meeting(meeting)),
                Err(err) => warn!("dropping court meeting item: {err}"),
            }
        }
        Ok(extractions)
    }
}

fn parse_title(item: &Value) -> String {
    item["description"]
        .as_str()
        .filter(|description| !description.is_empty())
        .unwrap_or("Commissioners Court")
        .to_string()
}

fn parse_links(item: &Value) -> Vec<Link> {
    let mut result = Vec::new();

    if let Some(agenda) = non_empty(&item["agendaAttachmentId"]) {
        result.push(Link::new(
            "Agenda",
            format!("{}{}", TARRANT_ATTACHMENTS_URL, agenda),
        ));
    }
    if let Some(minutes) = non_empty(&item["minutesAttachmentId"]) {
        result.push(Link::new(
            "Minutes",
            format!("{}{}", TARRANT_ATTACHMENTS_URL, minutes),
        ));
    }
    if let Some(video) = non_empty(&item["videoId"]) {
        result.push(Link::new(
            "Video",
            format!("https://www.youtube.com/watch?v={}", video),
        ));
    }
    result
}

fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}
