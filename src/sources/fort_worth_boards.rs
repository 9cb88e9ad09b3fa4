use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, warn};

use crate::common::constants::{
    FORT_WORTH_BASE_URL, FORT_WORTH_BOARDS, FORT_WORTH_BOARDS_AGENCY,
    FORT_WORTH_BOARDS_CALENDAR_ID, FORT_WORTH_BOARDS_SOURCE_URL, FORT_WORTH_CALENDAR_ITEMS_URL,
    FORT_WORTH_CONTENT_INFO_URL,
};
use crate::common::error::{Result, ScraperError};
use crate::common::types::{Extraction, FetchRequest, MeetingSource, Page, RawItem};
use crate::meeting::{Classification, Link, Location, MeetingArgs};
use crate::normalize::{address, datetime, links};

/// Fort Worth Boards and Commissions calendar.
///
/// The published page is backed by a calendar-items API; each item needs a
/// contentinfo call for its description, address and link. That second call
/// is issued with a blank User-Agent because the endpoint rejects the
/// default one.
pub struct FortWorthBoards;

impl Default for FortWorthBoards {
    fn default() -> Self {
        Self::new()
    }
}

impl FortWorthBoards {
    pub fn new() -> Self {
        Self
    }
}

impl MeetingSource for FortWorthBoards {
    fn name(&self) -> &'static str {
        FORT_WORTH_BOARDS
    }

    fn agency(&self) -> &'static str {
        FORT_WORTH_BOARDS_AGENCY
    }

    fn requests(&self, _today: NaiveDate) -> Vec<FetchRequest> {
        vec![FetchRequest::get(format!(
            "{}?Ids={}&LanguageCode=en-US",
            FORT_WORTH_CALENDAR_ITEMS_URL, FORT_WORTH_BOARDS_CALENDAR_ID
        ))]
    }

    fn extract(&self, page: &Page, _now: NaiveDateTime) -> Result<Vec<Extraction>> {
        let data: Value = serde_json::from_str(&page.body)?;
        let calendar_days = data["data"]
            .as_array()
            .ok_or_else(|| ScraperError::MissingField("data".into()))?;

        let mut extractions = Vec::new();
        for calendar_day in calendar_days {
            let Some(items) = calendar_day["Items"].as_array() else {
                continue;
            };
            debug!("Processing {} calendar items", items.len());
            for item in items {
                let (Some(calendar_id), Some(content_id)) =
                    (item["CalendarId"].as_str(), item["Id"].as_str())
                else {
                    warn!("calendar item without CalendarId/Id, skipping");
                    continue;
                };
                let info_url = format!(
                    "{}?calendarId={}&contentId={}&language=en-US&mainContentId={}",
                    FORT_WORTH_CONTENT_INFO_URL, calendar_id, content_id, content_id
                );
                extractions.push(Extraction::FollowUp {
                    request: FetchRequest::get(info_url).with_header("User-Agent", ""),
                    item: item.clone(),
                });
            }
        }
        Ok(extractions)
    }

    fn extract_detail(
        &self,
        page: &Page,
        item: &RawItem,
        now: NaiveDateTime,
    ) -> Result<Vec<Extraction>> {
        let data: Value = serde_json::from_str(&page.body)?;
        let info = &data["data"];

        let args = MeetingArgs {
            title: item["Name"].as_str().map(str::to_string),
            description: info["Description"].as_str().unwrap_or("").to_string(),
            classification: Classification::Commission,
            start: item["DateTime"].as_str().and_then(datetime::parse_day_first),
            location: parse_location(info),
            links: parse_links(info),
            source: FORT_WORTH_BOARDS_SOURCE_URL.to_string(),
            ..Default::default()
        };

        match args.build(FORT_WORTH_BOARDS, now) {
            Ok(meeting) => Ok(vec![Extraction::Meeting(meeting)]),
            Err(err) => {
                warn!("dropping board meeting item: {err}");
                Ok(Vec::new())
            }
        }
    }
}

fn parse_location(info: &Value) -> Location {
    let obj = &info["Address"];
    let venue = obj["Venue"].as_str().unwrap_or("");
    let street = obj["Street"].as_str().unwrap_or("");
    let suburb = obj["Suburb"].as_str().unwrap_or("");
    let zip = obj["PostCode"].as_str().unwrap_or("");

    // Items without any posted address default to the city itself
    let address = if street.is_empty() && suburb.is_empty() && zip.is_empty() {
        "Fort Worth, TX".to_string()
    } else {
        address::join_parts(&[Some(street), Some(suburb), Some(zip), Some("TX")])
    };

    Location::new(venue, address)
}

fn parse_links(info: &Value) -> Vec<Link> {
    match info["Link"].as_str() {
        Some(href) if !href.is_empty() => {
            vec![Link::new("Link", links::absolute(FORT_WORTH_BASE_URL, href))]
        }
        _ => Vec::new(),
    }
}
