use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::warn;

use crate::common::constants::{
    FORT_WORTH_CALENDAR_TIME_NOTES, FORT_WORTH_PUBLIC_MEETINGS,
    FORT_WORTH_PUBLIC_MEETINGS_AGENCY, FORT_WORTH_PUBLIC_MEETINGS_CALENDAR_ID,
};
use crate::common::error::Result;
use crate::common::types::{Extraction, FetchRequest, MeetingSource, Page, RawItem};
use crate::meeting::{Classification, Location, MeetingArgs};
use crate::normalize::datetime;
use crate::sources::fort_worth_city_council::{calendar_follow_ups, calendar_requests};
use crate::window::DateWindow;

/// Fort Worth Public Meetings calendar.
///
/// Same calendar-items API as the City Council source under its own
/// calendar id, with a single detail stage. Meetings without a posted
/// address are held via WebEx.
pub struct FortWorthPublicMeetings {
    window: DateWindow,
}

impl Default for FortWorthPublicMeetings {
    fn default() -> Self {
        Self::new()
    }
}

impl FortWorthPublicMeetings {
    pub fn new() -> Self {
        Self {
            window: DateWindow::CurrentYear,
        }
    }

    pub fn with_window(window: DateWindow) -> Self {
        Self { window }
    }
}

impl MeetingSource for FortWorthPublicMeetings {
    fn name(&self) -> &'static str {
        FORT_WORTH_PUBLIC_MEETINGS
    }

    fn agency(&self) -> &'static str {
        FORT_WORTH_PUBLIC_MEETINGS_AGENCY
    }

    fn requests(&self, today: NaiveDate) -> Vec<FetchRequest> {
        calendar_requests(self.window, today, FORT_WORTH_PUBLIC_MEETINGS_CALENDAR_ID)
    }

    fn extract(&self, page: &Page, _now: NaiveDateTime) -> Result<Vec<Extraction>> {
        calendar_follow_ups(&page.body, FORT_WORTH_PUBLIC_MEETINGS)
    }

    fn extract_detail(
        &self,
        page: &Page,
        item: &RawItem,
        now: NaiveDateTime,
    ) -> Result<Vec<Extraction>> {
        let data: Value = serde_json::from_str(&page.body)?;
        let detail = &data["data"];

        let cancelled = detail["IsCancelled"].as_bool().unwrap_or(false);
        let source = detail["Link"]
            .as_str()
            .filter(|link| !link.is_empty())
            .unwrap_or(&page.url)
            .to_string();

        let args = MeetingArgs {
            title: detail["Title"].as_str().map(str::to_string),
            description: parse_description(detail),
            classification: Classification::CityCouncil,
            start: item["DateTime"].as_str().and_then(datetime::parse_day_first),
            time_notes: FORT_WORTH_CALENDAR_TIME_NOTES.to_string(),
            location: parse_location(detail),
            source,
            cancelled,
            ..Default::default()
        };

        match args.build(FORT_WORTH_PUBLIC_MEETINGS, now) {
            Ok(meeting) => Ok(vec![Extraction::Meeting(meeting)]),
            Err(err) => {
                warn!("dropping public meeting item: {err}");
                Ok(Vec::new())
            }
        }
    }
}

fn parse_description(detail: &Value) -> String {
    detail["Description"]
        .as_str()
        .unwrap_or("")
        .replace(['\r', '\n'], "")
}

/// The `Formatted` address repeats the venue as its first segment; drop it.
/// A fully empty address means the meeting is held via WebEx.
fn parse_location(detail: &Value) -> Location {
    let address_obj = &detail["Address"];
    let name = address_obj["Venue"]
        .as_str()
        .filter(|venue| !venue.is_empty())
        .or_else(|| address_obj["Suburb"].as_str())
        .unwrap_or("");

    let formatted = address_obj["Formatted"].as_str().unwrap_or("");
    let mut segments: Vec<&str> = formatted.split(", ").collect();
    if segments.len() > 1 {
        segments.remove(0);
    }
    let address = segments.join(", ");

    if name.is_empty() && address.is_empty() {
        return Location::new("WebEx", "WebEx");
    }
    Location::new(name, address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn description_strips_newlines() {
        let detail = json!({"Description": "Join us\r\nat the meeting.\n"});
        assert_eq!(parse_description(&detail), "Join usat the meeting.");
    }

    #[test]
    fn formatted_address_drops_leading_venue_segment() {
        let detail = json!({"Address": {
            "Venue": "Highland Hills Community Center",
            "Suburb": "Fort Worth",
            "Formatted": "Highland Hills Community Center, 1600 Glasgow Road, Fort Worth, 76134"
        }});
        assert_eq!(
            parse_location(&detail),
            Location::new(
                "Highland Hills Community Center",
                "1600 Glasgow Road, Fort Worth, 76134"
            )
        );
    }

    #[test]
    fn empty_address_falls_back_to_webex() {
        let detail = json!({"Address": {"Venue": "", "Suburb": "", "Formatted": ""}});
        assert_eq!(parse_location(&detail), Location::new("WebEx", "WebEx"));
    }

    #[test]
    fn suburb_stands_in_for_missing_venue() {
        let detail = json!({"Address": {
            "Venue": "",
            "Suburb": "Fort Worth",
            "Formatted": "Fort Worth, 76102"
        }});
        assert_eq!(parse_location(&detail), Location::new("Fort Worth", "76102"));
    }
}
