use chrono::{NaiveDate, NaiveDateTime};
use scraper::{Html, Selector};
use serde_json::{json, Value};
use tracing::warn;

use crate::common::constants::{
    FORT_WORTH_BASE_URL, FORT_WORTH_CALENDAR_ITEMS_URL, FORT_WORTH_CALENDAR_TIME_NOTES,
    FORT_WORTH_CITY_COUNCIL, FORT_WORTH_CITY_COUNCIL_AGENCY, FORT_WORTH_CITY_COUNCIL_CALENDAR_ID,
    FORT_WORTH_CONTENT_INFO_URL,
};
use crate::common::error::{Result, ScraperError};
use crate::common::types::{Extraction, FetchRequest, MeetingSource, Page, RawItem};
use crate::meeting::{Classification, Link, Location, MeetingArgs};
use crate::normalize::{datetime, links};
use crate::window::DateWindow;

/// Fort Worth City Council meetings.
///
/// Three stages: the calendar-items API lists the items for a date window,
/// a contentinfo call adds title/description/address, and the public
/// details page named by the contentinfo `Link` carries the attachment
/// side-box. The date window is a policy decision, so it is a constructor
/// parameter; the upstream API accepts at most one calendar year per query.
pub struct FortWorthCityCouncil {
    window: DateWindow,
}

impl Default for FortWorthCityCouncil {
    fn default() -> Self {
        Self::new()
    }
}

impl FortWorthCityCouncil {
    pub fn new() -> Self {
        Self {
            window: DateWindow::CurrentYear,
        }
    }

    pub fn with_window(window: DateWindow) -> Self {
        Self { window }
    }
}

impl MeetingSource for FortWorthCityCouncil {
    fn name(&self) -> &'static str {
        FORT_WORTH_CITY_COUNCIL
    }

    fn agency(&self) -> &'static str {
        FORT_WORTH_CITY_COUNCIL_AGENCY
    }

    fn requests(&self, today: NaiveDate) -> Vec<FetchRequest> {
        calendar_requests(self.window, today, FORT_WORTH_CITY_COUNCIL_CALENDAR_ID)
    }

    fn extract(&self, page: &Page, _now: NaiveDateTime) -> Result<Vec<Extraction>> {
        calendar_follow_ups(&page.body, FORT_WORTH_CITY_COUNCIL)
    }

    fn extract_detail(
        &self,
        page: &Page,
        item: &RawItem,
        now: NaiveDateTime,
    ) -> Result<Vec<Extraction>> {
        // Second stage: contentinfo JSON. Stash it on the item and chase
        // the public details page for the attachment links.
        let Some(detail) = item.get("detail") else {
            let data: Value = serde_json::from_str(&page.body)?;
            let detail = data["data"].clone();
            let Some(details_url) = detail["Link"].as_str().filter(|link| !link.is_empty()) else {
                warn!("contentinfo without a details-page Link, skipping item");
                return Ok(Vec::new());
            };
            let request = FetchRequest::get(details_url);
            let mut enriched = item.clone();
            enriched["detail"] = detail;
            return Ok(vec![Extraction::FollowUp {
                request,
                item: enriched,
            }]);
        };

        // Final stage: details HTML page.
        let cancelled = detail["IsCancelled"].as_bool().unwrap_or(false);
        let args = MeetingArgs {
            title: detail["Title"].as_str().map(str::to_string),
            description: detail["Description"].as_str().unwrap_or("").to_string(),
            classification: Classification::CityCouncil,
            start: item["DateTime"].as_str().and_then(datetime::parse_day_first),
            time_notes: FORT_WORTH_CALENDAR_TIME_NOTES.to_string(),
            location: parse_location(detail, cancelled),
            links: parse_attachment_links(&page.body),
            source: page.url.clone(),
            cancelled,
            ..Default::default()
        };

        match args.build(FORT_WORTH_CITY_COUNCIL, now) {
            Ok(meeting) => Ok(vec![Extraction::Meeting(meeting)]),
            Err(err) => {
                warn!("dropping council meeting item: {err}");
                Ok(Vec::new())
            }
        }
    }
}

/// Build one calendar-items POST per window sub-range. The payload is
/// rendered per call; nothing mutable is shared between requests.
pub(crate) fn calendar_requests(
    window: DateWindow,
    today: NaiveDate,
    calendar_id: &str,
) -> Vec<FetchRequest> {
    window
        .ranges(today)
        .into_iter()
        .map(|(from, to)| {
            FetchRequest::post_json(
                FORT_WORTH_CALENDAR_ITEMS_URL,
                &json!({
                    "LanguageCode": "en-US",
                    "Ids": [calendar_id],
                    "StartDate": from.to_string(),
                    "EndDate": to.to_string(),
                }),
            )
        })
        .collect()
}

/// Flatten the calendar-items payload and yield one contentinfo follow-up
/// per item. Shared with the Public Meetings source, which uses the same
/// API under a different calendar id.
pub(crate) fn calendar_follow_ups(body: &str, source_name: &str) -> Result<Vec<Extraction>> {
    let data: Value = serde_json::from_str(body)?;
    let calendar_days = data["data"]
        .as_array()
        .ok_or_else(|| ScraperError::MissingField("data".into()))?;

    let mut extractions = Vec::new();
    for calendar_day in calendar_days {
        let Some(items) = calendar_day["Items"].as_array() else {
            continue;
        };
        for item in items {
            let Some(start) = item["DateTime"].as_str().and_then(datetime::parse_day_first)
            else {
                warn!(source = source_name, "calendar item with unparseable DateTime, skipping");
                continue;
            };
            let (Some(calendar_id), Some(content_id), Some(main_content_id)) = (
                item["CalendarId"].as_str(),
                item["Id"].as_str(),
                item["MainContentId"].as_str(),
            ) else {
                warn!(source = source_name, "calendar item missing ids, skipping");
                continue;
            };
            // The API wants the item's own timestamp echoed back, with
            // URL-encoded spaces
            let current_date_time = start
                .format("%d/%m/%Y %I:%M:%S %p")
                .to_string()
                .replace(' ', "%20");
            let detail_url = format!(
                "{}?calendarId={}&contentId={}&language=en-US&currentDateTime={}&mainContentId={}",
                FORT_WORTH_CONTENT_INFO_URL,
                calendar_id,
                content_id,
                current_date_time,
                main_content_id
            );
            extractions.push(Extraction::FollowUp {
                request: FetchRequest::get(detail_url),
                item: item.clone(),
            });
        }
    }
    Ok(extractions)
}

/// Cancelled meetings do not return the full address; the suburb stands in
/// for the venue name.
fn parse_location(detail: &Value, cancelled: bool) -> Location {
    let address_obj = &detail["Address"];
    let name = if cancelled {
        address_obj["Suburb"].as_str().unwrap_or("")
    } else {
        address_obj["Venue"].as_str().unwrap_or("")
    };
    let address = address_obj["Formatted"].as_str().unwrap_or("").trim();
    Location::new(name, address)
}

/// Scrape the consultation side-box on the details page for attachments.
fn parse_attachment_links(body: &str) -> Vec<Link> {
    let document = Html::parse_document(body);
    let box_selector = Selector::parse(".side-box.consultation-snapshot").unwrap();
    let hint_selector = Selector::parse(".side-box-title").unwrap();
    let anchor_selector = Selector::parse(".side-box-section.body-content a").unwrap();

    let mut result = Vec::new();
    let Some(side_box) = document.select(&box_selector).next() else {
        return result;
    };
    let hint = side_box
        .select(&hint_selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    let Some(href) = side_box
        .select(&anchor_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
    else {
        return result;
    };
    let resolved = links::absolute(FORT_WORTH_BASE_URL, href);

    if hint.contains("agenda") {
        result.push(Link::new("Agenda", resolved.clone()));
    }
    if hint.contains("minutes") {
        result.push(Link::new("Minutes", resolved.clone()));
    }
    if hint.contains("notice") {
        result.push(Link::new("Public Notice", resolved));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_location_uses_suburb() {
        let detail = json!({"Address": {
            "Venue": "Old City Hall",
            "Suburb": "Fort Worth",
            "Formatted": " 200 Texas St., Fort Worth, 76102 "
        }});
        assert_eq!(
            parse_location(&detail, false),
            Location::new("Old City Hall", "200 Texas St., Fort Worth, 76102")
        );
        assert_eq!(
            parse_location(&detail, true),
            Location::new("Fort Worth", "200 Texas St., Fort Worth, 76102")
        );
    }

    #[test]
    fn side_box_hint_selects_link_titles() {
        let body = r#"
            <html><body>
            <div class="side-box consultation-snapshot">
              <div class="side-box-title">Meeting Agenda</div>
              <div class="side-box-section body-content">
                <a href="/files/assets/public/agenda.pdf">Download</a>
              </div>
            </div>
            </body></html>"#;
        assert_eq!(
            parse_attachment_links(body),
            vec![Link::new(
                "Agenda",
                "https://www.fortworthtexas.gov/files/assets/public/agenda.pdf"
            )]
        );
    }

    #[test]
    fn page_without_side_box_has_no_links() {
        assert!(parse_attachment_links("<html><body></body></html>").is_empty());
    }

    #[test]
    fn window_requests_split_per_year() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 4).unwrap();
        let requests = calendar_requests(
            DateWindow::Months { back: 6, forward: 6 },
            today,
            FORT_WORTH_CITY_COUNCIL_CALENDAR_ID,
        );
        assert_eq!(requests.len(), 2);
        let first: Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(first["StartDate"], "2024-04-04");
        assert_eq!(first["EndDate"], "2024-12-31");
        let second: Value = serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(second["StartDate"], "2025-01-01");
        assert_eq!(second["EndDate"], "2025-04-04");
    }
}
