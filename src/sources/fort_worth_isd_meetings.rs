use chrono::{NaiveDate, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::common::constants::{
    BOARDBOOK_BASE_URL, FORT_WORTH_ISD_MEETINGS, FORT_WORTH_ISD_MEETINGS_AGENCY,
    FORT_WORTH_ISD_MEETINGS_URL,
};
use crate::common::error::Result;
use crate::common::types::{Extraction, FetchRequest, MeetingSource, Page};
use crate::meeting::{Classification, Link, Location, MeetingArgs};
use crate::normalize::{address, datetime, links};

/// Fort Worth ISD meetings on boardbook.org.
///
/// Each table row packs date, time and title into one cell, formatted
/// "Tuesday, August 27, 2024 at 5:30 PM - Regular Board Meeting"; the end
/// time after the dash, when present, is ignored because the listing does
/// not state it reliably.
pub struct FortWorthIsdMeetings;

impl Default for FortWorthIsdMeetings {
    fn default() -> Self {
        Self::new()
    }
}

impl FortWorthIsdMeetings {
    pub fn new() -> Self {
        Self
    }
}

impl MeetingSource for FortWorthIsdMeetings {
    fn name(&self) -> &'static str {
        FORT_WORTH_ISD_MEETINGS
    }

    fn agency(&self) -> &'static str {
        FORT_WORTH_ISD_MEETINGS_AGENCY
    }

    fn requests(&self, _today: NaiveDate) -> Vec<FetchRequest> {
        vec![FetchRequest::get(FORT_WORTH_ISD_MEETINGS_URL)]
    }

    fn extract(&self, page: &Page, now: NaiveDateTime) -> Result<Vec<Extraction>> {
        let document = Html::parse_document(&page.body);
        let row_selector = Selector::parse("table tbody tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        let mut extractions = Vec::new();
        for row in document.select(&row_selector) {
            let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
            let Some(heading) = cells.first().map(|cell| cell_div_text(cell)) else {
                continue;
            };

            let args = MeetingArgs {
                title: parse_title(&heading),
                classification: Classification::NotClassified,
                start: parse_start(&heading),
                location: cells.get(1).map(parse_location).unwrap_or_else(|| Location::new("", "")),
                links: parse_links(&row),
                source: page.url.clone(),
                ..Default::default()
            };

            match args.build(FORT_WORTH_ISD_MEETINGS, now) {
                Ok(meeting) => extractions.push(Extraction::Meeting(meeting)),
                Err(err) => warn!("dropping boardbook row: {err}"),
            }
        }
        Ok(extractions)
    }
}

/// First div inside the cell holds the "<date> at <time> - <title>" text.
fn cell_div_text(cell: &ElementRef) -> String {
    let div_selector = Selector::parse("div").unwrap();
    cell.select(&div_selector)
        .next()
        .map(|div| div.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn parse_title(heading: &str) -> Option<String> {
    heading
        .split('-')
        .nth(1)
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

fn parse_start(heading: &str) -> Option<NaiveDateTime> {
    let (date_part, rest) = heading.split_once(" at ")?;
    let time_part = rest.split('-').next().unwrap_or("");
    let date = datetime::parse_month_day_year(date_part)?;
    let time = datetime::parse_clock_time(time_part)?;
    Some(date.and_time(time))
}

/// Venue name then two address lines, one span each.
fn parse_location(cell: &ElementRef) -> Location {
    let span_selector = Selector::parse("span").unwrap();
    let lines: Vec<String> = cell
        .select(&span_selector)
        .map(|span| span.text().collect::<String>().trim().to_string())
        .collect();

    let name = lines.first().cloned().unwrap_or_default();
    let address = address::join_parts(&[
        lines.get(1).map(String::as_str),
        lines.get(2).map(String::as_str),
    ]);
    Location::new(name, address)
}

fn parse_links(row: &ElementRef) -> Vec<Link> {
    let anchor_selector = Selector::parse("a").unwrap();
    row.select(&anchor_selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let label = anchor.text().collect::<String>();
            Some(Link::new(
                links::infer_title(&label),
                links::absolute(BOARDBOOK_BASE_URL, href),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn heading_splits_into_title_and_start() {
        let heading = "Tuesday, August 27, 2024 at 5:30 PM - Regular Board Meeting";
        assert_eq!(parse_title(heading).as_deref(), Some("Regular Board Meeting"));
        assert_eq!(
            parse_start(heading),
            NaiveDate::from_ymd_opt(2024, 8, 27).unwrap().and_hms_opt(17, 30, 0)
        );
    }

    #[test]
    fn saturday_headings_parse() {
        // " at " must not match the "at" inside "Saturday"
        let heading = "Saturday, June 1, 2024 at 9:00 AM - Budget Workshop";
        assert_eq!(parse_title(heading).as_deref(), Some("Budget Workshop"));
        assert_eq!(
            parse_start(heading),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 0, 0)
        );
    }

    #[test]
    fn heading_without_time_is_rejected() {
        assert_eq!(parse_start("August 27, 2024 - Regular Board Meeting"), None);
        assert_eq!(parse_title("no separator here"), None);
    }
}
