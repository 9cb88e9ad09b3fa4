use chrono::{NaiveDate, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::common::constants::{FORT_WORTH_ISD, FORT_WORTH_ISD_AGENCY, FORT_WORTH_ISD_URL};
use crate::common::error::Result;
use crate::common::types::{Extraction, FetchRequest, MeetingSource, Page};
use crate::meeting::{Classification, Location, MeetingArgs};
use crate::normalize::datetime;

/// Fort Worth ISD board calendar.
///
/// The page renders a literal month calendar; day cells with events carry
/// the meeting title and machine-readable start/end timestamps. The
/// timestamps come with a UTC offset that must be stripped, not converted.
pub struct FortWorthIsd;

impl Default for FortWorthIsd {
    fn default() -> Self {
        Self::new()
    }
}

impl FortWorthIsd {
    pub fn new() -> Self {
        Self
    }
}

impl MeetingSource for FortWorthIsd {
    fn name(&self) -> &'static str {
        FORT_WORTH_ISD
    }

    fn agency(&self) -> &'static str {
        FORT_WORTH_ISD_AGENCY
    }

    fn requests(&self, _today: NaiveDate) -> Vec<FetchRequest> {
        vec![FetchRequest::get(FORT_WORTH_ISD_URL)]
    }

    fn extract(&self, page: &Page, now: NaiveDateTime) -> Result<Vec<Extraction>> {
        let document = Html::parse_document(&page.body);
        let day_selector = Selector::parse(".fsStateHasEvents").unwrap();
        let title_selector = Selector::parse(".fsCalendarTitle").unwrap();
        let start_selector = Selector::parse(".fsStartTime").unwrap();
        let end_selector = Selector::parse(".fsEndTime").unwrap();
        let location_selector = Selector::parse(".fsLocation").unwrap();

        let mut extractions = Vec::new();
        for day in document.select(&day_selector) {
            let args = MeetingArgs {
                title: day
                    .select(&title_selector)
                    .next()
                    .map(|el| text_of(&el)),
                classification: Classification::Board,
                start: attr_datetime(&day, &start_selector),
                end: attr_datetime(&day, &end_selector),
                location: parse_location(&day, &location_selector),
                source: page.url.clone(),
                ..Default::default()
            };

            match args.build(FORT_WORTH_ISD, now) {
                Ok(meeting) => extractions.push(Extraction::Meeting(meeting)),
                Err(err) => warn!("dropping calendar day: {err}"),
            }
        }
        Ok(extractions)
    }
}

fn attr_datetime(day: &ElementRef, selector: &Selector) -> Option<NaiveDateTime> {
    day.select(selector)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .and_then(datetime::parse_iso_naive)
}

fn parse_location(day: &ElementRef, selector: &Selector) -> Location {
    let name = day
        .select(selector)
        .next()
        .map(|el| text_of(&el))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "TBD".to_string());
    Location::new(name, "")
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
