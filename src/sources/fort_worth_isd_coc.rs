use chrono::{NaiveDate, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::common::constants::{
    FORT_WORTH_ISD_COC, FORT_WORTH_ISD_COC_AGENCY, FORT_WORTH_ISD_COC_LOCATION_ADDRESS,
    FORT_WORTH_ISD_COC_LOCATION_NAME, FORT_WORTH_ISD_COC_TITLE, FORT_WORTH_ISD_COC_URL,
    FWISD_BASE_URL,
};
use crate::common::error::Result;
use crate::common::types::{Extraction, FetchRequest, MeetingSource, Page};
use crate::dedup::SeenDates;
use crate::meeting::{Classification, Link, Location, MeetingArgs};
use crate::normalize::{datetime, links};

/// Fort Worth ISD 2021 Citizens' Oversight Committee.
///
/// One page, two overlapping sections: a meeting-documents table of past
/// meetings and an upcoming-meetings calendar. The table is scraped first
/// because its rows carry the document links; upcoming entries whose date
/// already appeared in the table are duplicates and get skipped.
pub struct FortWorthIsdCoc;

impl Default for FortWorthIsdCoc {
    fn default() -> Self {
        Self::new()
    }
}

impl FortWorthIsdCoc {
    pub fn new() -> Self {
        Self
    }
}

impl MeetingSource for FortWorthIsdCoc {
    fn name(&self) -> &'static str {
        FORT_WORTH_ISD_COC
    }

    fn agency(&self) -> &'static str {
        FORT_WORTH_ISD_COC_AGENCY
    }

    fn requests(&self, _today: NaiveDate) -> Vec<FetchRequest> {
        vec![FetchRequest::get(FORT_WORTH_ISD_COC_URL)]
    }

    fn extract(&self, page: &Page, now: NaiveDateTime) -> Result<Vec<Extraction>> {
        let document = Html::parse_document(&page.body);
        let location = Location::new(
            FORT_WORTH_ISD_COC_LOCATION_NAME,
            FORT_WORTH_ISD_COC_LOCATION_ADDRESS,
        );

        let mut seen = SeenDates::new();
        let mut extractions = Vec::new();

        // Past meetings table. All meetings appear to happen at 6 PM; the
        // cells only carry the date.
        let table_selector = Selector::parse("table").unwrap();
        let row_selector = Selector::parse("tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();
        if let Some(table) = document.select(&table_selector).next() {
            for row in table.select(&row_selector) {
                let Some(date) = row
                    .select(&cell_selector)
                    .next()
                    .map(|cell| cell.text().collect::<String>())
                    .and_then(|text| datetime::parse_month_day_year(&text))
                else {
                    debug!("table row without a date cell, skipping");
                    continue;
                };
                seen.mark(date);

                let args = MeetingArgs {
                    title: Some(FORT_WORTH_ISD_COC_TITLE.to_string()),
                    classification: Classification::Committee,
                    start: date.and_hms_opt(18, 0, 0),
                    location: location.clone(),
                    links: parse_row_links(&row, &cell_selector),
                    source: page.url.clone(),
                    ..Default::default()
                };
                match args.build(FORT_WORTH_ISD_COC, now) {
                    Ok(meeting) => extractions.push(Extraction::Meeting(meeting)),
                    Err(err) => warn!("dropping table row: {err}"),
                }
            }
        }

        // Upcoming calendar section, minus dates the table already covered
        let upcoming_selector = Selector::parse(".fsDayContainer").unwrap();
        let title_selector = Selector::parse(".fsTitle a").unwrap();
        let start_selector = Selector::parse(".fsStartTime").unwrap();
        let end_selector = Selector::parse(".fsEndTime").unwrap();
        for item in document.select(&upcoming_selector) {
            let Some(start) = attr_datetime(&item, &start_selector) else {
                warn!("upcoming entry without a start time, skipping");
                continue;
            };
            if seen.contains(start.date()) {
                debug!("upcoming entry on {} already scraped from table", start.date());
                continue;
            }

            let args = MeetingArgs {
                title: item
                    .select(&title_selector)
                    .next()
                    .map(|el| el.text().collect::<String>().trim().to_string()),
                classification: Classification::Committee,
                start: Some(start),
                end: attr_datetime(&item, &end_selector),
                location: location.clone(),
                source: page.url.clone(),
                ..Default::default()
            };
            match args.build(FORT_WORTH_ISD_COC, now) {
                Ok(meeting) => extractions.push(Extraction::Meeting(meeting)),
                Err(err) => warn!("dropping upcoming entry: {err}"),
            }
        }

        Ok(extractions)
    }
}

fn attr_datetime(item: &ElementRef, selector: &Selector) -> Option<NaiveDateTime> {
    item.select(selector)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .and_then(datetime::parse_iso_naive)
}

/// Any anchor in a row cell is a meeting document (agenda, presentation,
/// minutes), titled by its own text.
fn parse_row_links(row: &ElementRef, cell_selector: &Selector) -> Vec<Link> {
    let anchor_selector = Selector::parse("a").unwrap();
    let mut result = Vec::new();
    for cell in row.select(cell_selector) {
        if let Some(anchor) = cell.select(&anchor_selector).next() {
            let label = anchor.text().collect::<String>();
            if let Some(href) = anchor.value().attr("href") {
                result.push(Link::new(
                    links::infer_title(&label),
                    links::absolute(FWISD_BASE_URL, href),
                ));
            }
        }
    }
    result
}
