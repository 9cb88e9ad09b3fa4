use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::common::types::{Extraction, FetchRequest, MeetingSource, Page, RawItem};
use crate::meeting::Meeting;

/// The seam to the external fetching framework: request description in,
/// document out. Implementations own transport, retries and scheduling.
pub trait DocumentFetcher {
    fn fetch(&self, request: &FetchRequest) -> anyhow::Result<Page>;
}

/// Run one source to completion against a fetcher.
///
/// Follow-up fetches are resolved depth-first so the output order matches
/// the order items appear in the source documents. A failed fetch or a
/// failed extraction drops only the affected request or item.
pub fn run_source(
    source: &dyn MeetingSource,
    fetcher: &dyn DocumentFetcher,
    today: NaiveDate,
    now: NaiveDateTime,
) -> Vec<Meeting> {
    let mut meetings = Vec::new();

    for request in source.requests(today) {
        let page = match fetcher.fetch(&request) {
            Ok(page) => page,
            Err(err) => {
                warn!(source = source.name(), url = %request.url, "fetch failed: {err:#}");
                continue;
            }
        };
        match source.extract(&page, now) {
            Ok(extractions) => resolve(source, fetcher, now, extractions, &mut meetings),
            Err(err) => {
                warn!(source = source.name(), url = %page.url, "extract failed: {err}");
            }
        }
    }

    info!(
        source = source.name(),
        count = meetings.len(),
        "extraction finished"
    );
    meetings
}

fn resolve(
    source: &dyn MeetingSource,
    fetcher: &dyn DocumentFetcher,
    now: NaiveDateTime,
    extractions: Vec<Extraction>,
    meetings: &mut Vec<Meeting>,
) {
    for extraction in extractions {
        match extraction {
            Extraction::Meeting(meeting) => meetings.push(meeting),
            Extraction::FollowUp { request, item } => {
                follow_up(source, fetcher, now, request, item, meetings)
            }
        }
    }
}

fn follow_up(
    source: &dyn MeetingSource,
    fetcher: &dyn DocumentFetcher,
    now: NaiveDateTime,
    request: FetchRequest,
    item: RawItem,
    meetings: &mut Vec<Meeting>,
) {
    let page = match fetcher.fetch(&request) {
        Ok(page) => page,
        Err(err) => {
            warn!(source = source.name(), url = %request.url, "detail fetch failed, skipping item: {err:#}");
            return;
        }
    };
    match source.extract_detail(&page, &item, now) {
        Ok(extractions) => resolve(source, fetcher, now, extractions, meetings),
        Err(err) => {
            warn!(source = source.name(), url = %page.url, "detail extract failed, skipping item: {err}");
        }
    }
}
