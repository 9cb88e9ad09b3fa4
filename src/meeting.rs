use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::common::error::{Result, ScraperError};

/// Governmental body type, from the closed canonical set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    CityCouncil,
    Board,
    Commission,
    Committee,
    NotClassified,
}

/// Derived meeting status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Tentative,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub address: String,
}

impl Location {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub href: String,
}

impl Link {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }
}

/// Canonical meeting record emitted by every source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub title: String,
    pub description: String,
    pub classification: Classification,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub all_day: bool,
    pub time_notes: String,
    pub location: Location,
    pub links: Vec<Link>,
    pub source: String,
    pub status: Status,
    pub id: String,
}

/// Normalized fields gathered by a source adapter, before the derived
/// `status` and `id` exist. `build` finishes the record or rejects it.
#[derive(Debug, Clone)]
pub struct MeetingArgs {
    pub title: Option<String>,
    pub description: String,
    pub classification: Classification,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub time_notes: String,
    pub location: Location,
    pub links: Vec<Link>,
    pub source: String,
    pub cancelled: bool,
}

impl Default for MeetingArgs {
    fn default() -> Self {
        Self {
            title: None,
            description: String::new(),
            classification: Classification::NotClassified,
            start: None,
            end: None,
            time_notes: String::new(),
            location: Location::new("", ""),
            links: Vec::new(),
            source: String::new(),
            cancelled: false,
        }
    }
}

impl MeetingArgs {
    /// Assemble the final record. Derived fields are computed last, purely
    /// from `(source_name, title, start, cancelled, now)`; a record without
    /// a title or start is rejected so callers can drop it and move on.
    pub fn build(self, source_name: &str, now: NaiveDateTime) -> Result<Meeting> {
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(ScraperError::MissingField("title".into())),
        };
        let start = self
            .start
            .ok_or_else(|| ScraperError::MissingField("start".into()))?;

        let status = if self.cancelled {
            Status::Cancelled
        } else if start <= now {
            Status::Passed
        } else {
            Status::Tentative
        };

        let id = format!(
            "{}/{}/x/{}",
            source_name,
            start.format("%Y%m%d%H%M"),
            slugify(&title)
        );

        Ok(Meeting {
            title,
            description: self.description,
            classification: self.classification,
            start,
            end: self.end,
            all_day: false,
            time_notes: self.time_notes,
            location: self.location,
            links: self.links,
            source: self.source,
            status,
            id,
        })
    }
}

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lower-case a title and collapse every non-alphanumeric run into a
/// single underscore.
pub fn slugify(title: &str) -> String {
    SLUG_RE
        .replace_all(&title.to_lowercase(), "_")
        .trim_matches('_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn slugify_collapses_runs() {
        assert_eq!(slugify("Special School Board Meeting"), "special_school_board_meeting");
        assert_eq!(slugify("2021 Citizens' Oversight Committee Meeting"), "2021_citizens_oversight_committee_meeting");
        assert_eq!(slugify("  TPW Meeting - Glasgow & Oak Grove "), "tpw_meeting_glasgow_oak_grove");
    }

    #[test]
    fn build_computes_id() {
        let args = MeetingArgs {
            title: Some("Special School Board Meeting".into()),
            start: Some(dt(2024, 10, 8, 17, 30)),
            ..Default::default()
        };
        let meeting = args.build("fortx_Fort_Worth_Isd", dt(2024, 10, 9, 0, 0)).unwrap();
        assert_eq!(
            meeting.id,
            "fortx_Fort_Worth_Isd/202410081730/x/special_school_board_meeting"
        );
        assert!(!meeting.all_day);
    }

    #[test]
    fn build_status_rules() {
        let base = MeetingArgs {
            title: Some("Court".into()),
            start: Some(dt(2024, 10, 4, 10, 0)),
            ..Default::default()
        };

        let past = base.clone().build("s", dt(2024, 10, 5, 0, 0)).unwrap();
        assert_eq!(past.status, Status::Passed);

        // start == now counts as passed
        let boundary = base.clone().build("s", dt(2024, 10, 4, 10, 0)).unwrap();
        assert_eq!(boundary.status, Status::Passed);

        let future = base.clone().build("s", dt(2024, 10, 1, 0, 0)).unwrap();
        assert_eq!(future.status, Status::Tentative);

        let mut cancelled_args = base;
        cancelled_args.cancelled = true;
        let cancelled = cancelled_args.build("s", dt(2024, 10, 5, 0, 0)).unwrap();
        assert_eq!(cancelled.status, Status::Cancelled);
    }

    #[test]
    fn build_rejects_missing_title_and_start() {
        let no_title = MeetingArgs {
            start: Some(dt(2024, 1, 1, 0, 0)),
            ..Default::default()
        };
        assert!(matches!(
            no_title.build("s", dt(2024, 1, 1, 0, 0)),
            Err(ScraperError::MissingField(f)) if f == "title"
        ));

        let blank_title = MeetingArgs {
            title: Some("   ".into()),
            start: Some(dt(2024, 1, 1, 0, 0)),
            ..Default::default()
        };
        assert!(blank_title.build("s", dt(2024, 1, 1, 0, 0)).is_err());

        let no_start = MeetingArgs {
            title: Some("Meeting".into()),
            ..Default::default()
        };
        assert!(matches!(
            no_start.build("s", dt(2024, 1, 1, 0, 0)),
            Err(ScraperError::MissingField(f)) if f == "start"
        ));
    }

    #[test]
    fn serde_tags_match_feed_format() {
        let args = MeetingArgs {
            title: Some("Council".into()),
            classification: Classification::CityCouncil,
            start: Some(dt(2024, 1, 2, 18, 0)),
            ..Default::default()
        };
        let meeting = args.build("s", dt(2024, 6, 1, 0, 0)).unwrap();
        let value = serde_json::to_value(&meeting).unwrap();
        assert_eq!(value["classification"], "city-council");
        assert_eq!(value["status"], "passed");
        assert_eq!(value["all_day"], false);
    }

    #[test]
    fn id_is_stable_across_rebuilds() {
        let make = || MeetingArgs {
            title: Some("Commissioners Court".into()),
            start: Some(dt(2024, 12, 3, 10, 0)),
            ..Default::default()
        };
        let a = make().build("fortx_Tarrant_County_Commissioners_Court", dt(2024, 11, 25, 0, 0)).unwrap();
        let b = make().build("fortx_Tarrant_County_Commissioners_Court", dt(2024, 11, 25, 0, 0)).unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.id, "fortx_Tarrant_County_Commissioners_Court/202412031000/x/commissioners_court");
    }
}
