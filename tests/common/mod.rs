#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use fortx_scraper::runner::DocumentFetcher;
use fortx_scraper::{FetchRequest, Page};

/// Stands in for the external fetching framework: a URL-to-body map.
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.insert(url.into(), body.into());
    }
}

impl DocumentFetcher for FixtureFetcher {
    fn fetch(&self, request: &FetchRequest) -> anyhow::Result<Page> {
        self.pages
            .get(&request.url)
            .map(|body| Page::new(request.url.clone(), body.clone()))
            .ok_or_else(|| anyhow::anyhow!("no fixture registered for {}", request.url))
    }
}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("reading {}: {err}", path.display()))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}
