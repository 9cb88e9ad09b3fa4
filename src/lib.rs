pub mod common;
pub mod dedup;
pub mod logging;
pub mod meeting;
pub mod normalize;
pub mod runner;
pub mod sources;
pub mod window;

pub use common::error::{Result, ScraperError};
pub use common::types::{Extraction, FetchRequest, HttpMethod, MeetingSource, Page, RawItem};
pub use meeting::{Classification, Link, Location, Meeting, MeetingArgs, Status};
