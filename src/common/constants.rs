//! Source name constants to ensure consistency across the codebase.
//!
//! The source names double as the namespace of every emitted meeting id,
//! so they must stay byte-stable across releases; downstream consumers use
//! the id as their upsert key.

// Source names (id namespaces)
pub const FORT_WORTH_BOARDS: &str = "fortx_Fort_Worth_Boards";
pub const FORT_WORTH_CITY_COUNCIL: &str = "fortx_Fort_Worth_City_Council";
pub const FORT_WORTH_ISD: &str = "fortx_Fort_Worth_Isd";
pub const FORT_WORTH_ISD_COC: &str = "fortx_Fort_Worth_Isd_Coc";
pub const FORT_WORTH_ISD_MEETINGS: &str = "fortx_Fort_Worth_Isd_Meetings";
pub const FORT_WORTH_PUBLIC_MEETINGS: &str = "fortx_Fort_Worth_Public_Meetings";
pub const TARRANT_COMMISSIONERS_COURT: &str = "fortx_Tarrant_County_Commissioners_Court";

// Agencies
pub const FORT_WORTH_BOARDS_AGENCY: &str = "Fort Worth Boards and Commissions";
pub const FORT_WORTH_CITY_COUNCIL_AGENCY: &str = "Fort Worth City Council";
pub const FORT_WORTH_ISD_AGENCY: &str = "Fort Worth ISD Board";
pub const FORT_WORTH_ISD_COC_AGENCY: &str = "Fort Worth ISD Citizens' Oversight Committee";
pub const FORT_WORTH_ISD_MEETINGS_AGENCY: &str = "Fort Worth ISD Meetings";
pub const FORT_WORTH_PUBLIC_MEETINGS_AGENCY: &str = "Fort Worth Public Meetings";
pub const TARRANT_COMMISSIONERS_COURT_AGENCY: &str = "Tarrant County Commissioners Court";

// fortworthtexas.gov calendar API, shared by three sources
pub const FORT_WORTH_BASE_URL: &str = "https://www.fortworthtexas.gov/";
pub const FORT_WORTH_CALENDAR_ITEMS_URL: &str =
    "https://www.fortworthtexas.gov/ocapi/calendars/getcalendaritems";
pub const FORT_WORTH_CONTENT_INFO_URL: &str =
    "https://www.fortworthtexas.gov/ocapi/get/contentinfo";
pub const FORT_WORTH_BOARDS_CALENDAR_ID: &str = "788ffb59-05d1-457d-b9dd-423d4b95a06e";
pub const FORT_WORTH_CITY_COUNCIL_CALENDAR_ID: &str = "8a8add9a-3fd0-4b39-9a3e-d58e98e27acc";
pub const FORT_WORTH_PUBLIC_MEETINGS_CALENDAR_ID: &str = "8efac0b6-9ea3-402e-b7d9-e9e71a2a34a0";

// The published calendar page; the API endpoint itself is not user friendly.
pub const FORT_WORTH_BOARDS_SOURCE_URL: &str =
    "https://www.fortworthtexas.gov/calendar/boards-commission";

// The start time is buried in the meeting description on these calendars.
pub const FORT_WORTH_CALENDAR_TIME_NOTES: &str =
    "Please check the meeting description for details on the start time";

// fwisd.org
pub const FWISD_BASE_URL: &str = "https://www.fwisd.org";
pub const FORT_WORTH_ISD_URL: &str = "https://www.fwisd.org/board/board-of-education/board-calendar";
pub const FORT_WORTH_ISD_COC_URL: &str =
    "https://www.fwisd.org/departments/operations/capital-improvement-program/2021-citizens-oversight-committee-coc";
pub const FORT_WORTH_ISD_COC_TITLE: &str = "2021 Citizens' Oversight Committee Meeting";
pub const FORT_WORTH_ISD_COC_LOCATION_NAME: &str = "Fort Worth ISD District Service Center";
pub const FORT_WORTH_ISD_COC_LOCATION_ADDRESS: &str =
    "7060 Camp Bowie Blvd, Fort Worth, TX 76116";

// boardbook.org
pub const BOARDBOOK_BASE_URL: &str = "https://meetings.boardbook.org";
pub const FORT_WORTH_ISD_MEETINGS_URL: &str =
    "https://meetings.boardbook.org/public/organization/733";

// Tarrant County agenda management portal
pub const TARRANT_ARCHIVED_URL: &str =
    "https://tarrant-agendamanagement-public.techsharetx.gov/publicportal/api/meetings/readArchived";
pub const TARRANT_UPCOMING_URL: &str =
    "https://tarrant-agendamanagement-public.techsharetx.gov/publicportal/api/meetings/readCurrentAndUpcoming";
pub const TARRANT_ATTACHMENTS_URL: &str =
    "https://tarrant-agendamanagement-public.techsharetx.gov/publicportal/api/meetingattachments/download?id=";
pub const TARRANT_SOURCE_URL: &str =
    "https://www.tarrantcountytx.gov/en/commissioners-court/commissioners-court-agenda-videos.html";
pub const TARRANT_COMMITTEE_ID: &str = "fe6aa5cc-7448-4194-ac6e-08dc95f79ccc";
pub const TARRANT_LOCATION_NAME: &str =
    "Tarrant County Administration Building (check the agenda for room location)";
pub const TARRANT_LOCATION_ADDRESS: &str =
    "100 East Weatherford Street, 5th Floor, Fort Worth, Texas 76196";
