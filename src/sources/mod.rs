pub mod fort_worth_boards;
pub mod fort_worth_city_council;
pub mod fort_worth_isd;
pub mod fort_worth_isd_coc;
pub mod fort_worth_isd_meetings;
pub mod fort_worth_public_meetings;
pub mod tarrant_commissioners_court;

use crate::common::types::MeetingSource;

/// Every registered source, in a stable order.
pub fn all_sources() -> Vec<Box<dyn MeetingSource>> {
    vec![
        Box::new(fort_worth_boards::FortWorthBoards::new()),
        Box::new(fort_worth_city_council::FortWorthCityCouncil::new()),
        Box::new(fort_worth_isd::FortWorthIsd::new()),
        Box::new(fort_worth_isd_coc::FortWorthIsdCoc::new()),
        Box::new(fort_worth_isd_meetings::FortWorthIsdMeetings::new()),
        Box::new(fort_worth_public_meetings::FortWorthPublicMeetings::new()),
        Box::new(tarrant_commissioners_court::TarrantCommissionersCourt::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn source_names_are_unique() {
        let sources = all_sources();
        let names: HashSet<_> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), sources.len());
    }

    #[test]
    fn every_source_is_central_time() {
        for source in all_sources() {
            assert_eq!(source.timezone(), "America/Chicago");
        }
    }
}
