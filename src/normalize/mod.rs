//! Field normalizers shared across source adapters.

pub mod address;
pub mod datetime;
pub mod links;
