//! Scrapes one Digimon card set list page into a CSV (or JSON) file.

pub mod card;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod scraper;
pub mod writer;
