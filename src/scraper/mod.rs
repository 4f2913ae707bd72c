mod cards;
mod page;
mod selectors;

pub use cards::{CardExtractor, Extraction, ExtractionFailure, ExtractionReport, Pass, ABSENT_LEVEL};
pub use page::{Availability, PageScraper, NO_RESULTS_MARKER};
pub use selectors::Selectors;

use scraper::Html;

pub struct Scraper {
    document: Html,
}

impl Scraper {
    pub fn new(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn page<'a>(&'a self, selectors: &'a Selectors) -> PageScraper<'a> {
        PageScraper::new(&self.document, selectors)
    }

    pub fn cards<'a>(&'a self, selectors: &'a Selectors) -> CardExtractor<'a> {
        CardExtractor::new(&self.document, selectors)
    }
}
