use crate::log_debug;
use super::Selectors;
use scraper::Html;

/// Phrase the site prints in place of a result list when a set is unknown.
pub const NO_RESULTS_MARKER: &str = "No search results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Found,
    NotFound,
}

pub struct PageScraper<'a> {
    document: &'a Html,
    selectors: &'a Selectors,
}

impl<'a> PageScraper<'a> {
    pub(crate) fn new(document: &'a Html, selectors: &'a Selectors) -> Self {
        Self {
            document,
            selectors,
        }
    }

    /// Looks at the first item of the results list. A page without a
    /// results list is treated as found so malformed markup still reaches
    /// extraction.
    pub fn availability(&self) -> Availability {
        let Some(list) = self.document.select(&self.selectors.results_list).next() else {
            log_debug!("[scraper] No results list on page, assuming cards are present");
            return Availability::Found;
        };

        let Some(first_item) = list.select(&self.selectors.list_item).next() else {
            log_debug!("[scraper] Results list has no items, assuming cards are present");
            return Availability::Found;
        };

        let text = first_item.text().collect::<String>();
        if text.contains(NO_RESULTS_MARKER) {
            Availability::NotFound
        } else {
            Availability::Found
        }
    }

    /// Trimmed text of the set title element, if the page has a non-blank one.
    pub fn set_title(&self) -> Option<String> {
        let title = self
            .document
            .select(&self.selectors.set_title)
            .next()?
            .text()
            .collect::<String>();
        let title = title.trim();
        if title.is_empty() {
            None
        } else {
            Some(title.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;

    fn check(html: &str) -> Availability {
        let selectors = Selectors::compile(&SelectorConfig::default()).unwrap();
        let document = Html::parse_document(html);
        PageScraper::new(&document, &selectors).availability()
    }

    fn title(html: &str) -> Option<String> {
        let selectors = Selectors::compile(&SelectorConfig::default()).unwrap();
        let document = Html::parse_document(html);
        PageScraper::new(&document, &selectors).set_title()
    }

    #[test]
    fn no_results_marker_means_not_found() {
        let html = r#"<ul class="image_list"><li>No search results were found.</li></ul>"#;
        assert_eq!(check(html), Availability::NotFound);
    }

    #[test]
    fn regular_first_item_means_found() {
        let html = r#"<ul class="image_list"><li><div class="card_name">Agumon</div></li></ul>"#;
        assert_eq!(check(html), Availability::Found);
    }

    #[test]
    fn marker_in_a_later_item_is_ignored() {
        let html = r#"<ul class="image_list"><li>Agumon</li><li>No search results</li></ul>"#;
        assert_eq!(check(html), Availability::Found);
    }

    #[test]
    fn missing_results_list_falls_back_to_found() {
        assert_eq!(check("<p>No search results</p>"), Availability::Found);
        assert_eq!(check(r#"<ul class="image_list"></ul>"#), Availability::Found);
    }

    #[test]
    fn results_item_selector_picks_the_inspected_item() {
        let config = SelectorConfig {
            results_item: "div.result".to_string(),
            ..SelectorConfig::default()
        };
        let selectors = Selectors::compile(&config).unwrap();
        let document = Html::parse_document(
            r#"<ul class="image_list"><li>Agumon</li><div class="result">No search results</div></ul>"#,
        );
        assert_eq!(
            PageScraper::new(&document, &selectors).availability(),
            Availability::NotFound
        );
    }

    #[test]
    fn reads_trimmed_set_title() {
        let html = r#"<div class="cardlist_title"><h2>  BT-01 Ver.1.0 </h2></div>"#;
        assert_eq!(title(html).as_deref(), Some("BT-01 Ver.1.0"));
    }

    #[test]
    fn blank_or_missing_title_is_none() {
        assert_eq!(title(r#"<div class="cardlist_title"><h2> </h2></div>"#), None);
        assert_eq!(title("<h1>Card List</h1>"), None);
    }
}
