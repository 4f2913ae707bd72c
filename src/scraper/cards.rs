//! Three-pass card extraction.
//!
//! The card list lays out each card's head, top body and bottom body as
//! separate container lists, so records are joined purely by position. A
//! pass whose container count differs from the head count is skipped and
//! reported instead of being merged out of step.

use super::Selectors;
use crate::card::{Field, RawCard};
use crate::error::ScraperError;
use crate::{log_info, log_warn};
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// Stand-in node for cards without a level (tamers, options, alt arts).
pub const ABSENT_LEVEL: &str = "<li>-</li>";

const ALTERNATIVE_ART: &str = "Alternative Art";

const HEAD_FIELDS: [Field; 3] = [Field::Number, Field::Rarity, Field::Type];

// Index 0 of the top body holds the color, nested one level deeper.
const TOP_BODY_FIELDS: [Field; 7] = [
    Field::Form,
    Field::Attribute,
    Field::DigiType,
    Field::Dp,
    Field::PlayCost,
    Field::Digivolve1,
    Field::Digivolve2,
];

const BOTTOM_BODY_FIELDS: [Field; 3] = [
    Field::Effect,
    Field::InheritedEffect,
    Field::SecurityEffect,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Head,
    TopBody,
    BottomBody,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pass::Head => "head",
            Pass::TopBody => "top body",
            Pass::BottomBody => "bottom body",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    pub pass: Pass,
    /// Card position, or `None` when the whole pass was affected.
    pub index: Option<usize>,
    pub error: ScraperError,
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{} pass, card {}: {}", self.pass, index, self.error),
            None => write!(f, "{} pass: {}", self.pass, self.error),
        }
    }
}

/// Everything that went wrong during extraction. Failures never stop the
/// run; the affected fields stay empty and normalize to the null sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub failures: Vec<ExtractionFailure>,
}

impl ExtractionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, pass: Pass, index: Option<usize>, error: ScraperError) {
        let failure = ExtractionFailure { pass, index, error };
        log_warn!("[scraper] Extraction failure in {}", failure);
        self.failures.push(failure);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub cards: Vec<RawCard>,
    pub report: ExtractionReport,
}

pub struct CardExtractor<'a> {
    document: &'a Html,
    selectors: &'a Selectors,
}

impl<'a> CardExtractor<'a> {
    pub(crate) fn new(document: &'a Html, selectors: &'a Selectors) -> Self {
        Self {
            document,
            selectors,
        }
    }

    pub fn extract(&self) -> Extraction {
        let mut report = ExtractionReport::default();

        let mut cards = self.head_pass(&mut report);
        log_info!("[scraper] Found {} cards in head containers", cards.len());

        self.top_body_pass(&mut cards, &mut report);
        self.bottom_body_pass(&mut cards, &mut report);

        if !report.is_clean() {
            log_warn!(
                "[scraper] Extraction finished with {} failure(s)",
                report.failures.len()
            );
        }

        Extraction { cards, report }
    }

    fn head_pass(&self, report: &mut ExtractionReport) -> Vec<RawCard> {
        let heads: Vec<ElementRef> = self.document.select(&self.selectors.head).collect();
        let names: Vec<ElementRef> = self.document.select(&self.selectors.name).collect();

        let names_aligned = names.len() == heads.len();
        if !names_aligned {
            report.record(
                Pass::Head,
                None,
                ScraperError::CountMismatch {
                    what: "name containers",
                    expected: heads.len(),
                    found: names.len(),
                },
            );
        }

        heads
            .iter()
            .enumerate()
            .map(|(index, head)| {
                let mut card = RawCard::new();
                if names_aligned {
                    card.set(Field::Name, names[index].html());
                }

                let items: Vec<ElementRef> = head.select(&self.selectors.head_item).collect();
                for (position, field) in HEAD_FIELDS.into_iter().enumerate() {
                    if let Err(error) = assign(&mut card, field, items.get(position)) {
                        report.record(Pass::Head, Some(index), error);
                    }
                }

                let level = items
                    .get(3)
                    .map(|item| item.html())
                    .filter(|html| !html.contains(ALTERNATIVE_ART))
                    .unwrap_or_else(|| ABSENT_LEVEL.to_string());
                card.set(Field::Level, level);

                card
            })
            .collect()
    }

    fn top_body_pass(&self, cards: &mut [RawCard], report: &mut ExtractionReport) {
        let color_selector = &self.selectors.color;
        self.merge_pass(
            Pass::TopBody,
            &self.selectors.top_body,
            cards,
            report,
            |items, card, errors| {
                let color = items
                    .first()
                    .and_then(|item| item.select(color_selector).next());
                if let Err(error) = assign(card, Field::Color, color.as_ref()) {
                    errors.push(error);
                }
                for (offset, field) in TOP_BODY_FIELDS.into_iter().enumerate() {
                    if let Err(error) = assign(card, field, items.get(offset + 1)) {
                        errors.push(error);
                    }
                }
            },
        );
    }

    fn bottom_body_pass(&self, cards: &mut [RawCard], report: &mut ExtractionReport) {
        self.merge_pass(
            Pass::BottomBody,
            &self.selectors.bottom_body,
            cards,
            report,
            |items, card, errors| {
                for (position, field) in BOTTOM_BODY_FIELDS.into_iter().enumerate() {
                    if let Err(error) = assign(card, field, items.get(position)) {
                        errors.push(error);
                    }
                }
            },
        );
    }

    /// Joins container `i` of a body pass onto card `i`. The pass is skipped
    /// entirely when the container count does not match the card count.
    fn merge_pass<F>(
        &self,
        pass: Pass,
        containers: &Selector,
        cards: &mut [RawCard],
        report: &mut ExtractionReport,
        fill: F,
    ) where
        F: Fn(&[ElementRef<'a>], &mut RawCard, &mut Vec<ScraperError>),
    {
        let containers: Vec<ElementRef<'a>> = self.document.select(containers).collect();
        if containers.len() != cards.len() {
            report.record(
                pass,
                None,
                ScraperError::CountMismatch {
                    what: "containers",
                    expected: cards.len(),
                    found: containers.len(),
                },
            );
            return;
        }

        for (index, (container, card)) in containers.iter().zip(cards.iter_mut()).enumerate() {
            let items: Vec<ElementRef<'a>> =
                container.select(&self.selectors.body_item).collect();
            let mut errors = Vec::new();
            fill(&items, card, &mut errors);
            for error in errors {
                report.record(pass, Some(index), error);
            }
        }
    }
}

fn assign(card: &mut RawCard, field: Field, node: Option<&ElementRef>) -> Result<(), ScraperError> {
    let node = node.ok_or(ScraperError::MissingElement {
        field: field.name(),
    })?;
    card.set(field, node.html());
    Ok(())
}
