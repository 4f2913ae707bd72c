use crate::config::SelectorConfig;
use crate::error::{Result, ScraperError};
use scraper::Selector;

/// Compiled form of [`SelectorConfig`].
#[derive(Debug, Clone)]
pub struct Selectors {
    pub results_list: Selector,
    pub list_item: Selector,
    pub set_title: Selector,
    pub head: Selector,
    pub head_item: Selector,
    pub name: Selector,
    pub top_body: Selector,
    pub bottom_body: Selector,
    pub body_item: Selector,
    pub color: Selector,
}

fn parse(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| ScraperError::SelectorError(format!("`{}`: {}", selector, e)).into())
}

impl Selectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            results_list: parse(&config.results_list)?,
            list_item: parse(&config.results_item)?,
            set_title: parse(&config.set_title)?,
            head: parse(&config.head)?,
            head_item: parse(&config.head_item)?,
            name: parse(&config.name)?,
            top_body: parse(&config.top_body)?,
            bottom_body: parse(&config.bottom_body)?,
            body_item: parse(&config.body_item)?,
            color: parse(&config.color)?,
        })
    }
}
