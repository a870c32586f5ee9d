//! In-process widget document.
//!
//! [`Document`] parses the widget markup once with [`scraper`] and keeps
//! the mutable state (inline style variables, classes, text) of every
//! element the projector has located. Lookups go through real CSS
//! selectors, so an element missing from the markup is a miss exactly
//! like an unrendered DOM node.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use scraper::{ElementRef, Html, Selector};

use crate::sink::{UiElement, UiSink};

/// Errors raised while mounting the widget assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Widget markup is empty")]
    EmptyMarkup,

    #[error("Widget stylesheet is empty")]
    EmptyStylesheet,

    #[error("Widget markup contains no elements")]
    NoElements,
}

/// Mutable state of one located element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    style: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
}

impl ElementState {
    fn from_markup(element: ElementRef<'_>) -> Self {
        Self {
            style: BTreeMap::new(),
            classes: element.value().classes().map(str::to_string).collect(),
            text: element.text().collect(),
        }
    }

    /// Value of an inline style property, if set.
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Inline `style` attribute as it would be rendered.
    pub fn style_attribute(&self) -> String {
        self.style
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl UiElement for ElementState {
    fn set_style_property(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_string(), value.to_string());
    }

    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    fn set_text_content(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// Mounted widget: parsed markup, stylesheet and element state.
///
/// State is keyed by selector; two different selectors resolving to the
/// same node track separate state.
pub struct Document {
    markup: Html,
    stylesheet: String,
    elements: HashMap<String, ElementState>,
}

impl Document {
    /// Parse `markup` and attach `stylesheet`.
    pub fn mount(markup: &str, stylesheet: &str) -> Result<Self, AssetError> {
        if markup.trim().is_empty() {
            return Err(AssetError::EmptyMarkup);
        }
        if stylesheet.trim().is_empty() {
            return Err(AssetError::EmptyStylesheet);
        }

        let html = Html::parse_fragment(markup);
        let has_elements = html
            .root_element()
            .descendants()
            .skip(1)
            .any(|node| node.value().is_element());
        if !has_elements {
            return Err(AssetError::NoElements);
        }

        Ok(Self {
            markup: html,
            stylesheet: stylesheet.to_string(),
            elements: HashMap::new(),
        })
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// State of an element previously located through `selector`.
    pub fn element(&self, selector: &str) -> Option<&ElementState> {
        self.elements.get(selector)
    }
}

impl UiSink for Document {
    fn query_selector(&mut self, selector: &str) -> Option<&mut dyn UiElement> {
        if !self.elements.contains_key(selector) {
            let parsed = Selector::parse(selector).ok()?;
            let found = self.markup.select(&parsed).next()?;
            self.elements
                .insert(selector.to_string(), ElementState::from_markup(found));
        }
        self.elements
            .get_mut(selector)
            .map(|state| state as &mut dyn UiElement)
    }
}
