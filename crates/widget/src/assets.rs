//! Embedded widget assets.

use crate::document::{AssetError, Document};

/// Widget markup.
pub const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Widget stylesheet.
pub const STYLE_CSS: &str = include_str!("../assets/style.css");

/// Mount the embedded markup and stylesheet.
pub fn mount() -> Result<Document, AssetError> {
    Document::mount(INDEX_HTML, STYLE_CSS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::{HEATER_GAUGE, HEATER_TEXT, TANK_GAUGE};
    use crate::sink::UiSink;

    #[test]
    fn embedded_markup_has_every_bound_element() {
        let mut doc = mount().unwrap();
        for selector in [HEATER_GAUGE, HEATER_TEXT, TANK_GAUGE] {
            assert!(
                doc.query_selector(selector).is_some(),
                "{selector} missing from index.html"
            );
        }
    }

    #[test]
    fn stylesheet_drives_gauges_from_percentage_variable() {
        let doc = mount().unwrap();
        assert!(doc.stylesheet().contains("var(--percentage)"));
    }
}
