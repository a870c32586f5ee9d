//! UI sink capability.

/// Mutations the projector performs on a located element.
pub trait UiElement {
    /// Set a CSS custom property in the element's inline style.
    fn set_style_property(&mut self, name: &str, value: &str);

    fn add_class(&mut self, class: &str);

    fn remove_class(&mut self, class: &str);

    fn set_text_content(&mut self, text: &str);
}

/// Element lookup by CSS selector.
pub trait UiSink {
    /// Locate the element matching `selector`, `None` if it is not rendered.
    fn query_selector(&mut self, selector: &str) -> Option<&mut dyn UiElement>;
}
