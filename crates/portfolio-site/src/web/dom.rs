//! `web-sys` implementation of the DOM effect seam.

use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, FormData, HtmlElement, HtmlFormElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::dom::{DomEffects, FormPayload};
use crate::error::{SiteError, SiteResult};

/// The live browser document.
#[derive(Clone, Debug)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    /// Binds to the global window and its document.
    pub fn new() -> SiteResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| SiteError::JavaScript("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| SiteError::JavaScript("window has no document".to_string()))?;
        Ok(Self { window, document })
    }

    /// The global window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The page document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current vertical scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

impl DomEffects for WebDom {
    type Element = Element;

    fn query_selector(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(element) => element,
            Err(error) => {
                warn!(%selector, error = ?error, "invalid selector");
                None
            }
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        let nodes = match self.document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(error) => {
                warn!(%selector, error = ?error, "invalid selector");
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn add_class(&self, element: &Element, class: &str) {
        if let Err(error) = element.class_list().add_1(class) {
            warn!(%class, error = ?error, "failed to add class");
        }
    }

    fn remove_class(&self, element: &Element, class: &str) {
        if let Err(error) = element.class_list().remove_1(class) {
            warn!(%class, error = ?error, "failed to remove class");
        }
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(error) = html.style().set_property(property, value) {
            warn!(%property, error = ?error, "failed to set style");
        }
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn offset_height(&self, element: &Element) -> f64 {
        element
            .dyn_ref::<HtmlElement>()
            .map(|html| f64::from(html.offset_height()))
            .unwrap_or(0.0)
    }

    fn scroll_into_view(&self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn open_in_new_context(&self, url: &str) {
        if let Err(error) = self.window.open_with_url_and_target(url, "_blank") {
            warn!(%url, error = ?error, "failed to open link");
        }
    }

    fn form_fields(&self, form: &Element) -> FormPayload {
        let mut payload = FormPayload::new();
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            return payload;
        };
        let data = match FormData::new_with_form(form) {
            Ok(data) => data,
            Err(error) => {
                warn!(error = ?error, "failed to read form data");
                return payload;
            }
        };
        if let Ok(Some(entries)) = js_sys::try_iter(&data) {
            for entry in entries.flatten() {
                let pair = js_sys::Array::from(&entry);
                // Blob values stay in the FormData only.
                if let (Some(name), Some(value)) =
                    (pair.get(0).as_string(), pair.get(1).as_string())
                {
                    payload.push(name, value);
                }
            }
        }
        payload.with_form_data(data)
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }
}
