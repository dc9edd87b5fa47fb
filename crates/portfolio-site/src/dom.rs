//! # DOM Effects
//!
//! Controllers never touch the browser directly. They describe the changes
//! they want through [`DomEffects`], which is implemented over `web-sys` in
//! the browser and by [`crate::fake::FakeDom`] in tests.

/// Operations the controllers perform on the rendered page.
pub trait DomEffects {
    /// Handle to an element of the page.
    type Element: Clone + PartialEq;

    /// First element matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Element with the given id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Value of an attribute on `element`.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Add a class to `element`.
    fn add_class(&self, element: &Self::Element, class: &str);

    /// Remove a class from `element`.
    fn remove_class(&self, element: &Self::Element, class: &str);

    /// Set an inline style property on `element`.
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);

    /// Replace the text content of `element`.
    fn set_text(&self, element: &Self::Element, text: &str);

    /// Rendered height of `element` in CSS pixels.
    fn offset_height(&self, element: &Self::Element) -> f64;

    /// Smoothly scroll so the top of `element` meets the top of the viewport.
    fn scroll_into_view(&self, element: &Self::Element);

    /// Open `url` in a new browsing context.
    fn open_in_new_context(&self, url: &str);

    /// Serialize the fields of a form element.
    fn form_fields(&self, form: &Self::Element) -> FormPayload;

    /// Reset a form element's fields to their initial values.
    fn reset_form(&self, form: &Self::Element);
}

/// One element's visibility change as reported by an intersection observer.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry<E> {
    /// The observed element.
    pub target: E,
    /// Whether the element currently meets the observer's criteria.
    pub is_intersecting: bool,
}

impl<E> IntersectionEntry<E> {
    /// Entry for an element that became visible.
    pub fn entering(target: E) -> Self {
        Self {
            target,
            is_intersecting: true,
        }
    }

    /// Entry for an element that left the viewport.
    pub fn leaving(target: E) -> Self {
        Self {
            target,
            is_intersecting: false,
        }
    }
}

/// Serialized form fields, in form order.
///
/// In the browser the payload also carries the form's own `FormData`, which
/// keeps file inputs intact; the text pairs are what controllers inspect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
    #[cfg(target_arch = "wasm32")]
    raw: Option<web_sys::FormData>,
}

impl FormPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a field in place.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Fields as name/value pairs.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Value of the first field named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attaches the browser's own serialization of the form.
    #[cfg(target_arch = "wasm32")]
    pub fn with_form_data(mut self, data: web_sys::FormData) -> Self {
        self.raw = Some(data);
        self
    }

    /// The browser's serialization of the form, including file inputs.
    #[cfg(target_arch = "wasm32")]
    pub fn form_data(&self) -> Option<&web_sys::FormData> {
        self.raw.as_ref()
    }
}
