//! # In-Memory DOM
//!
//! [`FakeDom`] implements [`DomEffects`] over a flat list of nodes so the
//! controllers can be driven without a browser. Selector support covers what
//! the site uses: comma-separated lists of `tag`, `.class` and `#id`.
//! [`FakeRelay`] stands in for the hosted form relay.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;

use crate::dom::{DomEffects, FormPayload};
use crate::error::SiteResult;
use crate::relay::FormRelay;

/// Handle to a node in a [`FakeDom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FakeElement(usize);

/// Description of a node to append to a [`FakeDom`].
#[derive(Clone, Debug, Default)]
pub struct FakeNode {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    offset_height: f64,
    fields: Vec<(String, String)>,
    initial_fields: Vec<(String, String)>,
}

impl FakeNode {
    /// Creates a node with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Adds a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the `id` attribute.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Sets the rendered height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.offset_height = height;
        self
    }

    /// Adds a form field with its initial value.
    pub fn with_field(mut self, name: impl Into<String>, initial: impl Into<String>) -> Self {
        let field = (name.into(), initial.into());
        self.fields.push(field.clone());
        self.initial_fields.push(field);
        self
    }

    fn matches(&self, simple: &str) -> bool {
        if let Some(class) = simple.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else if let Some(id) = simple.strip_prefix('#') {
            self.attributes.get("id").is_some_and(|value| value == id)
        } else {
            self.tag.eq_ignore_ascii_case(simple)
        }
    }
}

/// Records every effect a controller applies so tests can inspect it.
#[derive(Debug, Default)]
pub struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    opened: RefCell<Vec<String>>,
    scrolled: RefCell<Vec<FakeElement>>,
}

impl FakeDom {
    /// Creates an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its handle.
    pub fn append(&self, node: FakeNode) -> FakeElement {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(node);
        FakeElement(nodes.len() - 1)
    }

    /// Returns true if `element` currently has `class`.
    pub fn has_class(&self, element: FakeElement, class: &str) -> bool {
        self.with_node(element, |node| node.classes.iter().any(|c| c == class))
    }

    /// Current inline style value.
    pub fn style(&self, element: FakeElement, property: &str) -> Option<String> {
        self.with_node(element, |node| node.styles.get(property).cloned())
    }

    /// Current text content.
    pub fn text(&self, element: FakeElement) -> String {
        self.with_node(element, |node| node.text.clone())
    }

    /// Changes the rendered height of a node.
    pub fn set_height(&self, element: FakeElement, height: f64) {
        self.with_node_mut(element, |node| node.offset_height = height);
    }

    /// Types a value into a form field.
    pub fn set_field(&self, form: FakeElement, name: &str, value: &str) {
        self.with_node_mut(form, |node| {
            match node.fields.iter_mut().find(|(field, _)| field == name) {
                Some(field) => field.1 = value.to_string(),
                None => node.fields.push((name.to_string(), value.to_string())),
            }
        });
    }

    /// Current value of a form field.
    pub fn field(&self, form: FakeElement, name: &str) -> Option<String> {
        self.with_node(form, |node| {
            node.fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value.clone())
        })
    }

    /// URLs opened in new browsing contexts, oldest first.
    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }

    /// Elements scrolled into view, oldest first.
    pub fn scrolled_to(&self) -> Vec<FakeElement> {
        self.scrolled.borrow().clone()
    }

    fn with_node<R>(&self, element: FakeElement, f: impl FnOnce(&FakeNode) -> R) -> R {
        f(&self.nodes.borrow()[element.0])
    }

    fn with_node_mut<R>(&self, element: FakeElement, f: impl FnOnce(&mut FakeNode) -> R) -> R {
        f(&mut self.nodes.borrow_mut()[element.0])
    }

    fn matching(&self, selector: &str) -> Vec<FakeElement> {
        let simples: Vec<&str> = selector
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| simples.iter().any(|simple| node.matches(simple)))
            .map(|(index, _)| FakeElement(index))
            .collect()
    }
}

impl DomEffects for FakeDom {
    type Element = FakeElement;

    fn query_selector(&self, selector: &str) -> Option<FakeElement> {
        self.matching(selector).into_iter().next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<FakeElement> {
        self.matching(selector)
    }

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        self.query_selector(&format!("#{id}"))
    }

    fn attribute(&self, element: &FakeElement, name: &str) -> Option<String> {
        self.with_node(*element, |node| node.attributes.get(name).cloned())
    }

    fn add_class(&self, element: &FakeElement, class: &str) {
        self.with_node_mut(*element, |node| {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, element: &FakeElement, class: &str) {
        self.with_node_mut(*element, |node| node.classes.retain(|c| c != class));
    }

    fn set_style(&self, element: &FakeElement, property: &str, value: &str) {
        self.with_node_mut(*element, |node| {
            node.styles.insert(property.to_string(), value.to_string());
        });
    }

    fn set_text(&self, element: &FakeElement, text: &str) {
        self.with_node_mut(*element, |node| node.text = text.to_string());
    }

    fn offset_height(&self, element: &FakeElement) -> f64 {
        self.with_node(*element, |node| node.offset_height)
    }

    fn scroll_into_view(&self, element: &FakeElement) {
        self.scrolled.borrow_mut().push(*element);
    }

    fn open_in_new_context(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }

    fn form_fields(&self, form: &FakeElement) -> FormPayload {
        self.with_node(*form, |node| {
            node.fields
                .iter()
                .fold(FormPayload::new(), |payload, (name, value)| {
                    payload.with_field(name.as_str(), value.as_str())
                })
        })
    }

    fn reset_form(&self, form: &FakeElement) {
        self.with_node_mut(*form, |node| node.fields = node.initial_fields.clone());
    }
}

/// Relay that answers from a script and records every request.
///
/// Once the script runs out every post succeeds.
#[derive(Debug, Default)]
pub struct FakeRelay {
    responses: RefCell<VecDeque<SiteResult<()>>>,
    requests: RefCell<Vec<(String, FormPayload)>>,
}

impl FakeRelay {
    /// Creates a relay that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the outcome of the next unanswered post.
    pub fn respond_with(self, response: SiteResult<()>) -> Self {
        self.responses.borrow_mut().push_back(response);
        self
    }

    /// Endpoints and payloads posted so far.
    pub fn requests(&self) -> Vec<(String, FormPayload)> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl FormRelay for FakeRelay {
    async fn post_form(&self, endpoint: &str, payload: &FormPayload) -> SiteResult<()> {
        self.requests
            .borrow_mut()
            .push((endpoint.to_string(), payload.clone()));
        self.responses.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_list_matches_in_document_order() {
        let dom = FakeDom::new();
        let link = dom.append(FakeNode::new("a"));
        let button = dom.append(FakeNode::new("button"));
        let card = dom.append(FakeNode::new("div").with_class("project-card"));
        dom.append(FakeNode::new("div"));

        assert_eq!(
            dom.query_selector_all("a, button, .btn, .project-card"),
            vec![link, button, card]
        );
    }

    #[test]
    fn test_id_lookup() {
        let dom = FakeDom::new();
        let section = dom.append(FakeNode::new("section").with_id("about"));
        assert_eq!(dom.query_selector("#about"), Some(section));
        assert_eq!(dom.element_by_id("about"), Some(section));
        assert_eq!(dom.element_by_id("missing"), None);
    }

    #[test]
    fn test_reset_restores_initial_fields() {
        let dom = FakeDom::new();
        let form = dom.append(FakeNode::new("form").with_field("name", ""));
        dom.set_field(form, "name", "Ada");
        assert_eq!(dom.form_fields(&form).get("name"), Some("Ada"));

        dom.reset_form(&form);
        assert_eq!(dom.field(form, "name"), Some(String::new()));
    }
}
