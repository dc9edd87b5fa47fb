//! Custom cursor: follows the pointer and reacts to interactive elements.

use tracing::{debug, info};

use crate::config::CursorConfig;
use crate::dom::DomEffects;

/// Cursor-following element plus the elements that trigger its hover state.
#[derive(Clone, Debug)]
pub struct CustomCursor<E> {
    cursor: E,
    hover_targets: Vec<E>,
    hovered_class: String,
}

impl<E: Clone + PartialEq> CustomCursor<E> {
    /// Returns `None` when the page has no cursor element.
    pub fn mount<D>(dom: &D, config: &CursorConfig) -> Option<Self>
    where
        D: DomEffects<Element = E>,
    {
        let Some(cursor) = dom.query_selector(&config.cursor_selector) else {
            debug!(selector = %config.cursor_selector, "custom cursor disabled");
            return None;
        };
        let hover_targets = dom.query_selector_all(&config.hover_targets);

        info!(hover_targets = hover_targets.len(), "custom cursor mounted");
        Some(Self {
            cursor,
            hover_targets,
            hovered_class: config.hovered_class.clone(),
        })
    }

    /// Elements whose enter/leave events toggle the hover state.
    pub fn hover_targets(&self) -> &[E] {
        &self.hover_targets
    }

    /// Moves the cursor element to the pointer position.
    pub fn handle_pointer_move<D>(&self, dom: &D, x: f64, y: f64)
    where
        D: DomEffects<Element = E>,
    {
        dom.set_style(&self.cursor, "transform", &format!("translate({x}px, {y}px)"));
    }

    /// Pointer entered an interactive element.
    pub fn handle_enter<D>(&self, dom: &D)
    where
        D: DomEffects<Element = E>,
    {
        dom.add_class(&self.cursor, &self.hovered_class);
    }

    /// Pointer left an interactive element.
    pub fn handle_leave<D>(&self, dom: &D)
    where
        D: DomEffects<Element = E>,
    {
        dom.remove_class(&self.cursor, &self.hovered_class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeDom, FakeNode};

    #[test]
    fn test_disabled_without_cursor() {
        let dom = FakeDom::new();
        dom.append(FakeNode::new("a"));
        assert!(CustomCursor::mount(&dom, &CursorConfig::default()).is_none());
    }

    #[test]
    fn test_pointer_move_translates_cursor() {
        let dom = FakeDom::new();
        let element = dom.append(FakeNode::new("div").with_class("custom-cursor"));
        let cursor = CustomCursor::mount(&dom, &CursorConfig::default()).unwrap();

        cursor.handle_pointer_move(&dom, 120.0, 48.0);
        assert_eq!(
            dom.style(element, "transform"),
            Some("translate(120px, 48px)".to_string())
        );
    }

    #[test]
    fn test_hover_toggle_is_independent_of_position() {
        let dom = FakeDom::new();
        let element = dom.append(FakeNode::new("div").with_class("custom-cursor"));
        let link = dom.append(FakeNode::new("a"));
        let button = dom.append(FakeNode::new("span").with_class("btn"));
        let card = dom.append(FakeNode::new("article").with_class("project-card"));
        dom.append(FakeNode::new("p"));
        let cursor = CustomCursor::mount(&dom, &CursorConfig::default()).unwrap();
        assert_eq!(cursor.hover_targets(), &[link, button, card]);

        cursor.handle_enter(&dom);
        cursor.handle_pointer_move(&dom, 3.0, 4.0);
        assert!(dom.has_class(element, "hovered"));

        cursor.handle_leave(&dom);
        assert!(!dom.has_class(element, "hovered"));
        assert_eq!(
            dom.style(element, "transform"),
            Some("translate(3px, 4px)".to_string())
        );
    }
}
