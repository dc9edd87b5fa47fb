//! Navigation highlighter: keeps exactly one menu link marked as the active
//! section and replaces anchor jumps with smooth scrolling.

use tracing::{debug, info};

use crate::config::NavConfig;
use crate::dom::{DomEffects, IntersectionEntry};

/// Menu links paired index-for-index with the sections they point at.
#[derive(Clone, Debug)]
pub struct NavHighlighter<E> {
    links: Vec<E>,
    /// `sections[i]` is the target of `links[i]`, if it exists on the page.
    sections: Vec<Option<E>>,
    active: Option<usize>,
    active_class: String,
    threshold: f64,
}

impl<E: Clone + PartialEq> NavHighlighter<E> {
    /// Collects the menu links and their sections.
    ///
    /// Returns `None` when the page has no navigation links.
    pub fn mount<D>(dom: &D, config: &NavConfig) -> Option<Self>
    where
        D: DomEffects<Element = E>,
    {
        let links = dom.query_selector_all(&config.link_selector);
        if links.is_empty() {
            debug!(selector = %config.link_selector, "navigation highlighter disabled");
            return None;
        }

        let sections: Vec<Option<E>> = links
            .iter()
            .map(|link| resolve_target(dom, link))
            .collect();

        info!(
            links = links.len(),
            sections = sections.iter().flatten().count(),
            "navigation highlighter mounted"
        );

        Some(Self {
            links,
            sections,
            active: None,
            active_class: config.active_class.clone(),
            threshold: config.threshold,
        })
    }

    /// Sections that should be handed to the intersection observer.
    ///
    /// Links whose target is missing are skipped.
    pub fn observed_sections(&self) -> impl Iterator<Item = &E> {
        self.sections.iter().flatten()
    }

    /// Visible fraction at which a section becomes active.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The navigation links, in menu order.
    pub fn links(&self) -> &[E] {
        &self.links
    }

    /// Index of the currently highlighted link.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Applies one batch of observer entries.
    ///
    /// Each intersecting entry moves the highlight to its link, so the last
    /// intersecting section of the batch wins.
    pub fn handle_intersections<D>(&mut self, dom: &D, entries: &[IntersectionEntry<E>])
    where
        D: DomEffects<Element = E>,
    {
        for entry in entries {
            let Some(index) = self.section_index(&entry.target) else {
                continue;
            };
            if entry.is_intersecting {
                self.activate(dom, index);
            }
        }
    }

    /// Handles a click on the link at `index`.
    ///
    /// Default navigation is always cancelled by the caller; returns whether
    /// a section was scrolled into view.
    pub fn handle_click<D>(&self, dom: &D, index: usize) -> bool
    where
        D: DomEffects<Element = E>,
    {
        let Some(link) = self.links.get(index) else {
            return false;
        };
        match resolve_target(dom, link) {
            Some(section) => {
                dom.scroll_into_view(&section);
                true
            }
            None => false,
        }
    }

    fn section_index(&self, target: &E) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.as_ref() == Some(target))
    }

    fn activate<D>(&mut self, dom: &D, index: usize)
    where
        D: DomEffects<Element = E>,
    {
        for link in &self.links {
            dom.remove_class(link, &self.active_class);
        }
        dom.add_class(&self.links[index], &self.active_class);
        self.active = Some(index);
    }
}

/// Looks up the in-page section an anchor link points at.
fn resolve_target<D: DomEffects>(dom: &D, link: &D::Element) -> Option<D::Element> {
    let href = dom.attribute(link, "href")?;
    if href.len() > 1 && href.starts_with('#') {
        dom.query_selector(&href)
    } else {
        None
    }
}
