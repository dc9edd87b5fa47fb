//! Reveal animator: one-shot "shown" transition for hidden elements.

use tracing::{debug, info};

use crate::config::RevealConfig;
use crate::dom::{DomEffects, IntersectionEntry};

/// Tracks which hidden elements are still waiting to be revealed.
#[derive(Clone, Debug)]
pub struct RevealAnimator<E> {
    pending: Vec<E>,
    shown_class: String,
    threshold: f64,
    root_margin: String,
}

impl<E: Clone + PartialEq> RevealAnimator<E> {
    /// Collects every element marked hidden.
    ///
    /// Returns `None` when nothing on the page is waiting to be revealed.
    pub fn mount<D>(dom: &D, config: &RevealConfig) -> Option<Self>
    where
        D: DomEffects<Element = E>,
    {
        let pending = dom.query_selector_all(&config.hidden_selector);
        if pending.is_empty() {
            debug!(selector = %config.hidden_selector, "reveal animator disabled");
            return None;
        }

        info!(elements = pending.len(), "reveal animator mounted");
        Some(Self {
            pending,
            shown_class: config.shown_class.clone(),
            threshold: config.threshold,
            root_margin: config.root_margin(),
        })
    }

    /// Elements still under observation.
    pub fn pending(&self) -> &[E] {
        &self.pending
    }

    /// Visible fraction required before revealing.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Observer root margin that keeps elements hidden near the viewport bottom.
    pub fn root_margin(&self) -> &str {
        &self.root_margin
    }

    /// Applies one batch of observer entries.
    ///
    /// Returns the elements revealed by this batch; the caller must stop
    /// observing each of them. Entries for elements already revealed, or
    /// never tracked, are ignored.
    pub fn handle_intersections<D>(&mut self, dom: &D, entries: &[IntersectionEntry<E>]) -> Vec<E>
    where
        D: DomEffects<Element = E>,
    {
        let mut revealed = Vec::new();
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            let Some(index) = self.pending.iter().position(|e| *e == entry.target) else {
                continue;
            };
            let element = self.pending.swap_remove(index);
            dom.add_class(&element, &self.shown_class);
            revealed.push(element);
        }
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeDom, FakeElement, FakeNode};

    fn page(count: usize) -> (FakeDom, Vec<FakeElement>) {
        let dom = FakeDom::new();
        let elements = (0..count)
            .map(|_| dom.append(FakeNode::new("div").with_class("hidden")))
            .collect();
        (dom, elements)
    }

    #[test]
    fn test_disabled_without_hidden_elements() {
        let dom = FakeDom::new();
        assert!(RevealAnimator::mount(&dom, &RevealConfig::default()).is_none());
    }

    #[test]
    fn test_observer_options() {
        let (dom, _) = page(1);
        let animator = RevealAnimator::mount(&dom, &RevealConfig::default()).unwrap();
        assert_eq!(animator.threshold(), 0.25);
        assert_eq!(animator.root_margin(), "0px 0px -80px 0px");
    }

    #[test]
    fn test_reveal_is_one_shot() {
        let (dom, elements) = page(2);
        let mut animator = RevealAnimator::mount(&dom, &RevealConfig::default()).unwrap();

        let revealed = animator.handle_intersections(&dom, &[IntersectionEntry::entering(elements[0])]);
        assert_eq!(revealed, vec![elements[0]]);
        assert!(dom.has_class(elements[0], "show"));
        assert!(!dom.has_class(elements[1], "show"));

        let again = animator.handle_intersections(
            &dom,
            &[
                IntersectionEntry::leaving(elements[0]),
                IntersectionEntry::entering(elements[0]),
            ],
        );
        assert!(again.is_empty());
        assert!(dom.has_class(elements[0], "show"));
        assert_eq!(animator.pending(), &[elements[1]]);
    }

    #[test]
    fn test_leaving_entries_do_nothing() {
        let (dom, elements) = page(1);
        let mut animator = RevealAnimator::mount(&dom, &RevealConfig::default()).unwrap();

        let revealed = animator.handle_intersections(&dom, &[IntersectionEntry::leaving(elements[0])]);
        assert!(revealed.is_empty());
        assert!(!dom.has_class(elements[0], "show"));
        assert_eq!(animator.pending(), &[elements[0]]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_reveal_is_monotonic(
                batches in prop::collection::vec(
                    prop::collection::vec((0usize..5, any::<bool>()), 0..6),
                    1..15,
                )
            ) {
                let (dom, elements) = page(5);
                let mut animator = RevealAnimator::mount(&dom, &RevealConfig::default()).unwrap();
                let mut shown = [false; 5];

                for batch in batches {
                    let entries: Vec<_> = batch
                        .iter()
                        .map(|(i, visible)| IntersectionEntry {
                            target: elements[*i],
                            is_intersecting: *visible,
                        })
                        .collect();
                    let revealed = animator.handle_intersections(&dom, &entries);

                    for element in &revealed {
                        let index = elements.iter().position(|e| e == element).unwrap();
                        prop_assert!(!shown[index], "element revealed twice");
                        shown[index] = true;
                    }
                    for (index, element) in elements.iter().enumerate() {
                        prop_assert_eq!(dom.has_class(*element, "show"), shown[index]);
                        prop_assert_eq!(animator.pending().contains(element), !shown[index]);
                    }
                }
            }
        }
    }
}
