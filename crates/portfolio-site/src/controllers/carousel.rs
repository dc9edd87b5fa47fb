//! Carousel rotator: moves the "active" highlight across the project cards
//! on a fixed interval and opens a card's external link on click.

use tracing::{debug, info, trace};

use crate::config::CarouselConfig;
use crate::dom::DomEffects;

/// Whether the rotation timer should be running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationState {
    /// The highlight advances on every tick.
    Running,
    /// Ticks are ignored until restarted.
    Stopped,
}

/// Highlight cursor over a fixed list of cards.
#[derive(Clone, Debug)]
pub struct CarouselRotator<E> {
    cards: Vec<E>,
    current: usize,
    state: RotationState,
    active_class: String,
    link_attribute: String,
    interval_ms: u32,
}

impl<E: Clone + PartialEq> CarouselRotator<E> {
    /// Collects the cards and highlights the first one.
    ///
    /// The rotator starts in [`RotationState::Running`]. Returns `None`
    /// when the page has no cards.
    pub fn mount<D>(dom: &D, config: &CarouselConfig) -> Option<Self>
    where
        D: DomEffects<Element = E>,
    {
        let cards = dom.query_selector_all(&config.card_selector);
        if cards.is_empty() {
            debug!(selector = %config.card_selector, "carousel disabled");
            return None;
        }

        for card in &cards[1..] {
            dom.remove_class(card, &config.active_class);
        }
        dom.add_class(&cards[0], &config.active_class);

        info!(
            cards = cards.len(),
            interval_ms = config.interval_ms,
            "carousel mounted"
        );
        Some(Self {
            cards,
            current: 0,
            state: RotationState::Running,
            active_class: config.active_class.clone(),
            link_attribute: config.link_attribute.clone(),
            interval_ms: config.interval_ms,
        })
    }

    /// The cards, in document order.
    pub fn cards(&self) -> &[E] {
        &self.cards
    }

    /// Index of the highlighted card.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Rotation interval in milliseconds.
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Resumes rotation. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        let changed = self.state == RotationState::Stopped;
        self.state = RotationState::Running;
        changed
    }

    /// Halts rotation, keeping the current highlight. Returns false if it
    /// was already stopped.
    pub fn stop(&mut self) -> bool {
        let changed = self.state == RotationState::Running;
        self.state = RotationState::Stopped;
        changed
    }

    /// Advances the highlight to the next card, wrapping at the end.
    ///
    /// Does nothing while stopped. Returns the highlighted index.
    pub fn tick<D>(&mut self, dom: &D) -> usize
    where
        D: DomEffects<Element = E>,
    {
        if self.state == RotationState::Stopped {
            return self.current;
        }
        dom.remove_class(&self.cards[self.current], &self.active_class);
        self.current = (self.current + 1) % self.cards.len();
        dom.add_class(&self.cards[self.current], &self.active_class);
        trace!(current = self.current, "carousel advanced");
        self.current
    }

    /// Opens the link declared by the card at `index`, if any.
    ///
    /// Works regardless of rotation state. Returns the opened URL.
    pub fn handle_click<D>(&self, dom: &D, index: usize) -> Option<String>
    where
        D: DomEffects<Element = E>,
    {
        let card = self.cards.get(index)?;
        let link = dom
            .attribute(card, &self.link_attribute)
            .filter(|link| !link.is_empty())?;
        dom.open_in_new_context(&link);
        debug!(%link, "project card opened");
        Some(link)
    }
}
