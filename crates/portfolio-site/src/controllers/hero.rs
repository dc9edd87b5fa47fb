//! Hero fader: dims the hero overlay as the page scrolls past the hero.

use tracing::{debug, info};

use crate::config::HeroConfig;
use crate::dom::DomEffects;

/// Overlay opacity for a scroll offset over a hero of the given height.
///
/// `1 - min(scroll / height, 1) * fade_strength`. Negative offsets
/// (overscroll bounce) count as zero; a hero without height is treated as
/// already scrolled past once the page moves at all.
pub fn overlay_opacity(scroll_offset: f64, hero_height: f64, fade_strength: f64) -> f64 {
    let scroll = scroll_offset.max(0.0);
    let fade_factor = if hero_height > 0.0 {
        (scroll / hero_height).min(1.0)
    } else if scroll > 0.0 {
        1.0
    } else {
        0.0
    };
    1.0 - fade_factor * fade_strength
}

/// Drives the overlay opacity from the scroll position.
#[derive(Clone, Debug)]
pub struct HeroFader<E> {
    overlay: E,
    hero: E,
    fade_strength: f64,
}

impl<E: Clone + PartialEq> HeroFader<E> {
    /// Returns `None` unless both the overlay and the hero are present.
    pub fn mount<D>(dom: &D, config: &HeroConfig) -> Option<Self>
    where
        D: DomEffects<Element = E>,
    {
        let (Some(overlay), Some(hero)) = (
            dom.query_selector(&config.overlay_selector),
            dom.query_selector(&config.hero_selector),
        ) else {
            debug!("hero fader disabled: overlay or hero missing");
            return None;
        };

        info!("hero fader mounted");
        Some(Self {
            overlay,
            hero,
            fade_strength: config.fade_strength,
        })
    }

    /// Recomputes the overlay opacity for the current scroll offset.
    ///
    /// The hero height is read on every call so layout changes are honoured.
    pub fn handle_scroll<D>(&self, dom: &D, scroll_offset: f64) -> f64
    where
        D: DomEffects<Element = E>,
    {
        let height = dom.offset_height(&self.hero);
        let opacity = overlay_opacity(scroll_offset, height, self.fade_strength);
        dom.set_style(&self.overlay, "opacity", &opacity.to_string());
        opacity
    }
}
