//! Mounting every controller on a page.

use tracing::{info, warn};

use crate::config::SiteConfig;
use crate::controllers::{
    CarouselRotator, ContactForm, CustomCursor, HeroFader, NavHighlighter, RevealAnimator,
};
use crate::dom::DomEffects;
use crate::error::SiteResult;

/// Wires mounted controllers to live page events.
///
/// Each method either attaches the whole controller or leaves nothing
/// behind and returns the error.
pub trait ControllerHost<E> {
    /// Attaches the navigation highlighter.
    fn attach_nav(&mut self, nav: NavHighlighter<E>) -> SiteResult<()>;
    /// Attaches the hero fader.
    fn attach_hero(&mut self, hero: HeroFader<E>) -> SiteResult<()>;
    /// Attaches the reveal animator.
    fn attach_reveal(&mut self, reveal: RevealAnimator<E>) -> SiteResult<()>;
    /// Attaches the carousel rotator.
    fn attach_carousel(&mut self, carousel: CarouselRotator<E>) -> SiteResult<()>;
    /// Attaches the custom cursor.
    fn attach_cursor(&mut self, cursor: CustomCursor<E>) -> SiteResult<()>;
    /// Attaches the contact form submitter.
    fn attach_contact(&mut self, contact: ContactForm<E>) -> SiteResult<()>;
}

/// All controllers mounted on one page. Absent controllers are `None`.
#[derive(Debug)]
pub struct Site<E> {
    /// Navigation highlighter.
    pub nav: Option<NavHighlighter<E>>,
    /// Hero fader.
    pub hero: Option<HeroFader<E>>,
    /// Reveal animator.
    pub reveal: Option<RevealAnimator<E>>,
    /// Carousel rotator.
    pub carousel: Option<CarouselRotator<E>>,
    /// Custom cursor.
    pub cursor: Option<CustomCursor<E>>,
    /// Contact form submitter.
    pub contact: Option<ContactForm<E>>,
}

impl<E: Clone + PartialEq> Site<E> {
    /// Validates `config` and mounts each controller independently.
    pub fn mount<D>(dom: &D, config: &SiteConfig) -> SiteResult<Self>
    where
        D: DomEffects<Element = E>,
    {
        config.validate()?;

        let site = Self {
            nav: NavHighlighter::mount(dom, &config.nav),
            hero: HeroFader::mount(dom, &config.hero),
            reveal: RevealAnimator::mount(dom, &config.reveal),
            carousel: CarouselRotator::mount(dom, &config.carousel),
            cursor: CustomCursor::mount(dom, &config.cursor),
            contact: ContactForm::mount(dom, &config.contact),
        };
        info!(controllers = site.mounted_count(), "site mounted");
        Ok(site)
    }

    /// Number of controllers that found their elements.
    pub fn mounted_count(&self) -> usize {
        [
            self.nav.is_some(),
            self.hero.is_some(),
            self.reveal.is_some(),
            self.carousel.is_some(),
            self.cursor.is_some(),
            self.contact.is_some(),
        ]
        .into_iter()
        .filter(|mounted| *mounted)
        .count()
    }

    /// Hands every mounted controller to `host`.
    ///
    /// A controller that fails to attach is logged and skipped; the others
    /// are still attached. Returns how many were attached.
    pub fn attach_to<H: ControllerHost<E>>(self, host: &mut H) -> usize {
        let mut attached = 0;
        if let Some(nav) = self.nav {
            attached += settle("nav", host.attach_nav(nav));
        }
        if let Some(hero) = self.hero {
            attached += settle("hero", host.attach_hero(hero));
        }
        if let Some(reveal) = self.reveal {
            attached += settle("reveal", host.attach_reveal(reveal));
        }
        if let Some(carousel) = self.carousel {
            attached += settle("carousel", host.attach_carousel(carousel));
        }
        if let Some(cursor) = self.cursor {
            attached += settle("cursor", host.attach_cursor(cursor));
        }
        if let Some(contact) = self.contact {
            attached += settle("contact", host.attach_contact(contact));
        }
        attached
    }
}

fn settle(controller: &'static str, result: SiteResult<()>) -> usize {
    match result {
        Ok(()) => 1,
        Err(error) => {
            warn!(controller, %error, "controller failed to attach");
            0
        }
    }
}
