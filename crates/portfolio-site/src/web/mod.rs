//! # Browser Bindings
//!
//! Wires the controllers to real browser events. [`PortfolioSite`] owns every
//! listener, observer and timer it creates; dropping or disposing it detaches
//! all of them.

pub mod dom;
pub mod listener;
pub mod relay;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Event, MouseEvent};

use crate::config::SiteConfig;
use crate::controllers::{
    CarouselRotator, ContactForm, CustomCursor, HeroFader, NavHighlighter, RevealAnimator,
    RotationState,
};
use crate::error::SiteResult;
use crate::logging::init_logging;
use crate::site::{ControllerHost, Site};

pub use dom::WebDom;
pub use listener::{Listener, Observer};
pub use relay::FetchRelay;

type Shared<T> = Rc<RefCell<T>>;

/// Everything attached to the page for one mounted site.
struct Mounted {
    dom: Rc<WebDom>,
    carousel: Option<Shared<CarouselRotator<Element>>>,
    rotation: Option<Interval>,
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
}

impl Mounted {
    fn attach(dom: Rc<WebDom>, config: &SiteConfig) -> SiteResult<Self> {
        let site = Site::mount(dom.as_ref(), config)?;
        let mounted_count = site.mounted_count();
        let mut mounted = Mounted {
            dom,
            carousel: None,
            rotation: None,
            listeners: Vec::new(),
            observers: Vec::new(),
        };
        let attached = site.attach_to(&mut mounted);
        info!(attached, mounted = mounted_count, "controllers attached");
        Ok(mounted)
    }

    fn rotation_timer(&self, carousel: &Shared<CarouselRotator<Element>>) -> Interval {
        let dom = self.dom.clone();
        let carousel = carousel.clone();
        let interval_ms = carousel.borrow().interval_ms();
        Interval::new(interval_ms, move || {
            carousel.borrow_mut().tick(dom.as_ref());
        })
    }

    fn start_carousel(&mut self) {
        let Some(carousel) = self.carousel.clone() else {
            return;
        };
        if carousel.borrow_mut().start() || self.rotation.is_none() {
            self.rotation = Some(self.rotation_timer(&carousel));
        }
    }

    fn stop_carousel(&mut self) {
        if let Some(carousel) = &self.carousel {
            carousel.borrow_mut().stop();
        }
        self.rotation = None;
    }
}

impl ControllerHost<Element> for Mounted {
    fn attach_nav(&mut self, nav: NavHighlighter<Element>) -> SiteResult<()> {
        let nav = Rc::new(RefCell::new(nav));
        let mut listeners = Vec::new();
        let links: Vec<Element> = nav.borrow().links().to_vec();
        for (index, link) in links.iter().enumerate() {
            let dom = self.dom.clone();
            let nav = nav.clone();
            listeners.push(Listener::new(link, "click", move |event: Event| {
                event.prevent_default();
                nav.borrow().handle_click(dom.as_ref(), index);
            })?);
        }

        let dom = self.dom.clone();
        let handler = nav.clone();
        let threshold = nav.borrow().threshold();
        let observer = Observer::new(threshold, None, move |entries, _| {
            handler.borrow_mut().handle_intersections(dom.as_ref(), &entries);
        })?;
        for section in nav.borrow().observed_sections() {
            observer.observe(section);
        }
        self.listeners.extend(listeners);
        self.observers.push(observer);
        Ok(())
    }

    fn attach_hero(&mut self, hero: HeroFader<Element>) -> SiteResult<()> {
        let dom = self.dom.clone();
        let target = self.dom.window().clone();
        self.listeners.push(Listener::new(&target, "scroll", move |_| {
            hero.handle_scroll(dom.as_ref(), dom.scroll_y());
        })?);
        Ok(())
    }

    fn attach_reveal(&mut self, reveal: RevealAnimator<Element>) -> SiteResult<()> {
        let (threshold, margin) = (reveal.threshold(), reveal.root_margin().to_string());
        let reveal = Rc::new(RefCell::new(reveal));
        let dom = self.dom.clone();
        let handler = reveal.clone();
        let observer = Observer::new(threshold, Some(&margin), move |entries, observer| {
            let revealed = handler.borrow_mut().handle_intersections(dom.as_ref(), &entries);
            for element in &revealed {
                observer.unobserve(element);
            }
        })?;
        for element in reveal.borrow().pending() {
            observer.observe(element);
        }
        self.observers.push(observer);
        Ok(())
    }

    fn attach_carousel(&mut self, carousel: CarouselRotator<Element>) -> SiteResult<()> {
        let carousel = Rc::new(RefCell::new(carousel));
        let mut listeners = Vec::new();
        let cards: Vec<Element> = carousel.borrow().cards().to_vec();
        for (index, card) in cards.iter().enumerate() {
            let dom = self.dom.clone();
            let carousel = carousel.clone();
            listeners.push(Listener::new(card, "click", move |_| {
                carousel.borrow().handle_click(dom.as_ref(), index);
            })?);
        }
        self.listeners.extend(listeners);
        self.rotation = Some(self.rotation_timer(&carousel));
        self.carousel = Some(carousel);
        Ok(())
    }

    fn attach_cursor(&mut self, cursor: CustomCursor<Element>) -> SiteResult<()> {
        let cursor = Rc::new(cursor);
        let mut listeners = Vec::new();
        {
            let dom = self.dom.clone();
            let cursor = cursor.clone();
            let target = self.dom.document().clone();
            listeners.push(Listener::new(&target, "mousemove", move |event: Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    cursor.handle_pointer_move(
                        dom.as_ref(),
                        f64::from(event.client_x()),
                        f64::from(event.client_y()),
                    );
                }
            })?);
        }

        for element in cursor.hover_targets() {
            let (dom, enter) = (self.dom.clone(), cursor.clone());
            listeners.push(Listener::new(element, "mouseenter", move |_| {
                enter.handle_enter(dom.as_ref());
            })?);
            let (dom, leave) = (self.dom.clone(), cursor.clone());
            listeners.push(Listener::new(element, "mouseleave", move |_| {
                leave.handle_leave(dom.as_ref());
            })?);
        }
        self.listeners.extend(listeners);
        Ok(())
    }

    fn attach_contact(&mut self, contact: ContactForm<Element>) -> SiteResult<()> {
        let contact = Rc::new(contact);
        let dom = self.dom.clone();
        let relay = Rc::new(FetchRelay);
        let form = contact.form().clone();
        self.listeners.push(Listener::new(&form, "submit", move |event: Event| {
            event.prevent_default();
            let (dom, relay, contact) = (dom.clone(), relay.clone(), contact.clone());
            wasm_bindgen_futures::spawn_local(async move {
                // Outcome is already shown in the feedback element and logged.
                let _ = contact.submit(dom.as_ref(), relay.as_ref()).await;
            });
        })?);
        Ok(())
    }
}

#[derive(Default)]
struct SiteState {
    mounted: Option<Mounted>,
    disposed: bool,
}

/// Handle to the behavior mounted on the page.
#[wasm_bindgen]
pub struct PortfolioSite {
    state: Shared<SiteState>,
}

#[wasm_bindgen]
impl PortfolioSite {
    /// Resumes carousel rotation.
    #[wasm_bindgen(js_name = startCarousel)]
    pub fn start_carousel(&self) {
        if let Some(mounted) = self.state.borrow_mut().mounted.as_mut() {
            mounted.start_carousel();
        }
    }

    /// Halts carousel rotation, keeping the current highlight.
    #[wasm_bindgen(js_name = stopCarousel)]
    pub fn stop_carousel(&self) {
        if let Some(mounted) = self.state.borrow_mut().mounted.as_mut() {
            mounted.stop_carousel();
        }
    }

    /// Returns true while the carousel timer is running.
    #[wasm_bindgen(js_name = isCarouselRunning)]
    pub fn is_carousel_running(&self) -> bool {
        self.state
            .borrow()
            .mounted
            .as_ref()
            .and_then(|mounted| mounted.carousel.as_ref())
            .is_some_and(|carousel| carousel.borrow().state() == RotationState::Running)
    }

    /// Returns true once the controllers are attached to the page.
    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.state.borrow().mounted.is_some()
    }

    /// Detaches every listener, observer and timer.
    pub fn dispose(&self) {
        let mounted = {
            let mut state = self.state.borrow_mut();
            state.disposed = true;
            state.mounted.take()
        };
        drop(mounted);
        info!("site disposed");
    }
}

/// Mounts the site with the default configuration.
#[wasm_bindgen]
pub fn mount() -> Result<PortfolioSite, JsValue> {
    mount_config(SiteConfig::default()).map_err(JsValue::from)
}

/// Mounts the site with a host-provided configuration object.
///
/// Missing fields fall back to their defaults.
#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(config: JsValue) -> Result<PortfolioSite, JsValue> {
    let config: SiteConfig = serde_wasm_bindgen::from_value(config)?;
    mount_config(config).map_err(JsValue::from)
}

fn mount_config(config: SiteConfig) -> SiteResult<PortfolioSite> {
    init_logging(&config.logging);
    config.validate()?;

    let dom = Rc::new(WebDom::new()?);
    let state: Shared<SiteState> = Rc::default();

    if dom.document().ready_state() == "loading" {
        let deferred = state.clone();
        let dom_for_load = dom.clone();
        let on_ready = Closure::once_into_js(move || {
            if deferred.borrow().disposed {
                return;
            }
            match Mounted::attach(dom_for_load, &config) {
                Ok(mounted) => deferred.borrow_mut().mounted = Some(mounted),
                Err(error) => warn!(%error, "site failed to mount"),
            }
        });
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        dom.document()
            .add_event_listener_with_callback_and_add_event_listener_options(
                "DOMContentLoaded",
                on_ready.unchecked_ref(),
                &options,
            )?;
        info!("site mount deferred until DOMContentLoaded");
    } else {
        state.borrow_mut().mounted = Some(Mounted::attach(dom, &config)?);
    }

    Ok(PortfolioSite { state })
}

#[cfg(feature = "autostart")]
thread_local! {
    static AUTOSTARTED: RefCell<Option<PortfolioSite>> = const { RefCell::new(None) };
}

/// Mounts the default site as soon as the module is instantiated.
#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn autostart() -> Result<(), JsValue> {
    let site = mount()?;
    AUTOSTARTED.with(|slot| *slot.borrow_mut() = Some(site));
    Ok(())
}
