//! Owned event listeners and intersection observers.
//!
//! Both detach themselves from the page when dropped, so disposing a site is
//! just dropping its handles.

use js_sys::Array;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::dom::IntersectionEntry;
use crate::error::SiteResult;

/// An event listener removed on drop.
pub struct Listener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Attaches `callback` to `event_type` events on `target`.
    pub fn new<F>(target: &EventTarget, event_type: &'static str, callback: F) -> SiteResult<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(callback);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(error) = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref())
        {
            warn!(event = self.event_type, error = ?error, "failed to remove event listener");
        }
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An intersection observer disconnected on drop.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Observer {
    /// Creates an observer that hands decoded entry batches to `callback`.
    pub fn new<F>(threshold: f64, root_margin: Option<&str>, mut callback: F) -> SiteResult<Self>
    where
        F: FnMut(Vec<IntersectionEntry<Element>>, &IntersectionObserver) + 'static,
    {
        let closure = ObserverCallback::new(move |entries: Array, observer: IntersectionObserver| {
            let batch = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| IntersectionEntry {
                    target: entry.target(),
                    is_intersecting: entry.is_intersecting(),
                })
                .collect();
            callback(batch, &observer);
        });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            _callback: closure,
        })
    }

    /// Starts observing `element`.
    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
