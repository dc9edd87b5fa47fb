//! # Portfolio Site
//!
//! Client-side behavior for the portfolio single page: navigation
//! highlighting, hero fade, reveal-on-scroll, the project carousel, a custom
//! cursor and the contact form.
//!
//! Controllers in [`controllers`] are plain state machines over the
//! [`dom::DomEffects`] seam, so they run against the in-memory `fake` module
//! (feature `testing`) in tests and against the real document through `web`
//! in the browser.

pub mod config;
pub mod controllers;
pub mod dom;
pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod fake;
pub mod logging;
pub mod relay;
pub mod site;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::SiteConfig;
pub use dom::{DomEffects, FormPayload, IntersectionEntry};
pub use error::{SiteError, SiteResult};
pub use relay::FormRelay;
pub use site::{ControllerHost, Site};
