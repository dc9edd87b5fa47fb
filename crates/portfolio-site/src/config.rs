//! # Site Configuration
//!
//! Everything the controllers need from the page is passed in explicitly
//! through [`SiteConfig`]: selectors, observer thresholds, timings, the form
//! relay endpoint and the feedback copy. Every field has a default matching
//! the published page, so a host can override only what differs.

use serde::Deserialize;

use crate::error::{SiteError, SiteResult};

/// Default form relay endpoint.
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://formspree.io/f/mwkgrqyj";

/// Default carousel rotation interval in milliseconds.
pub const DEFAULT_CAROUSEL_INTERVAL_MS: u32 = 4500;

/// Top-level configuration for a mounted site.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Navigation highlighter settings.
    pub nav: NavConfig,
    /// Hero fader settings.
    pub hero: HeroConfig,
    /// Reveal animator settings.
    pub reveal: RevealConfig,
    /// Carousel rotator settings.
    pub carousel: CarouselConfig,
    /// Custom cursor settings.
    pub cursor: CursorConfig,
    /// Contact form settings.
    pub contact: ContactConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Navigation highlighter settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Selector for navigation links whose `href` names a section anchor.
    pub link_selector: String,
    /// Visible fraction at which a section counts as the active one.
    pub threshold: f64,
    /// Class applied to the active link.
    pub active_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            link_selector: ".nav-link".to_string(),
            threshold: 0.6,
            active_class: "active".to_string(),
        }
    }
}

/// Hero fader settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Selector for the overlay whose opacity is driven.
    pub overlay_selector: String,
    /// Selector for the hero block whose height sets the fade distance.
    pub hero_selector: String,
    /// Opacity removed from the overlay once fully scrolled past the hero.
    pub fade_strength: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            overlay_selector: ".hero-overlay".to_string(),
            hero_selector: ".hero".to_string(),
            fade_strength: 0.8,
        }
    }
}

/// Reveal animator settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Selector for elements that start hidden.
    pub hidden_selector: String,
    /// Class added once an element is revealed.
    pub shown_class: String,
    /// Visible fraction required before revealing.
    pub threshold: f64,
    /// Distance in CSS pixels the element must clear above the viewport bottom.
    pub bottom_margin_px: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            hidden_selector: ".hidden".to_string(),
            shown_class: "show".to_string(),
            threshold: 0.25,
            bottom_margin_px: 80,
        }
    }
}

impl RevealConfig {
    /// Root margin string in the form expected by `IntersectionObserver`.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }
}

/// Carousel rotator settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Selector for the project cards.
    pub card_selector: String,
    /// Attribute holding a card's external link.
    pub link_attribute: String,
    /// Class applied to the highlighted card.
    pub active_class: String,
    /// Rotation interval in milliseconds.
    pub interval_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            card_selector: ".project-card".to_string(),
            link_attribute: "data-link".to_string(),
            active_class: "active".to_string(),
            interval_ms: DEFAULT_CAROUSEL_INTERVAL_MS,
        }
    }
}

/// Custom cursor settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Selector for the cursor-following element.
    pub cursor_selector: String,
    /// Selector for elements that put the cursor into its hovered state.
    pub hover_targets: String,
    /// Class applied while hovering an interactive element.
    pub hovered_class: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            cursor_selector: ".custom-cursor".to_string(),
            hover_targets: "a, button, .btn, .project-card".to_string(),
            hovered_class: "hovered".to_string(),
        }
    }
}

/// Contact form settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Element id of the contact form.
    pub form_id: String,
    /// Selector for the feedback text element.
    pub feedback_selector: String,
    /// Relay endpoint receiving the POST.
    pub endpoint: String,
    /// Text shown while the request is in flight.
    pub sending_message: String,
    /// Text shown after the relay accepts the submission.
    pub success_message: String,
    /// Text shown after any failure.
    pub failure_message: String,
    /// Feedback colour on success.
    pub success_color: String,
    /// Feedback colour on failure.
    pub failure_color: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_id: "contact-form".to_string(),
            feedback_selector: ".form-feedback".to_string(),
            endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            sending_message: "Enviando mensagem...".to_string(),
            success_message: "Mensagem enviada! Em breve entraremos em contato.".to_string(),
            failure_message:
                "Não foi possível enviar. Tente novamente mais tarde ou use outro canal de contato."
                    .to_string(),
            success_color: "#3a86ff".to_string(),
            failure_color: "#ff8585".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level emitted to the browser console (`trace` .. `error`).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level, falling back to `INFO` on unknown names.
    pub fn max_level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}

impl SiteConfig {
    /// Check every value the controllers rely on.
    pub fn validate(&self) -> SiteResult<()> {
        check_fraction("nav.threshold", self.nav.threshold)?;
        check_fraction("reveal.threshold", self.reveal.threshold)?;
        check_fraction("hero.fade_strength", self.hero.fade_strength)?;

        if self.carousel.interval_ms == 0 {
            return Err(SiteError::Config(
                "carousel.interval_ms must be positive".to_string(),
            ));
        }
        if self.contact.endpoint.trim().is_empty() {
            return Err(SiteError::Config("contact.endpoint is empty".to_string()));
        }

        let selectors = [
            ("nav.link_selector", &self.nav.link_selector),
            ("hero.overlay_selector", &self.hero.overlay_selector),
            ("hero.hero_selector", &self.hero.hero_selector),
            ("reveal.hidden_selector", &self.reveal.hidden_selector),
            ("carousel.card_selector", &self.carousel.card_selector),
            ("cursor.cursor_selector", &self.cursor.cursor_selector),
            ("cursor.hover_targets", &self.cursor.hover_targets),
            ("contact.form_id", &self.contact.form_id),
            ("contact.feedback_selector", &self.contact.feedback_selector),
        ];
        for (name, value) in selectors {
            if value.trim().is_empty() {
                return Err(SiteError::Config(format!("{name} is empty")));
            }
        }
        Ok(())
    }
}

fn check_fraction(name: &str, value: f64) -> SiteResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SiteError::Config(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.carousel.interval_ms, 4500);
        assert_eq!(config.contact.success_color, "#3a86ff");
        assert_eq!(config.contact.failure_color, "#ff8585");
        assert_eq!(config.reveal.root_margin(), "0px 0px -80px 0px");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: SiteConfig = serde_json::from_str(
            r#"{ "carousel": { "interval_ms": 1000 }, "contact": { "endpoint": "https://relay.test/f/x" } }"#,
        )
        .unwrap();

        assert_eq!(config.carousel.interval_ms, 1000);
        assert_eq!(config.carousel.card_selector, ".project-card");
        assert_eq!(config.contact.endpoint, "https://relay.test/f/x");
        assert_eq!(config.contact.form_id, "contact-form");
        assert_eq!(config.nav, NavConfig::default());
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let mut config = SiteConfig::default();
        config.nav.threshold = 1.5;
        assert!(matches!(config.validate(), Err(SiteError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_interval_and_empty_endpoint() {
        let mut config = SiteConfig::default();
        config.carousel.interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.contact.endpoint = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_selector() {
        let mut config = SiteConfig::default();
        config.cursor.hover_targets = String::new();
        assert_eq!(
            config.validate(),
            Err(SiteError::Config("cursor.hover_targets is empty".to_string()))
        );
    }

    #[test]
    fn test_log_level_parsing() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
        };
        assert_eq!(logging.max_level(), tracing::Level::DEBUG);

        let logging = LoggingConfig {
            level: "loud".to_string(),
        };
        assert_eq!(logging.max_level(), tracing::Level::INFO);
    }
}
