//! Contact form submitter: posts the form to the relay and reports the
//! outcome in the feedback element.

use std::cell::Cell;

use tracing::{debug, info, warn};

use crate::config::ContactConfig;
use crate::dom::DomEffects;
use crate::error::{SiteError, SiteResult};
use crate::relay::FormRelay;

/// Where the form is in its submission cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing submitted yet.
    Idle,
    /// Waiting for the relay to answer.
    Submitting,
    /// The last submission was accepted.
    Succeeded,
    /// The last submission failed.
    Failed,
}

/// Contact form and its feedback line.
#[derive(Debug)]
pub struct ContactForm<E> {
    form: E,
    feedback: E,
    config: ContactConfig,
    state: Cell<SubmissionState>,
}

impl<E: Clone + PartialEq> ContactForm<E> {
    /// Returns `None` unless both the form and the feedback element exist.
    pub fn mount<D>(dom: &D, config: &ContactConfig) -> Option<Self>
    where
        D: DomEffects<Element = E>,
    {
        let (Some(form), Some(feedback)) = (
            dom.element_by_id(&config.form_id),
            dom.query_selector(&config.feedback_selector),
        ) else {
            debug!(form_id = %config.form_id, "contact form disabled");
            return None;
        };

        info!(endpoint = %config.endpoint, "contact form mounted");
        Some(Self {
            form,
            feedback,
            config: config.clone(),
            state: Cell::new(SubmissionState::Idle),
        })
    }

    /// The form element whose submit event is intercepted.
    pub fn form(&self) -> &E {
        &self.form
    }

    /// Current submission state.
    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    /// Sends the form once and reports the outcome in the feedback element.
    ///
    /// A submit while another is still waiting on the relay is rejected with
    /// [`SiteError::SubmissionInFlight`] and leaves the page untouched.
    /// Delivery failures are shown to the visitor and returned.
    pub async fn submit<D, R>(&self, dom: &D, relay: &R) -> SiteResult<()>
    where
        D: DomEffects<Element = E>,
        R: FormRelay + ?Sized,
    {
        if self.state.get() == SubmissionState::Submitting {
            warn!("contact form submit ignored: previous submission in flight");
            return Err(SiteError::SubmissionInFlight);
        }

        self.state.set(SubmissionState::Submitting);
        dom.set_text(&self.feedback, &self.config.sending_message);
        let payload = dom.form_fields(&self.form);
        debug!(fields = payload.fields().len(), "submitting contact form");

        match relay.post_form(&self.config.endpoint, &payload).await {
            Ok(()) => {
                dom.set_text(&self.feedback, &self.config.success_message);
                dom.set_style(&self.feedback, "color", &self.config.success_color);
                dom.reset_form(&self.form);
                self.state.set(SubmissionState::Succeeded);
                info!("contact form delivered");
                Ok(())
            }
            Err(error) => {
                dom.set_text(&self.feedback, &self.config.failure_message);
                dom.set_style(&self.feedback, "color", &self.config.failure_color);
                self.state.set(SubmissionState::Failed);
                warn!(%error, "contact form delivery failed");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::FormPayload;
    use crate::fake::{FakeDom, FakeElement, FakeNode, FakeRelay};
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn page() -> (FakeDom, FakeElement, FakeElement) {
        let dom = FakeDom::new();
        let form = dom.append(
            FakeNode::new("form")
                .with_id("contact-form")
                .with_field("name", "")
                .with_field("email", "")
                .with_field("message", ""),
        );
        let feedback = dom.append(FakeNode::new("p").with_class("form-feedback"));
        dom.set_field(form, "name", "Ada");
        dom.set_field(form, "email", "ada@example.com");
        dom.set_field(form, "message", "Olá!");
        (dom, form, feedback)
    }

    /// Relay that blocks until the test releases it.
    struct GatedRelay {
        gate: RefCell<Option<oneshot::Receiver<SiteResult<()>>>>,
    }

    #[async_trait(?Send)]
    impl FormRelay for GatedRelay {
        async fn post_form(&self, _endpoint: &str, _payload: &FormPayload) -> SiteResult<()> {
            let gate = self.gate.borrow_mut().take();
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(SiteError::Network("gate dropped".to_string()))),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_disabled_without_feedback() {
        let dom = FakeDom::new();
        dom.append(FakeNode::new("form").with_id("contact-form"));
        assert!(ContactForm::mount(&dom, &ContactConfig::default()).is_none());
    }

    #[test]
    fn test_success_clears_form() {
        let (dom, form, feedback) = page();
        let config = ContactConfig::default();
        let contact = ContactForm::mount(&dom, &config).unwrap();
        let relay = FakeRelay::new().respond_with(Ok(()));

        assert!(block_on(contact.submit(&dom, &relay)).is_ok());

        assert_eq!(dom.text(feedback), config.success_message);
        assert_eq!(dom.style(feedback, "color"), Some("#3a86ff".to_string()));
        assert_eq!(dom.field(form, "name"), Some(String::new()));
        assert_eq!(contact.state(), SubmissionState::Succeeded);

        let requests = relay.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "https://formspree.io/f/mwkgrqyj");
        assert_eq!(requests[0].1.get("email"), Some("ada@example.com"));
        assert_eq!(requests[0].1.get("message"), Some("Olá!"));
    }

    #[test]
    fn test_server_error_keeps_fields() {
        let (dom, form, feedback) = page();
        let config = ContactConfig::default();
        let contact = ContactForm::mount(&dom, &config).unwrap();
        let relay = FakeRelay::new().respond_with(Err(SiteError::Status(500)));

        let result = block_on(contact.submit(&dom, &relay));

        assert_eq!(result, Err(SiteError::Status(500)));
        assert_eq!(dom.text(feedback), config.failure_message);
        assert_eq!(dom.style(feedback, "color"), Some("#ff8585".to_string()));
        assert_eq!(dom.field(form, "name"), Some("Ada".to_string()));
        assert_eq!(contact.state(), SubmissionState::Failed);
    }

    #[test]
    fn test_network_error_keeps_fields() {
        let (dom, form, feedback) = page();
        let config = ContactConfig::default();
        let contact = ContactForm::mount(&dom, &config).unwrap();
        let relay =
            FakeRelay::new().respond_with(Err(SiteError::Network("connection reset".to_string())));

        assert!(block_on(contact.submit(&dom, &relay)).is_err());
        assert_eq!(dom.text(feedback), config.failure_message);
        assert_eq!(dom.field(form, "email"), Some("ada@example.com".to_string()));
    }

    #[test]
    fn test_failure_then_retry_by_visitor() {
        let (dom, _form, feedback) = page();
        let config = ContactConfig::default();
        let contact = ContactForm::mount(&dom, &config).unwrap();
        let relay = FakeRelay::new()
            .respond_with(Err(SiteError::Status(429)))
            .respond_with(Ok(()));

        assert!(block_on(contact.submit(&dom, &relay)).is_err());
        assert!(block_on(contact.submit(&dom, &relay)).is_ok());
        assert_eq!(dom.text(feedback), config.success_message);
        assert_eq!(relay.requests().len(), 2);
    }

    #[test]
    fn test_overlapping_submit_is_rejected() {
        let (dom, _form, feedback) = page();
        let config = ContactConfig::default();
        let contact = ContactForm::mount(&dom, &config).unwrap();
        let (tx, rx) = oneshot::channel();
        let relay = GatedRelay {
            gate: RefCell::new(Some(rx)),
        };

        block_on(async {
            let mut first = Box::pin(contact.submit(&dom, &relay));
            assert!(futures::poll!(first.as_mut()).is_pending());
            assert_eq!(contact.state(), SubmissionState::Submitting);
            assert_eq!(dom.text(feedback), config.sending_message);

            assert_eq!(
                contact.submit(&dom, &relay).await,
                Err(SiteError::SubmissionInFlight)
            );
            assert_eq!(dom.text(feedback), config.sending_message);

            tx.send(Ok(())).unwrap();
            assert!(first.await.is_ok());
        });

        assert_eq!(dom.text(feedback), config.success_message);
        assert_eq!(contact.state(), SubmissionState::Succeeded);
    }
}
