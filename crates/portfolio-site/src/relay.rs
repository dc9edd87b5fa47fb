//! Form relay seam
//!
//! The contact form posts to a hosted relay that forwards the message. The
//! browser implementation lives in [`crate::web::relay`].

use async_trait::async_trait;

use crate::dom::FormPayload;
use crate::error::SiteResult;

/// Delivers a serialized form to a relay endpoint.
#[async_trait(?Send)]
pub trait FormRelay {
    /// Posts `payload` to `endpoint` once, without retrying.
    ///
    /// Succeeds on any 2xx status. Other statuses map to
    /// [`SiteError::Status`](crate::error::SiteError::Status), transport
    /// failures to [`SiteError::Network`](crate::error::SiteError::Network).
    async fn post_form(&self, endpoint: &str, payload: &FormPayload) -> SiteResult<()>;
}

/// Maps an HTTP status code onto the relay contract.
pub fn check_status(status: u16) -> SiteResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(crate::error::SiteError::Status(status))
    }
}
