//! `gloo-net` implementation of the form relay.

use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::FormData;

use crate::dom::FormPayload;
use crate::error::{SiteError, SiteResult};
use crate::relay::{check_status, FormRelay};

/// Posts forms with `fetch` as multipart bodies.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchRelay;

#[async_trait(?Send)]
impl FormRelay for FetchRelay {
    async fn post_form(&self, endpoint: &str, payload: &FormPayload) -> SiteResult<()> {
        let body = match payload.form_data() {
            Some(data) => data.clone(),
            None => {
                let body = FormData::new()?;
                for (name, value) in payload.fields() {
                    body.append_with_str(name, value)?;
                }
                body
            }
        };

        let response = Request::post(endpoint)
            .header("Accept", "application/json")
            .body(body)
            .map_err(|e| SiteError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| SiteError::Network(e.to_string()))?;

        check_status(response.status())
    }
}
