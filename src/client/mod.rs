use ureq::{
    http::{request::Builder, Method, Request},
    SendBody,
};
use url::Url;

use crate::APIResult;
mod context;
mod refresh;
pub use context::{AdsContext, Credentials, Endpoints, SessionSettings};
pub use refresh::TokenResponse;

pub(crate) const CLIENT_ID_HEADER: &str = "Amazon-Advertising-API-ClientId";
pub(crate) const SCOPE_HEADER: &str = "Amazon-Advertising-API-Scope";

pub(crate) fn set_headers(
    media_type: &str,
    access_token: &str,
    client_id: &str,
    profile_id: &str,
    request: Builder,
) -> Builder {
    request
        .header(CLIENT_ID_HEADER, client_id)
        .header("Authorization", format!("Bearer {access_token}"))
        .header(SCOPE_HEADER, profile_id)
        .header("Accept", media_type)
        .header("Content-Type", media_type)
}

impl AdsContext {
    /// Builds an authenticated request against the API host.
    ///
    /// `body` is the already serialized JSON payload, so a retry after a
    /// token refresh sends exactly the same bytes.
    pub(crate) fn build_request(
        &self,
        method: &Method,
        path: &str,
        body: Option<&[u8]>,
        media_type: &str,
        access_token: &str,
    ) -> APIResult<Request<SendBody<'static>>> {
        let url = build_url(&self.endpoints.api, path)?;
        let mut request = Request::builder().method(method.clone()).uri(url.as_str());
        request = set_headers(
            media_type,
            access_token,
            &self.client_id,
            &self.profile_id,
            request,
        );

        let request = match (*method == Method::GET || *method == Method::DELETE, body) {
            (false, Some(body)) => {
                let reader = std::io::Cursor::new(body.to_vec());
                request.body(SendBody::from_owned_reader(reader))
            }
            _ => request.body(SendBody::none()),
        }?;

        #[cfg(feature = "logging")]
        log::debug!(
            "Built Request with params: {}-{}-{}",
            path,
            method,
            if body.is_some() {
                "With JSON Body"
            } else {
                "No JSON Body"
            },
        );

        Ok(request)
    }
}

pub(crate) fn build_url(base: &str, path: &str) -> APIResult<Url> {
    let url = Url::parse(base)?;
    Ok(url.join(path)?)
}

/// `application/x-www-form-urlencoded` body from key/value pairs.
pub(crate) fn form_body<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
