use chrono::Utc;
use serde::{Deserialize, Serialize};
use ureq::http::Request;

use super::{context::TokenState, form_body, AdsContext};
use crate::{error::APIErrorInner, APIResult};

/// Response of the token endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AdsContext {
    /// Exchanges the refresh token for a new access/refresh token pair.
    ///
    /// Both tokens of the context are replaced on success. There is no retry
    /// here; a rejected refresh is returned as `Auth`.
    pub fn refresh_access_token(&self) -> APIResult<TokenResponse> {
        let mut tokens = self.lock_tokens();
        self.refresh_locked(&mut tokens)
    }

    /// Refreshes after a request made with `stale_token` came back `401`.
    ///
    /// If another caller already replaced that token while the request was
    /// in flight, its token is reused instead of refreshing a second time.
    pub(crate) fn refresh_after_unauthorized(&self, stale_token: &str) -> APIResult<String> {
        let mut tokens = self.lock_tokens();
        if tokens.access_token != stale_token {
            #[cfg(feature = "logging")]
            log::debug!("Access token was already refreshed by another caller");
            return Ok(tokens.access_token.clone());
        }
        self.refresh_locked(&mut tokens)?;
        Ok(tokens.access_token.clone())
    }

    fn refresh_locked(&self, tokens: &mut TokenState) -> APIResult<TokenResponse> {
        let request = Request::post(self.endpoints.token.as_str())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(form_body([
                ("grant_type", "refresh_token"),
                ("refresh_token", tokens.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ]))?;

        let response = self.agent.run(request)?;
        let status = response.status();
        let body = response.into_body().read_to_string()?;

        if !status.is_success() {
            #[cfg(feature = "logging")]
            log::error!("Failed to refresh access token: {status} - {body}");
            return Err(APIErrorInner::Auth {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let token: TokenResponse = match serde_json::from_str(&body) {
            Ok(token) => token,
            Err(_) => {
                #[cfg(feature = "logging")]
                log::error!("Token endpoint answered {status} with an unreadable body: {body}");
                return Err(APIErrorInner::Auth {
                    status: status.as_u16(),
                    body,
                }
                .into());
            }
        };

        tokens.access_token.clone_from(&token.access_token);
        tokens.refresh_token.clone_from(&token.refresh_token);
        tokens.expires_at = token
            .expires_in
            .and_then(|secs| chrono::Duration::try_seconds(i64::try_from(secs).ok()?))
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));

        #[cfg(feature = "logging")]
        log::info!("Refreshed access token for profile {}", self.profile_id);

        Ok(token)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn token_response_keeps_unknown_fields() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token":"T1","refresh_token":"R1","token_type":"bearer","expires_in":3600,"scope":"advertising::campaign_management"}"#,
        )
        .unwrap();
        assert_eq!(token.access_token, "T1");
        assert_eq!(token.expires_in, Some(3600));
        assert_eq!(token.extra["scope"], "advertising::campaign_management");
    }

    #[test]
    fn minimal_token_response() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"T1","refresh_token":"R1"}"#).unwrap();
        assert_eq!(token.token_type, None);
        assert!(token.extra.is_empty());
    }
}
