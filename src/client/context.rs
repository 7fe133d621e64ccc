//! # Amazon Ads API Session
//!
//! This module holds the [`AdsContext`], the one object every operation of
//! this crate goes through.
//!
//! ## Creating a Context
//!
//! ```no_run
//! use amazon_ads_oxide::{AdsContext, Credentials, Region};
//!
//! // Read AMAZON_ADS_CLIENT_ID, AMAZON_ADS_CLIENT_SECRET,
//! // AMAZON_ADS_REFRESH_TOKEN and AMAZON_ADS_PROFILE_ID
//! let context = AdsContext::new_from_env(Region::Europe).unwrap();
//!
//! // Or pass the credential bundle explicitly
//! let credentials = Credentials::new("client_id", "client_secret", "refresh_token", "profile_id");
//! let context = AdsContext::new(credentials, Region::NorthAmerica).unwrap();
//! ```
//!
//! Both constructors exchange the refresh token for an access token right
//! away, so bad credentials fail here rather than on the first call.
//!
//! ## Token lifecycle
//!
//! The access token is short lived. Whenever a call comes back `401`, the
//! context refreshes once and replays the call once; a second `401` is
//! returned to the caller. The refresh runs under a mutex, so one context can
//! be shared between threads.
use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::{error::APIErrorInner, APIResult, Region};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// OAuth credentials of one advertising profile.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub profile_id: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
        profile_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            profile_id: profile_id.into(),
            access_token: None,
        }
    }

    /// Reads the credential bundle from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `AMAZON_ADS_CLIENT_ID`
    /// - `AMAZON_ADS_CLIENT_SECRET`
    /// - `AMAZON_ADS_REFRESH_TOKEN`
    /// - `AMAZON_ADS_PROFILE_ID`
    /// - `AMAZON_ADS_ACCESS_TOKEN` (optional)
    pub fn from_env() -> APIResult<Self> {
        Ok(Self {
            client_id: env_var("AMAZON_ADS_CLIENT_ID")?,
            client_secret: env_var("AMAZON_ADS_CLIENT_SECRET")?,
            refresh_token: env_var("AMAZON_ADS_REFRESH_TOKEN")?,
            profile_id: env_var("AMAZON_ADS_PROFILE_ID")?,
            access_token: std::env::var("AMAZON_ADS_ACCESS_TOKEN").ok(),
        })
    }

    #[must_use]
    pub fn with_access_token(self, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..self
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("profile_id", &self.profile_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn env_var(name: &'static str) -> APIResult<String> {
    std::env::var(name).map_err(|source| APIErrorInner::EnvVar { name, source }.into())
}

/// Base URLs of the API host and of the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub(crate) api: String,
    pub(crate) token: String,
}

impl Endpoints {
    #[must_use]
    pub fn new(api: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            token: token.into(),
        }
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api
    }

    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token
    }
}

impl From<Region> for Endpoints {
    fn from(region: Region) -> Self {
        Self::new(region.endpoint_url(), region.token_url())
    }
}

/// Bounds on the two open ended loops of the client.
///
/// Both loops are unbounded by default: pagination runs until the server
/// stops sending a `nextToken`, and report polling runs until the report is
/// `COMPLETED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub max_pages: Option<usize>,
    pub poll_interval: Duration,
    pub max_polls: Option<usize>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_pages: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: None,
        }
    }
}

impl SessionSettings {
    /// Caps a listing at `max_pages` pages; `0` is treated as `1`.
    #[must_use]
    pub fn with_max_pages(self, max_pages: usize) -> Self {
        Self {
            max_pages: Some(max_pages.max(1)),
            ..self
        }
    }

    #[must_use]
    pub fn with_poll_interval(self, poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..self
        }
    }

    /// Caps report polling at `max_polls` status requests; `0` is treated
    /// as `1`.
    #[must_use]
    pub fn with_max_polls(self, max_polls: usize) -> Self {
        Self {
            max_polls: Some(max_polls.max(1)),
            ..self
        }
    }
}

#[derive(Debug)]
pub(crate) struct TokenState {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
    pub(crate) expires_at: Option<DateTime<Utc>>,
}

/// Authenticated session for one advertising profile.
///
/// Owns the credentials and the HTTP agent. Everything but the two tokens is
/// fixed for the lifetime of the context.
pub struct AdsContext {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) profile_id: String,
    pub(crate) endpoints: Endpoints,
    pub(crate) settings: SessionSettings,
    pub(crate) tokens: Mutex<TokenState>,
    pub(crate) agent: Agent,
}

impl AdsContext {
    /// Creates a context for `region` and refreshes its access token.
    ///
    /// # Errors
    ///
    /// - `Auth` if the token endpoint rejects the credentials
    /// - Network or JSON errors while talking to the token endpoint
    pub fn new(credentials: Credentials, region: Region) -> APIResult<Self> {
        Self::with_endpoints(credentials, region.into(), SessionSettings::default())
    }

    /// Same as [`AdsContext::new`] with the credentials read by
    /// [`Credentials::from_env`].
    pub fn new_from_env(region: Region) -> APIResult<Self> {
        Self::new(Credentials::from_env()?, region)
    }

    /// Creates a context against explicit endpoints and refreshes its access
    /// token.
    pub fn with_endpoints(
        credentials: Credentials,
        endpoints: Endpoints,
        settings: SessionSettings,
    ) -> APIResult<Self> {
        let context = Self::resume(credentials, endpoints, settings);
        context.refresh_access_token()?;

        #[cfg(feature = "logging")]
        log::info!(
            "Authorized Amazon Ads context for profile {} at {}",
            context.profile_id,
            context.endpoints.api
        );

        Ok(context)
    }

    /// Creates a context without contacting the token endpoint.
    ///
    /// The access token of `credentials` is used as is; if it is missing or
    /// stale, the first call gets a `401` and refreshes it.
    #[must_use]
    pub fn resume(credentials: Credentials, endpoints: Endpoints, settings: SessionSettings) -> Self {
        let Credentials {
            client_id,
            client_secret,
            refresh_token,
            profile_id,
            access_token,
        } = credentials;
        Self {
            client_id,
            client_secret,
            profile_id,
            endpoints,
            settings,
            tokens: Mutex::new(TokenState {
                access_token: access_token.unwrap_or_default(),
                refresh_token,
                expires_at: None,
            }),
            agent: http_agent(),
        }
    }

    #[must_use]
    pub fn with_settings(self, settings: SessionSettings) -> Self {
        Self { settings, ..self }
    }

    pub(crate) fn lock_tokens(&self) -> MutexGuard<'_, TokenState> {
        // Tokens are only written after a successful refresh, so the state
        // behind a poisoned lock is still consistent.
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn access_token(&self) -> String {
        self.lock_tokens().access_token.clone()
    }

    #[must_use]
    pub fn refresh_token(&self) -> String {
        self.lock_tokens().refresh_token.clone()
    }

    /// When the current access token stops being valid, if the token
    /// endpoint said so.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.lock_tokens().expires_at
    }

    /// Checks if the current access token is past its lifetime.
    ///
    /// A token of unknown lifetime is never considered expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|at| Utc::now() >= at)
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    #[must_use]
    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Snapshot of the credential bundle, tokens included.
    ///
    /// Refresh tokens rotate, so persist this after a session if the next
    /// one should start from the latest token.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        let tokens = self.lock_tokens();
        Credentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            refresh_token: tokens.refresh_token.clone(),
            profile_id: self.profile_id.clone(),
            access_token: Some(tokens.access_token.clone()),
        }
    }
}

/// Agent that hands every status code back to the caller instead of
/// turning 4xx/5xx into errors, so the dispatcher can see 401 bodies.
fn http_agent() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .into()
}
