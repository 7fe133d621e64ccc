/*
 * A rust library for the Amazon Ads Sponsored Products API.
 *
 * For more information, you can check out their documentation at:
 * https://advertising.amazon.com/API/docs/en-us/sponsored-products/3-0/openapi/prod
 *
 */
#![warn(clippy::pedantic)]

//! Blocking client for the Sponsored Products endpoints of the Amazon Ads API.
//!
//! An [`AdsContext`] owns the OAuth credentials of one advertising profile.
//! It refreshes the access token when it is created and again whenever the
//! API answers `401`, pages through list endpoints and drives the
//! asynchronous reporting flow.
//!
//! ```no_run
//! use amazon_ads_oxide::functions::SpList;
//! use amazon_ads_oxide::types::{Campaign, ListFilter};
//! use amazon_ads_oxide::{AdsContext, Region};
//!
//! let ctx = AdsContext::new_from_env(Region::Europe).unwrap();
//! let campaigns = Campaign::list(&ctx, &ListFilter::default()).unwrap();
//! println!("{} campaigns", campaigns.len());
//! ```

pub mod client;
pub mod error;
pub mod functions;

pub use client::{AdsContext, Credentials, Endpoints, SessionSettings, TokenResponse};
pub use error::{APIError, APIErrorInner, APIResult, ReportError};
use serde::{Deserialize, Serialize};

pub mod types {
    pub use amazon_ads_types::*;
}

/// Regional deployment of the advertising API.
///
/// Each region has its own API host and its own token endpoint; a refresh
/// token is only valid in the region it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Region {
    NorthAmerica,
    #[default]
    Europe,
    FarEast,
}

impl Region {
    #[inline]
    #[must_use]
    pub fn endpoint_url(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "https://advertising-api.amazon.com",
            Region::Europe => "https://advertising-api-eu.amazon.com",
            Region::FarEast => "https://advertising-api-fe.amazon.com",
        }
    }

    #[inline]
    #[must_use]
    pub fn token_url(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "https://api.amazon.com/auth/o2/token",
            Region::Europe => "https://api.amazon.co.uk/auth/o2/token",
            Region::FarEast => "https://api.amazon.co.jp/auth/o2/token",
        }
    }
}
