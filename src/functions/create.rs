use amazon_ads_types::SpResource;
use serde::Serialize;
use serde_json::Value;
use ureq::http::Method;

use super::{ads_request, entity_body};
use crate::{APIResult, AdsContext};

pub trait SpCreate
where
    Self: SpResource,
{
    /// Creates `items` in one call.
    ///
    /// The answer is usually `207 Multi-Status`; see
    /// [`MultiStatus`](amazon_ads_types::MultiStatus) for reading the
    /// per-item outcome.
    fn create<I: Serialize>(ctx: &AdsContext, items: &[I]) -> APIResult<Value> {
        let body = entity_body(Self::RESULTS_FIELD, items)?;
        let response = ads_request(ctx, Method::POST, Self::BASE_PATH, Some(&body), Self::MEDIA_TYPE)?;

        #[cfg(feature = "logging")]
        log::info!("Successfully sent {} new {}(s)", items.len(), Self::NAME);

        Ok(response)
    }
}

impl<T: SpResource> SpCreate for T {}
