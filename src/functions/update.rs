use amazon_ads_types::SpResource;
use serde::Serialize;
use serde_json::Value;
use ureq::http::Method;

use super::{ads_request, entity_body};
use crate::{APIResult, AdsContext};

pub trait SpUpdate
where
    Self: SpResource,
{
    /// Updates `items`, each identified by its id field.
    fn update<I: Serialize>(ctx: &AdsContext, items: &[I]) -> APIResult<Value> {
        let body = entity_body(Self::RESULTS_FIELD, items)?;
        let response = ads_request(ctx, Method::PUT, Self::BASE_PATH, Some(&body), Self::MEDIA_TYPE)?;

        #[cfg(feature = "logging")]
        log::info!("Successfully sent {} {} update(s)", items.len(), Self::NAME);

        Ok(response)
    }
}

impl<T: SpResource> SpUpdate for T {}
