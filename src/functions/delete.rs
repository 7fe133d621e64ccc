use amazon_ads_types::SpResource;
use serde_json::{json, Map, Value};
use ureq::http::Method;

use super::ads_request;
use crate::{APIResult, AdsContext};

pub trait SpDelete
where
    Self: SpResource,
{
    /// Deletes the entities with the given ids.
    ///
    /// Deleting archives the entity on the server side; it stays
    /// listable in the `ARCHIVED` state.
    fn delete<S: AsRef<str>>(ctx: &AdsContext, ids: &[S]) -> APIResult<Value> {
        let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
        let mut body = Map::new();
        body.insert(Self::DELETE_FILTER.to_string(), json!({ "include": ids }));

        let response = ads_request(
            ctx,
            Method::POST,
            &Self::delete_path(),
            Some(&body),
            Self::MEDIA_TYPE,
        )?;

        #[cfg(feature = "logging")]
        log::info!("Successfully deleted {} {}(s)", ids.len(), Self::NAME);

        Ok(response)
    }
}

impl<T: SpResource> SpDelete for T {}
