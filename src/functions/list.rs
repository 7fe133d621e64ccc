use amazon_ads_types::{ListFilter, SpResource};
use serde_json::Value;
use ureq::http::Method;

use super::paginate;
use crate::{APIResult, AdsContext};

pub trait SpList
where
    Self: SpResource,
{
    /// Lists every entity matching `filter`, following `nextToken` until
    /// the last page.
    ///
    /// Filters this resource does not understand are left out of the
    /// request.
    fn list(ctx: &AdsContext, filter: &ListFilter) -> APIResult<Vec<Value>> {
        let dropped = filter.unsupported(Self::FILTERS);
        if !dropped.is_empty() {
            #[cfg(feature = "logging")]
            log::warn!(
                "Ignoring filters {:?}, {} lists do not support them",
                dropped,
                Self::NAME
            );
        }

        let items = paginate(
            ctx,
            &Method::POST,
            &Self::list_path(),
            Self::MEDIA_TYPE,
            filter.to_body(Self::FILTERS),
            Self::RESULTS_FIELD,
        )?;

        #[cfg(feature = "logging")]
        log::info!("Successfully listed {} {}(s)", items.len(), Self::NAME);

        Ok(items)
    }
}

impl<T: SpResource> SpList for T {}
