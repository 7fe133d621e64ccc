use amazon_ads_types::{
    BidRecommendationRequest, KeywordRecommendationRequest, KeywordTarget, TargetingExpression,
};
use serde_json::Value;
use ureq::http::Method;

use super::ads_request;
use crate::{APIResult, AdsContext};

pub(crate) const KEYWORD_RECOMMENDATIONS_PATH: &str = "/sp/targets/keywords/recommendations";
pub(crate) const KEYWORD_RECOMMENDATIONS_MEDIA_TYPE: &str =
    "application/vnd.spkeywordsrecommendation.v4+json";
pub(crate) const BID_RECOMMENDATIONS_PATH: &str = "/sp/targets/bid/recommendations";
pub(crate) const BID_RECOMMENDATIONS_MEDIA_TYPE: &str =
    "application/vnd.spthemebasedbidrecommendation.v4+json";

/// Ranks `targets` against the keyword recommendations of an ad group.
///
/// The answer is returned as the server sent it.
pub fn keyword_recommendations(
    ctx: &AdsContext,
    campaign_id: &str,
    ad_group_id: &str,
    targets: &[KeywordTarget],
) -> APIResult<Value> {
    let request = KeywordRecommendationRequest::new(campaign_id, ad_group_id, targets);
    let response = ads_request(
        ctx,
        Method::POST,
        KEYWORD_RECOMMENDATIONS_PATH,
        Some(&request),
        KEYWORD_RECOMMENDATIONS_MEDIA_TYPE,
    )?;

    #[cfg(feature = "logging")]
    log::info!(
        "Fetched keyword recommendations for {} target(s) of ad group {ad_group_id}",
        targets.len()
    );

    Ok(response)
}

/// Theme based bid recommendations for an existing ad group.
///
/// [`TargetingExpression::auto_targeting`] builds the expressions of an
/// auto targeted ad group.
pub fn bid_recommendations(
    ctx: &AdsContext,
    campaign_id: &str,
    ad_group_id: &str,
    targeting_expressions: &[TargetingExpression],
) -> APIResult<Value> {
    let request = BidRecommendationRequest::new(campaign_id, ad_group_id, targeting_expressions);
    let response = ads_request(
        ctx,
        Method::POST,
        BID_RECOMMENDATIONS_PATH,
        Some(&request),
        BID_RECOMMENDATIONS_MEDIA_TYPE,
    )?;

    #[cfg(feature = "logging")]
    log::info!("Fetched bid recommendations for ad group {ad_group_id}");

    Ok(response)
}
