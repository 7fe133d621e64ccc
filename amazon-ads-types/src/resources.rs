use crate::filters::FilterField;

/// A Sponsored Products entity family served under `/sp/...`.
///
/// Every family exposes the same four operations (list, create, update,
/// delete), so the only thing that differs between them is this table of
/// paths, media types and field names.
pub trait SpResource {
    /// Human readable name, used in log lines.
    const NAME: &'static str;
    /// Path of the collection, relative to the API host.
    const BASE_PATH: &'static str;
    /// Versioned vendor media type, sent as both `Accept` and `Content-Type`.
    const MEDIA_TYPE: &'static str;
    /// Field holding the entities in request and response bodies.
    const RESULTS_FIELD: &'static str;
    /// Id filter used by the `/delete` endpoint.
    const DELETE_FILTER: &'static str;
    /// Filters the `/list` endpoint understands.
    const FILTERS: &'static [FilterField];

    #[must_use]
    fn list_path() -> String {
        format!("{}/list", Self::BASE_PATH)
    }

    #[must_use]
    fn delete_path() -> String {
        format!("{}/delete", Self::BASE_PATH)
    }

    #[must_use]
    fn supports(filter: FilterField) -> bool {
        Self::FILTERS.contains(&filter)
    }
}

macro_rules! impl_sp_resource {
    ($(
        $(#[$meta:meta])*
        $resource:ident, $name:expr, $path:expr, $media:expr, $field:expr, $delete:expr, [$($filter:ident),* $(,)?];
    )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $resource;

            impl SpResource for $resource {
                const NAME: &'static str = $name;
                const BASE_PATH: &'static str = $path;
                const MEDIA_TYPE: &'static str = $media;
                const RESULTS_FIELD: &'static str = $field;
                const DELETE_FILTER: &'static str = $delete;
                const FILTERS: &'static [FilterField] = &[$(FilterField::$filter),*];
            }
        )+
    };
}

impl_sp_resource!(
    /// Sponsored Products campaigns.
    Campaign, "campaign", "/sp/campaigns", "application/vnd.spCampaign.v3+json",
        "campaigns", "campaignIdFilter", [State, Name];
    /// Ad groups, scoped to a campaign.
    AdGroup, "ad group", "/sp/adGroups", "application/vnd.spAdGroup.v3+json",
        "adGroups", "adGroupIdFilter", [State, CampaignId, Name];
    ProductAd, "product ad", "/sp/productAds", "application/vnd.spProductAd.v3+json",
        "productAds", "adIdFilter", [State, CampaignId, AdGroupId];
    Keyword, "keyword", "/sp/keywords", "application/vnd.spKeyword.v3+json",
        "keywords", "keywordIdFilter", [State, CampaignId, AdGroupId, MatchType];
    /// Negative keywords share the keyword id filter on delete.
    NegativeKeyword, "negative keyword", "/sp/negativeKeywords",
        "application/vnd.spNegativeKeyword.v3+json",
        "negativeKeywords", "keywordIdFilter", [State, CampaignId, AdGroupId];
    /// Targeting clauses live under `/sp/targets`.
    TargetingClause, "targeting clause", "/sp/targets",
        "application/vnd.spTargetingClause.v3+json",
        "targetingClauses", "targetIdFilter", [State, CampaignId, AdGroupId];
);
