use serde::{Deserialize, Serialize};

use crate::filters::MatchType;

pub const KEYWORDS_FOR_AD_GROUP: &str = "KEYWORDS_FOR_ADGROUP";
pub const BIDS_FOR_EXISTING_AD_GROUP: &str = "BIDS_FOR_EXISTING_AD_GROUP";

/// A keyword to rank against the ad group's own recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordTarget {
    pub keyword: String,
    pub match_type: MatchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_selected_keyword: Option<bool>,
}

impl KeywordTarget {
    #[must_use]
    pub fn new(keyword: impl Into<String>, match_type: MatchType) -> Self {
        Self {
            keyword: keyword.into(),
            match_type,
            bid: None,
            user_selected_keyword: None,
        }
    }

    #[must_use]
    pub fn with_bid(self, bid: f64) -> Self {
        Self {
            bid: Some(bid),
            ..self
        }
    }
}

/// Targeting expression for theme based bid recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetingExpression {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TargetingExpression {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(self, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..self
        }
    }

    /// The four expressions of an automatically targeted ad group.
    #[must_use]
    pub fn auto_targeting() -> Vec<Self> {
        ["CLOSE_MATCH", "LOOSE_MATCH", "SUBSTITUTES", "COMPLEMENTS"]
            .into_iter()
            .map(Self::new)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRecommendationRequest<'a> {
    pub recommendation_type: &'static str,
    pub campaign_id: &'a str,
    pub ad_group_id: &'a str,
    pub targets: &'a [KeywordTarget],
    pub max_recommendations: u32,
}

impl<'a> KeywordRecommendationRequest<'a> {
    #[must_use]
    pub fn new(campaign_id: &'a str, ad_group_id: &'a str, targets: &'a [KeywordTarget]) -> Self {
        Self {
            recommendation_type: KEYWORDS_FOR_AD_GROUP,
            campaign_id,
            ad_group_id,
            targets,
            // 0 ranks the given targets only
            max_recommendations: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRecommendationRequest<'a> {
    pub targeting_expressions: &'a [TargetingExpression],
    pub campaign_id: &'a str,
    pub recommendation_type: &'static str,
    pub ad_group_id: &'a str,
}

impl<'a> BidRecommendationRequest<'a> {
    #[must_use]
    pub fn new(
        campaign_id: &'a str,
        ad_group_id: &'a str,
        targeting_expressions: &'a [TargetingExpression],
    ) -> Self {
        Self {
            targeting_expressions,
            campaign_id,
            recommendation_type: BIDS_FOR_EXISTING_AD_GROUP,
            ad_group_id,
        }
    }
}
