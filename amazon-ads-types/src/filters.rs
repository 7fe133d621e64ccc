use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Delivery state of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityState {
    Enabled,
    Paused,
    Archived,
}

impl EntityState {
    pub const ALL: [EntityState; 3] = [Self::Enabled, Self::Paused, Self::Archived];
}

/// Keyword match type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Broad,
    Exact,
    Phrase,
}

/// Optional filters of the `/list` endpoints.
///
/// `includeExtendedDataFields` and `maxResults` are accepted everywhere and
/// are not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    State,
    CampaignId,
    AdGroupId,
    Name,
    MatchType,
}

impl FilterField {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            FilterField::State => "stateFilter",
            FilterField::CampaignId => "campaignIdFilter",
            FilterField::AdGroupId => "adGroupIdFilter",
            FilterField::Name => "nameFilter",
            FilterField::MatchType => "matchTypeFilter",
        }
    }
}

/// Filter body for a list request.
///
/// The default lists entities in every state, without extended data
/// fields and with the server's page size.
///
/// ```
/// use amazon_ads_types::{EntityState, ListFilter};
///
/// let filter = ListFilter::default()
///     .states([EntityState::Enabled])
///     .campaign_ids(["123"])
///     .max_results(100);
/// assert_eq!(filter.states, vec![EntityState::Enabled]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    pub states: Vec<EntityState>,
    pub campaign_ids: Vec<String>,
    pub ad_group_ids: Vec<String>,
    pub name_contains: Vec<String>,
    pub match_types: Vec<MatchType>,
    pub include_extended_data_fields: bool,
    pub max_results: Option<u32>,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            states: EntityState::ALL.to_vec(),
            campaign_ids: Vec::new(),
            ad_group_ids: Vec::new(),
            name_contains: Vec::new(),
            match_types: Vec::new(),
            include_extended_data_fields: false,
            max_results: None,
        }
    }
}

impl ListFilter {
    #[must_use]
    pub fn states(self, states: impl IntoIterator<Item = EntityState>) -> Self {
        Self {
            states: states.into_iter().collect(),
            ..self
        }
    }

    #[must_use]
    pub fn campaign_ids<S: Into<String>>(self, ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            campaign_ids: ids.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    #[must_use]
    pub fn ad_group_ids<S: Into<String>>(self, ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            ad_group_ids: ids.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Broad match on the entity name.
    #[must_use]
    pub fn name_contains<S: Into<String>>(self, terms: impl IntoIterator<Item = S>) -> Self {
        Self {
            name_contains: terms.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    #[must_use]
    pub fn match_types(self, match_types: impl IntoIterator<Item = MatchType>) -> Self {
        Self {
            match_types: match_types.into_iter().collect(),
            ..self
        }
    }

    #[must_use]
    pub fn extended_data_fields(self, include: bool) -> Self {
        Self {
            include_extended_data_fields: include,
            ..self
        }
    }

    /// Page size asked from the server.
    #[must_use]
    pub fn max_results(self, max_results: u32) -> Self {
        Self {
            max_results: Some(max_results),
            ..self
        }
    }

    /// Whether the caller filled in the given filter.
    #[must_use]
    pub fn is_set(&self, field: FilterField) -> bool {
        match field {
            FilterField::State => !self.states.is_empty(),
            FilterField::CampaignId => !self.campaign_ids.is_empty(),
            FilterField::AdGroupId => !self.ad_group_ids.is_empty(),
            FilterField::Name => !self.name_contains.is_empty(),
            FilterField::MatchType => !self.match_types.is_empty(),
        }
    }

    /// Filters that are set but missing from `supported`.
    #[must_use]
    pub fn unsupported(&self, supported: &[FilterField]) -> Vec<FilterField> {
        [
            FilterField::State,
            FilterField::CampaignId,
            FilterField::AdGroupId,
            FilterField::Name,
            FilterField::MatchType,
        ]
        .into_iter()
        .filter(|field| self.is_set(*field) && !supported.contains(field))
        .collect()
    }

    /// Builds the request body, keeping only the `supported` filters.
    #[must_use]
    pub fn to_body(&self, supported: &[FilterField]) -> Map<String, Value> {
        let mut body = Map::new();
        for field in supported {
            if !self.is_set(*field) {
                continue;
            }
            let value = match field {
                FilterField::State => json!({ "include": self.states }),
                FilterField::CampaignId => json!({ "include": self.campaign_ids }),
                FilterField::AdGroupId => json!({ "include": self.ad_group_ids }),
                FilterField::Name => json!({
                    "queryTermMatchType": "BROAD_MATCH",
                    "include": self.name_contains,
                }),
                // The keyword endpoint takes a bare list here
                FilterField::MatchType => json!(self.match_types),
            };
            body.insert(field.key().to_string(), value);
        }
        body.insert(
            "includeExtendedDataFields".to_string(),
            Value::Bool(self.include_extended_data_fields),
        );
        if let Some(max_results) = self.max_results {
            body.insert("maxResults".to_string(), Value::from(max_results));
        }
        body
    }
}
