//! Static configuration tables for the Sponsored Products API.
//!
//! Nothing in here talks to the network. The resource descriptors, list
//! filters, report presets and recommendation payloads are consumed by the
//! `amazon-ads-oxide` client, which owns authentication and dispatch.

pub mod filters;
pub mod multi_status;
pub mod recommendations;
pub mod reports;
pub mod resources;

pub use filters::{EntityState, FilterField, ListFilter, MatchType};
pub use multi_status::MultiStatus;
pub use recommendations::{
    BidRecommendationRequest, KeywordRecommendationRequest, KeywordTarget, TargetingExpression,
};
pub use reports::{
    AdvertisedProductReport, CampaignsReport, PurchasedProductReport, ReportPreset,
    ReportRequest, SearchTermReport, TargetingReport,
};
pub use resources::{
    AdGroup, Campaign, Keyword, NegativeKeyword, ProductAd, SpResource, TargetingClause,
};
