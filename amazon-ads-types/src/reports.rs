use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `adProduct` of every report this crate submits.
pub const AD_PRODUCT: &str = "SPONSORED_PRODUCTS";
/// Reports are aggregated over the whole date range.
pub const TIME_UNIT: &str = "SUMMARY";
/// Artifacts are gzip compressed JSON.
pub const REPORT_FORMAT: &str = "GZIP_JSON";
pub const DEFAULT_REPORT_NAME: &str = "Report";

/// A pre-filled report configuration.
///
/// Presets differ only in the report type id, their default grouping and
/// the columns requested. Some columns only make sense for a given
/// grouping and are added by [`ReportPreset::columns_for`].
pub trait ReportPreset {
    fn report_type_id() -> &'static str;
    fn default_group_by() -> &'static [&'static str];
    fn base_columns() -> &'static [&'static str];
    fn grouped_columns() -> &'static [(&'static str, &'static [&'static str])];

    #[must_use]
    fn columns_for(group_by: &[String]) -> Vec<String> {
        let mut columns: Vec<String> = Self::base_columns().iter().map(ToString::to_string).collect();
        for (group, extra) in Self::grouped_columns() {
            if group_by.iter().any(|g| g == group) {
                columns.extend(extra.iter().map(ToString::to_string));
            }
        }
        columns
    }
}

macro_rules! impl_report_preset {
    ($(
        $(#[$meta:meta])*
        $preset:ident, $type_id:expr, [$($group:expr),* $(,)?],
            [$($column:expr),* $(,)?]
            $(, { $($grouping:expr => [$($extra:expr),* $(,)?]),* $(,)? })?;
    )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $preset;

            impl ReportPreset for $preset {
                fn report_type_id() -> &'static str {
                    $type_id
                }

                fn default_group_by() -> &'static [&'static str] {
                    &[$($group),*]
                }

                fn base_columns() -> &'static [&'static str] {
                    &[$($column),*]
                }

                fn grouped_columns() -> &'static [(&'static str, &'static [&'static str])] {
                    &[$($(($grouping, &[$($extra),*])),*)?]
                }
            }
        )+
    };
}

impl_report_preset!(
    /// `spCampaigns`, grouped by campaign unless told otherwise.
    CampaignsReport, "spCampaigns", ["campaign"], [
        "impressions", "clicks", "cost",
        "purchases1d", "purchases7d", "purchases14d", "purchases30d",
        "purchasesSameSku1d", "purchasesSameSku7d", "purchasesSameSku14d", "purchasesSameSku30d",
        "unitsSoldClicks1d", "unitsSoldClicks7d", "unitsSoldClicks14d", "unitsSoldClicks30d",
        "sales1d", "sales7d", "sales14d", "sales30d",
        "attributedSalesSameSku1d", "attributedSalesSameSku7d",
        "attributedSalesSameSku14d", "attributedSalesSameSku30d",
        "unitsSoldSameSku1d", "unitsSoldSameSku7d", "unitsSoldSameSku14d", "unitsSoldSameSku30d",
        "kindleEditionNormalizedPagesRead14d", "kindleEditionNormalizedPagesRoyalties14d",
        "startDate", "endDate", "campaignBiddingStrategy",
        "costPerClick", "clickThroughRate", "spend",
    ], {
        "campaign" => [
            "campaignName", "campaignId", "campaignStatus",
            "campaignBudgetAmount", "campaignBudgetType",
            "campaignRuleBasedBudgetAmount", "campaignApplicableBudgetRuleId",
            "campaignApplicableBudgetRuleName", "campaignBudgetCurrencyCode",
            "topOfSearchImpressionShare",
        ],
        "adGroup" => ["adGroupName", "adGroupId", "adStatus"],
    };
    /// `spTargeting`, one row per keyword or target.
    TargetingReport, "spTargeting", ["targeting"], [
        "impressions", "clicks", "costPerClick", "clickThroughRate", "cost",
        "purchases1d", "purchases7d", "purchases14d", "purchases30d",
        "purchasesSameSku1d", "purchasesSameSku7d", "purchasesSameSku14d", "purchasesSameSku30d",
        "unitsSoldClicks1d", "unitsSoldClicks7d", "unitsSoldClicks14d", "unitsSoldClicks30d",
        "sales1d", "sales7d", "sales14d", "sales30d",
        "attributedSalesSameSku1d", "attributedSalesSameSku7d",
        "attributedSalesSameSku14d", "attributedSalesSameSku30d",
        "unitsSoldSameSku1d", "unitsSoldSameSku7d", "unitsSoldSameSku14d", "unitsSoldSameSku30d",
        "kindleEditionNormalizedPagesRead14d", "kindleEditionNormalizedPagesRoyalties14d",
        "salesOtherSku7d", "unitsSoldOtherSku7d",
        "acosClicks7d", "acosClicks14d", "roasClicks7d", "roasClicks14d",
        "keywordId", "keyword", "campaignBudgetCurrencyCode",
        "startDate", "endDate", "portfolioId",
        "campaignName", "campaignId", "campaignBudgetType", "campaignBudgetAmount",
        "campaignStatus", "keywordBid", "adGroupName", "adGroupId",
        "keywordType", "matchType", "targeting",
        "topOfSearchImpressionShare", "adKeywordStatus",
    ];
    /// `spSearchTerm`, one row per customer search term.
    SearchTermReport, "spSearchTerm", ["searchTerm"], [
        "impressions", "clicks", "costPerClick", "clickThroughRate", "cost",
        "purchases1d", "purchases7d", "purchases14d", "purchases30d",
        "purchasesSameSku1d", "purchasesSameSku7d", "purchasesSameSku14d", "purchasesSameSku30d",
        "unitsSoldClicks1d", "unitsSoldClicks7d", "unitsSoldClicks14d", "unitsSoldClicks30d",
        "sales1d", "sales7d", "sales14d", "sales30d",
        "attributedSalesSameSku1d", "attributedSalesSameSku7d",
        "attributedSalesSameSku14d", "attributedSalesSameSku30d",
        "unitsSoldSameSku1d", "unitsSoldSameSku7d", "unitsSoldSameSku14d", "unitsSoldSameSku30d",
        "kindleEditionNormalizedPagesRead14d", "kindleEditionNormalizedPagesRoyalties14d",
        "salesOtherSku7d", "unitsSoldOtherSku7d",
        "acosClicks7d", "acosClicks14d", "roasClicks7d", "roasClicks14d",
        "keywordId", "keyword", "campaignBudgetCurrencyCode",
        "startDate", "endDate", "portfolioId", "searchTerm",
        "campaignName", "campaignId", "campaignBudgetType", "campaignBudgetAmount",
        "campaignStatus", "keywordBid", "adGroupName", "adGroupId",
        "keywordType", "matchType", "targeting", "adKeywordStatus",
    ];
    AdvertisedProductReport, "spAdvertisedProduct", ["advertiser"], [
        "startDate", "endDate", "campaignName", "campaignId", "adGroupName", "adGroupId",
        "adId", "portfolioId", "impressions", "clicks", "costPerClick", "clickThroughRate",
        "cost", "spend", "campaignBudgetCurrencyCode", "campaignBudgetAmount",
        "campaignBudgetType", "campaignStatus", "advertisedAsin", "advertisedSku",
        "purchases1d", "purchases7d", "purchases14d", "purchases30d",
        "purchasesSameSku1d", "purchasesSameSku7d", "purchasesSameSku14d", "purchasesSameSku30d",
        "unitsSoldClicks1d", "unitsSoldClicks7d", "unitsSoldClicks14d", "unitsSoldClicks30d",
        "sales1d", "sales7d", "sales14d", "sales30d",
        "attributedSalesSameSku1d", "attributedSalesSameSku7d",
        "attributedSalesSameSku14d", "attributedSalesSameSku30d",
        "salesOtherSku7d",
        "unitsSoldSameSku1d", "unitsSoldSameSku7d", "unitsSoldSameSku14d", "unitsSoldSameSku30d",
        "unitsSoldOtherSku7d",
        "kindleEditionNormalizedPagesRead14d", "kindleEditionNormalizedPagesRoyalties14d",
        "acosClicks7d", "acosClicks14d", "roasClicks7d", "roasClicks14d",
    ];
    /// `spPurchasedProduct`, products bought after an ad click.
    PurchasedProductReport, "spPurchasedProduct", ["asin"], [
        "startDate", "endDate", "portfolioId", "campaignName", "campaignId",
        "adGroupName", "adGroupId", "keywordId", "keyword", "keywordType",
        "advertisedAsin", "purchasedAsin", "advertisedSku",
        "campaignBudgetCurrencyCode", "matchType",
        "unitsSoldClicks1d", "unitsSoldClicks7d", "unitsSoldClicks14d", "unitsSoldClicks30d",
        "sales1d", "sales7d", "sales14d", "sales30d",
        "purchases1d", "purchases7d", "purchases14d", "purchases30d",
        "unitsSoldOtherSku1d", "unitsSoldOtherSku7d", "unitsSoldOtherSku14d", "unitsSoldOtherSku30d",
        "salesOtherSku1d", "salesOtherSku7d", "salesOtherSku14d", "salesOtherSku30d",
        "purchasesOtherSku1d", "purchasesOtherSku7d", "purchasesOtherSku14d", "purchasesOtherSku30d",
        "kindleEditionNormalizedPagesRead14d", "kindleEditionNormalizedPagesRoyalties14d",
    ];
);

/// What to ask the reporting service to compute.
///
/// Build one from a preset with [`ReportRequest::preset`] or
/// [`ReportRequest::preset_grouped`], or spell out every field with
/// [`ReportRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub report_type_id: String,
    pub metrics: Vec<String>,
    pub group_by: Vec<String>,
}

impl ReportRequest {
    #[must_use]
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        report_type_id: impl Into<String>,
        metrics: Vec<String>,
        group_by: Vec<String>,
    ) -> Self {
        Self {
            name: DEFAULT_REPORT_NAME.to_string(),
            start_date,
            end_date,
            report_type_id: report_type_id.into(),
            metrics,
            group_by,
        }
    }

    /// Preset with its default grouping.
    #[must_use]
    pub fn preset<P: ReportPreset>(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self::preset_grouped::<P, _>(start_date, end_date, P::default_group_by().iter().copied())
    }

    /// Preset with a custom grouping; the columns follow the grouping.
    #[must_use]
    pub fn preset_grouped<P, S>(
        start_date: NaiveDate,
        end_date: NaiveDate,
        group_by: impl IntoIterator<Item = S>,
    ) -> Self
    where
        P: ReportPreset,
        S: Into<String>,
    {
        let group_by: Vec<String> = group_by.into_iter().map(Into::into).collect();
        let metrics = P::columns_for(&group_by);
        Self::new(start_date, end_date, P::report_type_id(), metrics, group_by)
    }

    /// Preset covering the `days` days that end on `end_date`, both ends
    /// included. Windows shorter than one day are widened to `end_date`
    /// alone.
    #[must_use]
    pub fn trailing<P: ReportPreset>(end_date: NaiveDate, days: u32) -> Self {
        let start_date = end_date - chrono::Days::new(u64::from(days.max(1) - 1));
        Self::preset::<P>(start_date, end_date)
    }

    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Body of `POST /reporting/reports`.
    #[must_use]
    pub fn to_payload(&self) -> CreateReportPayload<'_> {
        CreateReportPayload {
            name: &self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            configuration: ReportConfiguration {
                ad_product: AD_PRODUCT,
                group_by: &self.group_by,
                columns: &self.metrics,
                report_type_id: &self.report_type_id,
                time_unit: TIME_UNIT,
                format: REPORT_FORMAT,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportPayload<'a> {
    name: &'a str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    configuration: ReportConfiguration<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportConfiguration<'a> {
    ad_product: &'static str,
    group_by: &'a [String],
    columns: &'a [String],
    report_type_id: &'a str,
    time_unit: &'static str,
    format: &'static str,
}
