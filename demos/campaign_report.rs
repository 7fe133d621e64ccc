use amazon_ads_oxide::{
    functions::reports::run_report,
    types::{CampaignsReport, ReportRequest},
    AdsContext, Credentials, Endpoints, Region, SessionSettings,
};
use chrono::{Duration, Utc};
use serde_json::{Map, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let days: u32 = std::env::args()
        .nth(1)
        .map(|d| d.parse::<u32>())
        .transpose()?
        .unwrap_or(7);

    let settings = SessionSettings::default().with_max_polls(120);
    let ctx = AdsContext::with_endpoints(
        Credentials::from_env()?,
        Endpoints::from(Region::Europe),
        settings,
    )?;

    let end = Utc::now().date_naive() - Duration::days(1);
    let request = ReportRequest::trailing::<CampaignsReport>(end, days);
    let name = format!("campaigns {} - {}", request.start_date, request.end_date);
    let request = request.with_name(name);

    let rows: Vec<Map<String, Value>> = run_report(&ctx, &request)?;
    for row in &rows {
        println!(
            "{}\t{} clicks\t{} cost",
            row.get("campaignName").and_then(Value::as_str).unwrap_or(""),
            row.get("clicks").unwrap_or(&Value::Null),
            row.get("cost").unwrap_or(&Value::Null),
        );
    }
    println!("{} row(s)", rows.len());
    Ok(())
}
