use amazon_ads_oxide::{
    functions::SpList,
    types::{Campaign, EntityState, ListFilter},
    AdsContext, Region,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut region = Region::Europe;
    let mut names = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--na" {
            region = Region::NorthAmerica;
        } else if arg == "--fe" {
            region = Region::FarEast;
        } else {
            names.push(arg);
        }
    }

    let ctx = AdsContext::new_from_env(region)?;

    let filter = ListFilter::default()
        .states([EntityState::Enabled, EntityState::Paused])
        .name_contains(names);
    let campaigns = Campaign::list(&ctx, &filter)?;

    for campaign in &campaigns {
        println!(
            "{}\t{}\t{}",
            campaign["campaignId"].as_str().unwrap_or("?"),
            campaign["state"].as_str().unwrap_or("?"),
            campaign["name"].as_str().unwrap_or("")
        );
    }
    println!("{} campaign(s)", campaigns.len());

    Ok(())
}
