mod support;

use amazon_ads_oxide::{
    functions::{
        recommendations::{bid_recommendations, keyword_recommendations},
        SpCreate, SpDelete, SpList, SpUpdate,
    },
    types::{
        AdGroup, Campaign, EntityState, Keyword, KeywordTarget, ListFilter, MatchType, MultiStatus,
        ProductAd, TargetingExpression,
    },
    APIErrorInner, SessionSettings,
};
use serde_json::{json, Value};
use support::{blocking, init_logger, resume};
use wiremock::{
    matchers::{body_json, body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test(flavor = "multi_thread")]
async fn list_follows_next_token_in_order() {
    init_logger();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/campaigns/list"))
        .and(body_partial_json(json!({ "nextToken": "X" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "campaigns": [{ "campaignId": "c3" }] })),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sp/campaigns/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campaigns": [{ "campaignId": "c1" }, { "campaignId": "c2" }],
            "nextToken": "X",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = resume(&server, "T1", SessionSettings::default());
    let campaigns = blocking(move || Campaign::list(&ctx, &ListFilter::default()))
        .await
        .unwrap();

    let ids: Vec<&str> = campaigns
        .iter()
        .map(|c| c["campaignId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["c1", "c2", "c3"]);

    let requests = server.received_requests().await.unwrap();
    let first: Value = requests[0].body_json().unwrap();
    assert_eq!(
        first,
        json!({
            "stateFilter": { "include": ["ENABLED", "PAUSED", "ARCHIVED"] },
            "includeExtendedDataFields": false,
        })
    );
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn null_next_token_ends_the_listing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/adGroups/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "adGroups": [{ "adGroupId": "ag1" }],
            "nextToken": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = resume(&server, "T1", SessionSettings::default());
    let groups = blocking(move || AdGroup::list(&ctx, &ListFilter::default()))
        .await
        .unwrap();
    assert_eq!(groups.len(), 1);
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn keyword_filters_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/keywords/list"))
        .and(body_partial_json(json!({
            "stateFilter": { "include": ["ENABLED"] },
            "campaignIdFilter": { "include": ["c1"] },
            "matchTypeFilter": ["EXACT", "PHRASE"],
            "maxResults": 100,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "keywords": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = ListFilter::default()
        .states([EntityState::Enabled])
        .campaign_ids(["c1"])
        .match_types([MatchType::Exact, MatchType::Phrase])
        .max_results(100);
    let ctx = resume(&server, "T1", SessionSettings::default());
    let keywords = blocking(move || Keyword::list(&ctx, &filter)).await.unwrap();
    assert!(keywords.is_empty());
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn unsupported_filters_are_left_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/campaigns/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "campaigns": [] })))
        .mount(&server)
        .await;

    let filter = ListFilter::default()
        .campaign_ids(["c1"])
        .name_contains(["summer"]);
    let ctx = resume(&server, "T1", SessionSettings::default());
    blocking(move || Campaign::list(&ctx, &filter)).await.unwrap();

    let body: Value = server.received_requests().await.unwrap()[0]
        .body_json()
        .unwrap();
    assert!(body.get("campaignIdFilter").is_none());
    assert_eq!(
        body["nameFilter"],
        json!({ "queryTermMatchType": "BROAD_MATCH", "include": ["summer"] })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn non_object_page_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/campaigns/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "campaignId": "c1" }])))
        .mount(&server)
        .await;

    let ctx = resume(&server, "T1", SessionSettings::default());
    let err = blocking(move || Campaign::list(&ctx, &ListFilter::default()))
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        APIErrorInner::PaginationShape { found: "an array" }
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn page_without_results_field_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/productAds/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalResults": 0 })))
        .mount(&server)
        .await;

    let ctx = resume(&server, "T1", SessionSettings::default());
    let err = blocking(move || ProductAd::list(&ctx, &ListFilter::default()))
        .await
        .unwrap_err();
    match err.kind() {
        APIErrorInner::MissingResultsField { field } => assert_eq!(field, "productAds"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn page_limit_stops_an_endless_listing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/campaigns/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campaigns": [{ "campaignId": "c1" }],
            "nextToken": "again",
        })))
        .expect(2)
        .mount(&server)
        .await;

    let ctx = resume(&server, "T1", SessionSettings::default().with_max_pages(2));
    let err = blocking(move || Campaign::list(&ctx, &ListFilter::default()))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), APIErrorInner::PageLimit { limit: 2 }));
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn zero_page_limit_still_fetches_the_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/campaigns/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campaigns": [{ "campaignId": "c1" }],
            "nextToken": "again",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = SessionSettings {
        max_pages: Some(0),
        ..SessionSettings::default()
    };
    let ctx = resume(&server, "T1", settings);
    let err = blocking(move || Campaign::list(&ctx, &ListFilter::default()))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), APIErrorInner::PageLimit { limit: 1 }));
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_that_ends_within_the_page_limit_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/campaigns/list"))
        .and(body_partial_json(json!({ "nextToken": "X" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "campaigns": [{ "campaignId": "c2" }] })),
        )
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sp/campaigns/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campaigns": [{ "campaignId": "c1" }],
            "nextToken": "X",
        })))
        .mount(&server)
        .await;

    let ctx = resume(&server, "T1", SessionSettings::default().with_max_pages(2));
    let campaigns = blocking(move || Campaign::list(&ctx, &ListFilter::default()))
        .await
        .unwrap();
    assert_eq!(campaigns.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_writes_expose_status_and_body() {
    init_logger();
    let server = MockServer::start().await;
    for (verb, endpoint) in [
        ("POST", "/sp/campaigns"),
        ("PUT", "/sp/campaigns"),
        ("POST", "/sp/campaigns/delete"),
    ] {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(500).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;
    }

    let ctx = resume(&server, "T1", SessionSettings::default());
    let errors = blocking(move || {
        let campaign = json!({ "name": "Summer", "state": "ENABLED" });
        let update = json!({ "campaignId": "c1", "state": "PAUSED" });
        [
            Campaign::create(&ctx, &[campaign]).unwrap_err(),
            Campaign::update(&ctx, &[update]).unwrap_err(),
            Campaign::delete(&ctx, &["c1"]).unwrap_err(),
        ]
    })
    .await;

    for err in errors {
        assert!(matches!(err.kind(), APIErrorInner::BadRequest { .. }));
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body(), Some("bad request"));
    }
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn create_wraps_items_in_the_results_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/keywords"))
        .and(body_json(json!({
            "keywords": [{ "keywordText": "running shoes", "matchType": "EXACT" }],
        })))
        .respond_with(ResponseTemplate::new(207).set_body_json(json!({
            "keywords": { "success": [{ "index": 0, "keywordId": "k1" }], "error": [] },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = resume(&server, "T1", SessionSettings::default());
    let response = blocking(move || {
        Keyword::create(
            &ctx,
            &[json!({ "keywordText": "running shoes", "matchType": "EXACT" })],
        )
    })
    .await
    .unwrap();

    let outcome = MultiStatus::from_response(&response, "keywords").unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.success[0]["keywordId"], "k1");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_sends_the_id_filter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/productAds/delete"))
        .and(body_json(json!({ "adIdFilter": { "include": ["a1", "a2"] } })))
        .respond_with(ResponseTemplate::new(207).set_body_json(json!({
            "productAds": {
                "success": [{ "index": 0, "adId": "a1" }],
                "error": [{ "index": 1, "errors": [{ "errorType": "entityNotFoundError" }] }],
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = resume(&server, "T1", SessionSettings::default());
    let response = blocking(move || ProductAd::delete(&ctx, &["a1", "a2"]))
        .await
        .unwrap();

    let outcome = MultiStatus::from_response(&response, "productAds").unwrap();
    assert!(!outcome.is_success());
    assert_eq!(outcome.error.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn keyword_recommendations_rank_the_given_targets() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/targets/keywords/recommendations"))
        .and(header(
            "Content-Type",
            "application/vnd.spkeywordsrecommendation.v4+json",
        ))
        .and(body_partial_json(json!({
            "recommendationType": "KEYWORDS_FOR_ADGROUP",
            "campaignId": "c1",
            "adGroupId": "ag1",
            "maxRecommendations": 0,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "keywordTargetList": [{ "keyword": "running shoes", "rank": 1 }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = resume(&server, "T1", SessionSettings::default());
    let targets = vec![KeywordTarget::new("running shoes", MatchType::Exact)];
    let response = blocking(move || keyword_recommendations(&ctx, "c1", "ag1", &targets))
        .await
        .unwrap();
    assert_eq!(response["keywordTargetList"][0]["rank"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn bid_recommendations_for_auto_targeting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sp/targets/bid/recommendations"))
        .and(header(
            "Accept",
            "application/vnd.spthemebasedbidrecommendation.v4+json",
        ))
        .and(body_partial_json(json!({
            "recommendationType": "BIDS_FOR_EXISTING_AD_GROUP",
            "adGroupId": "ag1",
            "targetingExpressions": [{ "type": "CLOSE_MATCH" }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bidRecommendations": [{ "theme": "CONVERSION_OPPORTUNITIES" }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = resume(&server, "T1", SessionSettings::default());
    let expressions = vec![TargetingExpression::new("CLOSE_MATCH")];
    let response = blocking(move || bid_recommendations(&ctx, "c1", "ag1", &expressions))
        .await
        .unwrap();
    assert_eq!(
        response["bidRecommendations"][0]["theme"],
        "CONVERSION_OPPORTUNITIES"
    );

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["targetingExpressions"].as_array().unwrap().len(), 1);
}
