//! Integration tests for the client over HTTP stubbing.
//!
//! These exercise the full path from operation dispatch through
//! `HttpTransport` to envelope decoding and record normalization,
//! against stubbed responses instead of the live API.

use campaign_cash::{Chamber, Client, Cycle, Error, HttpTransport, LeaderCategory, Office};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wrap `results` in the envelope every endpoint responds with.
fn envelope(results: serde_json::Value) -> serde_json::Value {
    json!({
        "status": "OK",
        "copyright": "Copyright (c) ProPublica Inc. All Rights Reserved.",
        "cycle": 2026,
        "base_uri": "https://api.propublica.org/campaign-finance/v1/2026/",
        "results": results
    })
}

fn client_for(server: &MockServer) -> Client {
    Client::with_transport(HttpTransport::with_base_url(server.uri(), "test-api-key"))
}

/// Test candidate lookup decodes a full record with stubbed HTTP response.
#[tokio::test]
async fn test_find_candidate_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2026/candidates/H0NY01023.json"))
        .and(header("X-API-Key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": "H0NY01023",
            "name": "Michael Grimm",
            "party": "REP",
            "state": "https://api.propublica.org/campaign-finance/v1/2026/races/NY.json",
            "district": "https://api.propublica.org/campaign-finance/v1/2026/races/NY/house/11.json",
            "fec_uri": "http://docquery.fec.gov/cgi-bin/fecimg/?H0NY01023",
            "committee": "/committees/C00459396.json",
            "mailing_city": "Staten Island",
            "status": "O",
            "total_receipts": "1371827.29",
            "end_cash": "536657.81"
        }]))))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let candidate = client
        .find("H0NY01023", None)
        .await
        .expect("should succeed")
        .expect("one result");

    assert_eq!(candidate.id, "H0NY01023");
    assert_eq!(candidate.name.as_deref(), Some("Michael Grimm"));
    assert_eq!(candidate.office, Some(Office::House));
    assert_eq!(candidate.state.as_deref(), Some("NY"));
    assert_eq!(candidate.district, 11);
    assert_eq!(candidate.committee_id.as_deref(), Some("C00459396"));

    let finances = candidate.finances.expect("full form carries totals");
    assert!((finances.total_receipts - 1_371_827.29).abs() < f64::EPSILON);
    assert!((finances.end_cash - 536_657.81).abs() < f64::EPSILON);
}

/// Test a lookup with no matching filings yields `None`, not an error.
#[tokio::test]
async fn test_find_candidate_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2026/candidates/H0XX00000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let found = client.find("H0XX00000", None).await.expect("should succeed");

    assert!(found.is_none());
}

/// Test API error response (500) surfaces status and body.
#[tokio::test]
async fn test_find_candidate_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2026/candidates/H0NY01023.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let result = client.find("H0NY01023", None).await;

    assert!(matches!(
        result,
        Err(Error::Api { status: 500, ref message }) if message == "upstream exploded"
    ));
}

/// Test the leaders operation addresses the category's slug and keeps the
/// API's ranking order.
#[tokio::test]
async fn test_leaders_hit_the_category_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2026/candidates/leaders/end_cash.json"))
        .and(header("X-API-Key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"id": "S4KY00012", "end_cash": "21374451.37"},
            {"id": "H2CA12345", "end_cash": "19205402.96"}
        ]))))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let leaders = client
        .leaders(LeaderCategory::EndCash, None)
        .await
        .expect("should succeed");

    assert_eq!(leaders.len(), 2);
    assert_eq!(leaders[0].id, "S4KY00012");
    assert_eq!(leaders[1].id, "H2CA12345");
    assert!(leaders[0].finances.is_some(), "leaderboard rows are full form");
}

/// Test search passes query and offset parameters and normalizes the
/// nested search shape.
#[tokio::test]
async fn test_search_sends_query_and_offset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2026/candidates/search.json"))
        .and(query_param("query", "grimm"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "candidate": {
                "id": "H0NY01023",
                "name": "GRIMM, MICHAEL G",
                "party": "REP"
            },
            "district": "/races/NY/11.json",
            "committee": "/committees/C00459396.json"
        }]))))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let matches = client
        .search("grimm", None, Some(20))
        .await
        .expect("should succeed");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, "H0NY01023");
    assert_eq!(matches[0].state.as_deref(), Some("NY"), "state derives from the id");
    assert_eq!(matches[0].district, 11);
    assert_eq!(matches[0].committee_id.as_deref(), Some("C00459396"));
    assert!(matches[0].finances.is_none(), "search rows carry no totals");
}

/// Test an empty new-candidates page decodes to an empty list.
#[tokio::test]
async fn test_new_candidates_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2026/candidates/new.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let fresh = client.new_candidates(None, None).await.expect("should succeed");

    assert!(fresh.is_empty());
}

/// Test seat listing paths grow with chamber and district.
#[tokio::test]
async fn test_seat_listing_paths() {
    let server = MockServer::start().await;

    let item = |id: &str| {
        json!({
            "candidate": {"id": id, "name": "A Candidate", "party": "DEM"},
            "district": "/races/NY/12.json"
        })
    };

    Mock::given(method("GET"))
        .and(path("/2026/seats/NY.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([item("S2NY00001"), item("H6NY11234")]))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2026/seats/NY/house.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([item("H6NY11234")]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2026/seats/NY/house/12.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([item("H6NY11234")]))))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let statewide = client
        .by_state("NY", None, None, None, None)
        .await
        .expect("should succeed");
    assert_eq!(statewide.len(), 2);

    let chamber = client
        .by_state("NY", Some(Chamber::House), None, None, None)
        .await
        .expect("should succeed");
    assert_eq!(chamber.len(), 1);
    assert_eq!(chamber[0].state.as_deref(), Some("NY"));

    let district = client
        .by_state("NY", Some(Chamber::House), Some(12), None, None)
        .await
        .expect("should succeed");
    assert_eq!(district.len(), 1);
    assert_eq!(district[0].district, 12);
}

/// Test an explicit cycle overrides the client default in the path.
#[tokio::test]
async fn test_explicit_cycle_overrides_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2014/candidates/H0NY01023.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([{"id": "H0NY01023"}]))),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);

    let candidate = client
        .find("H0NY01023", Some(Cycle::new(2014)))
        .await
        .expect("should succeed");

    assert!(candidate.is_some(), "the 2014 path is the one stubbed");
}

/// Test a 200 reply missing the `results` key is a transport error.
#[tokio::test]
async fn test_reply_without_results_is_a_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2026/candidates/new.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let result = client.new_candidates(None, None).await;

    assert!(matches!(result, Err(Error::Request(_))));
}

/// Test timeout handling using response delay.
#[tokio::test]
async fn test_request_timeout() {
    use std::time::Duration;

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2026/candidates/H0NY01023.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([])))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("client build");
    let client = Client::with_transport(HttpTransport::with_client(
        http_client,
        server.uri(),
        "test-api-key",
    ));

    let result = client.find("H0NY01023", None).await;

    assert!(matches!(result, Err(Error::Request(_))));
}

/// Test a wrong API key falls through the stub and surfaces as an API error.
#[tokio::test]
async fn test_wrong_api_key_not_matched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2026/candidates/new.json"))
        .and(header("X-API-Key", "correct-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let client = Client::with_transport(HttpTransport::with_base_url(server.uri(), "wrong-key"));

    let result = client.new_candidates(None, None).await;

    assert!(matches!(result, Err(Error::Api { status: 404, .. })));
}
