//! Integration tests for the harvester
//!
//! These tests use wiremock to serve fake review listings and directory
//! search results, and drive the real session and orchestration layers
//! end-to-end.

use chrono::NaiveDate;
use gleaner::config::{Credentials, DateBound};
use gleaner::directory;
use gleaner::schema::Field;
use gleaner::session;
use gleaner::storage::CompanyStore;
use gleaner::Orchestrator;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One review entry; featured entries carry the featured flag
fn review(date: &str, title: &str, featured: bool) -> String {
    let flag = if featured {
        r#"<span class="featuredFlag">Featured</span>"#
    } else {
        ""
    };
    format!(
        r#"<li class="empReview">{flag}
             <time datetime="{date}">{date}</time>
             <a class="summary">"{title}"</a>
             <span class="helpfulCount">Helpful (2)</span>
             <div class="recommends"><div>Recommends</div></div>
           </li>"#
    )
}

/// A listing page; `next` controls the next-page affordance
fn listing_page(reviews: &[String], next: Option<&str>) -> String {
    let paging = match next {
        Some(href) => format!(
            r#"<ul class="pagination__PaginationStyle__next"><a href="{href}">Next</a></ul>"#
        ),
        None => r#"<ul class="pagination__PaginationStyle__next"><span>Next</span></ul>"#
            .to_string(),
    };
    format!(
        "<html><body><ol>{}</ol>{}</body></html>",
        reviews.concat(),
        paging
    )
}

async fn mount_page(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn page_url(server: &MockServer, at: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), at)).expect("mock URL")
}

#[tokio::test]
async fn test_multi_page_harvest_excludes_featured() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/reviews/p1",
        listing_page(
            &[
                review("2020-01-01", "sponsored", true),
                review("2020-01-02", "first", false),
                review("2020-01-03", "second", false),
            ],
            Some("/reviews/p2"),
        ),
    )
    .await;
    mount_page(
        &server,
        "/reviews/p2",
        listing_page(
            &[
                review("2020-01-04", "third", false),
                review("2020-01-05", "fourth", false),
            ],
            None,
        ),
    )
    .await;

    let client = session::build_client().expect("client");
    let mut orchestrator =
        Orchestrator::new(client, page_url(&server, "/reviews/p1"), 25, None);
    let records = orchestrator.run().await.expect("harvest");

    // Featured entry never reaches the output and never counts.
    assert_eq!(records.len(), 4);
    let titles: Vec<&str> = records
        .iter()
        .map(|r| r.get(Field::ReviewTitle).unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third", "fourth"]);

    // Both pages were visited; the listing simply ran out.
    assert_eq!(orchestrator.state().page(), 2);
    assert!(!orchestrator.state().is_terminated());
}

#[tokio::test]
async fn test_record_limit_stops_before_next_page() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/reviews/p1",
        listing_page(
            &[
                review("2020-01-01", "a", false),
                review("2020-01-02", "b", false),
                review("2020-01-03", "c", false),
            ],
            Some("/reviews/p2"),
        ),
    )
    .await;
    // Deliberately unmocked /reviews/p2: reaching it would fail the test
    // with a navigation error.

    let client = session::build_client().expect("client");
    let mut orchestrator =
        Orchestrator::new(client, page_url(&server, "/reviews/p1"), 4, None);
    let records = orchestrator.run().await.expect("harvest");

    assert_eq!(records.len(), 3);
    assert!(orchestrator.state().is_terminated());
    assert_eq!(orchestrator.state().page(), 1);
}

#[tokio::test]
async fn test_empty_page_terminates() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/reviews/empty",
        listing_page(&[], Some("/reviews/never")),
    )
    .await;

    let client = session::build_client().expect("client");
    let mut orchestrator =
        Orchestrator::new(client, page_url(&server, "/reviews/empty"), 1_000_000, None);
    let records = orchestrator.run().await.expect("harvest");

    assert!(records.is_empty());
    assert!(orchestrator.state().is_terminated());
}

#[tokio::test]
async fn test_min_date_bound_terminates_run() {
    let server = MockServer::start().await;

    // Descending listing whose second entry falls below the bound.
    mount_page(
        &server,
        "/reviews/p1",
        listing_page(
            &[
                review("2019-10-01", "recent", false),
                review("2019-08-12", "too old", false),
            ],
            Some("/reviews/p2"),
        ),
    )
    .await;

    let bound = DateBound::Min(NaiveDate::from_ymd_opt(2019, 9, 1).unwrap());
    let client = session::build_client().expect("client");
    let mut orchestrator = Orchestrator::new(
        client,
        page_url(&server, "/reviews/p1"),
        1_000_000,
        Some(bound),
    );
    let records = orchestrator.run().await.expect("harvest");

    // The crossing batch is still appended; the next page is never fetched.
    assert_eq!(records.len(), 2);
    assert!(orchestrator.state().is_terminated());
}

#[tokio::test]
async fn test_navigation_failure_is_fatal() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/reviews/p1",
        listing_page(&[review("2020-01-01", "only", false)], Some("/reviews/gone")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/reviews/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = session::build_client().expect("client");
    let mut orchestrator =
        Orchestrator::new(client, page_url(&server, "/reviews/p1"), 25, None);
    assert!(orchestrator.run().await.is_err());
}

#[tokio::test]
async fn test_sign_in_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/profile/login_input.htm"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = session::build_client().expect("client");
    let credentials = Credentials {
        username: "user@example.com".to_string(),
        password: "hunter2".to_string(),
    };
    let origin = Url::parse(&server.uri()).expect("origin");
    session::sign_in(&client, &origin, &credentials)
        .await
        .expect("sign in");
}

#[tokio::test]
async fn test_sign_in_rejection_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/profile/login_input.htm"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = session::build_client().expect("client");
    let credentials = Credentials {
        username: "user@example.com".to_string(),
        password: "wrong".to_string(),
    };
    let origin = Url::parse(&server.uri()).expect("origin");
    assert!(session::sign_in(&client, &origin, &credentials).await.is_err());
}

#[tokio::test]
async fn test_landing_page_navigation() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/Overview/acme.htm",
        r#"<html><body>
             <a data-label="Overview" href="/Overview/acme.htm">Overview</a>
             <a data-label="Reviews" href="/Reviews/acme-reviews.htm">Reviews</a>
           </body></html>"#
            .to_string(),
    )
    .await;

    let client = session::build_client().expect("client");
    let landing = page_url(&server, "/Overview/acme.htm");
    let listing = gleaner::harvest::navigate_to_listing(&client, &landing)
        .await
        .expect("listing URL");
    assert_eq!(listing.path(), "/Reviews/acme-reviews.htm");
}

fn directory_results_page(server_uri: &str) -> String {
    format!(
        r#"<html><body>
            <div class="eiHdrModule">
                <a class="tightAll" href="{server_uri}/Overview/acme-E1.htm">Acme Corp</a>
                <span class="url">acme.example</span>
                <div class="eiCell cell reviews"><span class="num">12</span></div>
            </div>
            <div class="eiHdrModule">
                <a class="tightAll" href="{server_uri}/Overview/acme-sub-E2.htm">Acme Subsidiary</a>
            </div>
        </body></html>"#
    )
}

#[tokio::test]
async fn test_fleet_sweep_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Reviews/company-reviews.htm"))
        .and(query_param("sc.keyword", "acme"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(directory_results_page(&server.uri())),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("fleet.db");
    let csv_path = dir.path().join("companies.csv");

    let client = session::build_client().expect("client");
    let origin = Url::parse(&server.uri()).expect("origin");
    let names = vec!["acme".to_string()];

    // First run populates the store.
    let mut store = CompanyStore::open(&db_path).expect("store");
    let listings = directory::sweep(
        &client,
        &origin,
        &names,
        25,
        Some(&mut store),
        &csv_path,
        Duration::ZERO,
    )
    .await
    .expect("sweep");
    assert_eq!(listings.len(), 2);
    assert_eq!(store.company_count().expect("count"), 2);
    assert!(store
        .exists(&format!("{}/Overview/acme-E1.htm", server.uri()))
        .expect("exists"));

    // Second run against the unchanged source: zero new rows.
    let listings = directory::sweep(
        &client,
        &origin,
        &names,
        25,
        Some(&mut store),
        &csv_path,
        Duration::ZERO,
    )
    .await
    .expect("sweep");
    assert_eq!(listings.len(), 2);
    assert_eq!(store.company_count().expect("count"), 2);
    assert_eq!(store.overview_count().expect("count"), 2);
}

#[tokio::test]
async fn test_failed_search_leaves_placeholder_row() {
    let server = MockServer::start().await;
    // No mock for the search path: the request 404s and the sweep records
    // a placeholder instead of dying.

    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("companies.csv");

    let client = session::build_client().expect("client");
    let origin = Url::parse(&server.uri()).expect("origin");
    let names = vec!["ghost co".to_string()];

    let listings = directory::sweep(
        &client,
        &origin,
        &names,
        25,
        None,
        &csv_path,
        Duration::ZERO,
    )
    .await
    .expect("sweep");

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].searched_name, "ghost co");
    assert_eq!(listings[0].url, None);

    let mut reader = csv::Reader::from_path(&csv_path).expect("csv");
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "ghost co");
}
