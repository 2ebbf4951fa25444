mod common;

use axum::http::StatusCode;
use common::{BROWSER_UA, FACEBOOK_UA};
use linkpeek::config::RedirectStrategy;

// ─── Crawlers ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_crawler_gets_preview_page() {
    let app = common::spawn_app();
    common::seed(&app.store, &common::promo1()).await;

    let response = app
        .server
        .get("/promo1")
        .add_header("User-Agent", FACEBOOK_UA)
        .await;

    response.assert_status_ok();
    assert!(response.headers().get("location").is_none());
    assert_eq!(response.header("cache-control"), "public, max-age=3600");
    assert_eq!(response.header("vary"), "User-Agent");
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let body = response.text();
    assert!(body.contains(r#"<meta property="og:title" content="Spring Sale">"#));
    assert!(body.contains(r#"<meta property="og:description" content="50% off">"#));
    assert!(body.contains(r#"<meta property="og:image" content="https://example.com/img.jpg">"#));
    assert!(body.contains(r#"href="https://example.com/landing""#));
    assert!(body.contains(r#"<meta http-equiv="refresh" content="3; url=https://example.com/landing">"#));
    assert!(!body.contains("<script>"));

    common::wait_for_visits(&app.store, "promo1", 1).await;
}

#[tokio::test]
async fn test_every_messenger_gets_preview_page() {
    let app = common::spawn_app();
    common::seed(&app.store, &common::promo1()).await;

    for ua in [
        "WhatsApp/2.23.20.0 A",
        "Twitterbot/1.0",
        "LinkedInBot/1.0 (compatible; Mozilla/5.0; Apache-HttpClient +http://www.linkedin.com)",
        "TelegramBot (like TwitterBot)",
        "Slackbot-LinkExpanding 1.0 (+https://api.slack.com/robots)",
        "Mozilla/5.0 (compatible; Discordbot/2.0; +https://discordapp.com)",
    ] {
        let response = app.server.get("/promo1").add_header("User-Agent", ua).await;

        response.assert_status_ok();
        assert!(response.headers().get("location").is_none(), "{ua}");
    }
}

#[tokio::test]
async fn test_repeated_crawler_requests_render_identically() {
    let app = common::spawn_app();
    common::seed(&app.store, &common::promo1()).await;

    let first = app
        .server
        .get("/promo1")
        .add_header("User-Agent", FACEBOOK_UA)
        .await
        .text();
    common::wait_for_visits(&app.store, "promo1", 1).await;

    let second = app
        .server
        .get("/promo1")
        .add_header("User-Agent", FACEBOOK_UA)
        .await
        .text();

    assert_eq!(first, second);
}

// ─── Browsers ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_browser_is_redirected() {
    let app = common::spawn_app();
    common::seed(&app.store, &common::promo1()).await;

    let response = app
        .server
        .get("/promo1")
        .add_header("User-Agent", BROWSER_UA)
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/landing");
    assert_eq!(response.header("vary"), "User-Agent");
}

#[tokio::test]
async fn test_in_app_browser_is_redirected() {
    let app = common::spawn_app();
    common::seed(&app.store, &common::promo1()).await;

    let response = app
        .server
        .get("/promo1")
        .add_header(
            "User-Agent",
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148 Snapchat/12.60.0.45 (like Safari/8617.2.4.10.8, panda)",
        )
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/landing");
}

#[tokio::test]
async fn test_missing_user_agent_is_redirected() {
    let app = common::spawn_app();
    common::seed(&app.store, &common::promo1()).await;

    let response = app.server.get("/promo1").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/landing");
}

#[tokio::test]
async fn test_uppercase_code_resolves() {
    let app = common::spawn_app();
    common::seed(&app.store, &common::promo1()).await;

    let response = app
        .server
        .get("/PROMO1")
        .add_header("User-Agent", BROWSER_UA)
        .await;

    response.assert_status(StatusCode::FOUND);
}

#[tokio::test]
async fn test_interstitial_strategy() {
    let app = common::spawn_app_with(RedirectStrategy::Interstitial { delay_seconds: 2 });
    common::seed(&app.store, &common::promo1()).await;

    let response = app
        .server
        .get("/promo1")
        .add_header("User-Agent", BROWSER_UA)
        .await;

    response.assert_status_ok();
    assert!(response.headers().get("location").is_none());

    let body = response.text();
    assert!(body.contains(r#"<meta http-equiv="refresh" content="2; url=https://example.com/landing">"#));
    assert!(body.contains(r#"<a id="continue" class="continue" href="https://example.com/landing""#));
    assert!(body.contains("<script>"));
    assert!(body.contains("}, 2000);"));
    assert_eq!(response.header("vary"), "User-Agent");

    common::wait_for_visits(&app.store, "promo1", 1).await;
}

#[tokio::test]
async fn test_interstitial_strategy_still_serves_crawlers_metadata() {
    let app = common::spawn_app_with(RedirectStrategy::Interstitial { delay_seconds: 3 });
    common::seed(&app.store, &common::promo1()).await;

    let response = app
        .server
        .get("/promo1")
        .add_header("User-Agent", FACEBOOK_UA)
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("og:title"));
    assert!(body.contains(r#"<meta http-equiv="refresh" content="3; url=https://example.com/landing">"#));
    assert!(!body.contains("<script>"));
}

// ─── Visit counting ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_sequential_visits_are_all_counted() {
    let app = common::spawn_app();
    common::seed(&app.store, &common::promo1()).await;

    for i in 1..=5u64 {
        let ua = if i % 2 == 0 { FACEBOOK_UA } else { BROWSER_UA };
        app.server.get("/promo1").add_header("User-Agent", ua).await;
        common::wait_for_visits(&app.store, "promo1", i).await;
    }

    assert_eq!(common::visit_count(&app.store, "promo1").await, 5);
}

#[tokio::test]
async fn test_promo1_scenario() {
    let app = common::spawn_app();
    let mut promo1 = common::promo1();
    promo1.visit_count = 41;
    common::seed(&app.store, &promo1).await;

    let crawler = app
        .server
        .get("/promo1")
        .add_header("User-Agent", FACEBOOK_UA)
        .await;
    crawler.assert_status_ok();
    assert!(crawler.text().contains("og:title"));
    common::wait_for_visits(&app.store, "promo1", 42).await;

    let browser = app
        .server
        .get("/promo1")
        .add_header("User-Agent", BROWSER_UA)
        .await;
    browser.assert_status(StatusCode::FOUND);
    common::wait_for_visits(&app.store, "promo1", 43).await;

    let record = linkpeek::domain::repositories::LinkStore::get(app.store.as_ref(), "promo1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.visit_count, 43);
    assert!(record.last_visited_at.is_some());
}

// ─── Failures ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let app = common::spawn_app();
    common::seed(&app.store, &common::promo1()).await;

    let response = app
        .server
        .get("/doesnotexist")
        .add_header("User-Agent", BROWSER_UA)
        .await;

    response.assert_status_not_found();
    assert!(response.headers().get("location").is_none());
    assert!(response.text().contains("doesnotexist"));

    assert_eq!(common::visit_count(&app.store, "promo1").await, 0);
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let app = common::spawn_app();
    common::seed(&app.store, &common::promo1()).await;
    app.store.set_available(false);

    let response = app
        .server
        .get("/promo1")
        .add_header("User-Agent", BROWSER_UA)
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().get("location").is_none());

    let body = response.text();
    assert!(body.contains("Service unavailable"));
    assert!(!body.contains("memory store"));
}

#[tokio::test]
async fn test_corrupt_record_is_service_unavailable() {
    let app = common::spawn_app();
    app.store.put_raw("link:broken", r#"{"code":"broken"}"#).await;

    let response = app.server.get("/broken").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unrouted_path_is_not_found() {
    let app = common::spawn_app();

    let response = app.server.get("/a/b/c").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_root_path_is_not_found_without_code() {
    let app = common::spawn_app();

    let response = app.server.get("/").await;

    response.assert_status_not_found();
    let body = response.text();
    assert!(body.contains("There is no short link at this address."));
    assert!(!body.contains("<code>"));
}
