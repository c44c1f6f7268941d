//! Browser-backed end-to-end tests.
//!
//! These drive a real headless Chromium against `data:` URLs, so they need a
//! chromium install but no network. Run with:
//!
//!     cargo test --test browser_e2e -- --ignored --test-threads 1

use browser_verify::{
    Locator, WaitConfig,
    config::BrowserConfig,
    interact::Interactor,
    scenario::Orchestrator,
    session::{BrowserKind, Session, SessionFactory},
};
use std::time::Duration;

async fn session_for(html: &str) -> Session {
    let url = format!("data:text/html,{}", urlencode(html));
    SessionFactory::create(BrowserKind::Chrome, &url, &BrowserConfig::default())
        .await
        .expect("browser launch failed")
}

fn urlencode(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '#' => "%23".chars().collect::<Vec<_>>(),
            '%' => "%25".chars().collect(),
            '&' => "%26".chars().collect(),
            c => vec![c],
        })
        .collect()
}

fn wait_secs(secs: u64) -> WaitConfig {
    WaitConfig::from_secs(secs)
}

#[tokio::test]
#[ignore = "requires a chromium install"]
async fn click_blocks_until_element_is_clickable() {
    // Button enabled after 1s; the click must wait for it, then land.
    let session = session_for(
        r#"<html><title>Home</title><body>
           <button id="go" disabled onclick="document.getElementById('out').textContent='clicked'">go</button>
           <div id="out"></div>
           <script>setTimeout(()=>document.getElementById('go').disabled=false,1000)</script>
           </body></html>"#,
    )
    .await;

    let ui = Interactor::new(&session, wait_secs(5));
    ui.click(&Locator::id("go")).await.expect("click failed");

    let out = ui.text(&Locator::id("out")).await.expect("text read failed");
    assert_eq!(out, "clicked");

    session.destroy().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a chromium install"]
async fn type_text_clears_prior_content() {
    let session = session_for(
        r#"<html><body><input id="field" value="stale content"></body></html>"#,
    )
    .await;

    let ui = Interactor::new(&session, wait_secs(5));
    ui.type_text(&Locator::id("field"), "").await.unwrap();
    ui.type_text(&Locator::id("field"), "abc").await.unwrap();

    let value = session
        .evaluate("document.getElementById('field').value")
        .await
        .unwrap();
    assert_eq!(value.as_str(), Some("abc"));

    session.destroy().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a chromium install"]
async fn probes_report_false_without_throwing() {
    let session = session_for("<html><title>Home</title><body></body></html>").await;

    let ui = Interactor::new(&session, wait_secs(1));
    let ghost = Locator::css("#does-not-exist");

    assert!(!ui.element_exists(&ghost).await);
    assert!(!ui.is_displayed(&ghost).await);

    // Tab title comparison is exact and untrimmed.
    assert!(ui.matches_tab_title("Home").await.unwrap());
    assert!(!ui.matches_tab_title(" Home").await.unwrap());

    session.destroy().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a chromium install"]
async fn double_click_dispatches_a_real_gesture() {
    let session = session_for(
        r#"<html><body>
           <div id="target" ondblclick="this.textContent='double-clicked'">target</div>
           <button id="frozen" disabled>frozen</button>
           </body></html>"#,
    )
    .await;

    let ui = Interactor::new(&session, wait_secs(2));
    ui.double_click(&Locator::id("target"))
        .await
        .expect("double-click failed");

    let text = ui.text(&Locator::id("target")).await.unwrap();
    assert_eq!(text, "double-clicked");

    // Absent element fails as NotFound; a present but never-clickable one
    // burns the wait and fails as Timeout.
    assert!(matches!(
        ui.double_click(&Locator::id("ghost")).await,
        Err(browser_verify::HarnessError::NotFound { .. })
    ));
    assert!(matches!(
        ui.double_click(&Locator::id("frozen")).await,
        Err(browser_verify::HarnessError::Timeout { .. })
    ));

    session.destroy().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a chromium install"]
async fn in_view_probe_is_scroll_position_sensitive() {
    // The header stays rendered and styled visible the whole time; only the
    // scroll position decides whether it is in view. A style-only check
    // would pass both probes below.
    let session = session_for(
        r#"<html><body style="margin:0">
           <h1 id="header">Top</h1>
           <div style="height:5000px"></div>
           <button id="up" onclick="window.scrollTo({top:0,behavior:'instant'})">up</button>
           </body></html>"#,
    )
    .await;

    let ui = Interactor::new(&session, wait_secs(1));

    session.scroll_to_bottom().await.unwrap();
    assert!(ui.is_displayed(&Locator::id("header")).await);
    assert!(!ui.is_in_view(&Locator::id("header")).await);

    ui.click(&Locator::id("up")).await.unwrap();
    assert!(ui.is_in_view(&Locator::id("header")).await);

    session.destroy().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a chromium install"]
async fn delayed_banner_verifies_with_zero_recoveries() {
    // The banner renders after 2s of async load; with a 5s wait the guarded
    // verification must succeed without a single refresh.
    let session = session_for(
        r#"<html><body>
           <script>setTimeout(()=>{
             const b=document.createElement('div');
             b.id='subscribe-banner';b.textContent='Subscription';
             document.body.appendChild(b);
           },2000)</script>
           </body></html>"#,
    )
    .await;

    let orchestrator = Orchestrator::new(session, wait_secs(5), 20);
    orchestrator
        .verify_displayed(
            "subscribe banner visible",
            &Locator::id("subscribe-banner"),
            None,
        )
        .await
        .expect("verification failed");

    orchestrator.teardown().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a chromium install"]
async fn attribute_read_distinguishes_absent_attribute_from_absent_element() {
    let session = session_for(r#"<html><body><img id="logo" src="x.png"></body></html>"#).await;

    let ui = Interactor::new(&session, wait_secs(2));

    let src = ui.attribute(&Locator::id("logo"), "src").await.unwrap();
    assert_eq!(src.as_deref(), Some("x.png"));

    let alt = ui.attribute(&Locator::id("logo"), "alt").await.unwrap();
    assert_eq!(alt, None);

    assert!(ui.attribute(&Locator::id("ghost"), "src").await.is_err());

    session.destroy().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a chromium install"]
async fn never_rendering_banner_exhausts_after_max_attempts() {
    let session = session_for("<html><body><p>no banner here</p></body></html>").await;

    // Small wait and attempt budget to keep the test fast; the count, not
    // the duration, is the property under test.
    let orchestrator = Orchestrator::new(session, wait_secs(1), 2);
    let result = orchestrator
        .verify_displayed("banner visible", &Locator::id("subscribe-banner"), None)
        .await;

    match result {
        Err(browser_verify::HarnessError::VerificationFailed { attempts, .. }) => {
            assert_eq!(attempts, 2);
        }
        other => panic!("Expected VerificationFailed, got {:?}", other),
    }

    orchestrator.teardown().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a chromium install"]
async fn scroll_into_view_fails_fast_for_missing_element() {
    let session = session_for("<html><body></body></html>").await;

    let ui = Interactor::new(&session, wait_secs(5));
    let start = std::time::Instant::now();
    let result = ui.scroll_into_view(&Locator::id("ghost")).await;

    assert!(matches!(
        result,
        Err(browser_verify::HarnessError::NotFound { .. })
    ));
    // No wait precondition: must not burn the 5s timeout.
    assert!(start.elapsed() < Duration::from_secs(2));

    session.destroy().await.unwrap();
}
