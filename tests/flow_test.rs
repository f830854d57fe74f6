mod common;

use std::time::Duration;

use reqwest::StatusCode;
use spotremote::{
    discovery::NameAdvertiser,
    error::Error,
    progress::SilentProgress,
    spotify::AuthorizationCodeFlow,
    types::{FlowOutcome, FlowState},
};
use tokio_util::sync::CancellationToken;

use common::{FakeAdvertiser, RecordingProgress, flow_options, free_addr, get_when_up};

#[tokio::test]
async fn test_flow_captures_code_and_tears_down() {
    let addr = free_addr();
    let mut flow = AuthorizationCodeFlow::new(
        flow_options(addr, Duration::from_secs(10)),
        FakeAdvertiser::default(),
    );
    assert_eq!(flow.state(), FlowState::Idle);

    let browser = tokio::spawn(get_when_up(format!("http://{addr}/callback/?code=abc123")));
    let outcome = flow.run(&SilentProgress, &CancellationToken::new()).await.unwrap();

    assert_eq!(outcome, FlowOutcome::Captured("abc123".to_string()));
    assert_eq!(flow.state(), FlowState::Captured);
    assert_eq!(browser.await.unwrap().status(), StatusCode::OK);

    let advertiser = flow.advertiser();
    assert_eq!(advertiser.starts, vec![("tp-spotify".to_string(), addr.port())]);
    assert!(advertiser.stops >= 1);
    assert!(!advertiser.is_active());

    // The callback server is gone once the flow returned.
    assert!(reqwest::get(format!("http://{addr}/")).await.is_err());
}

#[tokio::test]
async fn test_declined_callback_keeps_waiting() {
    let addr = free_addr();
    let mut flow = AuthorizationCodeFlow::new(
        flow_options(addr, Duration::from_secs(10)),
        FakeAdvertiser::default(),
    );

    let browser = tokio::spawn(async move {
        let declined = get_when_up(format!("http://{addr}/callback/?error=access_denied")).await;
        let retried = reqwest::get(format!("http://{addr}/callback/?code=second-try"))
            .await
            .unwrap();
        (declined.status(), retried.status())
    });

    let outcome = flow.run(&SilentProgress, &CancellationToken::new()).await.unwrap();
    assert_eq!(outcome, FlowOutcome::Captured("second-try".to_string()));
    assert_eq!(browser.await.unwrap(), (StatusCode::NOT_FOUND, StatusCode::OK));
}

#[tokio::test]
async fn test_flow_times_out() {
    let addr = free_addr();
    let mut flow = AuthorizationCodeFlow::new(
        flow_options(addr, Duration::from_millis(200)),
        FakeAdvertiser::default(),
    );

    let outcome = flow.run(&SilentProgress, &CancellationToken::new()).await.unwrap();

    assert_eq!(outcome, FlowOutcome::TimedOut);
    assert_eq!(flow.state(), FlowState::Abandoned);
    assert!(!flow.advertiser().is_active());
}

#[tokio::test]
async fn test_flow_honours_cancellation() {
    let addr = free_addr();
    let mut flow = AuthorizationCodeFlow::new(
        flow_options(addr, Duration::from_secs(60)),
        FakeAdvertiser::default(),
    );
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = flow.run(&SilentProgress, &cancel).await.unwrap();

    assert_eq!(outcome, FlowOutcome::Cancelled);
    assert_eq!(flow.state(), FlowState::Abandoned);
    assert!(!flow.advertiser().is_active());
}

#[tokio::test]
async fn test_advertiser_failure_degrades_to_raw_address() {
    let addr = free_addr();
    let mut flow = AuthorizationCodeFlow::new(
        flow_options(addr, Duration::from_secs(10)),
        FakeAdvertiser::failing(),
    );
    let progress = RecordingProgress::default();

    let browser = tokio::spawn(get_when_up(format!("http://{addr}/callback/?code=abc123")));
    let outcome = flow.run(&progress, &CancellationToken::new()).await.unwrap();
    browser.await.unwrap();

    assert_eq!(outcome, FlowOutcome::Captured("abc123".to_string()));
    let notes = progress.notes.borrow();
    assert!(notes.iter().any(|n| n.contains(&format!("http://{addr}/"))));
    assert!(!notes.iter().any(|n| n.contains(".local")));
}

#[tokio::test]
async fn test_advertised_name_is_shown() {
    let addr = free_addr();
    let mut flow = AuthorizationCodeFlow::new(
        flow_options(addr, Duration::from_millis(100)),
        FakeAdvertiser::default(),
    );
    let progress = RecordingProgress::default();

    flow.run(&progress, &CancellationToken::new()).await.unwrap();

    let expected = format!("http://tp-spotify.local:{}", addr.port());
    assert!(progress.notes.borrow().iter().any(|n| n.contains(&expected)));
}

#[tokio::test]
async fn test_server_start_failure_aborts_flow() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap();
    let mut flow = AuthorizationCodeFlow::new(
        flow_options(addr, Duration::from_secs(60)),
        FakeAdvertiser::default(),
    );

    let result = flow.run(&SilentProgress, &CancellationToken::new()).await;

    assert!(matches!(result, Err(Error::ServerStart { .. })));
    assert_eq!(flow.state(), FlowState::Abandoned);
    assert_eq!(flow.advertiser().starts.len(), 1);
    assert!(!flow.advertiser().is_active());
}
