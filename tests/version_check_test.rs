//! Deployed-version check integration tests

mod common;

use common::harness;
use msqadm::version::{VersionChecker, VersionStatus};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_newer_deployed_version_is_outdated() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "9.9.9"})))
        .mount(&h.server)
        .await;

    let checker = VersionChecker::with_running_version(h.api.clone(), "/version", "1.0.0").unwrap();
    assert_eq!(
        checker.check().await.unwrap(),
        VersionStatus::Outdated {
            latest: "9.9.9".to_string()
        }
    );
}

#[tokio::test]
async fn test_matching_version_is_up_to_date() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "1.0.0"})))
        .mount(&h.server)
        .await;

    let checker = VersionChecker::with_running_version(h.api.clone(), "/version", "1.0.0").unwrap();
    assert_eq!(checker.check().await.unwrap(), VersionStatus::UpToDate);
}

#[tokio::test]
async fn test_unparsable_version_is_an_error() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "latest"})))
        .mount(&h.server)
        .await;

    let checker = VersionChecker::with_running_version(h.api.clone(), "/version", "1.0.0").unwrap();
    let err = checker.check().await.unwrap_err();
    assert!(err.to_string().contains("latest"));
}

#[tokio::test]
async fn test_watch_publishes_outdated_status() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "2.0.0"})))
        .mount(&h.server)
        .await;

    let checker =
        Arc::new(VersionChecker::with_running_version(h.api.clone(), "/version", "1.0.0").unwrap());
    let mut rx = checker.watch(Duration::from_millis(20));

    // Initial status is UpToDate; the first poll flips it.
    rx.changed().await.unwrap();
    assert_eq!(
        *rx.borrow(),
        VersionStatus::Outdated {
            latest: "2.0.0".to_string()
        }
    );
}
