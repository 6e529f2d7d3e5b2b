//! Deposit review integration tests
//!
//! The approve/reject mutations take a request-id list, expire the
//! `deposit-requests` cache on success, and surface the backend's message
//! verbatim on failure.

mod common;

use common::harness_with_token;
use msqadm::cache::QueryKey;
use msqadm::error::MsqAdminError;
use msqadm::ListParams;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_approve_invalidates_deposit_requests() {
    let h = harness_with_token("tok_op").await;

    Mock::given(method("GET"))
        .and(path("/deposits/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "depositRequests": [{
                "id": "id1",
                "userId": "u1",
                "token": "MSQ",
                "amount": "100",
                "status": "PENDING",
                "requestedAt": "2024-03-01T09:00:00Z"
            }],
            "hasNext": false,
            "nbTotalElements": 1
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/deposits/requests/approve"))
        .and(header("authorization", "Bearer tok_op"))
        .and(body_json(json!({"request_ids": ["id1"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "approved"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let params = ListParams::new().status("PENDING");
    let page = h.resources.deposits.list(&params).await.unwrap();
    assert_eq!(page.data[0].status, "PENDING");

    let key = QueryKey::new("deposit-requests", &params.cache_params());
    assert!(h.cache.is_fresh(&key));

    let ack = h
        .resources
        .deposits
        .approve(vec!["id1".to_string()])
        .await
        .unwrap();
    assert_eq!(ack.result, "approved");
    assert!(!h.cache.is_fresh(&key));
}

#[tokio::test]
async fn test_reject_failure_surfaces_server_message() {
    let h = harness_with_token("tok_op").await;

    Mock::given(method("POST"))
        .and(path("/deposits/requests/reject"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"result": "already processed"})),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h
        .resources
        .deposits
        .reject(vec!["id1".to_string(), "id2".to_string()])
        .await
        .unwrap_err();

    match err.downcast_ref::<MsqAdminError>() {
        Some(MsqAdminError::Api { status, message }) => {
            assert_eq!(*status, 409);
            assert_eq!(message, "already processed");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_review_does_not_invalidate() {
    let h = harness_with_token("tok_op").await;

    Mock::given(method("GET"))
        .and(path("/deposits/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "depositRequests": [],
            "hasNext": false
        })))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/deposits/requests/approve"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"result": "try later"})))
        .mount(&h.server)
        .await;

    let params = ListParams::new();
    h.resources.deposits.list(&params).await.unwrap();
    let key = QueryKey::new("deposit-requests", &params.cache_params());

    let result = h.resources.deposits.approve(vec!["id9".to_string()]).await;
    assert!(result.is_err());
    assert!(h.cache.is_fresh(&key));
}
