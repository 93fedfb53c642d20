//! HTTP tests for the claims console API

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_claims::{ClaimDesk, FixtureClaimData, PetClaim};
use interface_api::config::ApiConfig;
use interface_api::create_router;
use test_utils::{CaseFileFixtures, PetClaimBuilder, StageFixtures};

const BRUNO: &str = "/api/v1/claims/PETCLM00012345";

fn server_with(port: FixtureClaimData) -> TestServer {
    let desk = Arc::new(ClaimDesk::new(Arc::new(port)));
    TestServer::new(create_router(desk, ApiConfig::default())).unwrap()
}

fn fixture_server() -> TestServer {
    server_with(FixtureClaimData::load().unwrap())
}

fn server_for(claim: PetClaim) -> TestServer {
    server_with(FixtureClaimData::with_claims(vec![claim], CaseFileFixtures::standard()))
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let response = fixture_server().get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_reports_claim_data() {
        let response = fixture_server().get("/health/ready").await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["claim_data"]["adapter_id"], "fixture-claim-data");
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let response = fixture_server().get("/api/v1/claims/status-counts").await;
        response.assert_status_ok();
        let id = response.header("x-request-id");
        assert!(!id.is_empty());
    }
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn test_list_all_claims() {
        let body = fixture_server().get("/api/v1/claims").await.json::<Value>();
        assert_eq!(body["total"], 12);
        assert_eq!(body["claims"][0]["claimNumber"], "PETCLM00012345");
    }

    #[tokio::test]
    async fn test_filter_by_status_and_search() {
        let server = fixture_server();

        let closed = server
            .get("/api/v1/claims")
            .add_query_param("status", "Closed")
            .await
            .json::<Value>();
        assert_eq!(closed["total"], 4);

        let all = server
            .get("/api/v1/claims")
            .add_query_param("status", "All")
            .add_query_param("search", "coco")
            .await
            .json::<Value>();
        assert_eq!(all["total"], 1);
        assert_eq!(all["claims"][0]["petName"], "Coco");
    }

    #[tokio::test]
    async fn test_unknown_status_is_bad_request() {
        let response = fixture_server()
            .get("/api/v1/claims")
            .add_query_param("status", "Lost")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status_counts() {
        let body = fixture_server()
            .get("/api/v1/claims/status-counts")
            .await
            .json::<Value>();
        let counts = body["counts"].as_array().unwrap();
        assert_eq!(counts.len(), 9);
        assert_eq!(counts[0], json!({ "status": "Pending Admissibility Check", "count": 1 }));
    }
}

mod claim_view {
    use super::*;

    #[tokio::test]
    async fn test_open_claim_timeline() {
        let body = fixture_server().get(BRUNO).await.json::<Value>();
        assert_eq!(body["claim"]["status"], "Pending Verification");
        assert_eq!(body["timeline"][0]["title"], "Claim Verification");
        assert_eq!(body["timeline"][0]["actionable"], true);
        assert_eq!(body["timeline"][2]["dateTime"], "12:04 PM | Dec 05, 2025");
        assert!(body["expandedStage"].is_null());
    }

    #[tokio::test]
    async fn test_malformed_claim_number() {
        let response = fixture_server().get("/api/v1/claims/CLM-1").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_unknown_claim_opens_fresh() {
        let body = fixture_server()
            .get("/api/v1/claims/PETCLM99999999")
            .await
            .json::<Value>();
        assert_eq!(body["claim"]["status"], "Pending Admissibility Check");
        assert_eq!(body["timeline"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_expand_and_collapse() {
        let server = fixture_server();
        let body = server
            .post(&format!("{}/stages/3/expand", BRUNO))
            .await
            .json::<Value>();
        assert_eq!(body["expandedStage"], 3);

        server
            .post(&format!("{}/stages/42/expand", BRUNO))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let body = server.post(&format!("{}/collapse", BRUNO)).await.json::<Value>();
        assert!(body["expandedStage"].is_null());
    }
}

mod decisions {
    use super::*;

    #[tokio::test]
    async fn test_request_documents_round_trip() {
        let server = server_for(PetClaimBuilder::new().with_stages(StageFixtures::fresh()).build());

        let response = server
            .post(&format!("{}/admissibility/request-documents", BRUNO))
            .json(&json!({ "note": "blurry bill" }))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        let stages = body["claim"]["stages"].as_array().unwrap();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0]["id"], 1);
        assert_eq!(stages[0]["status"], "Completed");
        assert!(!stages[0]["dateTime"].is_null());
        assert_eq!(stages[1]["id"], 2);
        assert_eq!(stages[1]["title"], "Document Verification");
        assert_eq!(stages[1]["status"], "Pending");
        assert_eq!(body["expandedStage"], 2);
        assert_eq!(body["claim"]["status"], "Document Requested");

        // The same decision again finds the stage already decided
        let replay = server
            .post(&format!("{}/admissibility/request-documents", BRUNO))
            .json(&json!({ "note": "blurry bill" }))
            .await;
        replay.assert_status(StatusCode::CONFLICT);

        let reopened = server.get(BRUNO).await.json::<Value>();
        assert_eq!(reopened["claim"]["stages"], body["claim"]["stages"]);
    }

    #[tokio::test]
    async fn test_documents_behind_claim_verification_are_closed() {
        let server = fixture_server();
        let view = server.get(BRUNO).await.json::<Value>();
        let actionable: Vec<&Value> = view["timeline"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|entry| entry["actionable"] == true)
            .collect();
        assert_eq!(actionable.len(), 1);
        assert_eq!(actionable[0]["id"], 3);

        let response = server
            .post(&format!("{}/documents/approve", BRUNO))
            .json(&json!({
                "documents": [
                    { "id": "1", "status": "approved" },
                    { "id": "2", "status": "approved" }
                ]
            }))
            .await;
        response.assert_status(StatusCode::CONFLICT);

        let after = server.get(BRUNO).await.json::<Value>();
        assert_eq!(after["claim"]["stages"], view["claim"]["stages"]);
    }

    #[tokio::test]
    async fn test_blank_note_is_a_review_error() {
        let server = server_for(PetClaimBuilder::new().with_stages(StageFixtures::fresh()).build());
        let response = server
            .post(&format!("{}/admissibility/request-documents", BRUNO))
            .json(&json!({ "note": "   " }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "review_error");
        assert_eq!(body["message"], "Note Required");
    }

    #[tokio::test]
    async fn test_overlong_note_fails_validation() {
        let response = fixture_server()
            .post(&format!("{}/verification/send-to-vet", BRUNO))
            .json(&json!({ "note": "x".repeat(2001) }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_admissibility_approval_with_form() {
        let server = server_for(PetClaimBuilder::new().with_stages(StageFixtures::fresh()).build());
        let url = format!("{}/admissibility/approve", BRUNO);

        let pending = server
            .post(&url)
            .json(&json!({ "documents": [{ "id": "1", "status": "approved" }] }))
            .await;
        pending.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(pending.json::<Value>()["message"], "Documents Pending");

        let approved = server
            .post(&url)
            .json(&json!({
                "documents": [
                    { "id": "1", "status": "approved" },
                    { "id": "2", "status": "approved" }
                ],
                "accountApproved": true
            }))
            .await;
        approved.assert_status_ok();
        assert_eq!(approved.json::<Value>()["claim"]["status"], "Pending Verification");
    }

    #[tokio::test]
    async fn test_settlement_limits() {
        let server = fixture_server();
        let url = format!("{}/verification/approve", BRUNO);

        let over = server.post(&url).json(&json!({ "amount": 5500 })).await;
        over.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = over.json::<Value>();
        assert_eq!(body["message"], "Amount Exceeds Limit");
        assert_eq!(body["details"][0], "Amount cannot exceed maximum admissible (₹5,000).");

        let reduced = server.post(&url).json(&json!({ "amount": 4000 })).await;
        reduced.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(reduced.json::<Value>()["message"], "Reason Required");

        let ok = server
            .post(&url)
            .json(&json!({ "amount": 4000, "reductionReason": "Non-payable consumables" }))
            .await;
        ok.assert_status_ok();
        let body = ok.json::<Value>();
        assert_eq!(body["claim"]["status"], "Pending Payment");
        assert_eq!(body["approvedAmount"]["currency"], "INR");
    }

    #[tokio::test]
    async fn test_vet_flow() {
        let server = fixture_server();
        server
            .post(&format!("{}/verification/send-to-vet", BRUNO))
            .json(&json!({ "note": "Please verify the surgery" }))
            .await
            .assert_status_ok();

        let incomplete = server
            .post(&format!("{}/vet/approve", BRUNO))
            .json(&json!({ "findings": { "comments": "ok" }, "amount": 4800 }))
            .await;
        incomplete.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(incomplete.json::<Value>()["message"], "Assessment Required");

        let response = server
            .post(&format!("{}/vet/request-documents", BRUNO))
            .json(&json!({
                "findings": {
                    "assessment": "Partially Justified",
                    "comments": "X-ray films missing",
                    "recommendation": "Partial Approval"
                },
                "note": "Upload the X-ray films"
            }))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["claim"]["status"], "Document Requested");
        assert_eq!(body["timeline"][0]["title"], "Document Verification");
        assert_eq!(body["timeline"][1]["status"], "Cancelled");
    }

    #[tokio::test]
    async fn test_payment_processing() {
        let server = fixture_server();
        server
            .post(&format!("{}/verification/approve", BRUNO))
            .json(&json!({ "amount": 5000, "reductionReason": "Sub-limit applied" }))
            .await
            .assert_status_ok();

        let response = server.post(&format!("{}/payment/process", BRUNO)).await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["receipt"]["paidTo"], "HDFC Bank - ****5678");
        assert_eq!(body["claim"]["closed"], true);
        assert_eq!(body["claim"]["claim"]["status"], "Closed");

        server
            .post(&format!("{}/payment/process", BRUNO))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_hold_requires_reason() {
        let server = server_for(PetClaimBuilder::new().with_stages(StageFixtures::awaiting_payment()).build());
        let response = server
            .post(&format!("{}/payment/hold", BRUNO))
            .json(&json!({ "reason": "" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["message"], "Reason Required");
    }
}
