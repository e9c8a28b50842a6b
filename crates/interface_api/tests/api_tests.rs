//! Tests for interface_api
//!
//! Drives the router through `axum-test` with the TISS service wired to the
//! in-memory claims store and a temp schema directory.

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;
use tempfile::TempDir;

use core_kernel::{ClaimId, PatientId};
use domain_tiss::{ClaimsDataPort, TissConfig, TissService, TISS_NAMESPACE};
use interface_api::{config::ApiConfig, create_router};
use test_utils::{ClaimsDataFixtures, InMemoryClaimsData};

/// Declares the root as a plain string, so any generated document fails
const STRICT_XSD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           targetNamespace="http://www.ans.gov.br/padroes/tiss/schemas"
           elementFormDefault="qualified">
  <xs:element name="mensagemTISS" type="xs:string"/>
</xs:schema>
"#;

struct TestApp {
    _dir: TempDir,
    store: Arc<InMemoryClaimsData>,
    tiss: Arc<TissService>,
    server: TestServer,
    schema_path: PathBuf,
}

fn app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let config = TissConfig::with_schema_dir(dir.path()).offline();
    let schema_path = config.schema_path();

    let store = Arc::new(
        InMemoryClaimsData::new().with_scenario(ClaimsDataFixtures::maria_silva_scenario()),
    );
    let port: Arc<dyn ClaimsDataPort> = store.clone();
    let tiss = Arc::new(TissService::new(port, config));

    let server = TestServer::new(create_router(Arc::clone(&tiss), ApiConfig::default())).unwrap();

    TestApp {
        _dir: dir,
        store,
        tiss,
        server,
        schema_path,
    }
}

async fn ready_app() -> TestApp {
    let app = app();
    app.tiss.ensure_ready().await.unwrap();
    app
}

// ============================================================================
// Health Tests
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_is_always_up() {
        let app = app();
        let response = app.server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_not_ready_before_provisioning() {
        let app = app();
        let response = app.server.get("/health/ready").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = response.json();
        assert_eq!(body["status"], "not_ready");
        assert_eq!(body["schema"], "not_found");
        assert_eq!(body["schema_usable"], false);
        assert_eq!(body["data_store"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_after_provisioning() {
        let app = ready_app().await;
        let response = app.server.get("/health/ready").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["schema"], "loaded");
    }

    #[tokio::test]
    async fn test_not_ready_when_store_down() {
        let app = ready_app().await;
        app.store.set_unavailable(true);

        let response = app.server.get("/health/ready").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = response.json();
        assert_eq!(body["schema_usable"], true);
        assert_eq!(body["data_store"]["status"], "unhealthy");
    }
}

// ============================================================================
// Claim Document Tests
// ============================================================================

mod claim_document_tests {
    use super::*;

    #[tokio::test]
    async fn test_claim_xml_envelope() {
        let app = ready_app().await;
        let response = app.server.get("/api/v1/claims/7/xml").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["claim_id"], 7);

        let xml = body["xml_content"].as_str().unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("Maria Silva"));
        assert!(xml.contains("12.345.678/0001-90"));
        assert!(xml.contains("PREMIUM001"));
        assert!(xml.contains("250.00"));

        let filename = body["filename"].as_str().unwrap();
        assert!(filename.starts_with("tiss_claim_7_"));
        assert!(filename.ends_with(".xml"));
        assert!(body["generated_at"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_claim_is_404() {
        let app = ready_app().await;
        let response = app.server.get("/api/v1/claims/999/xml").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "Not found: Claim with ID 999 not found");
    }

    #[tokio::test]
    async fn test_missing_patient_named_in_404() {
        let app = ready_app().await;
        app.store.remove_patient(PatientId::new(1));

        let response = app.server.get("/api/v1/claims/7/xml").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["message"], "Not found: Patient with ID 1 not found");
    }

    #[tokio::test]
    async fn test_non_numeric_id_rejected() {
        let app = ready_app().await;
        let response = app.server.get("/api/v1/claims/abc/xml").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_document_is_422_with_details() {
        let app = ready_app().await;
        std::fs::write(&app.schema_path, STRICT_XSD).unwrap();

        let response = app.server.get("/api/v1/claims/7/xml").await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().starts_with("Generated XML failed validation: "));
        assert!(!body["details"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_500() {
        let app = ready_app().await;
        app.store.set_unavailable(true);

        let response = app.server.get("/api/v1/claims/7/xml").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "data_access_error");
    }

    #[tokio::test]
    async fn test_download_is_xml_attachment() {
        let app = ready_app().await;
        let response = app.server.get("/api/v1/claims/7/xml/download").await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/xml");

        let disposition = response.header("content-disposition");
        let disposition = disposition.to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"tiss_claim_7_"));
        assert!(disposition.ends_with(".xml\""));

        let text = response.text();
        assert!(text.starts_with("<?xml"));
        assert!(text.contains("<ans:nomeBeneficiario>Maria Silva</ans:nomeBeneficiario>"));
    }

    #[tokio::test]
    async fn test_validate_claim_reports_schema() {
        let app = ready_app().await;
        let response = app.server.get("/api/v1/claims/7/xml/validate").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["is_valid"], true);
        assert_eq!(body["errors"].as_array().unwrap().len(), 0);
        assert_eq!(body["schema_info"]["status"], "loaded");
    }

    #[tokio::test]
    async fn test_validate_claim_returns_200_when_invalid() {
        let app = ready_app().await;
        std::fs::write(&app.schema_path, STRICT_XSD).unwrap();

        let response = app.server.get("/api/v1/claims/7/xml/validate").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["is_valid"], false);
        assert!(body["errors"][0].as_str().unwrap().starts_with("Line "));
    }

    #[tokio::test]
    async fn test_validate_claim_before_provisioning() {
        let app = app();
        let response = app.server.get("/api/v1/claims/7/xml/validate").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["is_valid"], false);
        assert_eq!(body["errors"][0], "TISS XSD schema file not found");
        assert_eq!(body["schema_info"]["status"], "not_found");
    }
}

// ============================================================================
// Schema Endpoint Tests
// ============================================================================

mod schema_tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_info_unavailable_before_provisioning() {
        let app = app();
        let response = app.server.get("/api/v1/tiss/schema").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = response.json();
        assert_eq!(body["error"], "service_unavailable");
        assert!(body["message"].as_str().unwrap().contains("Schema not loaded"));
    }

    #[tokio::test]
    async fn test_schema_info_after_provisioning() {
        let app = ready_app().await;
        let response = app.server.get("/api/v1/tiss/schema").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "loaded");
        assert_eq!(body["target_namespace"], TISS_NAMESPACE);
        assert_eq!(body["root_elements"][0], "mensagemTISS");
        assert!(body["file_size"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_validate_generated_document() {
        let app = ready_app().await;
        let xml = app.tiss.generate(ClaimId::new(7)).await.unwrap();

        let response = app.server.post("/api/v1/tiss/validate").text(xml).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["is_valid"], true);
    }

    #[tokio::test]
    async fn test_validate_malformed_document() {
        let app = ready_app().await;
        let response = app
            .server
            .post("/api/v1/tiss/validate")
            .text("<ans:mensagemTISS><unclosed>")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["is_valid"], false);
        assert!(body["errors"][0].as_str().unwrap().starts_with("XML syntax error"));
    }

    #[tokio::test]
    async fn test_validate_empty_body_rejected() {
        let app = ready_app().await;
        let response = app.server.post("/api/v1/tiss/validate").text("   ").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "bad_request");
    }
}

// ============================================================================
// Audit Middleware Tests
// ============================================================================

mod audit_tests {
    use super::*;

    #[tokio::test]
    async fn test_request_id_assigned() {
        let app = app();
        let response = app.server.get("/health").await;

        let id = response.header("x-request-id");
        assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_request_id_propagated() {
        let app = app();
        let response = app
            .server
            .get("/health")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("req-123"),
            )
            .await;

        assert_eq!(response.header("x-request-id"), "req-123");
    }

    #[tokio::test]
    async fn test_request_id_on_errors() {
        let app = ready_app().await;
        let response = app.server.get("/api/v1/claims/999/xml").await;

        response.assert_status_not_found();
        assert!(!response.header("x-request-id").is_empty());
    }
}
