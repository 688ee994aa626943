//! End-to-end submission flow against a mocked intake backend.

use forms::models::{FieldValue, FileMeta, FormState, RequestState};
use services::services::controller::{FormController, FormPhase, Notice};
use services::services::submission::{SubmitError, SubmitOutcome, SupportClient};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_attachment(dir: &TempDir, name: &str) -> FileMeta {
    let bytes = b"%PDF-1.4 test fixture";
    let file_path = dir.path().join(name);
    std::fs::write(&file_path, bytes).unwrap();
    FileMeta {
        file_name: name.to_string(),
        size_bytes: bytes.len() as u64,
        content_type: "application/pdf".to_string(),
        path: file_path,
    }
}

fn individual_form(dir: &TempDir) -> FormState {
    let mut form = FormState::new();
    for (field, value) in [
        ("full_name", "نورة السبيعي"),
        ("national_id", "2011223344"),
        ("birth_date", "1990-02-20"),
        ("gender", "female"),
        ("marital_status", "widowed"),
        ("family_members", "3"),
        ("phone", "0533334444"),
        ("email", "noura@example.com"),
        ("city", "مكة"),
        ("district", "العزيزية"),
        ("housing_type", "owned"),
        ("monthly_income", "1500"),
        ("income_source", "social_security"),
        ("support_type", "financial"),
        ("requested_amount", "8000"),
        ("reason", "ديون متراكمة"),
        ("bank_name", "مصرف الإنماء"),
        ("iban", "SA0380000000608010167519"),
    ] {
        form.set(field, FieldValue::text(value));
    }
    form.set(
        "id_copy",
        FieldValue::File(write_attachment(dir, "id.pdf")),
    );
    form.set(
        "iban_certificate",
        FieldValue::File(write_attachment(dir, "iban.pdf")),
    );
    form
}

fn receipt_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "request_number": "REQ-2024-0042",
        "phone_number": "0533334444",
        "message": "تم استلام طلبكم بنجاح"
    }))
}

#[tokio::test]
async fn test_individual_submission_accepted() {
    utils::log::init();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/support-requests/individual"))
        .respond_with(receipt_response())
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = SupportClient::new(server.uri()).unwrap();
    let outcome = client.submit_individual(&individual_form(&dir)).await.unwrap();

    match outcome {
        SubmitOutcome::Accepted(receipt) => {
            assert_eq!(receipt.request_number, "REQ-2024-0042");
        }
        other => panic!("expected Accepted, got {other:?}"),
    }

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"iban\""));
    assert!(body.contains("SA0380000000608010167519"));
    assert!(body.contains("filename=\"id.pdf\""));
    // cleared/blank fields never appear as parts
    assert!(!body.contains("housing_type_other"));
}

#[tokio::test]
async fn test_rejection_body_surfaces_backend_field_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/support-requests/individual"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "errors": {
                "bank_iban": ["رقم الآيبان غير مقبول"],
                "mobile": "رقم الجوال مسجل مسبقاً"
            }
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = SupportClient::new(server.uri()).unwrap();
    let outcome = client.submit_individual(&individual_form(&dir)).await.unwrap();

    match outcome {
        SubmitOutcome::Rejected(fields) => {
            assert_eq!(fields["bank_iban"], "رقم الآيبان غير مقبول");
            assert_eq!(fields["mobile"], "رقم الجوال مسجل مسبقاً");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_service_disabled_maps_to_dedicated_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/support-requests/individual"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({"message": "استقبال الطلبات متوقف حالياً"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = SupportClient::new(server.uri()).unwrap();
    let outcome = client.submit_individual(&individual_form(&dir)).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::ServiceDisabled("استقبال الطلبات متوقف حالياً".to_string())
    );
}

#[tokio::test]
async fn test_server_error_is_a_typed_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/support-requests/individual"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = SupportClient::new(server.uri()).unwrap();
    let err = client
        .submit_individual(&individual_form(&dir))
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Http { status: 500, .. }));
}

#[tokio::test]
async fn test_organization_controller_flow_sends_goals() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/support-requests/institutional"))
        .respond_with(receipt_response())
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut controller = FormController::organization();
    for (field, value) in [
        ("org_name", "جمعية البر الخيرية"),
        ("license_number", "1200"),
        ("establishment_date", "2010-03-15"),
        ("employee_count", "12"),
        ("city", "الرياض"),
        ("district", "الملز"),
        ("address", "شارع الستين"),
        ("contact_name", "سارة الزهراني"),
        ("contact_phone", "0559876543"),
        ("contact_email", "info@example.org"),
        ("bank_name", "بنك الرياض"),
        ("iban", "SA4420000001234567891234"),
        ("project_name", "سقيا الماء"),
        ("project_description", "توفير مياه شرب نظيفة"),
        ("target_beneficiaries", "300"),
        ("requested_amount", "150000"),
        ("duration_months", "12"),
    ] {
        controller.on_input(field, value);
    }
    controller.on_select("org_type", "charity");
    controller.on_select("project_type", "relief");
    controller.on_file("license_copy", Some(write_attachment(&dir, "license.pdf")));
    controller.on_file("iban_certificate", Some(write_attachment(&dir, "iban.pdf")));
    controller.on_file("project_plan", Some(write_attachment(&dir, "plan.pdf")));
    controller.update_goal(0, "حفر بئر");
    assert!(controller.add_goal());
    controller.update_goal(1, "كفالة 20 يتيماً");

    let client = SupportClient::new(server.uri()).unwrap();
    controller.submit(&client).await;

    assert!(
        matches!(controller.phase(), FormPhase::Submitted(_)),
        "notice: {:?}, errors: {:?}",
        controller.notice(),
        controller.errors()
    );

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"goals[]\""));
    assert!(body.contains("حفر بئر"));
    assert!(body.contains("كفالة 20 يتيماً"));
}

#[tokio::test]
async fn test_controller_surfaces_disabled_intake_without_losing_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/support-requests/individual"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut controller = FormController::individual();
    let form = individual_form(&dir);
    for field in [
        "full_name", "national_id", "birth_date", "family_members", "phone", "email", "city",
        "district", "monthly_income", "requested_amount", "reason", "bank_name", "iban",
    ] {
        controller.on_input(field, form.text(field).unwrap());
    }
    for field in ["gender", "marital_status", "housing_type", "income_source", "support_type"] {
        controller.on_select(field, form.text(field).unwrap());
    }
    controller.on_file("id_copy", form.file("id_copy").cloned());
    controller.on_file("iban_certificate", form.file("iban_certificate").cloned());

    let client = SupportClient::new(server.uri()).unwrap();
    controller.submit(&client).await;

    assert!(matches!(
        controller.notice(),
        Some(Notice::ServiceDisabled(_))
    ));
    assert_eq!(controller.form().text("full_name"), Some("نورة السبيعي"));
}

#[tokio::test]
async fn test_request_status_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/support-requests/REQ-2024-0042/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "request_number": "REQ-2024-0042",
            "state": "under_review",
            "message": null
        })))
        .mount(&server)
        .await;

    let client = SupportClient::new(server.uri()).unwrap();
    let status = client.request_status("REQ-2024-0042").await.unwrap();
    assert_eq!(status.state, RequestState::UnderReview);
}
