use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use backoffice_tests::{call, demo_app};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn demo_login_returns_profile() -> Result<()> {
    let app = demo_app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/login",
        Some(json!({"email": "Demo@Test.com ", "password": "demo123"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["ad"], "Demo");
    assert_eq!(body["rol"], "admin");
    assert_eq!(body["company_id"], 1);
    assert!(body.get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn other_credentials_fail_without_store() -> Result<()> {
    let app = demo_app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/login",
        Some(json!({"email": "demo@test.com", "password": "wrong"})),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Kullanıcı bulunamadı");
    Ok(())
}

#[tokio::test]
async fn wrong_method_is_json_405() -> Result<()> {
    let app = demo_app();
    let (status, body) = call(&app, Method::GET, "/api/login", None).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");

    let (status, _) = call(&app, Method::PATCH, "/api/employees", None).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}

#[tokio::test]
async fn unknown_route_names_the_route() -> Result<()> {
    let app = demo_app();
    let (status, body) = call(&app, Method::GET, "/api/nope/here", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
    assert_eq!(body["route"], "nope/here");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let response = demo_app().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await?.to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["error"], "Invalid JSON body");
    Ok(())
}

#[tokio::test]
async fn register_validates_staff_code_and_fields() -> Result<()> {
    let app = demo_app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"ad": "Ayşe", "soyad": "Yılmaz", "email": "a@b.com", "employee_id": "123"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Personel ID tam 4 haneli olmalıdır!");
    assert!(body["detail"].is_string());

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"ad": "Ayşe", "soyad": "Yılmaz", "email": "a@b.com", "employee_id": 123})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Personel ID tam 4 haneli olmalıdır!");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"ad": "Ayşe", "soyad": "Yılmaz", "email": "n@b.com", "employee_id": 4321})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employee"]["employee_id"], "4321");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"ad": "Ayşe", "email": "a@b.com", "employee_id": "1234"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Tüm alanları doldurunuz!");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"ad": "Ayşe", "soyad": "Yılmaz", "email": "A@B.com", "employee_id": "1234"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Kayıt başarılı! (Demo Mode)");
    assert_eq!(body["employee"]["email"], "a@b.com");
    Ok(())
}

#[tokio::test]
async fn staff_permissions_require_an_id() -> Result<()> {
    let app = demo_app();
    let (status, body) = call(&app, Method::GET, "/api/staff-permissions", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Staff ID is required");

    let (status, admin) = call(&app, Method::GET, "/api/staff-permissions?staffId=1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin["manage_roles"], true);
    assert_eq!(admin["POS_ADMIN"], true);

    let (_, staff) = call(&app, Method::GET, "/api/staff/4242/permissions", None).await?;
    assert_eq!(staff["POS_VIEW"], true);
    assert!(staff.get("manage_roles").is_none());
    Ok(())
}

#[tokio::test]
async fn salary_rejects_bad_months() -> Result<()> {
    let app = demo_app();
    let (status, body) = call(&app, Method::GET, "/api/salary/3010/2025-13", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Expected YYYY-MM");

    let (status, body) = call(&app, Method::GET, "/api/salary/3010/2025-10", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ay"], "2025-10");

    let (status, _) = call(&app, Method::GET, "/api/salary/0000/2025-10", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn demo_reads_serve_fixtures() -> Result<()> {
    let app = demo_app();
    let (status, health) = call(&app, Method::GET, "/api/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["demo_mode"], true);
    assert_eq!(health["db_ok"], false);

    let (_, employees) = call(&app, Method::GET, "/api/employees", None).await?;
    assert_eq!(employees.as_array().map(Vec::len), Some(2));

    let (_, calendar) = call(&app, Method::GET, "/api/shift-calendar", None).await?;
    assert_eq!(calendar.as_array().map(Vec::len), Some(14));

    let (_, week) = call(
        &app,
        Method::GET,
        "/api/shift-calendar/weekly/3010?start_date=2025-10-27",
        None,
    )
    .await?;
    assert_eq!(week["start_date"], "2025-10-27");
    assert_eq!(week["shifts"].as_array().map(Vec::len), Some(7));

    let (_, meal) = call(&app, Method::GET, "/api/yemek-ucreti/employee/9999", None).await?;
    assert_eq!(meal["id"], 0);
    assert_eq!(meal["gunluk_ucret"], 0.0);
    Ok(())
}

#[tokio::test]
async fn demo_writes_echo_records() -> Result<()> {
    let app = demo_app();
    let (status, record) = call(
        &app,
        Method::POST,
        "/api/attendance",
        Some(json!({"employee_id": 3010, "type": "check_in"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["status"], "present");
    assert!(record["check_in"].is_string());

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/attendance",
        Some(json!({"employee_id": "3010", "type": "lunch"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, leave) = call(
        &app,
        Method::POST,
        "/api/leave-records",
        Some(json!({"employee_id": "3010", "start_date": "2025-11-03", "end_date": "2025-11-05"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(leave["days"], 3);
    assert_eq!(leave["status"], "pending");
    assert_eq!(leave["leave_type"], "annual");

    let (status, role) = call(
        &app,
        Method::PUT,
        "/api/roles/chef",
        Some(json!({"permissions": {"kiosk": true}})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(role["message"], "Role updated (demo)");
    Ok(())
}

#[tokio::test]
async fn task_ratings_are_bounded_and_need_completion() -> Result<()> {
    let app = demo_app();
    let (status, body) = call(&app, Method::PUT, "/api/tasks/3", Some(json!({"puan": 99}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Puan 1-5 arasında olmalıdır");

    let (status, body) = call(&app, Method::PUT, "/api/tasks/1", Some(json!({"puan": 3}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Sadece tamamlanan görevler puanlanabilir");

    let (status, body) = call(&app, Method::PUT, "/api/tasks/3", Some(json!({"puan": 4}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["puan"], 4);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({"baslik": "Kasa", "puan": 5})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
