//! Tests for the registry handlers.

use super::*;
use crate::domain::{ProfileFields, UserProfile};
use crate::inbound::http::build_app;
use crate::inbound::http::cors::ALLOW_ORIGIN;
use crate::inbound::http::envelope::EnvelopeStatus;
use crate::inbound::http::error::INVALID_PAYLOAD;
use crate::inbound::http::routes::{METHOD_NOT_ALLOWED, ROUTE_NOT_FOUND};
use crate::inbound::http::test_utils::MockPorts;
use actix_web::http::StatusCode;
use actix_web::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn ana() -> UserProfile {
    UserProfile::try_from_fields(ProfileFields {
        given_names: "Ana".to_owned(),
        surnames: "Pérez".to_owned(),
        national_id: "001".to_owned(),
        email: "ana@example.com".to_owned(),
        phone: "0999999999".to_owned(),
        photo: "https://example.com/ana.png".to_owned(),
    })
    .expect("valid profile")
}

async fn post(ports: MockPorts, uri: &str, body: Value) -> (StatusCode, ApiEnvelope) {
    let app = actix_test::init_service(build_app(ports.into_state())).await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let envelope = actix_test::read_body_json(response).await;
    (status, envelope)
}

#[actix_web::test]
async fn register_returns_created_envelope() {
    let mut ports = MockPorts::default();
    ports
        .registration
        .expect_register()
        .withf(|user| {
            user.profile().national_id().as_ref() == "001"
                && user.profile().given_names() == "Ana"
                && user.password() == "secret"
        })
        .times(1)
        .returning(|_| Ok(()));

    let (status, envelope) = post(
        ports,
        "/api/registro",
        json!({"cedula": "001", "nombres": "Ana", "contrasena": "secret"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(envelope, ApiEnvelope::success(REGISTERED));
}

#[rstest]
#[case::blank_national_id(json!({"cedula": "  ", "contrasena": "secret"}), "La cédula es obligatoria")]
#[case::missing_password(json!({"cedula": "001"}), "La contraseña es obligatoria")]
#[case::bad_email(json!({"cedula": "001", "contrasena": "x", "correo": "ana"}), "El correo no es válido")]
#[actix_web::test]
async fn register_rejects_invalid_fields(#[case] body: Value, #[case] message: &str) {
    let mut ports = MockPorts::default();
    ports.registration.expect_register().times(0);

    let (status, envelope) = post(ports, "/api/registro", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope, ApiEnvelope::error(message));
}

#[actix_web::test]
async fn register_surfaces_conflict() {
    let mut ports = MockPorts::default();
    ports
        .registration
        .expect_register()
        .times(1)
        .returning(|_| Err(Error::conflict("Ya existe un usuario con esta cédula")));

    let (status, envelope) = post(
        ports,
        "/api/registro",
        json!({"cedula": "001", "contrasena": "secret"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(envelope.mensaje, "Ya existe un usuario con esta cédula");
}

#[rstest]
#[actix_web::test]
async fn login_returns_profile_without_password(ana: UserProfile) {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .withf(|creds| creds.national_id().as_ref() == "001" && creds.password() == "secret")
        .times(1)
        .return_once(move |_| Ok(ana));

    let app = actix_test::init_service(build_app(ports.into_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"cedula": "001", "contrasena": "secret"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["mensaje"], LOGGED_IN);
    assert_eq!(body["data"]["cedula"], "001");
    assert_eq!(body["data"]["apellidos"], "Pérez");
    let data = body["data"].as_object().expect("data object");
    assert!(!data.contains_key("contrasena"));
    assert!(!data.contains_key("contrasena_hash"));
}

#[actix_web::test]
async fn login_rejects_invalid_credentials() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .times(1)
        .returning(|_| Err(Error::unauthorized("Credenciales inválidas")));

    let (status, envelope) = post(
        ports,
        "/api/login",
        json!({"cedula": "001", "contrasena": "wrong"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(envelope.status, EnvelopeStatus::Error);
    assert_eq!(envelope.mensaje, "Credenciales inválidas");
}

#[rstest]
#[actix_web::test]
async fn find_user_returns_profile(ana: UserProfile) {
    let mut ports = MockPorts::default();
    ports
        .lookup
        .expect_find_user()
        .withf(|id| id.as_ref() == "001")
        .times(1)
        .return_once(move |_| Ok(ana));

    let (status, envelope) = post(ports, "/api/obtener-usuario", json!({"cedula": " 001 "})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.mensaje, FOUND);
    let data = envelope.data.expect("profile data");
    assert_eq!(data.cedula, "001");
    assert_eq!(data.nombres, "Ana");
}

#[actix_web::test]
async fn find_user_reports_not_found() {
    let mut ports = MockPorts::default();
    ports
        .lookup
        .expect_find_user()
        .times(1)
        .returning(|_| Err(Error::not_found("Usuario no encontrado")));

    let (status, envelope) = post(ports, "/api/obtener-usuario", json!({"cedula": "404"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(envelope, ApiEnvelope::error("Usuario no encontrado"));
}

#[rstest]
#[case("/api/registro")]
#[case("/api/login")]
#[case("/api/obtener-usuario")]
#[actix_web::test]
async fn malformed_json_is_a_bad_request(#[case] uri: &str) {
    let app = actix_test::init_service(build_app(MockPorts::default().into_state())).await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_payload("{\"cedula\": ")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: ApiEnvelope = actix_test::read_body_json(response).await;
    assert_eq!(envelope, ApiEnvelope::error(INVALID_PAYLOAD));
}

#[rstest]
#[case("/api/registro")]
#[case("/api/login")]
#[case("/api/obtener-usuario")]
#[actix_web::test]
async fn wrong_method_is_not_allowed(#[case] uri: &str) {
    let app = actix_test::init_service(build_app(MockPorts::default().into_state())).await;
    let request = actix_test::TestRequest::get().uri(uri).to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
    let envelope: ApiEnvelope = actix_test::read_body_json(response).await;
    assert_eq!(envelope, ApiEnvelope::error(METHOD_NOT_ALLOWED));
}

#[actix_web::test]
async fn unknown_route_is_not_found_with_cors_headers() {
    let app = actix_test::init_service(build_app(MockPorts::default().into_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/desconocido")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let origin = response
        .headers()
        .get(ACCESS_CONTROL_ALLOW_ORIGIN)
        .expect("allow-origin header");
    assert_eq!(origin.to_str().expect("ascii"), ALLOW_ORIGIN);
    let envelope: ApiEnvelope = actix_test::read_body_json(response).await;
    assert_eq!(envelope, ApiEnvelope::error(ROUTE_NOT_FOUND));
}
