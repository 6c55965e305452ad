#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use cocode_api::auth::jwt::{generate_access_token, JwtConfig};
use cocode_api::auth::password::hash_password;
use cocode_api::config::ServerConfig;
use cocode_api::router::build_app_router;
use cocode_api::state::AppState;
use cocode_core::roles::Role;
use cocode_core::types::DbId;

pub const TEST_PASSWORD: &str = "clave-segura-123";

/// Department ids seeded by the migrations.
pub const DEPT_ROADS: DbId = 1;
pub const DEPT_WATER: DbId = 2;

/// Problem type "Fuga de agua" (department Agua Potable).
pub const PROBLEM_WATER_LEAK: DbId = 2;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        json_logs: false,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

/// POST a body as-is with the given content type.
pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// Read the full body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status code and return the parsed body.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> Value {
    let actual = response.status();
    let json = body_json(response).await;
    assert_eq!(actual, status, "unexpected status, body: {json}");
    json
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A seeded account and a token for it.
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub id: DbId,
    pub email: String,
    pub token: String,
}

/// Two zones with a leader each, a citizen in zone A, an administrator,
/// and technicians in the water and roads departments.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub zone_a: DbId,
    pub zone_b: DbId,
    pub citizen: TestAccount,
    pub citizen_b: TestAccount,
    pub leader: TestAccount,
    pub leader_b: TestAccount,
    pub admin: TestAccount,
    pub water_tech: TestAccount,
    pub roads_tech: TestAccount,
}

pub fn token_for(id: DbId, role: Role) -> String {
    generate_access_token(id, role, &test_config().jwt).unwrap()
}

pub async fn insert_zone(pool: &PgPool, nombre: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO zonas (nombre) VALUES ($1) RETURNING id")
        .bind(nombre)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_citizen(pool: &PgPool, email: &str, zone_id: DbId) -> TestAccount {
    let id: DbId = sqlx::query_scalar(
        "INSERT INTO ciudadanos_colaboradores (nombre, email, password_hash, id_zona) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind("Vecina de Prueba")
    .bind(email)
    .bind(hash_password(TEST_PASSWORD).unwrap())
    .bind(zone_id)
    .fetch_one(pool)
    .await
    .unwrap();
    TestAccount {
        id,
        email: email.to_string(),
        token: token_for(id, Role::Citizen),
    }
}

pub async fn insert_leader(pool: &PgPool, email: &str, zone_id: DbId) -> TestAccount {
    let id: DbId = sqlx::query_scalar(
        "INSERT INTO usuarios (nombre, email, password_hash, id_zona) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind("Líder de Prueba")
    .bind(email)
    .bind(hash_password(TEST_PASSWORD).unwrap())
    .bind(zone_id)
    .fetch_one(pool)
    .await
    .unwrap();
    TestAccount {
        id,
        email: email.to_string(),
        token: token_for(id, Role::Leader),
    }
}

pub async fn insert_staff(pool: &PgPool, email: &str, role: Role, dept: Option<DbId>) -> TestAccount {
    let id: DbId = sqlx::query_scalar(
        "INSERT INTO administradores (nombre, email, password_hash, rol, id_departamento) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind("Personal de Prueba")
    .bind(email)
    .bind(hash_password(TEST_PASSWORD).unwrap())
    .bind(role.as_str())
    .bind(dept)
    .fetch_one(pool)
    .await
    .unwrap();
    TestAccount {
        id,
        email: email.to_string(),
        token: token_for(id, role),
    }
}

pub async fn seed(pool: &PgPool) -> Fixture {
    let zone_a = insert_zone(pool, "Zona 3").await;
    let zone_b = insert_zone(pool, "Zona 7").await;
    Fixture {
        zone_a,
        zone_b,
        citizen: insert_citizen(pool, "vecina@example.com", zone_a).await,
        citizen_b: insert_citizen(pool, "vecino@example.com", zone_b).await,
        leader: insert_leader(pool, "lider.a@example.com", zone_a).await,
        leader_b: insert_leader(pool, "lider.b@example.com", zone_b).await,
        admin: insert_staff(pool, "admin@example.com", Role::Admin, None).await,
        water_tech: insert_staff(pool, "agua@example.com", Role::Technician, Some(DEPT_WATER)).await,
        roads_tech: insert_staff(pool, "vias@example.com", Role::Technician, Some(DEPT_ROADS)).await,
    }
}

// ---------------------------------------------------------------------------
// Workflow shortcuts
// ---------------------------------------------------------------------------

pub fn water_leak_body() -> Value {
    json!({
        "titulo": "Fuga de agua",
        "descripcion": "Hay una fuga constante en la tubería principal",
        "direccion": "5a Avenida 10-20, Zona 3, Colonia Centro",
        "id_tipo_problema": PROBLEM_WATER_LEAK,
    })
}

/// Create a water-leak report as `citizen` and return its id.
pub async fn create_report(app: &Router, citizen: &TestAccount) -> DbId {
    let response =
        post_json_auth(app.clone(), "/api/ciudadano/reportes", water_leak_body(), &citizen.token).await;
    let json = expect_status(response, StatusCode::CREATED).await;
    json["data"]["reporte"]["id"].as_i64().unwrap()
}

/// Create a report and have the zone leader approve it.
pub async fn approved_report(app: &Router, fx: &Fixture) -> DbId {
    let id = create_report(app, &fx.citizen).await;
    let response = post_json_auth(
        app.clone(),
        &format!("/api/lider/reportes/{id}/aprobar"),
        json!({}),
        &fx.leader.token,
    )
    .await;
    expect_status(response, StatusCode::OK).await;
    id
}

/// Create, approve and assign a report to the water technician.
pub async fn assigned_report(app: &Router, fx: &Fixture) -> DbId {
    let id = approved_report(app, fx).await;
    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/reportes/{id}/asignar"),
        json!({ "id_tecnico": fx.water_tech.id }),
        &fx.admin.token,
    )
    .await;
    expect_status(response, StatusCode::OK).await;
    id
}

/// Move an assigned report through `statuses` as the water technician.
pub async fn tech_moves(app: &Router, fx: &Fixture, id: DbId, statuses: &[&str]) {
    for status in statuses {
        let response = put_json_auth(
            app.clone(),
            &format!("/api/tecnico/reportes/{id}/estado"),
            json!({ "nuevo_estado": status }),
            &fx.water_tech.token,
        )
        .await;
        expect_status(response, StatusCode::OK).await;
    }
}

/// Drive a report all the way to `Resuelto`.
pub async fn resolved_report(app: &Router, fx: &Fixture) -> DbId {
    let id = assigned_report(app, fx).await;
    tech_moves(app, fx, id, &["en_proceso", "resuelto"]).await;
    id
}

/// Count audit rows for a report.
pub async fn audit_count(pool: &PgPool, report_id: DbId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM seguimiento_reportes WHERE id_reporte = $1")
        .bind(report_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
