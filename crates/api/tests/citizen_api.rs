//! HTTP-level tests for citizen report creation, listing and comments.

mod common;

use axum::http::StatusCode;
use common::{
    audit_count, create_report, expect_status, get_auth, post_json_auth, seed, water_leak_body,
};
use regex::Regex;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn citizen_creates_address_only_report(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        "/api/ciudadano/reportes",
        water_leak_body(),
        &fx.citizen.token,
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;

    let report = &json["data"]["reporte"];
    assert_eq!(report["estado_codigo"], "nuevo");
    assert_eq!(report["estado_nombre"], "Nuevo");
    assert_eq!(report["prioridad"], "Media");
    assert_eq!(report["id_zona"], fx.zone_a);
    assert_eq!(report["tipo_usuario_creador"], "ciudadano");
    assert_eq!(report["id_ciudadano_creador"], fx.citizen.id);
    assert!(report["latitud"].is_null());

    let pattern = Regex::new(r"^RPT-\d{6}$").unwrap();
    assert!(pattern.is_match(report["numero_reporte"].as_str().unwrap()));

    assert_eq!(json["data"]["ubicacion"]["tipo"], "direccion");
    assert_eq!(json["data"]["ubicacion"]["tiene_coordenadas"], false);

    let id = report["id"].as_i64().unwrap();
    assert_eq!(audit_count(&pool, id).await, 1);
    let kind: String = sqlx::query_scalar(
        "SELECT tipo_seguimiento FROM seguimiento_reportes WHERE id_reporte = $1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(kind, "creacion");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gps_coordinates_round_trip(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool);

    let mut body = water_leak_body();
    body["latitud"] = json!(14.6);
    body["longitud"] = json!(-90.5);
    body["precision_metros"] = json!(8.5);
    body["prioridad"] = json!("Alta");

    let json = expect_status(
        post_json_auth(app, "/api/ciudadano/reportes", body, &fx.citizen.token).await,
        StatusCode::CREATED,
    )
    .await;

    let report = &json["data"]["reporte"];
    assert_eq!(report["latitud"], 14.6);
    assert_eq!(report["longitud"], -90.5);
    assert_eq!(report["metodo_ubicacion"], "gps");
    assert_eq!(report["prioridad"], "Alta");
    assert_eq!(json["data"]["ubicacion"]["tipo"], "gps");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn coordinates_outside_bounds_are_rejected(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let mut body = water_leak_body();
    body["latitud"] = json!(0);
    body["longitud"] = json!(0);

    let json = expect_status(
        post_json_auth(app, "/api/ciudadano/reportes", body, &fx.citizen.token).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM reportes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_creation_bodies_are_400(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool);

    let mut missing_title = water_leak_body();
    missing_title.as_object_mut().unwrap().remove("titulo");

    let mut short_address = water_leak_body();
    short_address["direccion"] = json!("Zona 3");

    let mut one_coordinate = water_leak_body();
    one_coordinate["latitud"] = json!(14.6);

    let mut unknown_type = water_leak_body();
    unknown_type["id_tipo_problema"] = json!(999);

    let mut bad_priority = water_leak_body();
    bad_priority["prioridad"] = json!("Urgente");

    for body in [missing_title, short_address, one_coordinate, unknown_type, bad_priority] {
        let response =
            post_json_auth(app.clone(), "/api/ciudadano/reportes", body, &fx.citizen.token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_numbers_are_unique(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    for _ in 0..3 {
        create_report(&app, &fx.citizen).await;
    }

    let distinct: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT numero_reporte)::BIGINT FROM reportes")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(distinct, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_shows_only_own_reports_with_stats(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool);

    create_report(&app, &fx.citizen).await;
    create_report(&app, &fx.citizen).await;
    create_report(&app, &fx.citizen_b).await;

    let json = expect_status(
        get_auth(app, "/api/ciudadano/reportes", &fx.citizen.token).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["total"], 2);
    assert_eq!(json["estadisticas"]["total"], 2);
    assert_eq!(json["estadisticas"]["por_estado"]["nuevo"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_includes_trail_and_hides_other_citizens_reports(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool);

    let id = create_report(&app, &fx.citizen).await;
    let uri = format!("/api/ciudadano/reportes/{id}");

    let json = expect_status(
        get_auth(app.clone(), &uri, &fx.citizen.token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["historial"].as_array().unwrap().len(), 1);
    assert!(json["data"]["fotos"].as_array().unwrap().is_empty());

    let response = get_auth(app, &uri, &fx.citizen_b.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn citizen_comment_rules(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let id = create_report(&app, &fx.citizen).await;
    let uri = format!("/api/ciudadano/reportes/{id}/comentario");

    let response =
        post_json_auth(app.clone(), &uri, json!({ "comentario": "ok" }), &fx.citizen.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        &uri,
        json!({ "comentario": "Sigue saliendo agua" }),
        &fx.citizen_b.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = expect_status(
        post_json_auth(
            app,
            &uri,
            json!({ "comentario": "  Sigue saliendo agua  " }),
            &fx.citizen.token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["comentario"], "Sigue saliendo agua");
    assert_eq!(json["data"]["tipo_seguimiento"], "comentario");
    assert!(json["data"]["estado_nuevo"].is_null());
    assert_eq!(audit_count(&pool, id).await, 2);
}
