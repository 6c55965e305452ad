//! HTTP-level tests for administrator listing and technician assignment.

mod common;

use axum::http::StatusCode;
use common::{
    approved_report, assigned_report, create_report, expect_status, get_auth, put_json_auth, seed,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn assignment_stamps_technician_and_date(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let id = approved_report(&app, &fx).await;
    let json = expect_status(
        put_json_auth(
            app,
            &format!("/api/admin/reportes/{id}/asignar"),
            json!({ "id_tecnico": fx.water_tech.id }),
            &fx.admin.token,
        )
        .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["data"]["estado_codigo"], "asignado");
    assert_eq!(json["data"]["id_administrador_asignado"], fx.water_tech.id);
    assert!(!json["data"]["fecha_asignacion"].is_null());

    let (kind, actor): (String, String) = sqlx::query_as(
        "SELECT tipo_seguimiento, tipo_usuario FROM seguimiento_reportes \
         WHERE id_reporte = $1 ORDER BY id DESC LIMIT 1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(kind, "asignacion");
    assert_eq!(actor, "administrador");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn technician_must_match_department(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool);

    let id = approved_report(&app, &fx).await;
    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/reportes/{id}/asignar"),
        json!({ "id_tecnico": fx.roads_tech.id }),
        &fx.admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        &format!("/api/admin/reportes/{id}/asignar"),
        json!({ "id_tecnico": fx.admin.id }),
        &fx.admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_approved_or_reopened_reports_can_be_assigned(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool);

    let fresh = create_report(&app, &fx.citizen).await;
    let json = expect_status(
        put_json_auth(
            app.clone(),
            &format!("/api/admin/reportes/{fresh}/asignar"),
            json!({ "id_tecnico": fx.water_tech.id }),
            &fx.admin.token,
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "INVALID_TRANSITION");

    let assigned = assigned_report(&app, &fx).await;
    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/reportes/{assigned}/asignar"),
        json!({ "id_tecnico": fx.water_tech.id }),
        &fx.admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        "/api/admin/reportes/9999/asignar",
        json!({ "id_tecnico": fx.water_tech.id }),
        &fx.admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_lists_all_zones_with_filters(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool);

    create_report(&app, &fx.citizen).await;
    create_report(&app, &fx.citizen_b).await;
    approved_report(&app, &fx).await;

    let json = expect_status(
        get_auth(app.clone(), "/api/admin/reportes", &fx.admin.token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["total"], 3);

    let json = expect_status(
        get_auth(
            app.clone(),
            &format!("/api/admin/reportes?zona={}", fx.zone_b),
            &fx.admin.token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["total"], 1);

    let json = expect_status(
        get_auth(
            app,
            "/api/admin/reportes?estado=Aprobado%20por%20L%C3%ADder",
            &fx.admin.token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["total"], 1);
}
