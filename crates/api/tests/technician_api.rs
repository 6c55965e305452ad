//! HTTP-level tests for the technician workflow.

mod common;

use axum::http::StatusCode;
use common::{
    assigned_report, audit_count, expect_status, get_auth, post_json_auth, put_json_auth, seed,
    tech_moves,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_shows_assigned_reports_with_photos(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let id = assigned_report(&app, &fx).await;
    sqlx::query(
        "INSERT INTO archivos_reporte \
            (id_reporte, nombre_archivo, url, tipo_mime, tamano_bytes, tipo_usuario_subida, \
             id_usuario_subida, es_evidencia_inicial) \
         VALUES ($1, 'fuga.jpg', '/uploads/fuga.jpg', 'image/jpeg', 2048, 'ciudadano', $2, TRUE)",
    )
    .bind(id)
    .bind(fx.citizen.id)
    .execute(&pool)
    .await
    .unwrap();

    let json = expect_status(
        get_auth(app.clone(), "/api/tecnico/reportes", &fx.water_tech.token).await,
        StatusCode::OK,
    )
    .await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], id);
    assert_eq!(data[0]["estado_codigo"], "asignado");
    assert_eq!(data[0]["fotos"][0]["nombre_archivo"], "fuga.jpg");

    let json = expect_status(
        get_auth(app, "/api/tecnico/reportes", &fx.roads_tech.token).await,
        StatusCode::OK,
    )
    .await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assigned_cannot_jump_to_resolved(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let id = assigned_report(&app, &fx).await;
    let json = expect_status(
        put_json_auth(
            app,
            &format!("/api/tecnico/reportes/{id}/estado"),
            json!({ "nuevo_estado": "Resuelto" }),
            &fx.water_tech.token,
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    assert_eq!(json["code"], "INVALID_TRANSITION");
    assert_eq!(json["details"]["estados_permitidos"], json!(["En Proceso"]));
    assert_eq!(audit_count(&pool, id).await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unassigned_technician_gets_404(pool: PgPool) {
    let fx = seed(&pool).await;
    let other_water_tech = common::insert_staff(
        &pool,
        "agua2@example.com",
        cocode_core::roles::Role::Technician,
        Some(common::DEPT_WATER),
    )
    .await;
    let app = common::build_test_app(pool.clone());

    let id = assigned_report(&app, &fx).await;
    tech_moves(&app, &fx, id, &["en_proceso"]).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/tecnico/reportes/{id}/estado"),
        json!({ "nuevo_estado": "Resuelto" }),
        &other_water_tech.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        app,
        &format!("/api/tecnico/reportes/{id}/detalle"),
        &other_water_tech.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let status: String = sqlx::query_scalar(
        "SELECT e.codigo FROM reportes r JOIN estados_reporte e ON e.id = r.id_estado WHERE r.id = $1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, "en_proceso");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_report_is_404_not_400(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/tecnico/reportes/42/estado",
        json!({ "nuevo_estado": "Resuelto" }),
        &fx.water_tech.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn in_progress_reaches_materials_and_back(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let id = assigned_report(&app, &fx).await;
    tech_moves(&app, &fx, id, &["En Proceso", "pendiente_materiales", "en_proceso"]).await;

    let json = expect_status(
        put_json_auth(
            app,
            &format!("/api/tecnico/reportes/{id}/estado"),
            json!({ "nuevo_estado": "resuelto", "comentario": "Tubería reemplazada" }),
            &fx.water_tech.token,
        )
        .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["data"]["estado_codigo"], "resuelto");
    assert!(!json["data"]["fecha_resolucion"].is_null());
    // creation, approval, assignment, four technician moves
    assert_eq!(audit_count(&pool, id).await, 7);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_status_name_is_400(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool);

    let id = assigned_report(&app, &fx).await;
    let response = put_json_auth(
        app,
        &format!("/api/tecnico/reportes/{id}/estado"),
        json!({ "nuevo_estado": "Terminado" }),
        &fx.water_tech.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn follow_up_logs_time_without_changing_status(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let id = assigned_report(&app, &fx).await;
    let uri = format!("/api/tecnico/reportes/{id}/seguimiento");

    let response = post_json_auth(
        app.clone(),
        &uri,
        json!({ "comentario": "Revisión", "tiempo_invertido_horas": 1000 }),
        &fx.water_tech.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        &uri,
        json!({ "comentario": "   " }),
        &fx.water_tech.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        &uri,
        json!({ "comentario": "Revisión" }),
        &fx.roads_tech.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = expect_status(
        post_json_auth(
            app.clone(),
            &uri,
            json!({
                "comentario": "Se excavó para ubicar la fuga",
                "tiempo_invertido_horas": 2.5,
                "accion_tomada": "Excavación",
            }),
            &fx.water_tech.token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["tipo_seguimiento"], "actualizacion");
    assert_eq!(json["data"]["tiempo_invertido_horas"], 2.5);
    assert_eq!(json["data"]["accion_tomada"], "Excavación");
    assert!(json["data"]["estado_nuevo"].is_null());

    let detail = expect_status(
        get_auth(
            app,
            &format!("/api/tecnico/reportes/{id}/detalle"),
            &fx.water_tech.token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(detail["data"]["estado_codigo"], "asignado");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_is_forbidden_for_unassigned_technician(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool);

    let id = assigned_report(&app, &fx).await;
    let uri = format!("/api/tecnico/reportes/{id}/historial");

    let response = get_auth(app.clone(), &uri, &fx.roads_tech.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = expect_status(
        get_auth(app, &uri, &fx.water_tech.token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn follow_up_alongside_status_change_records_both(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let id = assigned_report(&app, &fx).await;
    let before = audit_count(&pool, id).await;

    let note_uri = format!("/api/tecnico/reportes/{id}/seguimiento");
    let status_uri = format!("/api/tecnico/reportes/{id}/estado");
    let (note, change) = tokio::join!(
        post_json_auth(
            app.clone(),
            &note_uri,
            json!({ "comentario": "Llegando al sitio", "tiempo_invertido_horas": 0.5 }),
            &fx.water_tech.token,
        ),
        put_json_auth(
            app.clone(),
            &status_uri,
            json!({ "nuevo_estado": "en_proceso" }),
            &fx.water_tech.token,
        ),
    );
    expect_status(note, StatusCode::OK).await;
    let json = expect_status(change, StatusCode::OK).await;
    assert_eq!(json["data"]["estado_codigo"], "en_proceso");

    assert_eq!(audit_count(&pool, id).await, before + 2);
    let kinds: Vec<String> = sqlx::query_scalar(
        "SELECT tipo_seguimiento FROM seguimiento_reportes \
         WHERE id_reporte = $1 ORDER BY id DESC LIMIT 2",
    )
    .bind(id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert!(kinds.contains(&"actualizacion".to_string()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn follow_up_on_unassigned_report_writes_nothing(pool: PgPool) {
    let fx = seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let id = assigned_report(&app, &fx).await;
    let before = audit_count(&pool, id).await;

    let json = expect_status(
        post_json_auth(
            app,
            &format!("/api/tecnico/reportes/{id}/seguimiento"),
            json!({ "comentario": "No me corresponde" }),
            &fx.roads_tech.token,
        )
        .await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(audit_count(&pool, id).await, before);
}
