use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::models::{CanonicalUser, DashboardStats};
use crate::services::{aggregator_service, loader_service};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<CanonicalUser>,
    pub count: usize,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: DashboardStats,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PhoneResponse {
    pub success: bool,
    pub phone: String,
}

/// GET /api/v1/users
/// Lista canônica, na ordem do users.json.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "Canonical user list", body = UsersResponse),
        (status = 500, description = "users.json could not be loaded")
    )
)]
pub async fn get_users(config: web::Data<DashboardConfig>) -> HttpResponse {
    match loader_service::load_users(&config).await {
        Ok(users) => {
            let count = users.len();
            HttpResponse::Ok().json(UsersResponse {
                success: true,
                users,
                count,
            })
        }
        Err(e) => load_failure_response(&e),
    }
}

/// GET /api/v1/stats
/// Os quatro contadores agregados do dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "Users",
    responses(
        (status = 200, description = "Aggregate counters", body = StatsResponse),
        (status = 500, description = "users.json could not be loaded")
    )
)]
pub async fn get_stats(config: web::Data<DashboardConfig>) -> HttpResponse {
    match loader_service::load_users(&config).await {
        Ok(users) => {
            let stats = aggregator_service::aggregate_users(&users, &config, Utc::now());
            HttpResponse::Ok().json(StatsResponse {
                success: true,
                stats,
            })
        }
        Err(e) => load_failure_response(&e),
    }
}

/// GET /api/v1/users/{id}/phone
/// Telefone de um usuário, para o botão de copiar. 404 quando o
/// usuário não existe ou não tem telefone.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/phone",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Canonical user id")
    ),
    responses(
        (status = 200, description = "User phone number", body = PhoneResponse),
        (status = 404, description = "User unknown or without phone"),
        (status = 500, description = "users.json could not be loaded")
    )
)]
pub async fn get_user_phone(
    config: web::Data<DashboardConfig>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();

    match loader_service::load_users(&config).await {
        Ok(users) => match users.iter().find(|u| u.id == id) {
            Some(user) if !user.phone.is_empty() => HttpResponse::Ok().json(PhoneResponse {
                success: true,
                phone: user.phone.clone(),
            }),
            Some(_) => HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": format!("Usuário '{}' não tem telefone cadastrado", id)
            })),
            None => HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": format!("Usuário '{}' não encontrado", id)
            })),
        },
        Err(e) => load_failure_response(&e),
    }
}

fn load_failure_response(error: &crate::utils::DashboardError) -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({
        "success": false,
        "error": error.message()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use std::path::PathBuf;

    use crate::config::{SchemaVariant, UsersSource};

    fn config_for(path: PathBuf) -> DashboardConfig {
        DashboardConfig {
            variant: SchemaVariant::Store,
            source: UsersSource::File(path),
            recent_login_days: 1,
            status_recent_days: 7,
            tracked_role: "admin".to_string(),
        }
    }

    fn temp_json(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("users-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[actix_web::test]
    async fn test_get_users_returns_canonical_list() {
        let path = temp_json(
            r#"[{"userId": "u-1", "userName": "Ana Silva", "phone": "+55 11 9999-0000"}]"#,
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(path.clone())))
                .route("/api/v1/users", web::get().to(get_users)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/users").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        std::fs::remove_file(path).ok();

        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 1);
        assert_eq!(body["users"][0]["id"], "u-1");
        assert_eq!(body["users"][0]["name"], "Ana Silva");
    }

    #[actix_web::test]
    async fn test_get_user_phone_404_when_absent() {
        let path = temp_json(r#"[{"userId": "u-1", "userName": "Ana Silva"}]"#);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(path.clone())))
                .route("/api/v1/users/{id}/phone", web::get().to(get_user_phone)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/users/u-1/phone")
            .to_request();
        let resp = test::call_service(&app, req).await;
        std::fs::remove_file(path).ok();

        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_get_stats_on_empty_input() {
        let path = temp_json("[]");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config_for(path.clone())))
                .route("/api/v1/stats", web::get().to(get_stats)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/stats").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        std::fs::remove_file(path).ok();

        assert_eq!(body["stats"]["total"], 0);
        assert_eq!(body["stats"]["recent_or_active"], 0);
        assert_eq!(body["stats"]["group_count"], 0);
        assert_eq!(body["stats"]["flag_count"], 0);
    }
}
