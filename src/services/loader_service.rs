use lazy_static::lazy_static;

use crate::config::{DashboardConfig, UsersSource};
use crate::models::{CanonicalUser, RawUserRecord};
use crate::services::normalizer_service::normalize_user;
use crate::utils::DashboardError;

lazy_static! {
    static ref HTTP_CLIENT: reqwest::Client = reqwest::Client::new();
}

/// Carrega e normaliza o users.json. Uma chamada por renderização do
/// dashboard; sem retry e sem timeout próprio. A ordem e a
/// cardinalidade da entrada são preservadas.
pub async fn load_users(config: &DashboardConfig) -> Result<Vec<CanonicalUser>, DashboardError> {
    let raw = fetch_raw_records(&config.source).await?;
    log::info!("✅ {} usuários carregados de {}", raw.len(), config.source);
    Ok(raw
        .iter()
        .map(|record| normalize_user(record, config.variant))
        .collect())
}

async fn fetch_raw_records(source: &UsersSource) -> Result<Vec<RawUserRecord>, DashboardError> {
    match source {
        UsersSource::Url(url) => {
            log::info!("🌐 Buscando users.json em {}", url);
            let response = HTTP_CLIENT
                .get(url)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(|e| load_failure(format!("Erro ao carregar: {}", e)))?;

            if !response.status().is_success() {
                return Err(load_failure(format!(
                    "Erro ao carregar: {}",
                    response.status().as_u16()
                )));
            }

            response
                .json::<Vec<RawUserRecord>>()
                .await
                .map_err(|e| load_failure(format!("Erro ao interpretar JSON: {}", e)))
        }
        UsersSource::File(path) => {
            log::info!("📄 Lendo users.json de {}", path.display());
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| load_failure(format!("Erro ao carregar: {}", e)))?;

            serde_json::from_slice::<Vec<RawUserRecord>>(&bytes)
                .map_err(|e| load_failure(format!("Erro ao interpretar JSON: {}", e)))
        }
    }
}

// Falha de carga nunca é silenciosa
fn load_failure(message: String) -> DashboardError {
    log::error!("❌ {}", message);
    DashboardError::LoadFailure(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::config::SchemaVariant;

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

    #[tokio::test]
    async fn test_load_preserves_order_and_cardinality() {
        let path = temp_json(
            r#"[
                {"userId": "u-1", "userName": "Ana Silva"},
                {"id": "u-2", "name": "Bruno Lima"},
                {"email": "sem.nome@example.com"}
            ]"#,
        );
        let users = load_users(&config_for(path.clone())).await.unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(users.len(), 3);
        assert_eq!(users[0].id, "u-1");
        assert_eq!(users[1].id, "u-2");
        assert!(!users[2].id.is_empty()); // id gerado
    }

    #[tokio::test]
    async fn test_missing_file_is_load_failure() {
        let path = std::env::temp_dir().join("users-inexistente.json");
        let result = load_users(&config_for(path)).await;
        match result {
            Err(DashboardError::LoadFailure(msg)) => {
                assert!(msg.starts_with("Erro ao carregar"));
            }
            other => panic!("esperava LoadFailure, veio {:?}", other.map(|u| u.len())),
        }
    }

    #[actix_web::test]
    async fn test_http_404_yields_load_failure_with_status() {
        use actix_web::{App, HttpServer};

        // Servidor sem rotas: qualquer caminho responde 404
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = HttpServer::new(|| App::new())
            .workers(1)
            .listen(listener)
            .unwrap()
            .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let mut config = config_for(PathBuf::new());
        config.source = UsersSource::Url(format!("http://{}/users.json", addr));
        let result = load_users(&config).await;
        handle.stop(false).await;

        match result {
            Err(DashboardError::LoadFailure(msg)) => {
                assert!(msg.contains("404"), "mensagem sem o status: {}", msg);
            }
            other => panic!("esperava LoadFailure, veio {:?}", other.map(|u| u.len())),
        }
    }

    #[actix_web::test]
    async fn test_http_404_renders_error_panel_end_to_end() {
        use actix_web::{App, HttpServer};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = HttpServer::new(|| App::new())
            .workers(1)
            .listen(listener)
            .unwrap()
            .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let mut config = config_for(PathBuf::new());
        config.source = UsersSource::Url(format!("http://{}/users.json", addr));
        let error = load_users(&config).await.unwrap_err();
        handle.stop(false).await;

        let page = crate::services::renderer_service::render_error_page(&error);
        assert!(page.contains("404"));
        assert!(page.contains("Erro ao carregar dados"));
        assert!(!page.contains("user-card"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_load_failure() {
        let path = temp_json(r#"{"não é": "um array"}"#);
        let result = load_users(&config_for(path.clone())).await;
        std::fs::remove_file(path).ok();

        assert!(matches!(result, Err(DashboardError::LoadFailure(_))));
    }

    #[tokio::test]
    async fn test_empty_array_loads_as_empty_list() {
        let path = temp_json("[]");
        let users = load_users(&config_for(path.clone())).await.unwrap();
        std::fs::remove_file(path).ok();

        assert!(users.is_empty());
    }
}
