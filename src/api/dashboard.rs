use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::api::metrics;
use crate::config::DashboardConfig;
use crate::services::{aggregator_service, loader_service, renderer_service};

/// GET /
/// Renderiza o dashboard completo. Cada requisição equivale a um
/// carregamento da página: busca o users.json, normaliza, agrega e
/// monta o HTML. Falha de carga vira o painel de erro no lugar da
/// lista - a página em si continua respondendo.
pub async fn get_dashboard(config: web::Data<DashboardConfig>) -> HttpResponse {
    metrics::increment_page_renders();
    let now = Utc::now();

    match loader_service::load_users(&config).await {
        Ok(users) => {
            let stats = aggregator_service::aggregate_users(&users, &config, now);
            log::info!(
                "🖥️ Dashboard renderizado: {} usuários, {} recentes/ativos",
                stats.total,
                stats.recent_or_active
            );
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(renderer_service::render_page(&users, &stats, &config, now))
        }
        Err(e) => {
            metrics::increment_load_failures();
            log::error!("❌ Dashboard sem dados: {}", e);
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(renderer_service::render_error_page(&e))
        }
    }
}
