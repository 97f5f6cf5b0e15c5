use actix_web::HttpResponse;
use std::sync::atomic::{AtomicU64, Ordering};

static PAGE_RENDER_COUNT: AtomicU64 = AtomicU64::new(0);
static LOAD_FAILURE_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_page_renders() {
    PAGE_RENDER_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_load_failures() {
    LOAD_FAILURE_COUNT.fetch_add(1, Ordering::Relaxed);
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Dashboard metrics in Prometheus text format")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let renders = PAGE_RENDER_COUNT.load(Ordering::Relaxed);
    let failures = LOAD_FAILURE_COUNT.load(Ordering::Relaxed);

    let metrics = format!(
        "# HELP dashboard_page_renders_total Total number of dashboard page renders\n\
         # TYPE dashboard_page_renders_total counter\n\
         dashboard_page_renders_total {}\n\
         \n\
         # HELP dashboard_load_failures_total Total number of users.json load failures\n\
         # TYPE dashboard_load_failures_total counter\n\
         dashboard_load_failures_total {}\n",
        renders, failures
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics)
}
