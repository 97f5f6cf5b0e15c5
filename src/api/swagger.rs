use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Dashboard Service API",
        version = "1.0.0",
        description = "Server-rendered user dashboard. \n\n**Features:**\n- users.json loading (local file or remote URL)\n- Canonical user normalization with fallbacks\n- Aggregate counters (total, recent/active, groups, flags)\n- HTML card rendering with clipboard copy affordance",
        contact(
            name = "User Dashboard Team"
        )
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::get_users,
        crate::api::users::get_stats,
        crate::api::users::get_user_phone,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::users::UsersResponse,
            crate::api::users::StatsResponse,
            crate::api::users::PhoneResponse,
            crate::models::CanonicalUser,
            crate::models::DashboardStats,
        )
    ),
    tags(
        (name = "Health", description = "Health check and metrics endpoints for monitoring service status."),
        (name = "Users", description = "Canonical user list, aggregate counters and phone lookup backing the dashboard page.")
    )
)]
pub struct ApiDoc;
