use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GitHub Import Service API",
        version = "1.0.0",
        description = "Lists users from the GitHub Users API and imports them into MongoDB.\n\n**Features:**\n- Cursor-based listing (`idGreaterThan`)\n- Filtered multi-page import (admins, avatar, login prefix)\n- Idempotent create-or-update keyed by login\n- Health monitoring and metrics"
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::list_from_github,
        crate::api::users::list_from_github_filtered,
        crate::api::users::save,
        crate::api::users::import_github_page,
        crate::api::users::import_from_github,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
            crate::models::User,
        )
    ),
    tags(
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
        (name = "Users", description = "GitHub user listing and import endpoints."),
    )
)]
pub struct ApiDoc;
